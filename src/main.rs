use std::fs::read_to_string;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use vesper::Interpreter;

/// Batch interpreter for a small Scheme-subset language.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Input file path. Reads from standard input when omitted.
    #[arg(short, long, value_name = "FILE")]
    input_path: Option<PathBuf>,
}

fn read_source(cli: &Cli) -> io::Result<String> {
    match &cli.input_path {
        Some(path) => read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let source = match read_source(&cli) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("cannot read input: {err}");
            return ExitCode::FAILURE;
        }
    };

    let interpreter = Interpreter::new();
    let mut out = io::stdout().lock();
    match interpreter.run(&source, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            writeln!(out, "Evaluation error: {err}").expect("write to stdout");
            ExitCode::FAILURE
        }
    }
}
