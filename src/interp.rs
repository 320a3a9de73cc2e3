//! The interpreter instance and the top-level driver.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use log::debug;

use crate::env::Frame;
use crate::error::Result;
use crate::parser::parse_program;
use crate::primitives;
use crate::value::Value;

/// One interpreter: a global frame with the primitives installed, plus
/// the driver loop. Nothing is process-wide, so instances are
/// independent and tests can each run their own.
pub struct Interpreter {
    pub(crate) globals: Rc<RefCell<Frame>>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Frame::global();
        primitives::install(&globals);
        Interpreter { globals }
    }

    /// Evaluates one top-level expression in a fresh, empty child of the
    /// global frame.
    pub fn eval_toplevel(&self, expr: &Value) -> Result<Value> {
        let frame = Frame::child(&self.globals);
        self.eval(expr, &frame)
    }

    /// Parses and runs a whole program, printing each non-void result on
    /// its own line as it is produced. The first error stops the run.
    pub fn run(&self, source: &str, out: &mut impl Write) -> Result<()> {
        let forest = parse_program(source)?;
        debug!("parsed {} top-level expressions", forest.len());
        for expr in &forest {
            let result = self.eval_toplevel(expr)?;
            debug!("{expr} evaluated to a {}", result.kind());
            match result {
                Value::Void => {}
                value => writeln!(out, "{value}").expect("write to output stream"),
            }
        }
        Ok(())
    }
}
