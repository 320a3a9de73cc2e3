use pretty_assertions::assert_eq;
use vesper::error::Error;
use vesper::Interpreter;

/// Runs a whole program and returns everything it printed.
fn run(source: &str) -> String {
    let mut out = Vec::new();
    Interpreter::new()
        .run(source, &mut out)
        .unwrap_or_else(|err| panic!("running {source:?} failed: {err}"));
    String::from_utf8(out).unwrap()
}

/// Runs a failing program and returns the error together with whatever
/// was printed before it.
fn run_err(source: &str) -> (String, Error) {
    let mut out = Vec::new();
    let err = Interpreter::new().run(source, &mut out).unwrap_err();
    (String::from_utf8(out).unwrap(), err)
}

#[test]
fn arithmetic_and_promotion() {
    assert_eq!(run("(+ 1 2 3)"), "6\n");
    assert_eq!(run("(+ 1 2.0)"), "3.000000\n");
    assert_eq!(run("(/ 7 2)"), "3.500000\n");
    assert_eq!(run("(/ 6 2)"), "3\n");
}

#[test]
fn lexical_scope() {
    assert_eq!(run("(define x 10) (let ((x 1) (y x)) (+ x y))"), "11\n");
}

#[test]
fn closure_capture() {
    assert_eq!(
        run("(define make-adder (lambda (n) (lambda (x) (+ x n)))) ((make-adder 3) 4)"),
        "7\n"
    );
}

#[test]
fn mutual_recursion_via_letrec() {
    let source = "(letrec ((even? (lambda (n) (if (= n 0) #t (odd? (- n 1))))) \
                           (odd?  (lambda (n) (if (= n 0) #f (even? (- n 1)))))) \
                    (even? 10))";
    assert_eq!(run(source), "#t\n");
}

#[test]
fn conditionals() {
    assert_eq!(run("(cond ((< 3 2) 1) ((= 2 2) 2) (else 3))"), "2\n");
    assert_eq!(run("(if (> 1 2) #t #f)"), "#f\n");
}

#[test]
fn list_construction_and_projection() {
    assert_eq!(run("(car (cdr (cons 1 (cons 2 (cons 3 (quote ()))))))"), "2\n");
    assert_eq!(run("(cons 1 (cons 2 (quote ())))"), "(1 2)\n");
    assert_eq!(run("(cons 1 2)"), "(1 . 2)\n");
    assert_eq!(run("'(1 (2 3) 4)"), "(1 (2 3) 4)\n");
    assert_eq!(run("(quote ())"), "()\n");
}

#[test]
fn strings_print_verbatim() {
    assert_eq!(run("\"hello world\""), "\"hello world\"\n");
}

#[test]
fn procedures_print_opaquely() {
    assert_eq!(run("(lambda (x) x)"), "#<procedure>\n");
    assert_eq!(run("+"), "#<procedure>\n");
}

#[test]
fn void_results_print_nothing() {
    assert_eq!(run("(define a 1)"), "");
    assert_eq!(run("(define a 1) a (define b 2) (+ a b)"), "1\n3\n");
    assert_eq!(run("(begin)"), "");
}

#[test]
fn deep_recursion_does_not_overflow() {
    let source = "(define sum (lambda (n acc) (if (= n 0) acc (sum (- n 1) (+ acc n))))) \
                  (sum 20000 0)";
    assert_eq!(run(source), "200010000\n");
}

#[test]
fn results_before_an_error_are_still_printed() {
    let (printed, err) = run_err("(+ 1 2) (undefined) (+ 3 4)");
    assert_eq!(printed, "3\n");
    assert_eq!(err, Error::UnboundSymbol("undefined".to_string()));
}

#[test]
fn syntax_errors_abort_before_any_evaluation() {
    let (printed, err) = run_err("(+ 1 2) (oops");
    assert_eq!(printed, "");
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn error_messages_read_well() {
    let (_, err) = run_err("(car 1 2)");
    assert_eq!(err.to_string(), "car: expected 1 argument(s), got 2");
    let (_, err) = run_err("ghost");
    assert_eq!(err.to_string(), "unbound symbol: ghost");
}
