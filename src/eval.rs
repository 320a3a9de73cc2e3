//! The evaluator: expression dispatch, special-form handlers and
//! application.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, trace};

use crate::env::{self, Frame};
use crate::error::{Error, Result};
use crate::interp::Interpreter;
use crate::list;
use crate::special::SpecialForm;
use crate::value::{Closure, Value};

impl Interpreter {
    /// Evaluates `expr` in `frame`. Deeply nested programs grow the
    /// native stack in segments instead of overflowing it.
    pub fn eval(&self, expr: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || self.eval_inner(expr, frame))
    }

    fn eval_inner(&self, expr: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        match expr {
            Value::Int(_)
            | Value::Real(_)
            | Value::Bool(_)
            | Value::Str(_)
            | Value::Closure(_)
            | Value::Primitive(_)
            | Value::Void
            | Value::Unspecified => Ok(expr.clone()),
            Value::Symbol(name) => env::get(frame, name),
            Value::Null => Err(Error::BadForm("() cannot be evaluated".to_string())),
            Value::Pair(head, tail) => {
                // Special forms are matched on the head text before any
                // environment lookup; their names are not rebindable.
                if let Value::Symbol(name) = head.as_ref() {
                    if let Ok(form) = SpecialForm::from_str(name) {
                        return self.eval_form(form, tail, frame);
                    }
                }
                let operator = self.eval(head, frame)?;
                let arg_exprs = list::elements(tail)?;
                let mut args = Vec::with_capacity(arg_exprs.len());
                for arg in &arg_exprs {
                    args.push(self.eval(arg, frame)?);
                }
                self.apply(&operator, args)
            }
        }
    }

    /// Applies an operator to already-evaluated arguments.
    pub fn apply(&self, operator: &Value, args: Vec<Value>) -> Result<Value> {
        match operator {
            Value::Primitive(prim) => {
                trace!("apply {}", prim.name);
                (prim.run)(&args)
            }
            Value::Closure(closure) => {
                trace!("apply closure of ({})", closure.params.join(" "));
                if args.len() != closure.params.len() {
                    return Err(Error::arity(
                        "#<procedure>",
                        closure.params.len().to_string(),
                        args.len(),
                    ));
                }
                let frame = Frame::child(&closure.env);
                {
                    let mut bindings = frame.borrow_mut();
                    for (name, value) in closure.params.iter().zip(args) {
                        bindings.define(name, value);
                    }
                }
                self.eval_sequence(&closure.body, &frame)
            }
            other => Err(Error::NotApplicable(other.kind().to_string())),
        }
    }

    /// Evaluates expressions in order; the last value wins, and an empty
    /// sequence is void.
    fn eval_sequence(&self, body: &[Value], frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let mut result = Value::Void;
        for expr in body {
            result = self.eval(expr, frame)?;
        }
        Ok(result)
    }

    fn eval_form(
        &self,
        form: SpecialForm,
        args: &Value,
        frame: &Rc<RefCell<Frame>>,
    ) -> Result<Value> {
        match form {
            SpecialForm::Quote => {
                let items = exact_args(form, args, 1)?;
                Ok(items[0].clone())
            }
            SpecialForm::If => self.eval_if(args, frame),
            SpecialForm::Define => self.eval_define(args, frame),
            SpecialForm::Set => self.eval_set(args, frame),
            SpecialForm::Lambda => self.eval_lambda(args, frame),
            SpecialForm::Let => self.eval_let(args, frame),
            SpecialForm::LetStar => self.eval_let_star(args, frame),
            SpecialForm::LetRec => self.eval_letrec(args, frame),
            SpecialForm::Begin => {
                let body = list::elements(args)?;
                self.eval_sequence(&body, frame)
            }
            SpecialForm::Cond => self.eval_cond(args, frame),
            SpecialForm::And => self.eval_and(args, frame),
            SpecialForm::Or => self.eval_or(args, frame),
        }
    }

    fn eval_if(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let items = exact_args(SpecialForm::If, args, 3)?;
        let test = self.eval(&items[0], frame)?;
        if test.is_truthy() {
            self.eval(&items[1], frame)
        } else {
            self.eval(&items[2], frame)
        }
    }

    /// `define` evaluates in the current frame but always binds in the
    /// global frame; there are no internal definitions.
    fn eval_define(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let items = exact_args(SpecialForm::Define, args, 2)?;
        let name = match &items[0] {
            Value::Symbol(name) => name.clone(),
            other => {
                return Err(Error::BadForm(format!(
                    "define expects a symbol, got {other}"
                )));
            }
        };
        let value = self.eval(&items[1], frame)?;
        debug!("define {name}");
        self.globals.borrow_mut().define(&name, value);
        Ok(Value::Void)
    }

    fn eval_set(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let items = exact_args(SpecialForm::Set, args, 2)?;
        let name = match &items[0] {
            Value::Symbol(name) => name.clone(),
            other => {
                return Err(Error::BadForm(format!("set! expects a symbol, got {other}")));
            }
        };
        let value = self.eval(&items[1], frame)?;
        env::set(frame, &name, value)?;
        Ok(Value::Void)
    }

    fn eval_lambda(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let (params_form, body_form) = match args {
            Value::Pair(h, t) => (h.as_ref(), t.as_ref()),
            _ => {
                return Err(Error::BadForm(
                    "lambda needs a parameter list and a body".to_string(),
                ));
            }
        };
        let params = parse_params(params_form)?;
        let body = list::elements(body_form)?;
        if body.is_empty() {
            return Err(Error::BadForm("lambda body is empty".to_string()));
        }
        Ok(Value::Closure(Rc::new(Closure {
            params,
            body,
            env: frame.clone(),
        })))
    }

    /// All init expressions run in the enclosing frame, then the body
    /// runs in one child frame holding every binding.
    fn eval_let(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let (bindings_form, body) = split_body(SpecialForm::Let, args)?;
        let child = Frame::child(frame);
        for (name, init) in parse_bindings(SpecialForm::Let, &bindings_form)? {
            if child.borrow().contains(&name) {
                return Err(Error::BadForm(format!("duplicate binding {name} in let")));
            }
            let value = self.eval(&init, frame)?;
            child.borrow_mut().define(&name, value);
        }
        self.eval_sequence(&body, &child)
    }

    /// One nested frame per binding; each init sees the binders to its
    /// left.
    fn eval_let_star(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let (bindings_form, body) = split_body(SpecialForm::LetStar, args)?;
        let mut seen: Vec<String> = Vec::new();
        let mut cur = frame.clone();
        for (name, init) in parse_bindings(SpecialForm::LetStar, &bindings_form)? {
            if seen.contains(&name) {
                return Err(Error::BadForm(format!("duplicate binding {name} in let*")));
            }
            let value = self.eval(&init, &cur)?;
            let child = Frame::child(&cur);
            child.borrow_mut().define(&name, value);
            seen.push(name);
            cur = child;
        }
        self.eval_sequence(&body, &cur)
    }

    /// Binders exist (as placeholders) while their inits run, so
    /// mutually recursive closures resolve. Reading a binder before its
    /// value is computed is an unbound-symbol error.
    fn eval_letrec(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let (bindings_form, body) = split_body(SpecialForm::LetRec, args)?;
        let bindings = parse_bindings(SpecialForm::LetRec, &bindings_form)?;
        let child = Frame::child(frame);
        for (name, _) in &bindings {
            if child.borrow().contains(name) {
                return Err(Error::BadForm(format!("duplicate binding {name} in letrec")));
            }
            child.borrow_mut().define(name, Value::Unspecified);
        }
        let mut values = Vec::with_capacity(bindings.len());
        for (_, init) in &bindings {
            values.push(self.eval(init, &child)?);
        }
        for ((name, _), value) in bindings.iter().zip(values) {
            child.borrow_mut().define(name, value);
        }
        self.eval_sequence(&body, &child)
    }

    fn eval_cond(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        for clause in list::elements(args)? {
            let items = list::elements(&clause)?;
            let [test, body @ ..] = items.as_slice() else {
                return Err(Error::BadForm("empty cond clause".to_string()));
            };
            if body.is_empty() {
                return Err(Error::BadForm(format!("cond clause {clause} has no body")));
            }
            let selected = match test {
                Value::Symbol(name) if name == "else" => true,
                test => self.eval(test, frame)?.is_truthy(),
            };
            if selected {
                return self.eval_sequence(body, frame);
            }
        }
        Ok(Value::Void)
    }

    fn eval_and(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        let mut result = Value::Bool(true);
        for expr in list::elements(args)? {
            result = self.eval(&expr, frame)?;
            if !result.is_truthy() {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn eval_or(&self, args: &Value, frame: &Rc<RefCell<Frame>>) -> Result<Value> {
        for expr in list::elements(args)? {
            let value = self.eval(&expr, frame)?;
            if value.is_truthy() {
                return Ok(value);
            }
        }
        Ok(Value::Bool(false))
    }
}

/// The unevaluated argument list of a form, with an exact-count check.
fn exact_args(form: SpecialForm, args: &Value, n: usize) -> Result<Vec<Value>> {
    let items = list::elements(args)?;
    if items.len() != n {
        return Err(Error::arity(&form.to_string(), n.to_string(), items.len()));
    }
    Ok(items)
}

/// Splits a binding form into its bindings list and its non-empty body.
fn split_body(form: SpecialForm, args: &Value) -> Result<(Value, Vec<Value>)> {
    let items = list::elements(args)?;
    let [bindings, body @ ..] = items.as_slice() else {
        return Err(Error::BadForm(format!("{form} needs a bindings list")));
    };
    if body.is_empty() {
        return Err(Error::BadForm(format!("{form} body is empty")));
    }
    Ok((bindings.clone(), body.to_vec()))
}

/// Each binding must be a two-element list headed by a symbol.
fn parse_bindings(form: SpecialForm, bindings: &Value) -> Result<Vec<(String, Value)>> {
    let mut out = Vec::new();
    for binding in list::elements(bindings)? {
        let pair = list::elements(&binding)?;
        match pair.as_slice() {
            [Value::Symbol(name), init] => out.push((name.clone(), init.clone())),
            _ => {
                return Err(Error::BadForm(format!("bad binding {binding} in {form}")));
            }
        }
    }
    Ok(out)
}

/// Formal parameters: a proper list of distinct symbols.
fn parse_params(form: &Value) -> Result<Vec<String>> {
    let mut params = Vec::new();
    for item in list::elements(form)? {
        match item {
            Value::Symbol(name) => {
                if params.contains(&name) {
                    return Err(Error::BadForm(format!("duplicate parameter {name}")));
                }
                params.push(name);
            }
            other => {
                return Err(Error::BadForm(format!("parameter {other} is not a symbol")));
            }
        }
    }
    Ok(params)
}
