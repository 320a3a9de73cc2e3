//! The environment: a chain of binding frames.
//!
//! A frame maps names to values and points at its parent; the root of
//! every chain is an interpreter's global frame. Frames are shared via
//! `Rc` because a closure keeps its defining frame alive after the
//! evaluator has left it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::Value;

#[derive(Debug, Default)]
pub struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Frame>>>,
}

impl Frame {
    /// A parentless frame: the root of an interpreter's chain.
    pub fn global() -> Rc<RefCell<Frame>> {
        Rc::new(RefCell::new(Frame::default()))
    }

    pub fn child(parent: &Rc<RefCell<Frame>>) -> Rc<RefCell<Frame>> {
        Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent: Some(parent.clone()),
        }))
    }

    /// Binds `name` in this frame. Rebinding replaces the old value, so
    /// lookup always sees the newest binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }
}

/// Resolves `name` starting at `frame` and walking parents up to the
/// global frame. A binding still holding the `letrec` placeholder is
/// reported as unbound.
pub fn get(frame: &Rc<RefCell<Frame>>, name: &str) -> Result<Value> {
    let mut cur = frame.clone();
    loop {
        let next = {
            let f = cur.borrow();
            match f.bindings.get(name) {
                Some(Value::Unspecified) => return Err(Error::UnboundSymbol(name.to_string())),
                Some(value) => return Ok(value.clone()),
                None => f.parent.clone(),
            }
        };
        match next {
            Some(parent) => cur = parent,
            None => return Err(Error::UnboundSymbol(name.to_string())),
        }
    }
}

/// `set!`: replaces the nearest existing binding of `name`.
pub fn set(frame: &Rc<RefCell<Frame>>, name: &str, value: Value) -> Result<()> {
    let mut cur = frame.clone();
    loop {
        if cur.borrow().contains(name) {
            cur.borrow_mut().define(name, value);
            return Ok(());
        }
        let next = cur.borrow().parent.clone();
        match next {
            Some(parent) => cur = parent,
            None => return Err(Error::UnboundSymbol(name.to_string())),
        }
    }
}
