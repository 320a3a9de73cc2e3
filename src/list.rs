//! Helpers over the pair spine of proper lists.

use crate::error::{Error, Result};
use crate::value::Value;

pub fn cons(head: Value, tail: Value) -> Value {
    Value::pair(head, tail)
}

pub fn head(value: &Value) -> Result<Value> {
    match value {
        Value::Pair(h, _) => Ok((**h).clone()),
        other => Err(Error::Type(format!("expected a pair, got {}", other.kind()))),
    }
}

pub fn tail(value: &Value) -> Result<Value> {
    match value {
        Value::Pair(_, t) => Ok((**t).clone()),
        other => Err(Error::Type(format!("expected a pair, got {}", other.kind()))),
    }
}

/// Number of elements along the spine. Defined only on proper lists.
pub fn length(list: &Value) -> Result<usize> {
    Ok(elements(list)?.len())
}

/// The elements of a proper list, reversed. Shares no structure with
/// the input.
pub fn reverse(list: &Value) -> Result<Value> {
    let mut out = Value::Null;
    for item in elements(list)? {
        out = cons(item, out);
    }
    Ok(out)
}

/// Collects the elements of a proper list. An improper spine is a
/// structural error.
pub fn elements(list: &Value) -> Result<Vec<Value>> {
    let mut out = Vec::new();
    let mut cur = list;
    loop {
        match cur {
            Value::Null => return Ok(out),
            Value::Pair(h, t) => {
                out.push((**h).clone());
                cur = t.as_ref();
            }
            other => {
                return Err(Error::BadForm(format!("improper list ending in {other}")));
            }
        }
    }
}

/// Borrowing iterator over the elements of a list; stops at the first
/// non-pair tail.
pub fn iter(list: &Value) -> ListIter<'_> {
    ListIter { cur: list }
}

pub struct ListIter<'a> {
    cur: &'a Value,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        match self.cur {
            Value::Pair(h, t) => {
                self.cur = t.as_ref();
                Some(h)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list;

    #[test]
    fn cons_projects_back() {
        let pair = cons(Value::Int(1), Value::Int(2));
        assert_eq!(head(&pair).unwrap(), Value::Int(1));
        assert_eq!(tail(&pair).unwrap(), Value::Int(2));
    }

    #[test]
    fn head_of_non_pair_is_a_type_error() {
        assert!(matches!(head(&Value::Null), Err(Error::Type(_))));
        assert!(matches!(tail(&Value::Int(1)), Err(Error::Type(_))));
    }

    #[test]
    fn length_matches_reverse_length() {
        let xs = list![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(length(&xs).unwrap(), 3);
        assert_eq!(length(&reverse(&xs).unwrap()).unwrap(), 3);
        assert_eq!(length(&Value::Null).unwrap(), 0);
    }

    #[test]
    fn reverse_twice_is_identity() {
        let xs = list![Value::Int(1), Value::Int(2), Value::Int(3)];
        assert_eq!(reverse(&reverse(&xs).unwrap()).unwrap(), xs);
        assert_eq!(
            reverse(&xs).unwrap(),
            list![Value::Int(3), Value::Int(2), Value::Int(1)]
        );
    }

    #[test]
    fn improper_lists_are_rejected() {
        let improper = cons(Value::Int(1), Value::Int(2));
        assert!(matches!(length(&improper), Err(Error::BadForm(_))));
        assert!(matches!(reverse(&improper), Err(Error::BadForm(_))));
    }

    #[test]
    fn iter_yields_elements_in_order() {
        let xs = list![Value::Int(1), Value::Int(2)];
        let got: Vec<Value> = iter(&xs).cloned().collect();
        assert_eq!(got, vec![Value::Int(1), Value::Int(2)]);
    }
}
