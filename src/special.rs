//! Special forms, recognized by the textual head of an application.
//!
//! Recognition happens before any environment lookup, so the names are
//! reserved: binding `if` somewhere does not redirect the evaluator.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::LazyLock;

pub static SPECIAL_FORMS: LazyLock<HashMap<&'static str, SpecialForm>> = LazyLock::new(|| {
    HashMap::from([
        ("quote", SpecialForm::Quote),
        ("if", SpecialForm::If),
        ("define", SpecialForm::Define),
        ("set!", SpecialForm::Set),
        ("lambda", SpecialForm::Lambda),
        ("let", SpecialForm::Let),
        ("let*", SpecialForm::LetStar),
        ("letrec", SpecialForm::LetRec),
        ("begin", SpecialForm::Begin),
        ("cond", SpecialForm::Cond),
        ("and", SpecialForm::And),
        ("or", SpecialForm::Or),
    ])
});

/// A form whose arguments are not uniformly pre-evaluated. Each variant
/// has its own handler in the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialForm {
    /// `(quote x)` returns `x` unevaluated.
    Quote,
    /// `(if test consequent alternate)`; only the selected branch runs.
    If,
    /// `(define name expr)` binds in the global frame, returns void.
    Define,
    /// `(set! name expr)` replaces the nearest existing binding.
    Set,
    /// `(lambda (params...) body...)` captures the current frame.
    Lambda,
    /// `(let ((x e)...) body...)`; inits run in the enclosing frame.
    Let,
    /// `(let* ((x e)...) body...)`; one nested frame per binding.
    LetStar,
    /// `(letrec ((x e)...) body...)`; binders visible to the inits.
    LetRec,
    /// `(begin e...)`; last value wins, `(begin)` is void.
    Begin,
    /// `(cond (test body...)... (else body...)?)`.
    Cond,
    /// Short-circuit conjunction; `(and)` is `#t`.
    And,
    /// Short-circuit disjunction; `(or)` is `#f`.
    Or,
}

impl FromStr for SpecialForm {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        SPECIAL_FORMS
            .get(value)
            .copied()
            .ok_or_else(|| "not a special form".to_string())
    }
}

impl Display for SpecialForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecialForm::Quote => "quote",
            SpecialForm::If => "if",
            SpecialForm::Define => "define",
            SpecialForm::Set => "set!",
            SpecialForm::Lambda => "lambda",
            SpecialForm::Let => "let",
            SpecialForm::LetStar => "let*",
            SpecialForm::LetRec => "letrec",
            SpecialForm::Begin => "begin",
            SpecialForm::Cond => "cond",
            SpecialForm::And => "and",
            SpecialForm::Or => "or",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for (name, form) in SPECIAL_FORMS.iter() {
            assert_eq!(SpecialForm::from_str(name), Ok(*form));
            assert_eq!(form.to_string(), *name);
        }
    }

    #[test]
    fn other_symbols_are_not_forms() {
        assert!(SpecialForm::from_str("car").is_err());
        assert!(SpecialForm::from_str("").is_err());
    }
}
