//! The two-tier numeric tower.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::ops::{Add, Mul, Sub};

/// A number is an exact `i64` or an `f64`. An operation stays in the
/// integer tier unless either side is real, in which case the integer
/// side is promoted.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Real(f64),
}

/// Both operands brought into the same tier.
enum Promoted {
    Ints(i64, i64),
    Reals(f64, f64),
}

fn promote(lhs: Number, rhs: Number) -> Promoted {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => Promoted::Ints(a, b),
        (a, b) => Promoted::Reals(a.as_real(), b.as_real()),
    }
}

impl Number {
    pub fn as_real(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Real(r) => r,
        }
    }

    /// Division result: exact when both sides are integers that divide
    /// evenly, real otherwise. A zero integer divisor has no result;
    /// real division follows IEEE semantics.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        match promote(self, rhs) {
            Promoted::Ints(_, 0) => None,
            Promoted::Ints(a, b) if a % b == 0 => Some(Number::Int(a / b)),
            Promoted::Ints(a, b) => Some(Number::Real(a as f64 / b as f64)),
            Promoted::Reals(a, b) => Some(Number::Real(a / b)),
        }
    }
}

impl Add for Number {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        match promote(self, rhs) {
            Promoted::Ints(a, b) => Number::Int(a + b),
            Promoted::Reals(a, b) => Number::Real(a + b),
        }
    }
}

impl Sub for Number {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        match promote(self, rhs) {
            Promoted::Ints(a, b) => Number::Int(a - b),
            Promoted::Reals(a, b) => Number::Real(a - b),
        }
    }
}

impl Mul for Number {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        match promote(self, rhs) {
            Promoted::Ints(a, b) => Number::Int(a * b),
            Promoted::Reals(a, b) => Number::Real(a * b),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match promote(*self, *other) {
            Promoted::Ints(a, b) => a == b,
            Promoted::Reals(a, b) => a == b,
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match promote(*self, *other) {
            Promoted::Ints(a, b) => Some(a.cmp(&b)),
            Promoted::Reals(a, b) => a.partial_cmp(&b),
        }
    }
}

impl Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::Real(r) => write!(f, "{r:.6}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_tier_is_preserved() {
        assert_eq!(Number::Int(2) + Number::Int(3), Number::Int(5));
        assert_eq!(Number::Int(2) * Number::Int(3), Number::Int(6));
        assert_eq!(Number::Int(2) - Number::Int(3), Number::Int(-1));
    }

    #[test]
    fn reals_are_contagious() {
        assert_eq!(Number::Int(1) + Number::Real(2.0), Number::Real(3.0));
        assert_eq!(Number::Real(2.5) * Number::Int(2), Number::Real(5.0));
    }

    #[test]
    fn division_is_exact_only_when_even() {
        assert_eq!(Number::Int(6).checked_div(Number::Int(2)), Some(Number::Int(3)));
        assert_eq!(Number::Int(7).checked_div(Number::Int(2)), Some(Number::Real(3.5)));
        assert_eq!(Number::Int(1).checked_div(Number::Int(0)), None);
        assert_eq!(Number::Real(7.0).checked_div(Number::Int(2)), Some(Number::Real(3.5)));
    }

    #[test]
    fn comparison_spans_both_tiers() {
        assert!(Number::Int(1) < Number::Real(1.5));
        assert!(Number::Real(2.0) > Number::Int(1));
        assert_eq!(Number::Int(2), Number::Real(2.0));
    }

    #[test]
    fn display_format() {
        assert_eq!(Number::Int(42).to_string(), "42");
        assert_eq!(Number::Real(3.0).to_string(), "3.000000");
        assert_eq!(Number::Real(3.5).to_string(), "3.500000");
    }
}
