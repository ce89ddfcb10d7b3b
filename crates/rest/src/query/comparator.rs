//! The comparator table.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::loose::{loose_cmp, loose_eq, loose_mod_eq};
use crate::error::RestError;

/// A comparator symbol accepted by the query endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `==` - field loosely equals the operand.
    Eq,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
    /// `%` - `field % operands[0] == operands[1]`.
    Mod,
    /// `*` - matches every document.
    Any,
}

impl Comparator {
    /// Every comparator, in table order.
    pub const ALL: [Comparator; 7] = [
        Comparator::Eq,
        Comparator::Gt,
        Comparator::Lt,
        Comparator::Gte,
        Comparator::Lte,
        Comparator::Mod,
        Comparator::Any,
    ];

    /// Returns the symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "==",
            Comparator::Gt => ">",
            Comparator::Lt => "<",
            Comparator::Gte => ">=",
            Comparator::Lte => "<=",
            Comparator::Mod => "%",
            Comparator::Any => "*",
        }
    }

    /// Number of operands the comparator takes besides the field value.
    pub fn arity(&self) -> usize {
        match self {
            Comparator::Any => 0,
            Comparator::Mod => 2,
            _ => 1,
        }
    }

    /// Applies the comparator to a field value.
    ///
    /// `operands` must hold exactly [`arity`](Self::arity) values; a missing
    /// field fails every comparator except [`Comparator::Any`].
    pub fn evaluate(&self, field: Option<&Value>, operands: &[Value]) -> bool {
        if *self == Comparator::Any {
            return true;
        }
        let Some(field) = field else {
            return false;
        };
        match (self, operands) {
            (Comparator::Eq, [operand]) => loose_eq(field, operand),
            (Comparator::Gt, [operand]) => loose_cmp(field, operand) == Some(Ordering::Greater),
            (Comparator::Lt, [operand]) => loose_cmp(field, operand) == Some(Ordering::Less),
            (Comparator::Gte, [operand]) => matches!(
                loose_cmp(field, operand),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            (Comparator::Lte, [operand]) => matches!(
                loose_cmp(field, operand),
                Some(Ordering::Less | Ordering::Equal)
            ),
            (Comparator::Mod, [divisor, remainder]) => loose_mod_eq(field, divisor, remainder),
            _ => false,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparator::ALL
            .into_iter()
            .find(|c| c.symbol() == s)
            .ok_or_else(|| RestError::invalid_query(format!("unknown comparator '{}'", s)))
    }
}
