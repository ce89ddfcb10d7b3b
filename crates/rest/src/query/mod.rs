//! Document predicates for the query endpoint.
//!
//! A query body names a comparator, a document field and the comparator's
//! operands:
//!
//! ```json
//! {"comp": "%", "propname": "age", "values": [2, 0]}
//! ```
//!
//! | Symbol | Operands | Matches when |
//! |--------|----------|--------------|
//! | `==` | 1 | field loosely equals the operand |
//! | `>` `<` `>=` `<=` | 1 | ordered comparison holds |
//! | `%` | 2 | `field % values[0] == values[1]` |
//! | `*` or absent | 0 | always |
//!
//! [`Predicate::compile`] validates the body once; [`Predicate::matches`]
//! is then evaluated per document.

mod comparator;
mod loose;
mod predicate;

pub use comparator::Comparator;
pub use loose::{loose_cmp, loose_eq, loose_mod_eq, to_number};
pub use predicate::{Predicate, QueryParams};
