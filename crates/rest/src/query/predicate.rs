//! Compiling query bodies into document predicates.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::comparator::Comparator;
use crate::error::{RestError, RestResult};

/// Raw query parameters as sent in the request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryParams {
    /// Comparator symbol; absent or empty means `*`.
    #[serde(default)]
    pub comp: Option<String>,

    /// The document field to compare.
    #[serde(default)]
    pub propname: Option<String>,

    /// Comparator operands. A single scalar counts as one operand.
    #[serde(default, deserialize_with = "operands")]
    pub values: Vec<Value>,
}

impl QueryParams {
    /// Reads query parameters from a request body.
    pub fn from_body(body: Value) -> RestResult<Self> {
        serde_json::from_value(body).map_err(|e| RestError::invalid_query(e.to_string()))
    }
}

fn operands<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(values) => values,
        scalar => vec![scalar],
    })
}

/// A compiled document predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    comparator: Comparator,
    propname: Option<String>,
    operands: Vec<Value>,
}

impl Predicate {
    /// Validates query parameters and builds the predicate.
    ///
    /// # Errors
    ///
    /// `InvalidQuery` for an unknown comparator, an operand count that does
    /// not match the comparator, or a missing `propname`.
    pub fn compile(params: QueryParams) -> RestResult<Self> {
        let comparator = match params.comp.as_deref().map(str::trim) {
            None | Some("") => Comparator::Any,
            Some(symbol) => symbol.parse()?,
        };

        if params.values.len() != comparator.arity() {
            return Err(RestError::invalid_query(format!(
                "'{}' takes {} operand(s), got {}",
                comparator,
                comparator.arity(),
                params.values.len()
            )));
        }

        let propname = params.propname.filter(|p| !p.is_empty());
        if propname.is_none() && comparator != Comparator::Any {
            return Err(RestError::invalid_query(format!(
                "'{}' requires a propname",
                comparator
            )));
        }

        Ok(Self {
            comparator,
            propname,
            operands: params.values,
        })
    }

    /// Returns the comparator.
    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    /// Evaluates the predicate against one document.
    pub fn matches(&self, doc: &Value) -> bool {
        let field = self
            .propname
            .as_deref()
            .and_then(|name| doc.as_object()?.get(name));
        self.comparator.evaluate(field, &self.operands)
    }
}
