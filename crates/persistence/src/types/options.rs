//! Options accepted by database resolution and iteration.
//!
//! Both option types are deserialized straight from request bodies. Bodies
//! may be form-encoded, so scalar fields accept their string spelling too.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Options controlling how a database name is resolved.
///
/// Unknown fields are kept in [`OpenOptions::metadata`] and end up in the
/// database descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenOptions {
    /// Database name, when not supplied by the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<String>,

    /// Requested database type tag (validated by the manager).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub db_type: Option<String>,

    /// Whether an unknown database may be created.
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub create: Option<bool>,

    /// Everything else in the request body.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl OpenOptions {
    /// Options that only resolve databases the manager already knows.
    pub fn existing() -> Self {
        Self {
            create: Some(false),
            ..Default::default()
        }
    }

    /// Sets the database name, replacing any name from the body.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.dbname = Some(name.into());
        self
    }

    /// Fills in `create` and `type` where the caller left them out.
    pub fn or_create(mut self, default_type: &str) -> Self {
        self.create.get_or_insert(true);
        if self.db_type.is_none() {
            self.db_type = Some(default_type.to_string());
        }
        self
    }

    /// Returns whether creation of unknown databases is allowed.
    pub fn allows_create(&self) -> bool {
        self.create.unwrap_or(false)
    }
}

/// Range and ordering options for log iteration.
///
/// Bounds refer to entry hashes and are evaluated in log order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IteratorOptions {
    /// Maximum number of entries; absent or negative means all.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub limit: Option<i64>,

    /// Only entries strictly after this hash.
    #[serde(default)]
    pub gt: Option<String>,

    /// Only entries at or after this hash.
    #[serde(default)]
    pub gte: Option<String>,

    /// Only entries strictly before this hash.
    #[serde(default)]
    pub lt: Option<String>,

    /// Only entries at or before this hash.
    #[serde(default)]
    pub lte: Option<String>,

    /// Newest entries first.
    #[serde(default, deserialize_with = "lenient_flag")]
    pub reverse: bool,
}

impl IteratorOptions {
    /// Returns the effective limit, `None` meaning unbounded.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.and_then(|l| usize::try_from(l).ok())
    }
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(b)),
        Some(Value::String(s)) => match s.trim() {
            "true" | "1" => Ok(Some(true)),
            "false" | "0" | "" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "expected a boolean, got '{}'",
                other
            ))),
        },
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a boolean, got {}",
            other
        ))),
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_bool(deserializer)?.unwrap_or(false))
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {}", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got '{}'", s))),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected an integer, got {}",
            other
        ))),
    }
}
