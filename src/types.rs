use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Values that cross the transport boundary, either as bound query parameters
/// or as result-row columns.
///
/// Reuse the same enum on both sides so callers and transports do not need to
/// branch on driver types:
/// ```rust
/// use sql_remote_session::RowValues;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<&bool> {
        if let RowValues::Bool(value) = self {
            return Some(value);
        } else if let Some(i) = self.as_int() {
            if *i == 1 {
                return Some(&true);
            } else if *i == 0 {
                return Some(&false);
            }
        }
        None
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            // Try "YYYY-MM-DD HH:MM:SS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            // Try "YYYY-MM-DD HH:MM:SS.SSS"
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S.%3f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let RowValues::JSON(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

/// One entry of a statement's parameter template.
///
/// A template produced by the dialect compiler is a mix of concrete values and
/// named placeholder markers; markers are resolved against a
/// [`PlaceholderValues`] bag at execution time.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A concrete value, bound as-is.
    Value(RowValues),
    /// A named stand-in resolved at execution time.
    Placeholder(String),
}

impl From<RowValues> for ParamValue {
    fn from(value: RowValues) -> Self {
        ParamValue::Value(value)
    }
}

/// Runtime value bag supplied per invocation: placeholder name to value.
pub type PlaceholderValues = HashMap<String, RowValues>;

/// A compiled query as handed over by the dialect compiler.
///
/// `sql` carries one positional marker per unfilled slot; `params` is the
/// matching template, in binding order. Immutable once built.
#[derive(Debug, Clone)]
pub struct Query {
    /// The SQL text with positional markers.
    pub sql: String,
    /// The parameter template, in binding order.
    pub params: Vec<ParamValue>,
}

impl Query {
    /// Create a new query with the given SQL text and parameter template.
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<ParamValue>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Create a new query with no parameters.
    #[must_use]
    pub fn new_without_params(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }
}
