//! Core data structures for representing parsed log records.

use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed log line as raw strings, one per format directive.
///
/// Fields keep the directive order of the compiled format. Duplicate
/// directives are permitted and produce duplicate keys; lookups return the
/// last occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    /// Create a new record from ordered (directive, value) pairs.
    pub fn from_fields(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Get a field value by directive name, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Get a field value by directive name.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use apachelog::RawRecord;
    /// let record = RawRecord::from_fields(vec![
    ///     ("%>s".to_string(), "200".to_string()),
    /// ]);
    ///
    /// assert_eq!(record.field("%>s").unwrap(), "200");
    /// assert!(record.field("%b").is_err());
    /// ```
    pub fn field(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| Error::field_not_found(name))
    }

    /// Iterate over (directive, raw value) pairs in directive order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// The number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if this record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<Vec<(String, String)>> for RawRecord {
    fn from(fields: Vec<(String, String)>) -> Self {
        Self::from_fields(fields)
    }
}

/// The request line of an access-log entry, split into its three parts.
///
/// Any part may be empty when the raw request line is malformed; splitting
/// never fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RequestLine {
    /// The HTTP method, e.g. `GET`.
    pub method: String,
    /// The requested resource, e.g. `/index.html`.
    pub resource: String,
    /// The protocol, e.g. `HTTP/1.1`.
    pub protocol: String,
}

/// A typed field value produced by decoding a raw record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The `-` placeholder: the server logged no value for this field.
    Absent,
    /// A size, count, port, pid or status value.
    Integer(i64),
    /// A request-duration value.
    Float(f64),
    /// The `%t` timestamp.
    Timestamp(DateTime<FixedOffset>),
    /// The `%r` request line.
    Request(RequestLine),
    /// Any other directive's value, passed through unchanged.
    Text(String),
}

impl Value {
    /// Check if this value is the absent placeholder.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Get the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the value as a float, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a timestamp, if it is one.
    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    /// Get the value as a request line, if it is one.
    pub fn as_request(&self) -> Option<&RequestLine> {
        match self {
            Self::Request(request) => Some(request),
            _ => None,
        }
    }

    /// Get the value as text, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A decoded log record: one typed value per format directive, in
/// directive order. Duplicate keys follow the same last-write-wins lookup
/// rule as [`RawRecord`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypedRecord {
    fields: Vec<(String, Value)>,
}

impl TypedRecord {
    /// Create a new record from ordered (directive, value) pairs.
    pub fn from_fields(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Get a typed value by directive name, or `None` if absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .rev()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Get a typed value by directive name.
    pub fn field(&self, name: &str) -> Result<&Value> {
        self.get(name).ok_or_else(|| Error::field_not_found(name))
    }

    /// Iterate over (directive, value) pairs in directive order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// The number of fields in this record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if this record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawRecord {
        RawRecord::from_fields(vec![
            ("%h".to_string(), "127.0.0.1".to_string()),
            ("%>s".to_string(), "200".to_string()),
        ])
    }

    #[test]
    fn test_field_lookup() {
        let record = sample();
        assert_eq!(record.field("%h").unwrap(), "127.0.0.1");
        assert_eq!(record.get("%u"), None);
        assert!(matches!(
            record.field("%u").unwrap_err(),
            Error::FieldNotFound { .. }
        ));
    }

    #[test]
    fn test_iteration_preserves_directive_order() {
        let record = sample();
        let names: Vec<&str> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["%h", "%>s"]);
    }

    #[test]
    fn test_duplicate_directives_last_write_wins() {
        let record = RawRecord::from_fields(vec![
            ("%h".to_string(), "first".to_string()),
            ("%h".to_string(), "second".to_string()),
        ]);
        assert_eq!(record.get("%h"), Some("second"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_value_accessors() {
        assert!(Value::Absent.is_absent());
        assert_eq!(Value::Integer(200).as_integer(), Some(200));
        assert_eq!(Value::Integer(200).as_float(), None);
        assert_eq!(Value::Text("x".to_string()).as_text(), Some("x"));
    }
}
