//! Typed decoding of raw records.
//!
//! Each directive carries an implicit type: sizes, ports, pids and status
//! codes are integers, request durations are floats, `%t` is a timestamp
//! and `%r` is a structured request line. Everything else passes through
//! as text. The `-` placeholder always decodes to [`Value::Absent`] before
//! any coercion is attempted.

use crate::error::{Error, Result};
use crate::record::{RawRecord, RequestLine, TypedRecord, Value};
use chrono::DateTime;

/// The fixed layout of the `%t` timestamp, brackets included.
const TIMESTAMP_LAYOUT: &str = "[%d/%b/%Y:%H:%M:%S %z]";

/// Decode every field of a raw record into its typed value.
///
/// Numeric and timestamp coercion failures are propagated; a malformed
/// request line degrades to empty sub-fields instead (request-line shape
/// varies far more than the other directives).
pub fn decode(record: &RawRecord) -> Result<TypedRecord> {
    let mut fields = Vec::with_capacity(record.len());
    for (name, raw) in record.iter() {
        fields.push((name.to_string(), decode_value(name, raw)?));
    }
    Ok(TypedRecord::from_fields(fields))
}

/// Decode one raw value according to its directive's type.
pub fn decode_value(name: &str, raw: &str) -> Result<Value> {
    if raw == "-" {
        return Ok(Value::Absent);
    }

    if is_integer_directive(name) {
        raw.parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| Error::field_decode(name, raw, "integer", e))
    } else if matches!(name, "%D" | "%T") {
        raw.parse::<f64>()
            .map(Value::Float)
            .map_err(|e| Error::field_decode(name, raw, "float", e))
    } else if name == "%t" {
        DateTime::parse_from_str(raw, TIMESTAMP_LAYOUT)
            .map(Value::Timestamp)
            .map_err(|e| Error::field_decode(name, raw, "timestamp", e))
    } else if name == "%r" {
        Ok(Value::Request(split_request(raw)))
    } else {
        Ok(Value::Text(raw.to_string()))
    }
}

/// Directives whose values are integers: response body sizes (`%B`, `%b`),
/// keepalive count (`%k`), ports and pids (`%p`, `%{...}p`, `%P`,
/// `%{...}P`), status codes (`%s`, `%>s`) and bytes in/out (`%I`, `%O`).
fn is_integer_directive(name: &str) -> bool {
    matches!(
        name,
        "%B" | "%b" | "%k" | "%p" | "%P" | "%s" | "%>s" | "%I" | "%O"
    ) || (name.starts_with("%{") && (name.ends_with("}p") || name.ends_with("}P")))
}

/// Split a raw request line into method, resource and protocol.
///
/// `method` is the leading run of word characters, `resource` the first
/// `/`-initial token followed by a space, `protocol` everything after the
/// final space. A part that cannot be found is left empty.
fn split_request(raw: &str) -> RequestLine {
    let method: String = raw
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    let resource = raw
        .find('/')
        .map(|start| &raw[start..])
        .and_then(|rest| rest.find(' ').map(|end| rest[..end].to_string()))
        .unwrap_or_default();

    let protocol = raw
        .rfind(' ')
        .map(|i| raw[i + 1..].to_string())
        .unwrap_or_default();

    RequestLine {
        method,
        resource,
        protocol,
    }
}
