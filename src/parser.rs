//! Log format compilation and line matching.

use crate::decode;
use crate::directive;
use crate::error::{Error, Result};
use crate::record::{RawRecord, TypedRecord};
use regex::Regex;

/// A parser that compiles an Apache log format string into a regex whose
/// capture groups align one-to-one with the format's directives.
///
/// The format is compiled once at construction; the resulting parser holds
/// no mutable state and can be shared freely across threads.
///
/// # Example
///
/// ```rust
/// use apachelog::Parser;
///
/// let parser = Parser::new(r#"%h %l %u %t \"%r\" %>s %b"#)?;
/// assert_eq!(parser.names().len(), 7);
/// # Ok::<(), apachelog::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    /// The normalized format string.
    format: String,
    /// Field names in directive order, one per capture group.
    names: Vec<String>,
    /// The compiled anchored regex.
    regex: Regex,
}

impl Parser {
    /// Create a new parser from a format string.
    ///
    /// Directives keep their verbatim spelling as field names (`%h`,
    /// `%>s`, `%{Referer}i`, ...).
    ///
    /// # Errors
    ///
    /// Fails if the format string is empty or contains no directives.
    pub fn new(format: &str) -> Result<Self> {
        Self::with_name_transform(format, |name| name.to_string())
    }

    /// Create a new parser, renaming each directive through `rename`.
    ///
    /// The transform is invoked exactly once per directive at compile time,
    /// never during line matching. Use it to substitute human-readable
    /// field names:
    ///
    /// ```rust
    /// use apachelog::Parser;
    ///
    /// let parser = Parser::with_name_transform("%h %>s", |name| {
    ///     match name {
    ///         "%h" => "host".to_string(),
    ///         "%>s" => "status".to_string(),
    ///         other => other.to_string(),
    ///     }
    /// })?;
    ///
    /// let record = parser.parse("127.0.0.1 200").unwrap();
    /// assert_eq!(record.field("status")?, "200");
    /// # Ok::<(), apachelog::Error>(())
    /// ```
    pub fn with_name_transform<F>(format: &str, mut rename: F) -> Result<Self>
    where
        F: FnMut(&str) -> String,
    {
        let format = normalize_format(format);
        if format.is_empty() {
            return Err(Error::empty_format(format));
        }

        let mut names = Vec::new();
        let mut parts = Vec::new();
        for token in format.split(' ') {
            let (name, quoted) = directive::strip_quote_markers(token);
            let class = directive::classify(name, quoted);
            names.push(rename(name));
            parts.push(class.pattern());
        }

        // Anchor the whole pattern: a line matches in full or not at all.
        let pattern = format!("^{}$", parts.join(" "));
        let regex = Regex::new(&pattern).map_err(|e| Error::invalid_format(&format, e))?;

        Ok(Self {
            format,
            names,
            regex,
        })
    }

    /// Get the normalized format string.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// Get the field names in directive order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Get the compiled regex.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Parse a log line into a raw record.
    ///
    /// Returns `None` if the line doesn't match the compiled format; a
    /// non-matching line is a normal outcome, not an error.
    pub fn parse(&self, line: &str) -> Option<RawRecord> {
        let line = trim_line(line);
        let captures = self.regex.captures(line)?;

        let fields = self
            .names
            .iter()
            .zip(captures.iter().skip(1))
            .map(|(name, group)| {
                let value = group.map(|m| m.as_str()).unwrap_or_default();
                (name.clone(), value.to_string())
            })
            .collect();

        Some(RawRecord::from_fields(fields))
    }

    /// Parse a log line into a raw record, failing on mismatch.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::FormatMismatch`] if the line doesn't match the
    /// compiled format.
    pub fn parse_strict(&self, line: &str) -> Result<RawRecord> {
        self.parse(line)
            .ok_or_else(|| Error::format_mismatch(&self.format, line))
    }

    /// Parse a log line and decode its fields into typed values.
    ///
    /// Returns `Ok(None)` if the line doesn't match the compiled format.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::FieldDecode`] if a numeric or timestamp field
    /// cannot be coerced.
    pub fn decode(&self, line: &str) -> Result<Option<TypedRecord>> {
        match self.parse(line) {
            Some(record) => decode::decode(&record).map(Some),
            None => Ok(None),
        }
    }

    /// Parse and decode a log line, failing on mismatch.
    pub fn decode_strict(&self, line: &str) -> Result<TypedRecord> {
        decode::decode(&self.parse_strict(line)?)
    }
}

/// Normalize a format string: drop the trailing line terminator, trim
/// surrounding whitespace and collapse internal runs of spaces and tabs
/// into single spaces.
fn normalize_format(format: &str) -> String {
    let mut normalized = String::with_capacity(format.len());
    for token in format.split([' ', '\t', '\r', '\n']) {
        if token.is_empty() {
            continue;
        }
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(token);
    }
    normalized
}

/// Trim a log line: a single trailing line terminator, then surrounding
/// whitespace. Internal whitespace is left alone.
fn trim_line(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    line.trim()
}
