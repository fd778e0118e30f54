//! Error types for the apachelog library.

use thiserror::Error;

/// Result type alias for apachelog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during format compilation, line parsing and
/// typed decoding.
#[derive(Error, Debug)]
pub enum Error {
    /// Error when a field is not found in a record.
    #[error("field '{field}' not found")]
    FieldNotFound { field: String },

    /// Error when a field value cannot be decoded as the type its directive
    /// mandates.
    #[error("field '{field}' with value '{value}' cannot be decoded as {target_type}: {source}")]
    FieldDecode {
        field: String,
        value: String,
        target_type: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error when a log line doesn't match the compiled format.
    ///
    /// The message template is part of the compatibility surface and must
    /// stay grep-able as ``Invalid format `<format>` for line `<line>` ``.
    #[error("Invalid format `{format}` for line `{line}`")]
    FormatMismatch { format: String, line: String },

    /// Error when a format string is empty or contains no directives.
    #[error("log format '{format}' contains no directives")]
    EmptyFormat { format: String },

    /// Error when the generated pattern fails to compile.
    #[error("invalid log format '{format}': {source}")]
    InvalidFormat {
        format: String,
        #[source]
        source: regex::Error,
    },

    /// IO error when reading log input.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a new field not found error.
    pub fn field_not_found(field: impl Into<String>) -> Self {
        Self::FieldNotFound {
            field: field.into(),
        }
    }

    /// Create a new field decode error.
    pub fn field_decode(
        field: impl Into<String>,
        value: impl Into<String>,
        target_type: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::FieldDecode {
            field: field.into(),
            value: value.into(),
            target_type: target_type.into(),
            source: Box::new(source),
        }
    }

    /// Create a new format mismatch error.
    pub fn format_mismatch(format: impl Into<String>, line: impl Into<String>) -> Self {
        Self::FormatMismatch {
            format: format.into(),
            line: line.into(),
        }
    }

    /// Create a new empty format error.
    pub fn empty_format(format: impl Into<String>) -> Self {
        Self::EmptyFormat {
            format: format.into(),
        }
    }

    /// Create a new invalid format error.
    pub fn invalid_format(format: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidFormat {
            format: format.into(),
            source,
        }
    }
}
