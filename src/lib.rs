//! # apachelog - Apache/Nginx access log parser
//!
//! A Rust library for parsing web-server access logs described by Apache
//! log format strings such as `%h %l %u %t \"%r\" %>s %b`.
//!
//! This library provides functionality to:
//! - Compile a log format string into a matcher with one capture per directive
//! - Decompose log lines into raw field values keyed by directive
//! - Decode raw fields into typed values (integers, floats, timestamps,
//!   structured request lines)
//! - Iterate over log streams line by line
//!
//! ## Quick Start
//!
//! ```rust
//! use apachelog::{Parser, COMBINED};
//!
//! let parser = Parser::new(COMBINED)?;
//!
//! let line = r#"212.74.15.68 - - [23/Jan/2004:11:36:20 +0000] "GET /images/previous.png HTTP/1.1" 200 2607 "http://peterhi.dyndns.org/bandwidth/index.html" "Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.2) Gecko/20021202""#;
//!
//! let record = parser.parse(line).expect("line matches the combined format");
//! assert_eq!(record.field("%h")?, "212.74.15.68");
//! assert_eq!(record.field("%>s")?, "200");
//!
//! let typed = parser.decode_strict(line)?;
//! assert_eq!(typed.field("%>s")?.as_integer(), Some(200));
//! # Ok::<(), apachelog::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Format Compilation**: quoted, bracketed, greedy-path and plain
//!   directives each get the matching pattern they need, including support
//!   for backslash-escaped quotes inside request lines, referers and
//!   user agents
//! - **Lenient and Strict APIs**: `parse`/`decode` treat a non-matching
//!   line as a normal no-result outcome; `parse_strict`/`decode_strict`
//!   surface it as an error
//! - **Typed Decoding**: per-directive coercion with the `-` placeholder
//!   mapped to an absent value
//! - **Error Handling**: comprehensive error types using `thiserror`
//! - **Optional Serde Support**: serialize/deserialize records when the
//!   `serde` feature is enabled

pub mod decode;
pub mod directive;
pub mod error;
pub mod parser;
pub mod reader;
pub mod record;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use parser::Parser;
pub use reader::Reader;
pub use record::{RawRecord, RequestLine, TypedRecord, Value};

/// The Common Log Format: `%h %l %u %t \"%r\" %>s %b`.
pub const COMMON_LOG_FORMAT: &str = r#"%h %l %u %t \"%r\" %>s %b"#;

/// The Common Log Format with the virtual host serving the request.
pub const COMMON_LOG_FORMAT_VIRTUAL_HOST: &str = r#"%v %h %l %u %t \"%r\" %>s %b"#;

/// The Combined Log Format: CLF plus referer and user agent.
pub const COMBINED: &str =
    r#"%h %l %u %t \"%r\" %>s %b \"%{Referer}i\" \"%{User-agent}i\""#;

/// The Combined Log Format with the virtual host serving the request.
pub const COMBINED_VIRTUAL_HOST: &str =
    r#"%v %h %l %u %t \"%r\" %>s %b \"%{Referer}i\" \"%{User-agent}i\""#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_common_log_format() {
        let line = r#"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#;

        let parser = Parser::new(COMMON_LOG_FORMAT).unwrap();
        let record = parser.parse(line).unwrap();

        assert_eq!(record.field("%h").unwrap(), "127.0.0.1");
        assert_eq!(record.field("%u").unwrap(), "frank");
        assert_eq!(record.field("%r").unwrap(), "GET /apache_pb.gif HTTP/1.0");
        assert_eq!(record.field("%b").unwrap(), "2326");
    }

    #[test]
    fn test_virtual_host_formats() {
        let line = r#"www.example.com 127.0.0.1 - - [10/Oct/2000:13:55:36 -0700] "GET / HTTP/1.0" 200 512"#;

        let parser = Parser::new(COMMON_LOG_FORMAT_VIRTUAL_HOST).unwrap();
        let record = parser.parse(line).unwrap();

        assert_eq!(record.field("%v").unwrap(), "www.example.com");
        assert_eq!(record.field("%h").unwrap(), "127.0.0.1");
    }

    #[test]
    fn test_combined_format_reader() {
        let log_data = r#"212.74.15.68 - - [23/Jan/2004:11:36:20 +0000] "GET /images/previous.png HTTP/1.1" 200 2607 "http://peterhi.dyndns.org/bandwidth/index.html" "Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.2) Gecko/20021202""#;

        let cursor = Cursor::new(log_data);
        let reader = Reader::new(cursor, COMBINED).unwrap();

        let records = reader.collect_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].field("%{User-agent}i").unwrap(),
            "Mozilla/5.0 (X11; U; Linux i686; en-US; rv:1.2) Gecko/20021202"
        );
    }
}
