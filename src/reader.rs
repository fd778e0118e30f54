//! Line-by-line log reading.

use crate::error::{Error, Result};
use crate::parser::Parser;
use crate::record::RawRecord;
use std::io::{BufRead, BufReader, Read};

/// A reader that parses a log stream line by line with a compiled format.
///
/// The reader implements [`Iterator`], yielding one raw record per
/// non-empty line. Lines that don't match the format are errors here,
/// unlike [`Parser::parse`]: a reader is expected to be pointed at a log
/// whose format it was given.
///
/// # Example
///
/// ```rust
/// use apachelog::{Reader, COMMON_LOG_FORMAT};
/// use std::io::Cursor;
///
/// let log_data = r#"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#;
///
/// let cursor = Cursor::new(log_data);
/// let reader = Reader::new(cursor, COMMON_LOG_FORMAT)?;
///
/// for record in reader {
///     let record = record?;
///     println!("host: {}", record.field("%h")?);
/// }
/// # Ok::<(), apachelog::Error>(())
/// ```
#[derive(Debug)]
pub struct Reader<R: Read> {
    reader: BufReader<R>,
    parser: Parser,
}

impl<R: Read> Reader<R> {
    /// Create a new reader over `input` with the given log format.
    ///
    /// # Errors
    ///
    /// Fails if the format string is invalid, per [`Parser::new`].
    pub fn new(input: R, format: &str) -> Result<Self> {
        let parser = Parser::new(format)?;
        Ok(Self::with_parser(input, parser))
    }

    /// Create a new reader with a pre-built parser, e.g. one constructed
    /// with [`Parser::with_name_transform`].
    pub fn with_parser(input: R, parser: Parser) -> Self {
        Self {
            reader: BufReader::new(input),
            parser,
        }
    }

    /// Get a reference to the underlying parser.
    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Read the next record from the log.
    ///
    /// Blank lines are skipped. Returns `None` at end of input,
    /// `Some(Err(..))` on an IO failure or a line that doesn't match the
    /// format.
    pub fn read(&mut self) -> Option<Result<RawRecord>> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    return Some(self.parser.parse_strict(&line));
                }
                Err(e) => return Some(Err(Error::Io { source: e })),
            }
        }
    }

    /// Collect all records into a vector.
    ///
    /// # Errors
    ///
    /// Fails on the first IO error or non-matching line.
    pub fn collect_all(mut self) -> Result<Vec<RawRecord>> {
        let mut records = Vec::new();
        while let Some(result) = self.read() {
            records.push(result?);
        }
        Ok(records)
    }
}

impl<R: Read> Iterator for Reader<R> {
    type Item = Result<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FORMAT: &str = r#"%h %l %u %t \"%r\" %>s %b"#;

    #[test]
    fn test_reader_basic() {
        let log_data = r#"127.0.0.1 - frank [10/Oct/2000:13:55:36 -0700] "GET /apache_pb.gif HTTP/1.0" 200 2326"#;

        let cursor = Cursor::new(log_data);
        let mut reader = Reader::new(cursor, FORMAT).unwrap();

        let record = reader.read().unwrap().unwrap();
        assert_eq!(record.field("%h").unwrap(), "127.0.0.1");
        assert_eq!(record.field("%u").unwrap(), "frank");
        assert_eq!(record.field("%>s").unwrap(), "200");

        assert!(reader.read().is_none());
    }

    #[test]
    fn test_reader_skips_blank_lines() {
        let log_data = "127.0.0.1 - - [10/Oct/2000:13:55:36 -0700] \"GET / HTTP/1.0\" 200 2326\n\n192.168.1.1 - - [10/Oct/2000:13:56:12 -0700] \"POST /form HTTP/1.0\" 302 -\n";

        let cursor = Cursor::new(log_data);
        let reader = Reader::new(cursor, FORMAT).unwrap();

        let records = reader.collect_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].field("%h").unwrap(), "127.0.0.1");
        assert_eq!(records[1].field("%h").unwrap(), "192.168.1.1");
        assert_eq!(records[1].field("%b").unwrap(), "-");
    }

    #[test]
    fn test_reader_surfaces_mismatched_lines() {
        let cursor = Cursor::new("this is not an access log line\n");
        let mut reader = Reader::new(cursor, FORMAT).unwrap();

        let err = reader.read().unwrap().unwrap_err();
        assert!(err.to_string().contains("Invalid format"));
    }

    #[test]
    fn test_reader_with_parser() {
        let parser = Parser::with_name_transform("%h %>s", |name| match name {
            "%h" => "host".to_string(),
            other => other.to_string(),
        })
        .unwrap();

        let cursor = Cursor::new("10.0.0.1 404\n");
        let mut reader = Reader::with_parser(cursor, parser);

        let record = reader.read().unwrap().unwrap();
        assert_eq!(record.field("host").unwrap(), "10.0.0.1");
    }
}
