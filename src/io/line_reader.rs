//! Asynchronous raw line reader
//!
//! Provides a streaming interface over the data lines of a delimited file.
//! The first physical line is the header and is discarded; every following
//! line is yielded with its 1-based line number and its raw, untrimmed fields.
//!
//! # Design
//!
//! The import format has no quoting: a line is split on every delimiter, and a
//! quote character is ordinary data. Lines are read as bytes and decoded one at
//! a time, so a line that is not valid UTF-8 only affects itself.
//!
//! ```text
//! File → LineReader → RawLine { number, fields } → core::parser
//! ```

use crate::types::LedgerError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Field delimiter of the import format
pub const DELIMITER: char = ',';

/// One data line split into fields
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    /// 1-based physical line number (the header is line 1)
    pub number: u64,

    /// Fields exactly as they appear between delimiters
    pub fields: Vec<String>,
}

impl RawLine {
    fn split(number: u64, text: &str) -> Self {
        Self {
            number,
            fields: text.split(DELIMITER).map(str::to_string).collect(),
        }
    }

    /// Whether the line holds nothing but whitespace
    ///
    /// A line of bare delimiters is not blank; it is a record with empty fields.
    pub fn is_blank(&self) -> bool {
        match self.fields.as_slice() {
            [only] => only.trim().is_empty(),
            _ => false,
        }
    }
}

/// Asynchronous delimited line reader
pub struct LineReader<R> {
    reader: R,
    buffer: Vec<u8>,
    line: u64,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Create a new LineReader from a buffered async reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line: 0,
        }
    }

    /// Number of physical lines consumed so far, header included
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    /// Read the next data line
    ///
    /// The header is skipped on the first call. Blank lines are returned (see
    /// [`RawLine::is_blank`]) so the caller decides how to treat them. Returns
    /// `None` at end of input.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::IoError`] when the underlying read fails; the caller
    ///   should stop reading this source
    /// - [`LedgerError::ParseError`] when the line is not valid UTF-8; reading
    ///   may continue with the next line
    pub async fn next_line(&mut self) -> Option<Result<RawLine, LedgerError>> {
        if self.line == 0 {
            match self.read_raw().await {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e)),
            }
        }

        match self.read_raw().await {
            Ok(true) => {}
            Ok(false) => return None,
            Err(e) => return Some(Err(e)),
        }

        let number = self.line;
        Some(match std::str::from_utf8(&self.buffer) {
            Ok(text) => Ok(RawLine::split(number, text)),
            Err(e) => Err(LedgerError::ParseError {
                line: Some(number),
                message: format!("line is not valid UTF-8 ({})", e),
            }),
        })
    }

    /// Read one physical line into the buffer without its terminator
    async fn read_raw(&mut self) -> Result<bool, LedgerError> {
        self.buffer.clear();
        let read = self.reader.read_until(b'\n', &mut self.buffer).await?;
        if read == 0 {
            return Ok(false);
        }

        self.line += 1;
        if self.buffer.last() == Some(&b'\n') {
            self.buffer.pop();
        }
        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_all(content: &[u8]) -> Vec<Result<RawLine, LedgerError>> {
        let mut reader = LineReader::new(content);
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().await {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn test_skips_header_and_numbers_lines() {
        let lines = read_all(
            b"Id,Date,Payee,Amount,Currency\n1,2024-06-01,Shop,-1,usd\n2,2024-06-02,Bar,5,usd\n",
        )
        .await;

        assert_eq!(lines.len(), 2);
        let first = lines[0].as_ref().unwrap();
        assert_eq!(first.number, 2);
        assert_eq!(first.fields, vec!["1", "2024-06-01", "Shop", "-1", "usd"]);
        assert_eq!(lines[1].as_ref().unwrap().number, 3);
    }

    #[tokio::test]
    async fn test_header_only_and_empty_input() {
        assert!(read_all(b"Id,Date,Payee,Amount,Currency\n").await.is_empty());
        assert!(read_all(b"Id,Date,Payee,Amount,Currency").await.is_empty());
        assert!(read_all(b"").await.is_empty());
    }

    #[tokio::test]
    async fn test_first_line_is_header_even_when_blank() {
        let lines = read_all(b"\n1,2024-06-01,Shop,-1,usd\n").await;
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].as_ref().unwrap().number, 2);
    }

    #[tokio::test]
    async fn test_quotes_are_plain_data() {
        let lines = read_all(b"header\n1,2024-06-01,\"Joe's, Bar\",5,usd\n").await;

        let line = lines[0].as_ref().unwrap();
        assert_eq!(line.fields.len(), 6);
        assert_eq!(line.fields[2], "\"Joe's");
        assert_eq!(line.fields[3], " Bar\"");
    }

    #[tokio::test]
    async fn test_varying_field_counts_and_untrimmed_fields() {
        let lines = read_all(b"h\n1,2\n 1 , 2 , 3 \n").await;

        assert_eq!(lines[0].as_ref().unwrap().fields, vec!["1", "2"]);
        assert_eq!(lines[1].as_ref().unwrap().fields, vec![" 1 ", " 2 ", " 3 "]);
    }

    #[tokio::test]
    async fn test_blank_lines_and_crlf() {
        let lines = read_all(b"h\r\n\r\n1,a\r\n   \n2,b").await;

        let lines: Vec<RawLine> = lines.into_iter().map(Result::unwrap).collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].is_blank());
        assert!(lines[2].is_blank());

        let data: Vec<&RawLine> = lines.iter().filter(|line| !line.is_blank()).collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].number, 3);
        assert_eq!(data[0].fields, vec!["1", "a"]);
        assert_eq!(data[1].number, 5);
        assert_eq!(data[1].fields, vec!["2", "b"]);
    }

    #[tokio::test]
    async fn test_bare_delimiters_are_not_blank() {
        let lines = read_all(b"h\n,,,,\n").await;
        assert!(!lines[0].as_ref().unwrap().is_blank());
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_stop_reading() {
        let lines = read_all(b"h\n1,\xff\xfe,x\n2,ok\n").await;

        assert_eq!(lines.len(), 2);
        assert!(matches!(
            lines[0],
            Err(LedgerError::ParseError { line: Some(2), .. })
        ));
        assert_eq!(lines[1].as_ref().unwrap().fields, vec!["2", "ok"]);
    }
}
