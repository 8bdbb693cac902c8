// src/console/tokenizer.rs

use core::fmt;
use core::str;

use crate::common::frame::{is_token_delimiter, MAX_TOKEN_LEN};

/// A view of one token inside a framed line.
///
/// Never longer than [`MAX_TOKEN_LEN`] bytes: longer spans are cut short
/// silently, the same way a fixed token buffer would truncate them.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Token<'a>(&'a [u8]);

impl<'a> Token<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Attempts to interpret the token as a UTF-8 string slice.
    pub fn as_str(&self) -> Result<&'a str, str::Utf8Error> {
        str::from_utf8(self.0)
    }

    /// Exact keyword comparison.
    pub fn is(&self, keyword: &str) -> bool {
        self.0 == keyword.as_bytes()
    }

    /// Parses the token as a finite `f32`.
    pub fn parse_f32(&self) -> Option<f32> {
        let value: f32 = self.as_str().ok()?.parse().ok()?;
        value.is_finite().then_some(value)
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => write!(f, "Token({:?})", s),
            Err(_) => write!(f, "Token({:?})", self.0),
        }
    }
}

/// Stateful scanner handing out one token per call.
///
/// Every call to [`Tokenizer::next_token`] advances the shared cursor past the
/// token it returns, so no token is ever seen twice.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    line: &'a [u8],
    cursor: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Tokenizer { line, cursor: 0 }
    }

    /// Everything from the cursor to the end of the line, untouched.
    pub fn remainder(&self) -> &'a [u8] {
        &self.line[self.cursor..]
    }

    /// Skips leading delimiters, then takes the span up to the next delimiter
    /// or end of line. The cursor ends up one past the delimiter that closed
    /// the span. Returns `None` once only delimiters remain.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let len = self.line.len();
        let mut start = self.cursor;
        while start < len && is_token_delimiter(self.line[start]) {
            start += 1;
        }
        if start == len {
            self.cursor = len;
            return None;
        }

        let mut end = start;
        while end < len && !is_token_delimiter(self.line[end]) {
            end += 1;
        }

        // Consume the closing delimiter too
        self.cursor = (end + 1).min(len);

        let span = &self.line[start..end];
        Some(Token(&span[..span.len().min(MAX_TOKEN_LEN)]))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.next_token()
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn collect(line: &[u8]) -> Vec<&[u8]> {
        Tokenizer::new(line).map(|t| t.as_bytes()).collect()
    }

    // Straightforward split on runs of delimiters, for comparison.
    fn split_reference(line: &[u8]) -> Vec<&[u8]> {
        line.split(|b| is_token_delimiter(*b))
            .filter(|w| !w.is_empty())
            .map(|w| &w[..w.len().min(MAX_TOKEN_LEN)])
            .collect()
    }

    #[test]
    fn test_splits_on_runs_of_delimiters() {
        assert_eq!(
            collect(b"ph calibrate set 2.5 2.0"),
            [&b"ph"[..], b"calibrate", b"set", b"2.5", b"2.0"]
        );
        assert_eq!(collect(b"  turb \r\n help\r\n"), [&b"turb"[..], b"help"]);
        assert!(collect(b"").is_empty());
        assert!(collect(b" \r\n  ").is_empty());
    }

    #[test]
    fn test_matches_reference_split() {
        let lines: [&[u8]; 6] = [
            b"echo hello world",
            b"   leading",
            b"trailing   ",
            b"a\rb\nc d",
            b"ec calibrate set 8.0 2.0",
            b"x0123456789012345678901234567890123456789 y",
        ];
        for line in lines {
            assert_eq!(collect(line), split_reference(line), "line {:?}", line);
        }
    }

    #[test]
    fn test_long_token_is_truncated_and_scan_continues() {
        let long = [b'a'; 40];
        let mut line = Vec::from(&long[..]);
        line.extend_from_slice(b" next");

        let mut tokens = Tokenizer::new(&line);
        let first = tokens.next_token().unwrap();
        assert_eq!(first.as_bytes().len(), MAX_TOKEN_LEN);
        assert_eq!(tokens.next_token().unwrap().as_bytes(), b"next");
        assert!(tokens.next_token().is_none());
    }

    #[test]
    fn test_remainder_starts_after_closing_delimiter() {
        let mut tokens = Tokenizer::new(b"echo  some text");
        assert!(tokens.next_token().unwrap().is("echo"));
        assert_eq!(tokens.remainder(), b" some text");

        let mut bare = Tokenizer::new(b"echo");
        bare.next_token();
        assert_eq!(bare.remainder(), b"");
        assert!(bare.next_token().is_none());
        assert!(bare.next_token().is_none());
    }

    #[test]
    fn test_parse_f32() {
        let mut tokens = Tokenizer::new(b"2.5 -0.25 abc 1e3 inf NaN");
        assert_eq!(tokens.next_token().unwrap().parse_f32(), Some(2.5));
        assert_eq!(tokens.next_token().unwrap().parse_f32(), Some(-0.25));
        assert_eq!(tokens.next_token().unwrap().parse_f32(), None);
        assert_eq!(tokens.next_token().unwrap().parse_f32(), Some(1000.0));
        assert_eq!(tokens.next_token().unwrap().parse_f32(), None);
        assert_eq!(tokens.next_token().unwrap().parse_f32(), None);
    }
}
