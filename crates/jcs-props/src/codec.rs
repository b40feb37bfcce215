//! ISO-8859-1 text codec and physical line splitting.
//!
//! Every byte maps to the code point of the same value, so decoding never
//! fails. Encoding replaces characters above U+00FF with `?`; entry keys and
//! values never reach that path because [`crate::line`] escapes them as
//! `\uXXXX` first.

use std::io::{self, Write};

/// Replacement byte for characters outside ISO-8859-1.
const UNMAPPABLE: u8 = b'?';

/// Decode ISO-8859-1 bytes.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode text as ISO-8859-1, replacing unmappable characters with `?`.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(UNMAPPABLE))
        .collect()
}

/// Write one line of text followed by `separator`.
pub fn write_line<W: Write>(writer: &mut W, text: &str, separator: &str) -> io::Result<()> {
    writer.write_all(&encode_latin1(text))?;
    writer.write_all(separator.as_bytes())
}

/// Iterator over the physical lines of a byte buffer.
///
/// `\n`, `\r\n` and a lone `\r` each end a line. A terminator at the very end
/// of the input does not produce a trailing empty line.
#[derive(Debug, Clone)]
pub struct PhysicalLines<'a> {
    rest: &'a [u8],
}

impl<'a> PhysicalLines<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { rest: input }
    }
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let line = &self.rest[..end];
                let crlf = self.rest[end] == b'\r' && self.rest.get(end + 1) == Some(&b'\n');
                self.rest = &self.rest[end + if crlf { 2 } else { 1 }..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = &[];
                Some(line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[u8]) -> Vec<String> {
        PhysicalLines::new(input).map(decode_latin1).collect()
    }

    #[test]
    fn splits_on_every_terminator_style() {
        assert_eq!(lines(b"a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn trailing_terminator_adds_no_line() {
        assert_eq!(lines(b"a\n"), vec!["a"]);
        assert_eq!(lines(b"a\r\n"), vec!["a"]);
    }

    #[test]
    fn empty_lines_are_kept() {
        assert_eq!(lines(b"a\n\n\nb"), vec!["a", "", "", "b"]);
        assert_eq!(lines(b"\r\n\r\n"), vec!["", ""]);
    }

    #[test]
    fn empty_input_has_no_lines() {
        assert!(lines(b"").is_empty());
    }

    #[test]
    fn latin1_high_bytes_decode_to_matching_code_points() {
        assert_eq!(decode_latin1(&[0x63, 0x61, 0x66, 0xE9]), "café");
        assert_eq!(decode_latin1(&[0xFF]), "\u{FF}");
    }

    #[test]
    fn encode_replaces_unmappable() {
        assert_eq!(encode_latin1("café"), vec![0x63, 0x61, 0x66, 0xE9]);
        assert_eq!(encode_latin1("a\u{20AC}b"), b"a?b".to_vec());
    }

    #[test]
    fn write_line_appends_separator() {
        let mut out = Vec::new();
        write_line(&mut out, "# hi", "\r\n").unwrap();
        write_line(&mut out, "", "\r\n").unwrap();
        assert_eq!(out, b"# hi\r\n\r\n");
    }
}
