//! Line records and single-line properties syntax.
//!
//! A physical line is blank, a comment (`#` or `!` after optional
//! whitespace), or one `key = value` pair. There are no continuation lines:
//! a trailing backslash is dropped rather than joining the next line.

use serde::{Deserialize, Serialize};

/// One physical line of a properties file.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineRecord {
    /// Blank line, comment, or a preserved unparseable line. Stored verbatim.
    Comment { text: String },
    /// A key/value pair. Keys are unique within a store.
    Entry { key: String, value: String },
}

impl LineRecord {
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment { text: text.into() }
    }

    pub fn entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Entry {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The key, for entries.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Entry { key, .. } => Some(key),
            Self::Comment { .. } => None,
        }
    }

    /// The value, for entries.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Entry { value, .. } => Some(value),
            Self::Comment { .. } => None,
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, Self::Entry { .. })
    }

    /// Render the record as it is written to a file (without terminator).
    pub fn to_line(&self) -> String {
        match self {
            Self::Comment { text } => text.clone(),
            Self::Entry { key, value } => {
                format!("{} = {}", escape(key, true), escape(value, false))
            }
        }
    }
}

/// Whitespace as understood by the blank/comment patterns (`\s`).
fn is_pattern_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

/// Whitespace that separates a key from its value.
fn is_separator_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{0C}')
}

/// `true` if the line contains only whitespace.
pub fn is_blank(line: &str) -> bool {
    line.chars().all(is_pattern_whitespace)
}

/// `true` if the first non-whitespace character is `#` or `!`.
pub fn is_comment(line: &str) -> bool {
    matches!(
        line.chars().find(|c| !is_pattern_whitespace(*c)),
        Some('#' | '!')
    )
}

/// Parse a non-blank, non-comment line into a key/value pair.
///
/// The key ends at the first unescaped `=`, `:` or whitespace. Whitespace
/// around the separator is skipped and the value runs to the end of the
/// line. Returns `None` when the key comes out empty.
pub fn parse_entry(line: &str) -> Option<(String, String)> {
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    let mut pos = 0;
    while pos < len && is_separator_whitespace(chars[pos]) {
        pos += 1;
    }

    let key_start = pos;
    let mut key_end = len;
    let mut value_start = len;
    let mut explicit_separator = false;
    let mut escaped = false;
    while pos < len {
        let c = chars[pos];
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' {
            key_end = pos;
            value_start = pos + 1;
            explicit_separator = true;
            break;
        } else if is_separator_whitespace(c) {
            key_end = pos;
            value_start = pos + 1;
            break;
        }
        pos += 1;
    }

    let mut pos = value_start;
    while pos < len && is_separator_whitespace(chars[pos]) {
        pos += 1;
    }
    if !explicit_separator && pos < len && (chars[pos] == '=' || chars[pos] == ':') {
        pos += 1;
        while pos < len && is_separator_whitespace(chars[pos]) {
            pos += 1;
        }
    }

    let key = unescape(&chars[key_start..key_end]);
    if key.is_empty() {
        return None;
    }
    Some((key, unescape(&chars[pos.min(len)..])))
}

/// Resolve backslash escapes.
///
/// `\t`, `\n`, `\r`, `\f` and `\uXXXX` are translated; any other escaped
/// character stands for itself. A `\u` without four hex digits keeps the `u`
/// literally. Unpaired surrogates become U+FFFD.
fn unescape(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut pending_high: Option<u16> = None;
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        pos += 1;
        if c != '\\' {
            flush_surrogate(&mut out, &mut pending_high);
            out.push(c);
            continue;
        }
        let Some(&next) = chars.get(pos) else {
            break;
        };
        pos += 1;
        let decoded = match next {
            't' => '\t',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{0C}',
            'u' => match hex_unit(chars.get(pos..pos + 4)) {
                Some(unit) => {
                    pos += 4;
                    push_utf16_unit(&mut out, &mut pending_high, unit);
                    continue;
                }
                None => 'u',
            },
            other => other,
        };
        flush_surrogate(&mut out, &mut pending_high);
        out.push(decoded);
    }
    flush_surrogate(&mut out, &mut pending_high);
    out
}

fn hex_unit(digits: Option<&[char]>) -> Option<u16> {
    let digits = digits?;
    digits.iter().try_fold(0u16, |acc, d| {
        d.to_digit(16).map(|v| (acc << 4) | v as u16)
    })
}

fn push_utf16_unit(out: &mut String, pending_high: &mut Option<u16>, unit: u16) {
    match (pending_high.take(), unit) {
        (Some(high), 0xDC00..=0xDFFF) => {
            let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
            out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        (previous, 0xD800..=0xDBFF) => {
            if previous.is_some() {
                out.push(char::REPLACEMENT_CHARACTER);
            }
            *pending_high = Some(unit);
        }
        (previous, _) => {
            if previous.is_some() {
                out.push(char::REPLACEMENT_CHARACTER);
            }
            out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
    }
}

fn flush_surrogate(out: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}

/// Escape a key or value so that [`parse_entry`] reads it back unchanged.
///
/// Plain text passes through untouched, so files keep their familiar look.
fn escape(text: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{0C}' => out.push_str("\\f"),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            c if u32::from(c) > 0xFF => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}
