//! Byte cursor over the input document.
//!
//! Delimiter searches go through memchr for SIMD acceleration where the
//! platform supports it. Positions are byte offsets; every offset handed
//! out lands on an ASCII delimiter, so slicing the underlying `&str` at
//! scanner positions is always char-boundary safe.

use memchr::memchr;

pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    fn bytes(&self) -> &'a [u8] {
        self.input.as_bytes()
    }

    /// Unconsumed remainder of the input.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos.min(self.input.len())..]
    }

    /// Slice of the input between two scanner positions.
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        self.input.get(start..end).unwrap_or("")
    }

    /// Current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    #[inline]
    pub fn starts_with(&self, needle: &str) -> bool {
        self.input[self.pos.min(self.input.len())..].starts_with(needle)
    }

    #[inline]
    pub fn skip_whitespace(&mut self) {
        let bytes = self.bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Absolute position of the next occurrence of `byte`, if any.
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.bytes()[self.pos.min(self.input.len())..]).map(|i| self.pos + i)
    }

    /// Absolute position of the next `<`.
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        self.find_byte(b'<')
    }

    /// Absolute position of the next `>` that is not inside a quoted
    /// attribute value.
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let bytes = self.bytes();
        let mut pos = self.pos;
        let mut in_single_quote = false;
        let mut in_double_quote = false;

        while pos < bytes.len() {
            match bytes[pos] {
                b'"' if !in_single_quote => in_double_quote = !in_double_quote,
                b'\'' if !in_double_quote => in_single_quote = !in_single_quote,
                b'>' if !in_single_quote && !in_double_quote => return Some(pos),
                _ => {}
            }
            pos += 1;
        }
        None
    }

    /// Read an XML name, advancing past it. Returns `None` without moving
    /// when the current byte cannot start a name.
    pub fn read_name(&mut self) -> Option<&'a str> {
        let bytes = self.bytes();
        let start = self.pos;

        if !is_name_start_char(*bytes.get(start)?) {
            return None;
        }
        self.pos += 1;

        while self.pos < bytes.len() && is_name_char(bytes[self.pos]) {
            self.pos += 1;
        }

        Some(self.slice(start, self.pos))
    }
}

/// Valid XML name start byte: ASCII letter, underscore, colon, or the
/// lead byte of a non-ASCII UTF-8 sequence.
#[inline]
pub fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b':') || b >= 0x80
}

/// Valid XML name continuation byte.
#[inline]
pub fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':') || b >= 0x80
}
