//! XML tokenizer.
//!
//! Linear scan of the input producing lexical tokens: element tags, text
//! runs, CDATA sections, comments, processing instructions, and DTD
//! declarations. PI and DTD tokens carry the raw markup text; structure
//! inside them is never interpreted.
//!
//! Malformed markup is fatal: the first fault aborts tokenization with a
//! [`ParseError`] carrying the byte offset of the offending construct.

use super::scanner::Scanner;
use crate::error::ParseError;
use log::trace;
use std::borrow::Cow;

/// One lexical token. Borrowed slices point into the input; text content
/// is owned only when entity decoding rewrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// `<name ...>` — `attr_text` is the raw text between the name and `>`.
    StartTag {
        name: &'a str,
        attr_text: &'a str,
        pos: usize,
    },
    /// `<name .../>`
    EmptyTag {
        name: &'a str,
        attr_text: &'a str,
        pos: usize,
    },
    /// `</name>`
    EndTag { name: &'a str, pos: usize },
    /// Character data between tags, entity-decoded.
    Text(Cow<'a, str>),
    /// `<![CDATA[...]]>` contents, taken literally.
    CData(&'a str),
    /// `<!-- ... -->` contents.
    Comment(&'a str),
    /// A processing instruction, raw including the `<? ?>` delimiters.
    Pi(&'a str),
    /// A `<!DOCTYPE ...>` or other `<!...>` declaration, raw.
    DocType(&'a str),
    /// End of input.
    Eof,
}

pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    done: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            done: false,
        }
    }

    /// Current byte offset into the input.
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Produce the next token. Returns `Token::Eof` at end of input and
    /// on every call thereafter.
    pub fn next_token(&mut self) -> Result<Token<'a>, ParseError> {
        if self.done || self.scanner.is_eof() {
            self.done = true;
            return Ok(Token::Eof);
        }

        let token = match self.scanner.peek() {
            Some(b'<') => self.tokenize_markup(),
            Some(_) => self.tokenize_text(),
            None => {
                self.done = true;
                return Ok(Token::Eof);
            }
        };

        if token.is_err() {
            self.done = true;
        }
        if let Ok(ref token) = token {
            trace!("token at {}: {:?}", self.scanner.position(), token);
        }
        token
    }

    /// Dispatch on the byte after `<`.
    fn tokenize_markup(&mut self) -> Result<Token<'a>, ParseError> {
        let start = self.scanner.position();
        self.scanner.advance(1); // '<'

        match self.scanner.peek() {
            Some(b'/') => self.tokenize_end_tag(start),
            Some(b'!') => self.tokenize_declaration(start),
            Some(b'?') => self.tokenize_pi(start),
            Some(_) => self.tokenize_start_tag(start),
            None => Err(ParseError::Unterminated {
                construct: "tag",
                position: start,
            }),
        }
    }

    fn tokenize_start_tag(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        let name = self
            .scanner
            .read_name()
            .ok_or(ParseError::InvalidName { position: start })?;
        let name_end = self.scanner.position();

        let end = self
            .scanner
            .find_tag_end_quoted()
            .ok_or(ParseError::Unterminated {
                construct: "tag",
                position: start,
            })?;

        let is_empty = end > name_end && self.scanner.slice(end - 1, end) == "/";
        let attr_end = if is_empty { end - 1 } else { end };
        let attr_text = self.scanner.slice(name_end, attr_end);

        self.scanner.set_position(end + 1);

        if is_empty {
            Ok(Token::EmptyTag {
                name,
                attr_text,
                pos: start,
            })
        } else {
            Ok(Token::StartTag {
                name,
                attr_text,
                pos: start,
            })
        }
    }

    fn tokenize_end_tag(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        self.scanner.advance(1); // '/'

        let name = self
            .scanner
            .read_name()
            .ok_or(ParseError::InvalidName { position: start })?;
        let name_end = self.scanner.position();

        let end = self.scanner.find_byte(b'>').ok_or(ParseError::Unterminated {
            construct: "closing tag",
            position: start,
        })?;

        // Only whitespace may sit between the name and '>'
        if !self.scanner.slice(name_end, end).trim().is_empty() {
            return Err(ParseError::InvalidMarkup { position: name_end });
        }

        self.scanner.set_position(end + 1);
        Ok(Token::EndTag { name, pos: start })
    }

    /// `<!...` markup: comment, CDATA, or a raw DTD declaration.
    fn tokenize_declaration(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        self.scanner.advance(1); // '!'

        if self.scanner.starts_with("--") {
            self.tokenize_comment(start)
        } else if self.scanner.starts_with("[CDATA[") {
            self.tokenize_cdata(start)
        } else {
            self.tokenize_doctype(start)
        }
    }

    fn tokenize_comment(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        self.scanner.advance(2); // '--'
        let content_start = self.scanner.position();

        loop {
            let pos = self.scanner.find_byte(b'-').ok_or(ParseError::Unterminated {
                construct: "comment",
                position: start,
            })?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with("-->") {
                let content = self.scanner.slice(content_start, pos);
                self.scanner.advance(3);
                return Ok(Token::Comment(content));
            }
            self.scanner.advance(1);
        }
    }

    fn tokenize_cdata(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        self.scanner.advance(7); // '[CDATA['
        let content_start = self.scanner.position();

        loop {
            let pos = self.scanner.find_byte(b']').ok_or(ParseError::Unterminated {
                construct: "CDATA section",
                position: start,
            })?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with("]]>") {
                let content = self.scanner.slice(content_start, pos);
                self.scanner.advance(3);
                return Ok(Token::CData(content));
            }
            self.scanner.advance(1);
        }
    }

    /// Capture a `<!...>` declaration verbatim, honoring the internal
    /// subset brackets and quoted literals a DOCTYPE may contain.
    fn tokenize_doctype(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        let mut in_subset = false;
        let mut in_string = false;
        let mut string_char = 0u8;

        while let Some(b) = self.scanner.peek() {
            if in_string {
                if b == string_char {
                    in_string = false;
                }
                self.scanner.advance(1);
                continue;
            }
            match b {
                b'"' | b'\'' => {
                    in_string = true;
                    string_char = b;
                }
                b'[' => in_subset = true,
                b']' => in_subset = false,
                b'>' if !in_subset => {
                    let raw = self.scanner.slice(start, self.scanner.position() + 1);
                    self.scanner.advance(1);
                    return Ok(Token::DocType(raw));
                }
                _ => {}
            }
            self.scanner.advance(1);
        }

        Err(ParseError::Unterminated {
            construct: "DTD declaration",
            position: start,
        })
    }

    fn tokenize_pi(&mut self, start: usize) -> Result<Token<'a>, ParseError> {
        self.scanner.advance(1); // '?'

        loop {
            let pos = self.scanner.find_byte(b'?').ok_or(ParseError::Unterminated {
                construct: "processing instruction",
                position: start,
            })?;
            self.scanner.set_position(pos);

            if self.scanner.starts_with("?>") {
                self.scanner.advance(2);
                let raw = self.scanner.slice(start, self.scanner.position());
                return Ok(Token::Pi(raw));
            }
            self.scanner.advance(1);
        }
    }

    fn tokenize_text(&mut self) -> Result<Token<'a>, ParseError> {
        let start = self.scanner.position();
        let end = self
            .scanner
            .find_tag_start()
            .unwrap_or(start + self.scanner.remaining().len());

        let content = self.scanner.slice(start, end);
        self.scanner.set_position(end);

        Ok(Token::Text(super::entities::decode_entities(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tokens(input: &str) -> Vec<Token<'_>> {
        let mut tokenizer = Tokenizer::new(input);
        let mut tokens = Vec::new();
        loop {
            match tokenizer.next_token().expect("tokenize") {
                Token::Eof => break,
                token => tokens.push(token),
            }
        }
        tokens
    }

    #[test]
    fn test_simple_element() {
        let tokens = all_tokens("<root>hello</root>");
        assert_eq!(tokens.len(), 3);
        assert!(matches!(tokens[0], Token::StartTag { name: "root", .. }));
        assert!(matches!(&tokens[1], Token::Text(t) if t == "hello"));
        assert!(matches!(tokens[2], Token::EndTag { name: "root", .. }));
    }

    #[test]
    fn test_empty_element() {
        let tokens = all_tokens("<br/>");
        assert_eq!(tokens.len(), 1);
        assert!(matches!(tokens[0], Token::EmptyTag { name: "br", .. }));
    }

    #[test]
    fn test_attr_text_captured() {
        let tokens = all_tokens("<div id=\"main\" class=\"c\"/>");
        match &tokens[0] {
            Token::EmptyTag { attr_text, .. } => {
                assert_eq!(*attr_text, " id=\"main\" class=\"c\"");
            }
            other => panic!("expected EmptyTag, got {other:?}"),
        }
    }

    #[test]
    fn test_gt_inside_quoted_attr() {
        let tokens = all_tokens("<a title=\"x > y\"></a>");
        assert!(matches!(tokens[0], Token::StartTag { name: "a", .. }));
    }

    #[test]
    fn test_text_entities_decoded() {
        let tokens = all_tokens("<a>x &lt; y</a>");
        assert!(matches!(&tokens[1], Token::Text(t) if t == "x < y"));
    }

    #[test]
    fn test_cdata_is_literal() {
        let tokens = all_tokens("<s><![CDATA[a < b & c]]></s>");
        assert!(matches!(tokens[1], Token::CData("a < b & c")));
    }

    #[test]
    fn test_comment() {
        let tokens = all_tokens("<r><!-- note --></r>");
        assert!(matches!(tokens[1], Token::Comment(" note ")));
    }

    #[test]
    fn test_pi_raw() {
        let tokens = all_tokens("<?xml version=\"1.0\"?><r/>");
        assert!(matches!(tokens[0], Token::Pi("<?xml version=\"1.0\"?>")));
    }

    #[test]
    fn test_doctype_raw() {
        let tokens = all_tokens("<!DOCTYPE html [<!ENTITY x \"y>\">]><r/>");
        assert!(matches!(
            tokens[0],
            Token::DocType("<!DOCTYPE html [<!ENTITY x \"y>\">]>")
        ));
    }

    #[test]
    fn test_unterminated_tag() {
        let mut tokenizer = Tokenizer::new("<a foo=\"1\"");
        assert!(matches!(
            tokenizer.next_token(),
            Err(ParseError::Unterminated { construct: "tag", .. })
        ));
    }

    #[test]
    fn test_unterminated_comment() {
        let mut tokenizer = Tokenizer::new("<r><!-- oops");
        tokenizer.next_token().expect("start tag");
        assert!(matches!(
            tokenizer.next_token(),
            Err(ParseError::Unterminated { construct: "comment", .. })
        ));
    }

    #[test]
    fn test_invalid_name() {
        let mut tokenizer = Tokenizer::new("<1bad>");
        assert!(matches!(
            tokenizer.next_token(),
            Err(ParseError::InvalidName { position: 0 })
        ));
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut tokenizer = Tokenizer::new("");
        assert_eq!(tokenizer.next_token(), Ok(Token::Eof));
        assert_eq!(tokenizer.next_token(), Ok(Token::Eof));
    }
}
