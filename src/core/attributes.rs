//! Attribute parsing from raw in-tag text.
//!
//! The tokenizer hands over everything between the element name and the
//! closing `>`; this module splits it into ordered name/value pairs with
//! entity-decoded values. Parsing is lenient: single quotes, double
//! quotes, unquoted values, and bare names (empty value) are accepted,
//! and bytes that cannot start a name are skipped.

use super::entities::decode_entities;
use super::scanner::{is_name_char, is_name_start_char};
use std::borrow::Cow;

/// One parsed attribute. The name borrows from the tag text; the value
/// is owned only when entity decoding rewrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: Cow<'a, str>,
}

/// Parse the attribute section of a tag in document order.
pub fn parse_attributes(input: &str) -> Vec<Attribute<'_>> {
    let bytes = input.as_bytes();
    let mut attrs = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() {
            break;
        }

        if !is_name_start_char(bytes[pos]) {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < bytes.len() && is_name_char(bytes[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }

        if pos >= bytes.len() || bytes[pos] != b'=' {
            // Bare name with no value
            attrs.push(Attribute {
                name,
                value: Cow::Borrowed(""),
            });
            continue;
        }
        pos += 1;

        while pos < bytes.len() && is_whitespace(bytes[pos]) {
            pos += 1;
        }
        if pos >= bytes.len() {
            attrs.push(Attribute {
                name,
                value: Cow::Borrowed(""),
            });
            break;
        }

        let quote = bytes[pos];
        let raw_value = if quote == b'"' || quote == b'\'' {
            pos += 1;
            let value_start = pos;
            while pos < bytes.len() && bytes[pos] != quote {
                pos += 1;
            }
            let raw = &input[value_start..pos];
            if pos < bytes.len() {
                pos += 1;
            }
            raw
        } else {
            // Unquoted value, runs to the next whitespace
            let value_start = pos;
            while pos < bytes.len() && !is_whitespace(bytes[pos]) {
                pos += 1;
            }
            &input[value_start..pos]
        };

        attrs.push(Attribute {
            name,
            value: decode_entities(raw_value),
        });
    }

    attrs
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
