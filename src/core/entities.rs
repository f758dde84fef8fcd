//! XML entity encoding and decoding.
//!
//! Two encoder widths: text content escapes the three bracket/ampersand
//! entities, attribute values additionally escape both quote styles.
//! Decoding handles the five named entities plus numeric character
//! references. All three functions are total; unknown or malformed
//! entity sequences pass through unchanged.
//!
//! Uses Cow for zero-copy when nothing needs rewriting.

use memchr::{memchr, memchr2, memchr3};
use std::borrow::Cow;

/// Escape `&`, `<`, `>` for element text content.
///
/// Returns Borrowed when the input contains none of them.
pub fn encode_entities(text: &str) -> Cow<'_, str> {
    if memchr3(b'&', b'<', b'>', text.as_bytes()).is_none() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            // A single pass cannot double-encode: each source '&' is
            // rewritten exactly once.
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape `&`, `<`, `>`, `'`, `"` for attribute values.
pub fn encode_attrib_entities(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr3(b'&', b'<', b'>', bytes).is_none() && memchr2(b'\'', b'"', bytes).is_none() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Decode the five named entities and numeric character references.
///
/// Returns Borrowed when no `&` is present. Unknown entities, bare
/// ampersands, and unterminated references are kept literally; this
/// function never fails. Decoding is a single left-to-right pass, so
/// `&amp;lt;` becomes `&lt;` rather than `<`.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    let bytes = text.as_bytes();
    if memchr(b'&', bytes).is_none() {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut pos = 0;

    while pos < bytes.len() {
        match memchr(b'&', &bytes[pos..]) {
            Some(rel) => {
                let amp = pos + rel;
                out.push_str(&text[pos..amp]);

                match memchr(b';', &bytes[amp..]) {
                    Some(semi_rel) => {
                        let reference = &text[amp + 1..amp + semi_rel];
                        match decode_reference(reference) {
                            Some(c) => {
                                out.push(c);
                                pos = amp + semi_rel + 1;
                            }
                            None => {
                                // Not a recognized entity, keep the '&'
                                // and rescan from the next byte.
                                out.push('&');
                                pos = amp + 1;
                            }
                        }
                    }
                    None => {
                        // No terminator anywhere ahead.
                        out.push('&');
                        pos = amp + 1;
                    }
                }
            }
            None => {
                out.push_str(&text[pos..]);
                break;
            }
        }
    }

    Cow::Owned(out)
}

/// Decode one reference body (the text between `&` and `;`).
fn decode_reference(reference: &str) -> Option<char> {
    match reference {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => reference.strip_prefix('#').and_then(decode_char_reference),
    }
}

/// Decode a numeric character reference body (after the `#`).
fn decode_char_reference(reference: &str) -> Option<char> {
    let codepoint = if let Some(hex) = reference.strip_prefix(['x', 'X']) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        reference.parse::<u32>().ok()?
    };
    char::from_u32(codepoint)
}
