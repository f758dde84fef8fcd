//! Parse error taxonomy.
//!
//! Every malformed-input fault surfaces as a single terminal
//! [`ParseError`]; no partial tree is returned. Positions are byte
//! offsets into the input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A closing tag did not match the element currently open.
    #[error("mismatched closing tag </{found}> at byte {position}, expected </{expected}>")]
    MismatchedTag {
        expected: String,
        found: String,
        position: usize,
    },

    /// A closing tag appeared with no element open.
    #[error("unexpected closing tag </{name}> at byte {position}")]
    UnexpectedClose { name: String, position: usize },

    /// Input ended while the named element was still open.
    #[error("unclosed element <{name}> opened at byte {position}")]
    UnclosedElement { name: String, position: usize },

    /// A tag did not start with a legal XML name.
    #[error("invalid name in tag at byte {position}")]
    InvalidName { position: usize },

    /// A markup construct never reached its terminator.
    #[error("unterminated {construct} starting at byte {position}")]
    Unterminated {
        construct: &'static str,
        position: usize,
    },

    /// Markup that is none of the recognized constructs.
    #[error("invalid markup at byte {position}")]
    InvalidMarkup { position: usize },

    /// The document held no element at all.
    #[error("document contains no root element")]
    NoRootElement,

    /// A second element appeared at the top level.
    #[error("unexpected second root element <{name}> at byte {position}")]
    MultipleRoots { name: String, position: usize },
}
