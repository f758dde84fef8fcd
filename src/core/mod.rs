//! Core XML lexing primitives.
//!
//! - Scanner: memchr-accelerated byte cursor and delimiter search
//! - Entities: bidirectional entity codec with Cow fast paths
//! - Attributes: raw tag text to ordered name/value pairs
//! - Tokenizer: state machine producing lexical tokens

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tokenizer;
