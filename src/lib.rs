//! xmlfold - XML to plain hash/array trees and back.
//!
//! Parses XML text into a tree of three value shapes (text leaf, ordered
//! element hash, array of repeated siblings) and composes such trees
//! back into indented XML. Repeated sibling tags array-coerce
//! automatically; attributes either fold into the element hash or sit
//! under a reserved `_Attribs` key; mixed text lands under `_Data`.
//!
//! ```
//! use xmlfold::{parse, stringify, Node};
//!
//! let tree = parse("<fruits><apple>red</apple><apple>green</apple></fruits>")?;
//! let apples = tree.get("apple").and_then(Node::as_array).unwrap();
//! assert_eq!(apples.len(), 2);
//!
//! let xml = stringify(&tree, "fruits");
//! assert!(xml.contains("<apple>red</apple>"));
//! # Ok::<(), xmlfold::ParseError>(())
//! ```
//!
//! Namespaces, DTD validation, and external entities are out of scope;
//! PI and DOCTYPE text is captured raw and exposed through the optional
//! document node. The returned tree is fully owned by the caller and
//! freely mutable.

mod compose;
mod core;
mod document;
mod error;
mod tree;

pub use crate::core::entities::{decode_entities, encode_attrib_entities, encode_entities};
pub use compose::{stringify, Composer};
pub use document::Document;
pub use error::ParseError;
pub use tree::builder::{parse, parse_with_options, ParseOptions};
pub use tree::node::{
    always_array, first_key, hash_keys_to_array, num_keys, Node, XmlHash, ATTRIBS_KEY, DATA_KEY,
    DTD_NODE_LIST_KEY, PI_NODE_LIST_KEY,
};
