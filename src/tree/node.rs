//! The parsed tree value.
//!
//! A [`Node`] is one of three shapes: a text leaf, an element hash
//! (insertion-ordered mapping from child/attribute name to node), or a
//! list produced by repeated sibling tags. The tree returned by parsing
//! is fully owned by the caller and freely mutable; the library keeps no
//! references into it.

use indexmap::IndexMap;

/// Insertion-ordered element mapping.
pub type XmlHash = IndexMap<String, Node>;

/// Reserved key holding the attribute sub-hash when attribute
/// preservation is enabled.
pub const ATTRIBS_KEY: &str = "_Attribs";

/// Reserved key holding text content of an element that also has
/// attributes or child elements.
pub const DATA_KEY: &str = "_Data";

/// Document-node key listing raw processing-instruction text.
pub const PI_NODE_LIST_KEY: &str = "piNodeList";

/// Document-node key listing raw DTD declaration text.
pub const DTD_NODE_LIST_KEY: &str = "dtdNodeList";

/// A parsed XML value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data.
    Text(String),
    /// An element with attributes and/or child elements.
    Hash(XmlHash),
    /// Repeated sibling elements under one tag name.
    List(Vec<Node>),
}

impl Node {
    /// True iff this is an element hash (not a list, not a leaf).
    #[inline]
    pub fn is_hash(&self) -> bool {
        matches!(self, Node::Hash(_))
    }

    /// True iff this is an ordered sequence of nodes.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// True iff this is a text leaf.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    pub fn as_hash(&self) -> Option<&XmlHash> {
        match self {
            Node::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    pub fn as_hash_mut(&mut self) -> Option<&mut XmlHash> {
        match self {
            Node::Hash(hash) => Some(hash),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a key on an element hash. Returns `None` for the other
    /// two shapes.
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_hash().and_then(|hash| hash.get(key))
    }

    /// Consume the node into a sequence: a list yields its items, any
    /// other shape becomes a one-element sequence.
    pub fn into_array(self) -> Vec<Node> {
        match self {
            Node::List(items) => items,
            other => vec![other],
        }
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// Normalize a node to a sequence without inspecting its contents:
/// lists pass through unchanged, anything else is wrapped singly.
pub fn always_array(node: Node) -> Vec<Node> {
    node.into_array()
}

/// All keys of a hash as an owned sequence, suitable for sorting before
/// deterministic iteration. The unsorted order is implementation-defined
/// and must not be relied on.
pub fn hash_keys_to_array(hash: &XmlHash) -> Vec<String> {
    hash.keys().cloned().collect()
}

/// Number of keys in a hash.
pub fn num_keys(hash: &XmlHash) -> usize {
    hash.len()
}

/// Some key of the hash, or `None` when it is empty. Which key is
/// returned is implementation-defined; callers must not depend on it.
pub fn first_key(hash: &XmlHash) -> Option<&str> {
    hash.keys().next().map(String::as_str)
}
