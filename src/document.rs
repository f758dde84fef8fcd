//! Parsed document handle.
//!
//! [`Document`] pairs a parsed tree with the root element name so the
//! document can be composed back without the caller re-supplying it.
//! The tree is plain data: mutate it through [`Document::tree_mut`] or
//! take it with [`Document::into_tree`].

use crate::compose::Composer;
use crate::error::ParseError;
use crate::tree::builder::{parse_tree, ParseOptions};
use crate::tree::node::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    tree: Node,
    root_name: String,
    preserve_document_node: bool,
}

impl Document {
    /// Parse `xml` into a document.
    pub fn parse(xml: &str, options: &ParseOptions) -> Result<Document, ParseError> {
        let (root_name, tree) = parse_tree(xml, options)?;
        Ok(Document {
            tree,
            root_name,
            preserve_document_node: options.preserve_document_node,
        })
    }

    /// Name of the root element.
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// The parsed tree. When the document was parsed with
    /// `preserve_document_node`, this is the document node carrying
    /// `piNodeList` and `dtdNodeList`.
    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Node {
        &mut self.tree
    }

    pub fn into_tree(self) -> Node {
        self.tree
    }

    /// The root element node, unwrapping the document node if present.
    pub fn root(&self) -> &Node {
        if self.preserve_document_node {
            self.tree.get(&self.root_name).unwrap_or(&self.tree)
        } else {
            &self.tree
        }
    }

    /// Compose the document back to XML with default settings. Output
    /// starts with a standard XML declaration header.
    pub fn compose(&self) -> String {
        self.compose_with(&Composer::new())
    }

    /// Compose with explicit serializer settings.
    pub fn compose_with(&self, composer: &Composer) -> String {
        let mut out = String::from("<?xml version=\"1.0\"?>\n");
        out.push_str(&composer.compose(self.root(), &self.root_name));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_compose() {
        let doc = Document::parse("<r><x>1</x></r>", &ParseOptions::default()).unwrap();
        assert_eq!(doc.root_name(), "r");
        assert_eq!(doc.compose(), "<?xml version=\"1.0\"?>\n<r>\n\t<x>1</x>\n</r>\n");
    }

    #[test]
    fn test_document_node_unwrapped_for_compose() {
        let options = ParseOptions {
            preserve_document_node: true,
            ..Default::default()
        };
        let doc = Document::parse("<?xml version=\"1.0\"?><r><x>1</x></r>", &options).unwrap();
        assert_eq!(doc.root_name(), "r");
        assert!(doc.tree().get("piNodeList").is_some());
        assert_eq!(doc.compose(), "<?xml version=\"1.0\"?>\n<r>\n\t<x>1</x>\n</r>\n");
    }

    #[test]
    fn test_tree_is_mutable() {
        let mut doc = Document::parse("<r><x>1</x></r>", &ParseOptions::default()).unwrap();
        if let Some(hash) = doc.tree_mut().as_hash_mut() {
            hash.insert("y".to_string(), Node::from("2"));
        }
        let composed = doc.compose();
        assert!(composed.contains("<y>2</y>"));
    }
}
