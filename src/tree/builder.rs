//! Tree builder: folds the token stream into a [`Node`] tree.
//!
//! Maintains a stack of in-progress elements. Attributes either fold
//! directly into the element hash or land under `_Attribs`; repeated
//! sibling tags array-coerce; an element with no attributes and no
//! children collapses to a plain text leaf. PI and DTD declarations are
//! collected for the optional document node.

use super::node::{
    Node, XmlHash, ATTRIBS_KEY, DATA_KEY, DTD_NODE_LIST_KEY, PI_NODE_LIST_KEY,
};
use crate::core::attributes::parse_attributes;
use crate::core::tokenizer::{Token, Tokenizer};
use crate::error::ParseError;
use log::debug;

/// Options recognized by [`parse_with_options`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Keep attributes under an `_Attribs` sub-hash instead of folding
    /// them into the element hash alongside child elements.
    pub preserve_attributes: bool,
    /// ASCII-lowercase all element and attribute names.
    pub lower_case: bool,
    /// Wrap the root element in a document node carrying `piNodeList`
    /// and `dtdNodeList`.
    pub preserve_document_node: bool,
    /// Keep whitespace-only text runs and surrounding whitespace in
    /// element text.
    pub preserve_whitespace: bool,
    /// Wrap every attached child in an array, even on first occurrence.
    pub force_arrays: bool,
}

/// Parse with default options.
pub fn parse(xml: &str) -> Result<Node, ParseError> {
    parse_with_options(xml, &ParseOptions::default())
}

/// Parse an XML document into a caller-owned [`Node`] tree.
pub fn parse_with_options(xml: &str, options: &ParseOptions) -> Result<Node, ParseError> {
    parse_tree(xml, options).map(|(_, node)| node)
}

/// Parse and also report the root element name (the document node key
/// the root lives under when `preserve_document_node` is set).
pub(crate) fn parse_tree(
    xml: &str,
    options: &ParseOptions,
) -> Result<(String, Node), ParseError> {
    debug!("parsing {} bytes of XML", xml.len());

    let mut tokenizer = Tokenizer::new(xml);
    let mut builder = TreeBuilder::new(options);

    loop {
        match tokenizer.next_token()? {
            Token::Eof => break,
            Token::StartTag {
                name,
                attr_text,
                pos,
            } => builder.open(name, attr_text, pos),
            Token::EmptyTag {
                name,
                attr_text,
                pos,
            } => {
                builder.open(name, attr_text, pos);
                builder.close(name, pos)?;
            }
            Token::EndTag { name, pos } => builder.close(name, pos)?,
            Token::Text(text) => builder.text(&text),
            Token::CData(text) => builder.text(text),
            Token::Comment(_) => {}
            Token::Pi(raw) => builder.pi_nodes.push(raw.to_string()),
            Token::DocType(raw) => builder.dtd_nodes.push(raw.to_string()),
        }
    }

    builder.finish()
}

/// An element still waiting for its closing tag.
struct Frame {
    name: String,
    /// Byte offset of the opening `<` in the input.
    pos: usize,
    children: XmlHash,
    text: String,
}

struct TreeBuilder<'o> {
    options: &'o ParseOptions,
    stack: Vec<Frame>,
    root: Option<(String, Node)>,
    pi_nodes: Vec<String>,
    dtd_nodes: Vec<String>,
}

impl<'o> TreeBuilder<'o> {
    fn new(options: &'o ParseOptions) -> Self {
        TreeBuilder {
            options,
            stack: Vec::new(),
            root: None,
            pi_nodes: Vec::new(),
            dtd_nodes: Vec::new(),
        }
    }

    fn fold_case(&self, name: &str) -> String {
        if self.options.lower_case {
            name.to_ascii_lowercase()
        } else {
            name.to_string()
        }
    }

    fn open(&mut self, name: &str, attr_text: &str, pos: usize) {
        let mut frame = Frame {
            name: self.fold_case(name),
            pos,
            children: XmlHash::new(),
            text: String::new(),
        };

        let attrs = parse_attributes(attr_text);
        if !attrs.is_empty() {
            if self.options.preserve_attributes {
                let mut attribs = XmlHash::new();
                for attr in attrs {
                    attribs.insert(self.fold_case(attr.name), Node::Text(attr.value.into_owned()));
                }
                frame.children.insert(ATTRIBS_KEY.to_string(), Node::Hash(attribs));
            } else {
                // Folded mode: attributes share the element's key space
                // with child elements and go through the same attach
                // routine, so name collisions array-coerce like any
                // repeated key.
                for attr in attrs {
                    attach(
                        &mut frame.children,
                        self.fold_case(attr.name),
                        Node::Text(attr.value.into_owned()),
                        self.options.force_arrays,
                    );
                }
            }
        }

        self.stack.push(frame);
    }

    fn close(&mut self, name: &str, pos: usize) -> Result<(), ParseError> {
        let name = self.fold_case(name);

        let frame = self.stack.pop().ok_or_else(|| ParseError::UnexpectedClose {
            name: name.clone(),
            position: pos,
        })?;
        if frame.name != name {
            return Err(ParseError::MismatchedTag {
                expected: frame.name,
                found: name,
                position: pos,
            });
        }

        let node = self.finish_element(frame);

        match self.stack.last_mut() {
            Some(parent) => {
                attach(&mut parent.children, name, node, self.options.force_arrays);
                Ok(())
            }
            None if self.root.is_some() => Err(ParseError::MultipleRoots {
                name,
                position: pos,
            }),
            None => {
                self.root = Some((name, node));
                Ok(())
            }
        }
    }

    /// Turn a completed frame into its node value.
    fn finish_element(&self, frame: Frame) -> Node {
        let text = if self.options.preserve_whitespace {
            frame.text
        } else {
            frame.text.trim().to_string()
        };

        if frame.children.is_empty() {
            // No attributes, no child elements: collapse to a leaf
            return Node::Text(text);
        }

        let mut children = frame.children;
        if !text.is_empty() {
            children.insert(DATA_KEY.to_string(), Node::Text(text));
        }
        Node::Hash(children)
    }

    fn text(&mut self, content: &str) {
        // Character data outside the root element carries no meaning
        if let Some(frame) = self.stack.last_mut() {
            frame.text.push_str(content);
        }
    }

    fn finish(self) -> Result<(String, Node), ParseError> {
        if let Some(frame) = self.stack.last() {
            return Err(ParseError::UnclosedElement {
                name: frame.name.clone(),
                position: frame.pos,
            });
        }

        let (name, node) = self.root.ok_or(ParseError::NoRootElement)?;

        if self.options.preserve_document_node {
            let mut doc = XmlHash::new();
            doc.insert(
                PI_NODE_LIST_KEY.to_string(),
                Node::List(self.pi_nodes.into_iter().map(Node::Text).collect()),
            );
            doc.insert(
                DTD_NODE_LIST_KEY.to_string(),
                Node::List(self.dtd_nodes.into_iter().map(Node::Text).collect()),
            );
            doc.insert(name.clone(), node);
            Ok((name, Node::Hash(doc)))
        } else {
            Ok((name, node))
        }
    }
}

/// Attach a completed child under `key`, array-coercing on repetition.
fn attach(map: &mut XmlHash, key: String, node: Node, force_arrays: bool) {
    match map.get_mut(&key) {
        Some(Node::List(items)) => items.push(node),
        Some(existing) => {
            let prev = std::mem::replace(existing, Node::List(Vec::with_capacity(2)));
            if let Node::List(items) = existing {
                items.push(prev);
                items.push(node);
            }
        }
        None if force_arrays => {
            map.insert(key, Node::List(vec![node]));
        }
        None => {
            map.insert(key, node);
        }
    }
}
