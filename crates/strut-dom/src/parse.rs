//! HTML front end built on html5ever.
//!
//! html5ever produces an `RcDom`; we copy it into the arena [`DomTree`] so the
//! layout engine works on an immutable, index-addressed snapshot.

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use thiserror::Error;

use crate::{DomTree, ElementData, NodeId, NodeType};

/// Errors produced while building a [`DomTree`] from HTML.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input could not be read by the HTML tokenizer.
    #[error("failed to read HTML input: {0}")]
    Read(#[from] std::io::Error),
    /// The parsed document has no document element.
    #[error("document has no root element")]
    MissingDocumentElement,
}

/// Parse an HTML document into a [`DomTree`].
///
/// Doctype and processing-instruction nodes are dropped. Whitespace-only text
/// nodes are kept; they produce no text boxes during layout.
///
/// # Errors
///
/// Returns [`ParseError::Read`] if html5ever fails to consume the input and
/// [`ParseError::MissingDocumentElement`] if no root element was produced.
pub fn parse_html(html: &str) -> Result<DomTree, ParseError> {
    let dom: RcDom = parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut html.as_bytes())?;

    let mut tree = DomTree::new();
    for child in dom.document.children.borrow().iter() {
        convert_node(&mut tree, child, NodeId::ROOT);
    }

    if tree.document_element().is_none() {
        return Err(ParseError::MissingDocumentElement);
    }
    Ok(tree)
}

fn convert_node(tree: &mut DomTree, handle: &Handle, parent: NodeId) {
    match &handle.data {
        NodeData::Document => {
            for child in handle.children.borrow().iter() {
                convert_node(tree, child, parent);
            }
        }
        NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => {}
        NodeData::Text { contents } => {
            let _ = tree.append_text(parent, &contents.borrow());
        }
        NodeData::Comment { contents } => {
            let id = tree.alloc(NodeType::Comment(contents.to_string()));
            tree.append_child(parent, id);
        }
        NodeData::Element { name, attrs, .. } => {
            let mut data = ElementData::new(&name.local);
            for attr in attrs.borrow().iter() {
                let _ = data
                    .attrs
                    .insert(attr.name.local.to_string(), attr.value.to_string());
            }
            let id = tree.append_element(parent, data);
            for child in handle.children.borrow().iter() {
                convert_node(tree, child, id);
            }
        }
    }
}
