//! HTML5 fragment parsing using html5ever.
//!
//! The input is parsed as a whole document, exactly as a browser's
//! `DOMParser` would, and the children of `<body>` become the fragment. This
//! keeps the parser's error recovery (implicitly closed paragraphs, misnested
//! inline content, stray end tags) identical to what the editor sees.

use crate::dom::Document;
use html5ever::tendril::TendrilSink as _;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use indextree::NodeId;
use log::trace;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML fragment into an owned [`Document`].
///
/// Never fails: malformed markup is repaired by the HTML5 tree builder.
pub fn parse_fragment(html: &str) -> Document {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            exact_errors: false,
            scripting_enabled: false,
            ..TreeBuilderOpts::default()
        },
        ..ParseOpts::default()
    };
    let dom = parse_document(RcDom::default(), opts).one(html);
    trace!("parsed {} bytes of html", html.len());

    let mut document = Document::new();
    let root = document.root();
    if let Some(body) = find_body(&dom.document) {
        for child in body.children.borrow().iter() {
            convert_node(&mut document, child, root);
        }
    }
    document
}

/// Locate `<html><body>` below the document node.
fn find_body(document: &Handle) -> Option<Handle> {
    let html = child_element(document, "html")?;
    child_element(&html, "body")
}

fn child_element(parent: &Handle, local: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| matches!(&child.data, NodeData::Element { name, .. } if &*name.local == local))
        .cloned()
}

/// Convert an html5ever node to our arena representation.
fn convert_node(document: &mut Document, handle: &Handle, parent: NodeId) {
    match &handle.data {
        NodeData::Element { name, attrs, .. } => {
            let node = document.create_element(&name.local);
            for attr in attrs.borrow().iter() {
                document.set_attr(node, &attr.name.local, &attr.value);
            }
            document.append_child(parent, node);
            for child in handle.children.borrow().iter() {
                convert_node(document, child, node);
            }
        }
        NodeData::Text { contents } => {
            let node = document.create_text(&contents.borrow());
            document.append_child(parent, node);
        }
        NodeData::Comment { contents } => {
            let node = document.create_comment(contents);
            document.append_child(parent, node);
        }
        _ => {
            // Doctypes and processing instructions have no place in a fragment.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_children_become_the_fragment() {
        let doc = parse_fragment("<p>one</p><p>two</p>");
        assert_eq!(doc.element_children(doc.root()).len(), 2);
        assert_eq!(doc.to_html(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn block_inside_paragraph_closes_the_paragraph() {
        let doc = parse_fragment("<p><div>block</div></p>");
        assert_eq!(doc.to_html(), "<p></p><div>block</div><p></p>");
    }

    #[test]
    fn self_closing_paragraph_artifact_is_tolerated() {
        let doc = parse_fragment("<p/>text");
        assert_eq!(doc.to_html(), "<p>text</p>");
    }

    #[test]
    fn empty_input_gives_empty_fragment() {
        let doc = parse_fragment("");
        assert!(doc.children(doc.root()).is_empty());
    }

    #[test]
    fn attribute_order_is_preserved() {
        let doc = parse_fragment(r#"<img src="a.png" alt="A" style="width: 50%">"#);
        let image = doc.elements_by_tag("img")[0];
        let names: Vec<&str> = doc.attrs(image).iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["src", "alt", "style"]);
    }
}
