//! Removal of degenerate paragraphs.
//!
//! The editor leaves empty paragraphs and paragraphs wrapped around pasted
//! block content. The destination platform gives every paragraph a vertical
//! margin, so both show up as stray gaps unless they are cleaned up here.

use html::Document;
use indextree::NodeId;
use log::trace;

/// Children that make an otherwise empty paragraph a mere wrapper.
const BLOCK_CONTENT: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "canvas", "details", "dialog", "div",
    "dl", "embed", "fieldset", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "iframe", "img", "main", "nav", "object", "ol", "p", "picture", "pre",
    "section", "table", "ul", "video",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Keep,
    Remove,
    Unwrap,
}

/// Remove empty paragraphs and unwrap paragraphs that only wrap block content.
///
/// Paragraphs are collected once up front and judged one by one; a paragraph
/// that an earlier step already detached is skipped. Idempotent.
pub fn sanitize_paragraphs(document: &mut Document) {
    for paragraph in document.elements_by_tag("p") {
        if !document.is_attached(paragraph) {
            continue;
        }
        match judge(document, paragraph) {
            Verdict::Keep => {}
            Verdict::Remove => {
                trace!("removing empty paragraph");
                document.remove(paragraph);
            }
            Verdict::Unwrap => {
                trace!("unwrapping paragraph around block content");
                document.unwrap(paragraph);
            }
        }
    }
}

fn judge(document: &Document, paragraph: NodeId) -> Verdict {
    if !document.text_content(paragraph).trim().is_empty() {
        return Verdict::Keep;
    }
    let children = document.children(paragraph);
    let only_breaks = children.iter().all(|&child| {
        document.is_tag(child, "br") || document.text(child).is_some_and(|text| text.trim().is_empty())
    });
    if only_breaks {
        return Verdict::Remove;
    }
    let wraps_block = children.iter().any(|&child| {
        document
            .tag(child)
            .is_some_and(|tag| BLOCK_CONTENT.contains(&tag))
    });
    if wraps_block {
        Verdict::Unwrap
    } else {
        Verdict::Keep
    }
}
