//! Owned HTML fragment model used by the export pipeline.
//!
//! Markup is parsed with html5ever into an `indextree` arena that can be
//! mutated freely (unwrap, wrap, reparent) and serialized back to a fragment.

#![allow(
    clippy::missing_docs_in_private_items,
    reason = "Internal implementation details don't need public documentation"
)]
#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]
#![forbid(unsafe_code)]

pub mod dom;
pub mod parser;

pub use dom::{Attributes, DOMNode, Document, NodeKind};
pub use parser::parse_fragment;
