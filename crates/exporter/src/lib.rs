//! Export pipeline: editor HTML in, cleaned content and skin out.
//!
//! Passes, in order: poisoning (optional), widget reinflation, image
//! alignment, paragraph sanitizing, inline style extraction, and skin
//! assembly. See [`pipeline::export_document`].

#![allow(
    clippy::missing_inline_in_public_items,
    reason = "Inlining decisions left to compiler for this crate"
)]
#![forbid(unsafe_code)]

pub mod config;
pub mod extract;
pub mod images;
pub mod pipeline;
pub mod sanitize;
pub mod stylesheet;
pub mod widgets;

pub use config::ExportConfig;
pub use extract::{DeclarationBuckets, PropertyKind, extract_styles, extract_styles_to_pair};
pub use images::align_images;
pub use pipeline::{ArtifactPair, clean_document, export_document};
pub use poison::ProtectionLevel;
pub use sanitize::sanitize_paragraphs;
pub use stylesheet::{BASE_SKIN, assemble_skin};
pub use widgets::{WidgetKind, reinflate};
