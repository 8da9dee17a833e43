//! CSS Values and Units Module Level 3 — numeric values used as bucket keys.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the spec table of contents.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;

// Re-exports for ergonomic access from other crates.
pub use chapter_4_numbers::{normalize_number, round_to_integer};
pub use chapter_6_dimensions::{Numeric, NumericUnit, parse_numeric};
