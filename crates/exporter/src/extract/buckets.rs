//! Per-property interning of canonical declaration values.
//!
//! Every recognized property owns one bucket that maps a canonical value to
//! the utility class generated for it. A bucket set lives for exactly one
//! export; class names only depend on (property, canonical value).

use std::collections::HashMap;

/// The presentation properties turned into utility classes.
///
/// Variant order is the order buckets are rendered in the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Color,
    BackgroundColor,
    BorderColor,
    BorderTopColor,
    BorderRightColor,
    BorderBottomColor,
    BorderLeftColor,
    FontSize,
    TextAlign,
    Width,
}

impl PropertyKind {
    pub const ALL: [Self; 10] = [
        Self::Color,
        Self::BackgroundColor,
        Self::BorderColor,
        Self::BorderTopColor,
        Self::BorderRightColor,
        Self::BorderBottomColor,
        Self::BorderLeftColor,
        Self::FontSize,
        Self::TextAlign,
        Self::Width,
    ];

    /// Look up a lowercased property name.
    pub fn from_property(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.property() == name)
    }

    pub const fn property(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::BorderColor => "border-color",
            Self::BorderTopColor => "border-top-color",
            Self::BorderRightColor => "border-right-color",
            Self::BorderBottomColor => "border-bottom-color",
            Self::BorderLeftColor => "border-left-color",
            Self::FontSize => "font-size",
            Self::TextAlign => "text-align",
            Self::Width => "width",
        }
    }

    pub const fn class_prefix(self) -> &'static str {
        match self {
            Self::Color => "c-",
            Self::BackgroundColor => "bg-",
            Self::BorderColor => "bc-",
            Self::BorderTopColor => "btc-",
            Self::BorderRightColor => "brc-",
            Self::BorderBottomColor => "bbc-",
            Self::BorderLeftColor => "blc-",
            Self::FontSize => "fs-",
            Self::TextAlign => "ta-",
            Self::Width => "w-",
        }
    }

    /// Border colors are only visible with a border style, which the
    /// destination platform resets to `none`.
    pub const fn border_style_property(self) -> Option<&'static str> {
        match self {
            Self::BorderColor => Some("border-style"),
            Self::BorderTopColor => Some("border-top-style"),
            Self::BorderRightColor => Some("border-right-style"),
            Self::BorderBottomColor => Some("border-bottom-style"),
            Self::BorderLeftColor => Some("border-left-style"),
            Self::Color
            | Self::BackgroundColor
            | Self::FontSize
            | Self::TextAlign
            | Self::Width => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// A normalized declaration value ready to be interned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalValue {
    /// Part of the class name after the property prefix.
    pub class_suffix: String,
    /// Value written into the generated rule; also the bucket key.
    pub css_value: String,
}

/// One generated utility class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternedClass {
    pub class_name: String,
    pub css_value: String,
}

#[derive(Debug, Default)]
struct Bucket {
    entries: Vec<InternedClass>,
    by_value: HashMap<String, usize>,
}

/// The interning tables for one export run.
#[derive(Debug, Default)]
pub struct DeclarationBuckets {
    buckets: [Bucket; PropertyKind::ALL.len()],
}

impl DeclarationBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the class for `value`, creating it on first sight.
    pub fn intern(&mut self, kind: PropertyKind, value: CanonicalValue) -> String {
        let bucket = &mut self.buckets[kind.index()];
        if let Some(&index) = bucket.by_value.get(&value.css_value) {
            return bucket.entries[index].class_name.clone();
        }
        let class_name = format!("{}{}", kind.class_prefix(), value.class_suffix);
        bucket.by_value.insert(value.css_value.clone(), bucket.entries.len());
        bucket.entries.push(InternedClass {
            class_name: class_name.clone(),
            css_value: value.css_value,
        });
        class_name
    }

    /// Classes interned for `kind`, in first-seen order.
    pub fn classes(&self, kind: PropertyKind) -> &[InternedClass] {
        &self.buckets[kind.index()].entries
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(|bucket| bucket.entries.is_empty())
    }

    /// Number of distinct classes across all buckets.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.entries.len()).sum()
    }

    /// Every generated rule, bucket by bucket in [`PropertyKind::ALL`] order.
    pub fn rules(&self) -> impl Iterator<Item = String> + '_ {
        PropertyKind::ALL.into_iter().flat_map(move |kind| {
            self.classes(kind)
                .iter()
                .map(move |class| render_rule(kind, class))
        })
    }
}

fn render_rule(kind: PropertyKind, class: &InternedClass) -> String {
    let InternedClass {
        class_name,
        css_value,
    } = class;
    let property = kind.property();
    match kind.border_style_property() {
        Some(style_property) => format!(
            ".{class_name}{{{property}:{css_value} !important;{style_property}:solid !important;}}"
        ),
        None => format!(".{class_name}{{{property}:{css_value};}}"),
    }
}
