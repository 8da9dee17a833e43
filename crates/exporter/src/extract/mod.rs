//! Inline style extraction.
//!
//! Walks the working document in pre-order and replaces every recognized
//! inline declaration with an interned utility class. Declarations that are
//! not recognized, or whose value cannot be normalized, stay inline in their
//! original order.

pub mod buckets;

pub use buckets::{CanonicalValue, DeclarationBuckets, InternedClass, PropertyKind};

use crate::pipeline::ArtifactPair;
use css_color::normalize_color;
use css_style_attr::{Declaration, parse_style_attribute, serialize_declarations};
use css_values_units::{NumericUnit, parse_numeric, round_to_integer};
use html::Document;
use log::debug;

/// Move recognized inline declarations of `document` into `buckets`.
///
/// Returns the number of elements whose `style` attribute was rewritten.
pub fn extract_styles(document: &mut Document, buckets: &mut DeclarationBuckets) -> usize {
    let mut rewritten = 0;
    for id in document.descendants(document.root()) {
        let Some(style) = document.attr(id, "style") else {
            continue;
        };
        let mut kept: Vec<Declaration> = Vec::new();
        let mut classes: Vec<String> = Vec::new();
        for declaration in parse_style_attribute(style) {
            match recognize(&declaration) {
                Some((kind, value)) => classes.push(buckets.intern(kind, value)),
                None => kept.push(declaration),
            }
        }
        if classes.is_empty() {
            continue;
        }
        for class in &classes {
            document.add_class(id, class);
        }
        if kept.is_empty() {
            document.remove_attr(id, "style");
        } else {
            document.set_attr(id, "style", &serialize_declarations(&kept));
        }
        rewritten += 1;
    }
    debug!(
        "extracted inline styles from {rewritten} elements into {} classes",
        buckets.len()
    );
    rewritten
}

/// Extract with a fresh bucket set and render both artifacts, without the
/// base skin.
pub fn extract_styles_to_pair(document: &mut Document) -> ArtifactPair {
    let mut buckets = DeclarationBuckets::new();
    extract_styles(document, &mut buckets);
    ArtifactPair {
        html: document.to_html(),
        css: crate::stylesheet::render_rules(&buckets),
    }
}

fn recognize(declaration: &Declaration) -> Option<(PropertyKind, CanonicalValue)> {
    if !declaration.is_valid() {
        return None;
    }
    let kind = PropertyKind::from_property(&declaration.property)?;
    canonicalize(kind, &declaration.value).map(|value| (kind, value))
}

/// Normalize `value` for `kind`; `None` means the declaration stays inline.
pub fn canonicalize(kind: PropertyKind, value: &str) -> Option<CanonicalValue> {
    match kind {
        PropertyKind::Color
        | PropertyKind::BackgroundColor
        | PropertyKind::BorderColor
        | PropertyKind::BorderTopColor
        | PropertyKind::BorderRightColor
        | PropertyKind::BorderBottomColor
        | PropertyKind::BorderLeftColor => {
            let hex = normalize_color(value)?;
            Some(CanonicalValue {
                class_suffix: hex.trim_start_matches('#').to_owned(),
                css_value: hex,
            })
        }
        PropertyKind::FontSize => {
            let numeric = parse_numeric(value)?;
            if !matches!(numeric.unit, NumericUnit::Pixels | NumericUnit::Unitless) {
                return None;
            }
            let pixels = round_to_integer(numeric.value);
            Some(CanonicalValue {
                class_suffix: class_number(pixels),
                css_value: format!("{pixels}px"),
            })
        }
        PropertyKind::TextAlign => {
            let keyword = value.trim();
            is_class_safe(keyword).then(|| CanonicalValue {
                class_suffix: keyword.to_owned(),
                css_value: keyword.to_owned(),
            })
        }
        PropertyKind::Width => {
            let numeric = parse_numeric(value)?;
            let rounded = round_to_integer(numeric.value);
            match numeric.unit {
                NumericUnit::Percent => Some(CanonicalValue {
                    class_suffix: format!("{}p", class_number(rounded)),
                    css_value: format!("{rounded}%"),
                }),
                NumericUnit::Pixels | NumericUnit::Unitless => Some(CanonicalValue {
                    class_suffix: class_number(rounded),
                    css_value: format!("{rounded}px"),
                }),
                NumericUnit::Other(_) => None,
            }
        }
    }
}

/// Integers in class names; a leading `-` would not form a valid identifier.
fn class_number(value: i64) -> String {
    if value < 0 {
        format!("n{}", value.unsigned_abs())
    } else {
        value.to_string()
    }
}

/// Keywords usable verbatim in a class name.
fn is_class_safe(keyword: &str) -> bool {
    keyword.chars().next().is_some_and(|first| first.is_ascii_alphabetic() || first == '-')
        && keyword
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || matches!(character, '-' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ArtifactPair {
        let mut document = Document::parse(html);
        extract_styles_to_pair(&mut document)
    }

    #[test]
    fn recognized_declarations_become_classes() {
        let pair = extract(r#"<p style="color:#FF0000;font-weight:bold">Hi</p>"#);
        assert_eq!(pair.html, r#"<p class="c-ff0000" style="font-weight:bold">Hi</p>"#);
        assert_eq!(pair.css, ".c-ff0000{color:#ff0000;}");
    }

    #[test]
    fn equivalent_colors_share_a_rule() {
        let pair = extract(
            r#"<p style="color:#ff0000">a</p><p style="color:#FF0000">b</p><p style="color: rgb(255, 0, 0)">c</p>"#,
        );
        assert_eq!(pair.css.lines().count(), 1);
        assert_eq!(pair.html.matches("class=\"c-ff0000\"").count(), 3);
    }

    #[test]
    fn style_attribute_is_removed_when_empty() {
        let pair = extract(r#"<span style="background-color: #abc; font-size: 14px">x</span>"#);
        assert_eq!(pair.html, r#"<span class="bg-aabbcc fs-14">x</span>"#);
        assert_eq!(pair.css, ".bg-aabbcc{background-color:#aabbcc;}\n.fs-14{font-size:14px;}");
    }

    #[test]
    fn unknown_colors_stay_inline() {
        let pair = extract(r#"<p style="color: red; text-align: center">x</p>"#);
        assert_eq!(pair.html, r#"<p class="ta-center" style="color: red">x</p>"#);
    }

    #[test]
    fn unrecognized_only_styles_are_untouched() {
        let html = r#"<p style="margin : 0 ;padding:2px">x</p>"#;
        let pair = extract(html);
        assert_eq!(pair.html, html);
        assert!(pair.css.is_empty());
    }

    #[test]
    fn width_keeps_percent_and_pixel_apart() {
        let pair = extract(
            r#"<img style="width: 50%"><img style="width: 50px"><img style="width: 50"><img style="width: 10em">"#,
        );
        assert_eq!(
            pair.html,
            r#"<img class="w-50p"><img class="w-50"><img class="w-50"><img style="width: 10em">"#
        );
        assert_eq!(pair.css, ".w-50p{width:50%;}\n.w-50{width:50px;}");
    }

    #[test]
    fn width_rounds_halves_up() {
        let pair = extract(
            r#"<img style="width: 50.5%"><img style="width: 12.5%"><img style="width: 0.5%">"#,
        );
        assert_eq!(pair.html, r#"<img class="w-51p"><img class="w-13p"><img class="w-1p">"#);
        assert_eq!(pair.css, ".w-51p{width:51%;}\n.w-13p{width:13%;}\n.w-1p{width:1%;}");
    }

    #[test]
    fn malformed_items_stay_inline_on_rewrite() {
        let pair = extract(r#"<p style="color:#f00; nonsense; margin:">x</p>"#);
        assert_eq!(pair.html, r#"<p class="c-ff0000" style="nonsense; margin:">x</p>"#);
    }

    #[test]
    fn font_size_is_rounded_and_relative_units_stay_inline() {
        let pair = extract(
            r#"<span style="font-size: 12.6px">a</span><span style="font-size: 1.2em">b</span><span style="font-size: -2px">c</span>"#,
        );
        assert_eq!(
            pair.html,
            r#"<span class="fs-13">a</span><span style="font-size: 1.2em">b</span><span class="fs-n2">c</span>"#
        );
    }

    #[test]
    fn border_colors_force_a_solid_style() {
        let pair = extract(r#"<div style="border-color:#000;border-left-color:rgb(1,2,3)">x</div>"#);
        assert_eq!(
            pair.css,
            ".bc-000000{border-color:#000000 !important;border-style:solid !important;}\n\
             .blc-010203{border-left-color:#010203 !important;border-left-style:solid !important;}"
        );
    }

    #[test]
    fn classes_join_existing_class_list() {
        let pair = extract(r#"<div class="msg-bubble c-ff0000" style="color:#f00">x</div>"#);
        assert_eq!(pair.html, r#"<div class="msg-bubble c-ff0000">x</div>"#);
    }

    #[test]
    fn extraction_is_idempotent() {
        let first = extract(r#"<p style="color:#123;width:20%;margin:0">x<b style="font-size:9px">y</b></p>"#);
        let second = extract(&first.html);
        assert_eq!(second.html, first.html);
        assert!(second.css.is_empty());
    }

    #[test]
    fn class_assignment_follows_document_order() {
        let pair = extract(
            r#"<div style="color:#222"><p style="color:#111">a</p></div><p style="color:#333">b</p>"#,
        );
        assert_eq!(
            pair.css,
            ".c-222222{color:#222222;}\n.c-111111{color:#111111;}\n.c-333333{color:#333333;}"
        );
    }

    #[test]
    fn text_align_requires_a_plain_keyword() {
        assert!(canonicalize(PropertyKind::TextAlign, "center").is_some());
        assert!(canonicalize(PropertyKind::TextAlign, "-webkit-center").is_some());
        assert!(canonicalize(PropertyKind::TextAlign, "\"x\" center").is_none());
        assert!(canonicalize(PropertyKind::TextAlign, "").is_none());
    }
}
