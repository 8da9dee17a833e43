//! Skin assembly: the static base skin followed by the generated rules.

use crate::extract::DeclarationBuckets;

/// Hand-authored widget styling, prepended to every exported skin.
pub const BASE_SKIN: &str = include_str!("../assets/base_skin.css");

/// Generated utility rules, one per line.
pub fn render_rules(buckets: &DeclarationBuckets) -> String {
    if buckets.is_empty() {
        return String::new();
    }
    buckets.rules().collect::<Vec<_>>().join("\n")
}

/// The complete skin: base skin, a blank line, then the generated rules.
pub fn assemble_skin(buckets: &DeclarationBuckets) -> String {
    let mut css = String::from(BASE_SKIN.trim_end());
    css.push_str("\n\n");
    css.push_str(&render_rules(buckets));
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{CanonicalValue, PropertyKind};

    #[test]
    fn base_skin_comes_first() {
        let mut buckets = DeclarationBuckets::new();
        buckets.intern(
            PropertyKind::FontSize,
            CanonicalValue {
                class_suffix: "12".to_owned(),
                css_value: "12px".to_owned(),
            },
        );
        let css = assemble_skin(&buckets);
        assert!(css.starts_with("/* Base skin"));
        assert!(css.ends_with("}\n\n.fs-12{font-size:12px;}"));
    }

    #[test]
    fn base_skin_carries_image_alignment_rules() {
        for class in ["img-align-left", "img-align-center", "img-align-right"] {
            assert!(BASE_SKIN.contains(class), "missing {class}");
        }
    }

    #[test]
    fn empty_buckets_render_nothing() {
        assert!(render_rules(&DeclarationBuckets::new()).is_empty());
    }
}
