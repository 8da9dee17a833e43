//! CSS Style Attributes — style="..." attribute processing.
//! Spec: <https://www.w3.org/TR/css-style-attr/>

#![forbid(unsafe_code)]

/// A single CSS declaration parsed from a style attribute.
///
/// Spec: <https://www.w3.org/TR/css-style-attr/#interpreting>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Property name normalized to ASCII lowercase as per CSS case-insensitivity.
    pub property: String,
    /// Raw value slice trimmed of surrounding ASCII whitespace. May contain spaces.
    pub value: String,
    /// The whole declaration as written, trimmed. Used when the declaration is
    /// written back to the attribute untouched.
    pub source: String,
}

impl Declaration {
    /// Whether the item has both a property and a value.
    pub fn is_valid(&self) -> bool {
        !self.property.is_empty() && !self.value.is_empty()
    }
}

/// Parse the value of a `style` attribute into a list of declarations.
///
/// - Splits on semicolons (`;`) into declaration items.
/// - For each item, splits on the first colon (`:`) into property and value.
/// - Trims ASCII whitespace and lowercases the property name.
/// - Skips empty items. Malformed items (no colon, empty property or empty
///   value) are kept with their source text; see [`Declaration::is_valid`].
///
/// Source order is preserved and duplicates are kept, so re-serializing the
/// result with [`serialize_declarations`] reproduces the author's text.
///
/// Spec: <https://www.w3.org/TR/css-style-attr/#interpreting>
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    if input.is_empty() {
        return Vec::new();
    }
    let mut out: Vec<Declaration> = Vec::new();
    for raw_item in input.split(';') {
        let item = raw_item.trim_matches(is_ascii_whitespace);
        if item.is_empty() {
            continue;
        }
        let (raw_prop, raw_value) = item.split_once(':').unwrap_or(("", ""));
        let property_text = raw_prop.trim_matches(is_ascii_whitespace);
        let value_text = raw_value.trim_matches(is_ascii_whitespace);
        out.push(Declaration {
            property: property_text.to_ascii_lowercase(),
            value: value_text.to_owned(),
            source: item.to_owned(),
        });
    }
    out
}

/// Join declarations back into style attribute text using `"; "`.
pub fn serialize_declarations<'decl, I>(declarations: I) -> String
where
    I: IntoIterator<Item = &'decl Declaration>,
{
    declarations
        .into_iter()
        .map(|decl| decl.source.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// ASCII whitespace per CSS Syntax (TAB, LF, FF, CR, SPACE).
///
/// Spec: <https://www.w3.org/TR/css-syntax-3/#whitespace>
const fn is_ascii_whitespace(character: char) -> bool {
    matches!(
        character,
        '\u{0009}' | '\u{000A}' | '\u{000C}' | '\u{000D}' | '\u{0020}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_lowercases_properties() {
        let decls = parse_style_attribute(" COLOR : #FFF ; font-weight:bold;;");
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].property, "color");
        assert_eq!(decls[0].value, "#FFF");
        assert_eq!(decls[0].source, "COLOR : #FFF");
        assert_eq!(decls[1].property, "font-weight");
        assert_eq!(decls[1].source, "font-weight:bold");
    }

    #[test]
    fn value_keeps_colons_after_the_first() {
        let decls = parse_style_attribute("background-image: url(http://x/y.png)");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].value, "url(http://x/y.png)");
    }

    #[test]
    fn malformed_items_keep_their_text() {
        assert!(parse_style_attribute("").is_empty());
        assert!(parse_style_attribute(" ;; ").is_empty());
        let decls = parse_style_attribute("nonsense; :red; color:");
        assert_eq!(decls.len(), 3);
        assert!(decls.iter().all(|decl| !decl.is_valid()));
        assert_eq!(decls[0].property, "");
        assert_eq!(decls[2].property, "color");
        assert_eq!(serialize_declarations(&decls), "nonsense; :red; color:");
    }

    #[test]
    fn serializes_sources_in_order() {
        let decls = parse_style_attribute("margin: 0;padding:1px ; color: red");
        assert_eq!(serialize_declarations(&decls), "margin: 0; padding:1px; color: red");
    }
}
