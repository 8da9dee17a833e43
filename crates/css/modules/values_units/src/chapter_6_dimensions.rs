//! CSS Values & Units Level 3 — §5 Percentages and §6 Dimensions
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use cssparser::{Parser, ParserInput, Token};

/// Unit attached to the leading numeric token of a value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NumericUnit {
    /// A bare `<number>`.
    Unitless,
    /// `px`, matched case-insensitively.
    Pixels,
    /// A `<percentage>`.
    Percent,
    /// Any other dimension unit, lowercased (`em`, `rem`, `vw`, ...).
    Other(String),
}

/// The leading numeric token of a CSS value.
#[derive(Clone, Debug, PartialEq)]
pub struct Numeric {
    /// Numeric part; percentages are expressed in percent (`50%` → `50.0`).
    pub value: f64,
    pub unit: NumericUnit,
}

/// Tokenize `input` and read its first `<number>`, `<percentage>` or `<dimension>`.
///
/// Leading whitespace and comments are skipped; anything after the first
/// token is ignored. The value is re-read from the token's source text so it
/// keeps full `f64` precision.
pub fn parse_numeric(input: &str) -> Option<Numeric> {
    let mut parser_input = ParserInput::new(input);
    let mut parser = Parser::new(&mut parser_input);
    let (token, source) = loop {
        let start = parser.position();
        let token = parser.next_including_whitespace_and_comments().ok()?.clone();
        if !matches!(token, Token::WhiteSpace(_) | Token::Comment(_)) {
            break (token, parser.slice_from(start));
        }
    };
    let unit = match token {
        Token::Number { .. } => NumericUnit::Unitless,
        Token::Percentage { .. } => NumericUnit::Percent,
        Token::Dimension { unit, .. } => {
            let lower = unit.as_ref().to_ascii_lowercase();
            if lower == "px" {
                NumericUnit::Pixels
            } else {
                NumericUnit::Other(lower)
            }
        }
        _ => return None,
    };
    let value = number_prefix(source).parse::<f64>().ok()?;
    value.is_finite().then_some(Numeric { value, unit })
}

/// The `<number>` part at the start of a numeric token's source text.
/// Spec: <https://www.w3.org/TR/css-syntax-3/#consume-number>
fn number_prefix(source: &str) -> &str {
    let bytes = source.as_bytes();
    let digits_from = |mut index: usize| {
        while bytes.get(index).is_some_and(u8::is_ascii_digit) {
            index += 1;
        }
        index
    };
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    end = digits_from(end);
    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = digits_from(end + 1);
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let exponent = if matches!(bytes.get(end + 1), Some(b'+' | b'-')) {
            end + 2
        } else {
            end + 1
        };
        if bytes.get(exponent).is_some_and(u8::is_ascii_digit) {
            end = digits_from(exponent);
        }
    }
    source.get(..end).unwrap_or_default()
}
