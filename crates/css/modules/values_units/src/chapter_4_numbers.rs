//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

use crate::chapter_6_dimensions::parse_numeric;

/// Parse the leading number out of a CSS value, ignoring any trailing unit.
///
/// `"12px"` → `12.0`, `"50%"` → `50.0`, `".5em"` → `0.5`, `"abc"` → `None`.
pub fn normalize_number(input: &str) -> Option<f64> {
    parse_numeric(input).map(|numeric| numeric.value)
}

/// Round to the nearest integer, halves away from zero.
pub fn round_to_integer(value: f64) -> i64 {
    value.round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_number_is_extracted() {
        assert_eq!(normalize_number("12px"), Some(12.0));
        assert_eq!(normalize_number(" 14.5px "), Some(14.5));
        assert_eq!(normalize_number("50%"), Some(50.0));
        assert_eq!(normalize_number("0.5em"), Some(0.5));
        assert_eq!(normalize_number("-3"), Some(-3.0));
        assert_eq!(normalize_number("7px solid"), Some(7.0));
    }

    #[test]
    fn non_numeric_values_fail() {
        assert_eq!(normalize_number(""), None);
        assert_eq!(normalize_number("large"), None);
        assert_eq!(normalize_number("calc(1px + 2px)"), None);
        assert_eq!(normalize_number("-"), None);
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to_integer(12.4), 12);
        assert_eq!(round_to_integer(12.5), 13);
        assert_eq!(round_to_integer(0.0), 0);
        assert_eq!(round_to_integer(-1.6), -2);
    }
}
