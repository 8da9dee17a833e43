//! CSS Color Module Level 4 — canonical hex form for color declarations.
//! Spec: <https://www.w3.org/TR/css-color-4/>
//!
//! Only hex (`#rgb`, `#rrggbb`) and legacy functional `rgb()`/`rgba()`
//! notations are canonicalized. Every other form (named colors, `hsl()`,
//! gradients, hex with alpha) is reported as `None` so the caller can keep the
//! declaration inline instead of bucketing it.

#![forbid(unsafe_code)]

use csscolorparser::Color;

/// Red, green and blue channels of an opaque color.
pub type Rgb8Tuple = (u8, u8, u8);

/// Normalize a CSS color to lowercase `#rrggbb`.
///
/// - `#abc` expands to `#aabbcc`
/// - `#AABBCC` is lowercased
/// - `rgb(r, g, b)` / `rgba(r g b / a)` become hex; the alpha channel is dropped
///
/// Returns `None` for empty input and for any notation outside that set.
///
/// Spec: <https://www.w3.org/TR/css-color-4/#hex-notation>
/// Spec: <https://www.w3.org/TR/css-color-4/#rgb-functions>
pub fn normalize_color(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (red, green, blue) = match trimmed.strip_prefix('#') {
        Some(digits) => parse_hex_digits(digits)?,
        None => parse_rgb_function(trimmed)?,
    };
    Some(format!("#{red:02x}{green:02x}{blue:02x}"))
}

/// Parse the digits of a 3- or 6-digit hex color (without the leading `#`).
///
/// The digit count is checked here; `csscolorparser` also accepts the 4- and
/// 8-digit alpha forms, which stay inline.
fn parse_hex_digits(digits: &str) -> Option<Rgb8Tuple> {
    if !matches!(digits.len(), 3 | 6) || !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    let channels = Color::from_html(format!("#{digits}")).ok()?.to_rgba8();
    Some((channels[0], channels[1], channels[2]))
}

/// Parse `rgb()`/`rgba()` with comma and/or whitespace separated channels.
///
/// The channel list is rebuilt in the comma form before handing it to
/// `csscolorparser`, which takes care of clamping, percentages and rounding.
fn parse_rgb_function(text: &str) -> Option<Rgb8Tuple> {
    let (name, rest) = text.split_once('(')?;
    let name = name.trim().to_ascii_lowercase();
    if name != "rgb" && name != "rgba" {
        return None;
    }
    let body = rest.trim_end().strip_suffix(')')?;
    let channels: Vec<&str> = body
        .split(|character: char| {
            character == ',' || character == '/' || character.is_ascii_whitespace()
        })
        .filter(|part| !part.is_empty())
        .collect();
    let &[red, green, blue, ref alpha @ ..] = channels.as_slice() else {
        return None;
    };
    if alpha.len() > 1 {
        return None;
    }
    let parsed: Color = format!("rgb({red}, {green}, {blue})").parse().ok()?;
    let channels = parsed.to_rgba8();
    Some((channels[0], channels[1], channels[2]))
}
