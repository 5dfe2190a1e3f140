//! Compact CSS text for canonical colors.
//!
//! Literal RGB colors print as the shortest hex notation, everything else in
//! functional notation without spaces after commas.

use core::fmt;

use super::expr::Expr;
use super::{CanonicalColor, Hsl, Rgb};

/// Render `color` as CSS.
#[must_use]
pub fn serialize(color: &CanonicalColor) -> String {
    color.to_string()
}

impl fmt::Display for CanonicalColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => f.write_str("currentColor"),
            Self::Inherit => f.write_str("inherit"),
            Self::Hsl(hsl) => write_hsl(f, hsl),
            Self::Rgb(rgb) if rgb.is_literal() => write_hex(f, rgb),
            Self::Rgb(rgb) => write_rgb(f, rgb),
        }
    }
}

/// Alpha that is a literal `>= 1` can be left out.
fn is_opaque(alpha: &Expr) -> bool {
    alpha.as_number().is_some_and(|a| a >= 1.0)
}

fn write_hsl(f: &mut fmt::Formatter<'_>, hsl: &Hsl) -> fmt::Result {
    if is_opaque(&hsl.alpha) {
        write!(f, "hsl({},{},{})", hsl.hue, hsl.saturation, hsl.lightness)
    } else {
        write!(
            f,
            "hsla({},{},{},{})",
            hsl.hue, hsl.saturation, hsl.lightness, hsl.alpha
        )
    }
}

fn write_rgb(f: &mut fmt::Formatter<'_>, rgb: &Rgb) -> fmt::Result {
    if is_opaque(&rgb.alpha) {
        write!(f, "rgb({},{},{})", rgb.red, rgb.green, rgb.blue)
    } else {
        write!(
            f,
            "rgba({},{},{},{})",
            rgb.red, rgb.green, rgb.blue, rgb.alpha
        )
    }
}

/// A channel value as a byte: rounded to five decimals, truncated, clamped.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn byte(value: f64) -> u8 {
    let rounded = (value * 1e5).round() / 1e5;
    if rounded.is_nan() {
        return 0;
    }
    rounded.trunc().clamp(0.0, 255.0) as u8
}

/// [CSS Color Level 4 § 5.2](https://www.w3.org/TR/css-color-4/#hex-notation)
fn write_hex(f: &mut fmt::Formatter<'_>, rgb: &Rgb) -> fmt::Result {
    let value = |field: &Expr| field.as_number().unwrap_or_default();
    let mut bytes = vec![
        byte(value(&rgb.red)),
        byte(value(&rgb.green)),
        byte(value(&rgb.blue)),
    ];
    if !is_opaque(&rgb.alpha) {
        bytes.push(byte(value(&rgb.alpha) * 255.0));
    }

    f.write_str("#")?;
    // "#RGB" when every byte repeats its digit.
    if bytes.iter().all(|b| b >> 4 == b & 0x0f) {
        for b in &bytes {
            write!(f, "{:x}", b & 0x0f)?;
        }
    } else {
        for b in &bytes {
            write!(f, "{b:02x}")?;
        }
    }
    Ok(())
}
