//! Color expressions.
//!
//! The expression language is CSS color syntax plus the GTK composite
//! functions:
//!
//! ```text
//! color   := hex | rgb() | rgba() | hsl() | hsla() | ident | @ident
//!          | mix(color, color, number) | shade(color, number)
//!          | alpha(color, number) | lighter(color) | darker(color)
//! ```
//!
//! [`grammar`] turns text into a [`Color`], [`resolve`] folds composites away
//! and [`serialize`] prints the [`CanonicalColor`] that is left.

/// CSS arithmetic for color fields.
pub mod expr;
/// Recursive descent parser for color expressions.
pub mod grammar;
/// Branchless RGB to HSL conversion.
pub mod hsl;
/// Color keyword lookup.
pub mod named;
/// Custom property names for defined colors.
pub mod names;
/// Resolution of composite colors.
pub mod resolve;
/// CSS text output.
pub mod serialize;

use serde::Serialize;

use expr::Expr;

/// [CSS Color Level 4 § 5 sRGB Colors](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// Channels are numbers on the `0..=255` scale, alpha on `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub red: Expr,
    /// Green channel.
    pub green: Expr,
    /// Blue channel.
    pub blue: Expr,
    /// Opacity.
    pub alpha: Expr,
}

impl Rgb {
    /// An opaque color from literal channel values.
    #[must_use]
    pub fn opaque(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: Expr::number(red),
            green: Expr::number(green),
            blue: Expr::number(blue),
            alpha: Expr::number(1.0),
        }
    }

    /// Whether every field is a unitless literal.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        [&self.red, &self.green, &self.blue, &self.alpha]
            .iter()
            .all(|field| field.as_number().is_some())
    }

    #[must_use]
    pub(crate) fn simplify(self) -> Self {
        Self {
            red: self.red.simplify(),
            green: self.green.simplify(),
            blue: self.blue.simplify(),
            alpha: self.alpha.simplify(),
        }
    }
}

/// [CSS Color Level 4 § 7 HSL Colors](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// Hue is in degrees, saturation and lightness are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hsl {
    /// Hue angle.
    pub hue: Expr,
    /// Saturation, `0%..=100%`.
    pub saturation: Expr,
    /// Lightness, `0%..=100%`.
    pub lightness: Expr,
    /// Opacity.
    pub alpha: Expr,
}

impl Hsl {
    #[must_use]
    pub(crate) fn simplify(self) -> Self {
        Self {
            hue: self.hue.simplify(),
            saturation: self.saturation.simplify(),
            lightness: self.lightness.simplify(),
            alpha: self.alpha.simplify(),
        }
    }
}

/// A parsed color expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Color {
    /// `#rrggbb`, `rgb()`, `rgba()`
    Rgb(Rgb),
    /// `hsl()`, `hsla()`
    Hsl(Hsl),
    /// `mix(a, b, factor)`: linear interpolation from `a` (0) to `b` (1).
    Mix {
        /// Start color.
        a: Box<Color>,
        /// End color.
        b: Box<Color>,
        /// Interpolation factor.
        factor: Expr,
    },
    /// `shade(color, factor)`: saturation and lightness scaled by `factor`.
    Shade {
        /// The shaded color.
        color: Box<Color>,
        /// Scale factor.
        factor: Expr,
    },
    /// `alpha(color, factor)`: opacity scaled by `factor`.
    Alpha {
        /// The color.
        color: Box<Color>,
        /// Scale factor.
        factor: Expr,
    },
    /// `lighter(color)`
    Lighter {
        /// The color.
        color: Box<Color>,
    },
    /// `darker(color)`
    Darker {
        /// The color.
        color: Box<Color>,
    },
    /// `@name`: a color declared with `@define-color`.
    Defined {
        /// The name without `@`.
        name: String,
    },
    /// A color keyword such as `rebeccapurple`.
    Named {
        /// The keyword as written.
        name: String,
    },
    /// `currentColor`
    Current,
    /// `inherit`
    Inherit,
}

/// A color with every composite folded away.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CanonicalColor {
    /// An RGB color.
    Rgb(Rgb),
    /// An HSL color.
    Hsl(Hsl),
    /// `currentColor`
    Current,
    /// `inherit`
    Inherit,
}
