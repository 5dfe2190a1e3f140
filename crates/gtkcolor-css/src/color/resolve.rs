//! Folding composite colors into canonical ones.

use core::fmt;

use serde::Serialize;

use super::expr::Expr;
use super::hsl::rgb_to_hsl;
use super::named::{CssNamedColors, NamedColorLookup};
use super::names::names_for;
use super::{CanonicalColor, Color, Hsl, Rgb};
use crate::error::{ColorError, MAX_EXPRESSION_SIZE, MAX_NESTING_DEPTH};

/// Factor `lighter()` and `darker()` shade by.
pub const LIGHTER_DARKER_FACTOR: f64 = 0.8;

/// A dynamic color that was replaced by a fallback inside a composite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Warning {
    /// The composite function, e.g. `mix`.
    pub operator: &'static str,
    /// What was replaced: `currentColor` or `inherit`.
    pub operand: &'static str,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` cannot be computed at build time inside `{}()`, using the fallback color",
            self.operand, self.operator
        )
    }
}

/// Resolves [`Color`]s with a configurable named-color table and fallbacks.
///
/// ```
/// use gtkcolor_css::color::resolve::Resolver;
/// use gtkcolor_css::{parse_color_expression, serialize};
///
/// let color = parse_color_expression("mix(#000, #fff, 0.5)")?;
/// let resolved = Resolver::new().resolve(&color)?;
/// assert_eq!(serialize(&resolved), "#7f7f7f");
/// # Ok::<(), gtkcolor_css::ColorError>(())
/// ```
pub struct Resolver {
    named: Box<dyn NamedColorLookup>,
    rgb_fallback: Rgb,
    hsl_fallback: Hsl,
    warnings: Vec<Warning>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("rgb_fallback", &self.rgb_fallback)
            .field("hsl_fallback", &self.hsl_fallback)
            .field("warnings", &self.warnings)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// CSS named colors; opaque black as both fallbacks.
    #[must_use]
    pub fn new() -> Self {
        Self {
            named: Box::new(CssNamedColors),
            rgb_fallback: Rgb::opaque(0.0, 0.0, 0.0),
            hsl_fallback: Hsl {
                hue: Expr::number(0.0),
                saturation: Expr::percent(0.0),
                lightness: Expr::percent(0.0),
                alpha: Expr::number(1.0),
            },
            warnings: Vec::new(),
        }
    }

    /// Use a different named-color table.
    #[must_use]
    pub fn with_named_colors(mut self, lookup: impl NamedColorLookup + 'static) -> Self {
        self.named = Box::new(lookup);
        self
    }

    /// Replace `currentColor`/`inherit` in `mix()` and `alpha()` with `fallback`.
    #[must_use]
    pub fn with_rgb_fallback(mut self, fallback: Rgb) -> Self {
        self.rgb_fallback = fallback;
        self
    }

    /// Replace `currentColor`/`inherit` in `shade()`, `lighter()` and
    /// `darker()` with `fallback`.
    #[must_use]
    pub fn with_hsl_fallback(mut self, fallback: Hsl) -> Self {
        self.hsl_fallback = fallback;
        self
    }

    /// Warnings recorded since the last call.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        core::mem::take(&mut self.warnings)
    }

    /// Fold `color` into a canonical color.
    ///
    /// # Errors
    ///
    /// - [`ColorError::UnsupportedColorModel`] for an HSL operand of `mix()`
    ///   and for names the lookup does not know.
    /// - [`ColorError::InvalidIdentifier`] for an unusable `@name`.
    /// - [`ColorError::TooDeep`] past [`MAX_NESTING_DEPTH`].
    /// - [`ColorError::TooLarge`] when a color grows past
    ///   [`MAX_EXPRESSION_SIZE`] nodes.
    pub fn resolve(&mut self, color: &Color) -> Result<CanonicalColor, ColorError> {
        self.fold(color, 0)
    }

    fn fold(&mut self, color: &Color, depth: usize) -> Result<CanonicalColor, ColorError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(ColorError::TooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        let folded = self.fold_color(color, depth + 1)?;
        if node_count(&folded) > MAX_EXPRESSION_SIZE {
            return Err(ColorError::TooLarge {
                limit: MAX_EXPRESSION_SIZE,
            });
        }
        Ok(folded)
    }

    fn fold_color(&mut self, color: &Color, depth: usize) -> Result<CanonicalColor, ColorError> {
        match color {
            Color::Rgb(rgb) => Ok(CanonicalColor::Rgb(rgb.clone().simplify())),
            Color::Hsl(hsl) => Ok(CanonicalColor::Hsl(hsl.clone().simplify())),
            Color::Current => Ok(CanonicalColor::Current),
            Color::Inherit => Ok(CanonicalColor::Inherit),
            Color::Named { name } => {
                let found = self.named.lookup(name).ok_or_else(|| {
                    ColorError::UnsupportedColorModel(format!("`{name}` is not a known RGB color"))
                })?;
                Ok(CanonicalColor::Rgb(Rgb {
                    red: Expr::number(f64::from(found.red)),
                    green: Expr::number(f64::from(found.green)),
                    blue: Expr::number(f64::from(found.blue)),
                    alpha: Expr::number(found.alpha),
                }))
            }
            // Deferred to the custom properties `@define-color` emits.
            Color::Defined { name } => {
                let names = names_for(name)?;
                Ok(CanonicalColor::Rgb(Rgb {
                    red: Expr::var(&names.red),
                    green: Expr::var(&names.green),
                    blue: Expr::var(&names.blue),
                    alpha: Expr::var(&names.alpha),
                }))
            }
            Color::Mix { a, b, factor } => {
                let a = self.rgb_operand(a, "mix", depth)?;
                let b = self.rgb_operand(b, "mix", depth)?;
                Ok(CanonicalColor::Rgb(mix(&a, &b, &factor.clone().simplify())))
            }
            Color::Shade { color, factor } => {
                let hsl = self.hsl_operand(color, "shade", depth)?;
                Ok(CanonicalColor::Hsl(shade(hsl, &factor.clone().simplify())))
            }
            Color::Lighter { color } => {
                let hsl = self.hsl_operand(color, "lighter", depth)?;
                Ok(CanonicalColor::Hsl(shade(hsl, &Expr::number(LIGHTER_DARKER_FACTOR))))
            }
            Color::Darker { color } => {
                let hsl = self.hsl_operand(color, "darker", depth)?;
                Ok(CanonicalColor::Hsl(shade(hsl, &Expr::number(LIGHTER_DARKER_FACTOR))))
            }
            Color::Alpha { color, factor } => {
                let factor = factor.clone().simplify();
                Ok(match self.fold(color, depth)? {
                    CanonicalColor::Hsl(mut hsl) => {
                        hsl.alpha = scale_alpha(hsl.alpha, factor);
                        CanonicalColor::Hsl(hsl)
                    }
                    CanonicalColor::Rgb(mut rgb) => {
                        rgb.alpha = scale_alpha(rgb.alpha, factor);
                        CanonicalColor::Rgb(rgb)
                    }
                    dynamic => {
                        let mut rgb = self.fallback_rgb("alpha", &dynamic);
                        rgb.alpha = scale_alpha(rgb.alpha, factor);
                        CanonicalColor::Rgb(rgb)
                    }
                })
            }
        }
    }

    fn warn(&mut self, operator: &'static str, dynamic: &CanonicalColor) {
        let operand = match dynamic {
            CanonicalColor::Inherit => "inherit",
            _ => "currentColor",
        };
        self.warnings.push(Warning { operator, operand });
    }

    fn fallback_rgb(&mut self, operator: &'static str, dynamic: &CanonicalColor) -> Rgb {
        self.warn(operator, dynamic);
        self.rgb_fallback.clone()
    }

    fn rgb_operand(
        &mut self,
        color: &Color,
        operator: &'static str,
        depth: usize,
    ) -> Result<Rgb, ColorError> {
        match self.fold(color, depth)? {
            CanonicalColor::Rgb(rgb) => Ok(rgb),
            CanonicalColor::Hsl(_) => Err(ColorError::UnsupportedColorModel(format!(
                "`{operator}()` only combines rgb colors, found an hsl color"
            ))),
            dynamic => Ok(self.fallback_rgb(operator, &dynamic)),
        }
    }

    fn hsl_operand(
        &mut self,
        color: &Color,
        operator: &'static str,
        depth: usize,
    ) -> Result<Hsl, ColorError> {
        match self.fold(color, depth)? {
            CanonicalColor::Hsl(hsl) => Ok(hsl),
            CanonicalColor::Rgb(rgb) => Ok(rgb_to_hsl(&rgb)),
            dynamic => {
                self.warn(operator, &dynamic);
                Ok(self.hsl_fallback.clone())
            }
        }
    }
}

/// Resolve `color` with a default [`Resolver`].
///
/// # Errors
///
/// See [`Resolver::resolve`].
pub fn resolve(color: &Color) -> Result<CanonicalColor, ColorError> {
    Resolver::new().resolve(color)
}

fn node_count(color: &CanonicalColor) -> usize {
    match color {
        CanonicalColor::Rgb(rgb) => [&rgb.red, &rgb.green, &rgb.blue, &rgb.alpha]
            .into_iter()
            .map(Expr::node_count)
            .sum(),
        CanonicalColor::Hsl(hsl) => [&hsl.hue, &hsl.saturation, &hsl.lightness, &hsl.alpha]
            .into_iter()
            .map(Expr::node_count)
            .sum(),
        CanonicalColor::Current | CanonicalColor::Inherit => 0,
    }
}

/// `x + (y - x) * t`
fn lerp(x: Expr, y: Expr, t: &Expr) -> Expr {
    Expr::add(x.clone(), Expr::mul(Expr::sub(y, x), t.clone()))
}

/// Premultiplied alpha interpolation from `a` to `b`.
fn mix(a: &Rgb, b: &Rgb, t: &Expr) -> Rgb {
    let alpha = lerp(a.alpha.clone(), b.alpha.clone(), t);
    let transparent = alpha.as_number() == Some(0.0);
    let channel = |x: &Expr, y: &Expr| {
        if transparent {
            return Expr::number(0.0);
        }
        let premultiplied = lerp(
            Expr::mul(x.clone(), a.alpha.clone()),
            Expr::mul(y.clone(), b.alpha.clone()),
            t,
        );
        Expr::div(premultiplied, alpha.clone()).simplify()
    };
    let red = channel(&a.red, &b.red);
    let green = channel(&a.green, &b.green);
    let blue = channel(&a.blue, &b.blue);
    Rgb {
        red,
        green,
        blue,
        alpha: alpha.simplify(),
    }
}

/// Saturation and lightness scaled by `factor`, clamped to `0%..=100%`.
fn shade(hsl: Hsl, factor: &Expr) -> Hsl {
    let scale = |value: Expr| {
        Expr::clamp(
            Expr::percent(0.0),
            Expr::mul(value, factor.clone()),
            Expr::percent(100.0),
        )
        .simplify()
    };
    Hsl {
        hue: hsl.hue,
        saturation: scale(hsl.saturation),
        lightness: scale(hsl.lightness),
        alpha: hsl.alpha,
    }
}

/// `clamp(0, alpha * factor, 1)`
fn scale_alpha(alpha: Expr, factor: Expr) -> Expr {
    Expr::clamp(
        Expr::number(0.0),
        Expr::mul(alpha, factor),
        Expr::number(1.0),
    )
    .simplify()
}
