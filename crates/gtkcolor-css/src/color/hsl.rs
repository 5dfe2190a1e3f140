//! RGB to HSL conversion built from arithmetic only.
//!
//! [CSS Color Level 4 § 7.2 Converting sRGB colors to HSL](https://www.w3.org/TR/css-color-4/#rgb-to-hsl)
//!
//! The textbook algorithm branches on which channel is largest and on
//! whether lightness is above one half. A channel can be a `var()`, so the
//! branches cannot be taken here; instead every condition becomes a selector
//! `clamp(0, (condition) * huge, 1)` that is 1 when the condition holds and 0
//! otherwise, and each alternative is multiplied by its selector. With literal
//! channels the whole tree folds back to plain numbers.

use super::expr::Expr;
use super::{Hsl, Rgb};

/// Slope of the "max differs from min" selector.
const CHROMA_SLOPE: f64 = 1e100;
/// Slope of the lightness selectors.
const LIGHTNESS_SLOPE: f64 = 1e30;
/// Slope of the "channel is the max" selectors and the hue wrap selector.
const CHANNEL_SLOPE: f64 = 1e31;
/// Keeps denominators away from zero.
const EPSILON: f64 = 1e-29;
/// Keeps the `above` denominator away from zero at full lightness.
const ABOVE_EPSILON: f64 = 1e-19;
/// Tolerance for "this channel equals the max".
const MAX_TOLERANCE: f64 = 1e-9;

fn n(value: f64) -> Expr {
    Expr::number(value)
}

/// `clamp(0, x, 1)`: 0 for `x <= 0`, 1 for `x >= 1`.
fn step(x: Expr) -> Expr {
    Expr::clamp(n(0.0), x, n(1.0))
}

fn ramp(x: Expr, slope: f64) -> Expr {
    step(Expr::mul(x, n(slope)))
}

fn not(selector: &Expr) -> Expr {
    Expr::sub(n(1.0), selector.clone())
}

/// Convert an RGB color to HSL.
///
/// Hue is a plain number of degrees, saturation and lightness are
/// percentages, alpha is carried over.
#[must_use]
pub fn rgb_to_hsl(rgb: &Rgb) -> Hsl {
    let r = Expr::div(rgb.red.clone(), n(255.0));
    let g = Expr::div(rgb.green.clone(), n(255.0));
    let b = Expr::div(rgb.blue.clone(), n(255.0));

    let max = Expr::max(vec![r.clone(), g.clone(), b.clone()]);
    let min = Expr::min(vec![r.clone(), g.clone(), b.clone()]);
    let spread = Expr::sub(max.clone(), min.clone());
    let total = Expr::add(max.clone(), min.clone());

    // "Let l be (max + min) / 2."
    let lightness = Expr::div(total.clone(), n(2.0));

    let chromatic = ramp(spread.clone(), CHROMA_SLOPE);
    let above = ramp(Expr::sub(lightness.clone(), n(0.5)), LIGHTNESS_SLOPE);
    let below = ramp(
        Expr::add(Expr::sub(n(0.5), lightness.clone()), n(EPSILON)),
        LIGHTNESS_SLOPE,
    );

    // "s = (l == 0 || l == 1) ? 0 : (max - l) / min(l, 1 - l)", written in
    // the (max - min) / (max + min) and (max - min) / (2 - max - min) form.
    let below_denominator = Expr::mul(below, Expr::add(total.clone(), n(EPSILON)));
    let above_denominator = Expr::mul(
        above,
        Expr::add(Expr::sub(n(2.0), total), n(ABOVE_EPSILON)),
    );
    let saturation = Expr::div(
        Expr::mul(chromatic.clone(), spread.clone()),
        Expr::add(below_denominator, above_denominator),
    );

    let delta = Expr::add(spread, n(EPSILON));
    let is_max = |channel: &Expr| {
        ramp(
            Expr::add(Expr::sub(channel.clone(), max.clone()), n(MAX_TOLERANCE)),
            CHANNEL_SLOPE,
        )
    };
    // At most one selector is 1 when several channels share the max.
    let red_max = is_max(&r);
    let green_max = Expr::mul(is_max(&g), not(&red_max));
    let blue_max = Expr::mul(Expr::mul(is_max(&b), not(&red_max)), not(&green_max));

    // "case r: hue = (g - b) / d + (g < b ? 6 : 0)"
    let red_hue = Expr::mul(
        red_max,
        Expr::div(Expr::sub(g.clone(), b.clone()), delta.clone()),
    );
    let red_hue = Expr::add(
        red_hue.clone(),
        Expr::mul(ramp(red_hue, -CHANNEL_SLOPE), n(6.0)),
    );
    // "case g: hue = (b - r) / d + 2"
    let green_hue = Expr::mul(
        green_max,
        Expr::add(n(2.0), Expr::div(Expr::sub(b, r.clone()), delta.clone())),
    );
    // "case b: hue = (r - g) / d + 4"
    let blue_hue = Expr::mul(
        blue_max,
        Expr::add(n(4.0), Expr::div(Expr::sub(r, g), delta)),
    );

    let sectors = Expr::add(Expr::add(red_hue, green_hue), blue_hue);
    let hue = Expr::mul(Expr::mul(chromatic, n(60.0)), sectors);

    Hsl {
        hue: hue.simplify(),
        saturation: Expr::mul(saturation, Expr::percent(100.0)).simplify(),
        lightness: Expr::mul(lightness, Expr::percent(100.0)).simplify(),
        alpha: rgb.alpha.clone().simplify(),
    }
}
