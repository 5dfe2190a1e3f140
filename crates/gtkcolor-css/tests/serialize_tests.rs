//! Integration tests for CSS output of canonical colors.

use gtkcolor_css::color::expr::Expr;
use gtkcolor_css::{CanonicalColor, Hsl, Rgb, parse_color_expression, resolve, serialize};

fn css(text: &str) -> String {
    let color = parse_color_expression(text).unwrap_or_else(|err| panic!("`{text}`: {err}"));
    serialize(&resolve(&color).unwrap_or_else(|err| panic!("`{text}`: {err}")))
}

fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> CanonicalColor {
    CanonicalColor::Rgb(Rgb {
        red: Expr::number(red),
        green: Expr::number(green),
        blue: Expr::number(blue),
        alpha: Expr::number(alpha),
    })
}

#[test]
fn test_hex_round_trip() {
    for hex in [
        "#000", "#fff", "#0f1", "#0f07", "#5fabcd", "#00ff007f", "#12345678",
    ] {
        assert_eq!(css(hex), hex);
    }
}

#[test]
fn test_hex_collapses_to_shorthand() {
    assert_eq!(css("#AABBCC"), "#abc");
    assert_eq!(css("#11223344"), "#1234");
    assert_eq!(css("#ffffffff"), "#fff");
    assert_eq!(css("#000f"), "#000");
    assert_eq!(css("#00000000"), "#0000");
}

#[test]
fn test_named_color_prints_as_hex() {
    assert_eq!(css("red"), "#f00");
    assert_eq!(css("transparent"), "#0000");
}

#[test]
fn test_channels_are_truncated_and_clamped() {
    assert_eq!(serialize(&rgba(127.9, -4.0, 300.0, 1.0)), "#7f00ff");
    assert_eq!(serialize(&rgba(127.5, 127.5, 127.5, 1.0)), "#7f7f7f");
}

#[test]
fn test_alpha_byte_is_floored() {
    assert_eq!(serialize(&rgba(0.0, 0.0, 0.0, 0.47)), "#0007");
    assert_eq!(serialize(&rgba(0.0, 0.0, 0.0, 0.5)), "#0000007f");
}

#[test]
fn test_alpha_of_one_or_more_is_omitted() {
    assert_eq!(serialize(&rgba(255.0, 0.0, 0.0, 1.0)), "#f00");
    assert_eq!(serialize(&rgba(255.0, 0.0, 0.0, 1.5)), "#f00");
}

#[test]
fn test_symbolic_rgb_uses_functional_notation() {
    assert_eq!(css("rgb(2,3,var(--toaster))"), "rgb(2,3,var(--toaster))");
    assert_eq!(
        css("@a"),
        "rgba(var(--a-r),var(--a-g),var(--a-b),var(--a-a))"
    );
    assert_eq!(
        css("rgba(0, 0, 0, var(--o))"),
        "rgba(0,0,0,var(--o))"
    );
}

#[test]
fn test_hsl() {
    assert_eq!(css("hsla(2,100%,50%,0.5)"), "hsla(2,100%,50%,0.5)");
    assert_eq!(css("hsl(2, 100%, 50%)"), "hsl(2,100%,50%)");
    assert_eq!(css("hsl(0.5turn 10% 20% / 1)"), "hsl(0.5turn,10%,20%)");
}

#[test]
fn test_hsl_alpha_above_one_is_omitted() {
    let color = CanonicalColor::Hsl(Hsl {
        hue: Expr::number(10.0),
        saturation: Expr::percent(20.0),
        lightness: Expr::percent(30.0),
        alpha: Expr::number(2.0),
    });
    assert_eq!(serialize(&color), "hsl(10,20%,30%)");
}

#[test]
fn test_keywords() {
    assert_eq!(css("currentColor"), "currentColor");
    assert_eq!(css("currentcolor"), "currentColor");
    assert_eq!(css("inherit"), "inherit");
}

#[test]
fn test_display_matches_serialize() {
    let color = rgba(1.0, 2.0, 3.0, 0.5);
    assert_eq!(color.to_string(), serialize(&color));
}

#[test]
fn test_json_shape() {
    let color = parse_color_expression("#fff").unwrap();
    let value = serde_json::to_value(resolve(&color).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "type": "rgb",
            "red": "255",
            "green": "255",
            "blue": "255",
            "alpha": "1",
        })
    );

    let value = serde_json::to_value(parse_color_expression("alpha(@x, 0.5)").unwrap()).unwrap();
    assert_eq!(value["type"], "alpha");
    assert_eq!(value["color"]["type"], "defined");
    assert_eq!(value["color"]["name"], "x");
    assert_eq!(value["factor"], "0.5");
}
