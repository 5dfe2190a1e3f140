//! Integration tests for the color expression grammar.

use gtkcolor_css::color::expr::Expr;
use gtkcolor_css::{Color, ColorError, Hsl, MAX_NESTING_DEPTH, Rgb, parse_color_expression};

fn parse(text: &str) -> Color {
    parse_color_expression(text).unwrap_or_else(|err| panic!("`{text}` failed: {err}"))
}

fn rgb(text: &str) -> Rgb {
    match parse(text) {
        Color::Rgb(rgb) => rgb,
        other => panic!("`{text}` parsed as {other:?}"),
    }
}

fn fails(text: &str) -> bool {
    parse_color_expression(text).is_err()
}

fn channels(rgb: &Rgb) -> [String; 4] {
    [
        rgb.red.to_string(),
        rgb.green.to_string(),
        rgb.blue.to_string(),
        rgb.alpha.to_string(),
    ]
}

#[test]
fn test_empty_input_fails() {
    assert!(matches!(
        parse_color_expression(""),
        Err(ColorError::Syntax { offset: 0, .. })
    ));
    assert!(fails("   "));
    assert!(fails("calc()"));
    assert!(fails("rgb()"));
}

#[test]
fn test_random_identifier_is_a_named_color() {
    assert_eq!(
        parse("dsfasddfsadf"),
        Color::Named {
            name: "dsfasddfsadf".to_string()
        }
    );
    assert_eq!(
        parse("RebeccaPurple"),
        Color::Named {
            name: "RebeccaPurple".to_string()
        }
    );
}

#[test]
fn test_keywords() {
    assert_eq!(parse("currentColor"), Color::Current);
    assert_eq!(parse("CURRENTCOLOR"), Color::Current);
    assert_eq!(parse("inherit"), Color::Inherit);
}

#[test]
fn test_hex_six_digits() {
    assert_eq!(rgb("#5fabcd"), Rgb::opaque(95.0, 171.0, 205.0));
    assert_eq!(rgb("#000000"), Rgb::opaque(0.0, 0.0, 0.0));
}

#[test]
fn test_hex_shorthand_replicates_digits() {
    assert_eq!(rgb("#0f1"), Rgb::opaque(0.0, 255.0, 17.0));
}

#[test]
fn test_hex_alpha() {
    let transparent = rgb("#00000000");
    assert_eq!(transparent.alpha, Expr::number(0.0));

    let half = rgb("#00ff007f");
    assert_eq!(half.green, Expr::number(255.0));
    assert_eq!(half.alpha, Expr::number(127.0 / 255.0));

    let short = rgb("#0f07");
    assert_eq!(short.alpha, Expr::number(119.0 / 255.0));
}

#[test]
fn test_invalid_hex_fails() {
    for text in ["#zzzzzz", "#00", "#00000", "#0000000", "#000000000", "#"] {
        assert!(fails(text), "`{text}` should not parse");
    }
}

#[test]
fn test_rgb_comma_syntax() {
    assert_eq!(rgb("rgb(95, 171, 205)"), Rgb::opaque(95.0, 171.0, 205.0));
    assert_eq!(
        channels(&rgb("rgba(95, 171, 205, 0.5)")),
        ["95", "171", "205", "0.5"]
    );
    assert_eq!(rgb("rgba(95, 171, 205, 1)"), Rgb::opaque(95.0, 171.0, 205.0));
}

#[test]
fn test_rgb_space_syntax() {
    assert_eq!(
        channels(&rgb("rgb(95 171 205 / 50%)")),
        ["95", "171", "205", "0.5"]
    );
    assert_eq!(rgb("RGB(1 2 3)"), Rgb::opaque(1.0, 2.0, 3.0));
}

#[test]
fn test_rgb_percent_channels() {
    assert_eq!(
        channels(&rgb("rgb(100%, 0%, 50%)")),
        ["255", "0", "127.5", "1"]
    );
}

#[test]
fn test_rgb_rejects_units() {
    assert!(fails("rgb(1px, 2, 3)"));
    assert!(fails("rgba(1, 2, 3, 4deg)"));
}

#[test]
fn test_rgb_channel_count() {
    assert!(fails("rgb(1, 2)"));
    assert!(fails("rgb(1, 2, 3, 4, 5)"));
    assert!(fails("rgb(1 2 3 4)"));
    assert!(fails("rgb(1 2 3 / 4 5)"));
    assert!(fails("rgb(1, 2, , 3)"));
}

#[test]
fn test_comma_syntax_rejects_alpha_slash() {
    let err = parse_color_expression("rgb(10, 20, 30 / 0.5)").unwrap_err();
    assert!(err.is_syntax());
    assert!(fails("rgba(10, 20 / 2, 30, 1)"));
    assert!(fails("hsl(120, 50%, 50% / 0.5)"));
    assert_eq!(rgb("rgb(10, 20, calc(30 / 2))").blue, Expr::number(15.0));
    assert_eq!(rgb("rgb(10 20 30 / 0.5)").alpha, Expr::number(0.5));
}

#[test]
fn test_rgb_with_var_channel() {
    assert_eq!(
        channels(&rgb("rgb(2,3,var(--toaster))")),
        ["2", "3", "var(--toaster)", "1"]
    );
}

#[test]
fn test_rgb_complex_operands_parse() {
    for text in [
        "rgb(0, (), 0)",
        "rgb(0, (4+4), 0)",
        "rgb(0, (4 + 4), 0)",
        "rgb(0, calc(4+4), 0)",
        "rgb(0, randomFunction(), 0)",
        "rgb(0, randomFunction(4+4), 0)",
        "rgb(0, randomFunction(4 + 4), 0)",
        "rgb(0, randomFunction(4,5,6,7), 0)",
        "rgb(0, randomFunction(4+(4)), 0)",
        "rgb(0, var(--toast), 0)",
        r#"rgb(0, randomFunction("string)"), 0)"#,
    ] {
        assert!(!fails(text), "`{text}` should parse");
    }
}

#[test]
fn test_arithmetic_is_folded() {
    assert_eq!(rgb("rgb(0, (4+4), 0)").green, Expr::number(8.0));
    assert_eq!(rgb("rgb(0, calc(4 + 4), 0)").green, Expr::number(8.0));
    assert_eq!(rgb("rgb(0, calc(2 * (3 - 1)), 0)").green, Expr::number(4.0));
    assert_eq!(rgb("rgb(0, calc(10 / 4), 0)").green, Expr::number(2.5));
    assert_eq!(rgb("rgb(0, calc(-2 + 4), 0)").green, Expr::number(2.0));
}

#[test]
fn test_unknown_functions_are_opaque() {
    assert_eq!(
        rgb("rgb(0, randomFunction(4,5,6,7), 0)").green,
        Expr::opaque("randomFunction(4,5,6,7)")
    );
    assert_eq!(rgb("rgb(0, (), 0)").green, Expr::opaque("()"));
}

#[test]
fn test_symbolic_arithmetic() {
    assert_eq!(
        rgb("rgb(calc(var(--x) + 4), 0, 0)").red.to_string(),
        "calc(var(--x) + 4)"
    );
    assert_eq!(
        rgb("rgb(min(var(--x), 10), 0, 0)").red.to_string(),
        "min(var(--x), 10)"
    );
    assert_eq!(rgb("rgb(max(1, 5, 3), 0, 0)").red, Expr::number(5.0));
    assert_eq!(rgb("rgb(clamp(0, 300, 255), 0, 0)").red, Expr::number(255.0));
    assert!(fails("rgb(clamp(0, 1), 0, 0)"));
    assert!(fails("rgb(min(), 0, 0)"));
}

#[test]
fn test_unbalanced_input_fails() {
    for text in [
        "rgb(0, ), 0)",
        "rgb(0, (, 0)",
        "rgb(0, ()), 0)",
        "rgb(0, ((), 0)",
        "rgb(0, (4+(4), 0)",
        "rgb(0, (4+)4), 0)",
        "rgb(0, [), 0)",
        "rgb(0, \"open, 0)",
        "rgb(0, 0, 0",
    ] {
        assert!(
            matches!(parse_color_expression(text), Err(ColorError::Syntax { .. })),
            "`{text}` should be a syntax error"
        );
    }
}

#[test]
fn test_trailing_text_fails() {
    assert!(fails("rgb(0, 0, 0) red"));
    assert!(fails("red blue"));
    assert!(fails("#fff,"));
}

#[test]
fn test_hsl() {
    assert_eq!(
        parse("hsl(360, 100%, 50%)"),
        Color::Hsl(Hsl {
            hue: Expr::number(360.0),
            saturation: Expr::percent(100.0),
            lightness: Expr::percent(50.0),
            alpha: Expr::number(1.0),
        })
    );
    assert_eq!(parse("hsl(360 100% 50% )"), parse("hsl(360, 100%, 50%)"));

    let Color::Hsl(hsla) = parse("hsla(360 100% 50% / 0.5)") else {
        panic!("expected hsl");
    };
    assert_eq!(hsla.alpha, Expr::number(0.5));
}

#[test]
fn test_hsl_units() {
    let Color::Hsl(hsl) = parse("hsl(0.5turn, 10, 20)") else {
        panic!("expected hsl");
    };
    assert_eq!(hsl.hue.to_string(), "0.5turn");
    assert_eq!(hsl.saturation, Expr::percent(10.0));
    assert_eq!(hsl.lightness, Expr::percent(20.0));
    assert!(fails("hsl(10px, 10%, 20%)"));
    assert!(fails("hsl(10, 10deg, 20%)"));
}

#[test]
fn test_defined_color() {
    assert_eq!(
        parse("@dark"),
        Color::Defined {
            name: "dark".to_string()
        }
    );
}

#[test]
fn test_composites() {
    assert_eq!(
        parse("mix(#000, @fg, 0.4)"),
        Color::Mix {
            a: Box::new(Color::Rgb(Rgb::opaque(0.0, 0.0, 0.0))),
            b: Box::new(Color::Defined {
                name: "fg".to_string()
            }),
            factor: Expr::number(0.4),
        }
    );
    assert_eq!(
        parse("shade(currentColor, 1.2)"),
        Color::Shade {
            color: Box::new(Color::Current),
            factor: Expr::number(1.2),
        }
    );
    assert_eq!(
        parse("lighter(darker(@bg))"),
        Color::Lighter {
            color: Box::new(Color::Darker {
                color: Box::new(Color::Defined {
                    name: "bg".to_string()
                }),
            }),
        }
    );
}

#[test]
fn test_composite_factor_expressions() {
    let Color::Alpha { factor, .. } = parse("alpha(rgb(20,50,90), calc(0.5 + (0.5*0.5)))") else {
        panic!("expected alpha");
    };
    assert_eq!(factor, Expr::number(0.75));

    let Color::Alpha { factor, .. } = parse("alpha(rgb(20,50,90), var(--test))") else {
        panic!("expected alpha");
    };
    assert_eq!(factor, Expr::var("--test"));
}

#[test]
fn test_alpha_invalid_factors_fail() {
    for text in [
        "alpha(rgb(20,50,90), nans)",
        "alpha(rgb(20,50,90), )",
        "alpha(rgb(20,50,90))",
        "alpha(rgb(20,50,90),beta)",
        "alpha(rgb(20,50,90) 5)",
    ] {
        assert!(fails(text), "`{text}` should not parse");
    }
}

#[test]
fn test_composite_arity() {
    assert!(fails("mix(#000, #fff)"));
    assert!(fails("shade(#000)"));
    assert!(fails("lighter(#000, 2)"));
    assert!(fails("darker()"));
}

#[test]
fn test_unknown_color_function_fails() {
    assert!(fails("randomFunction(4,5,6,7)"));
    assert!(fails("var(--x)"));
}

#[test]
fn test_deep_nesting_is_rejected() {
    let depth = MAX_NESTING_DEPTH + 2;
    let text = format!("{}#fff{}", "lighter(".repeat(depth), ")".repeat(depth));
    assert_eq!(
        parse_color_expression(&text),
        Err(ColorError::TooDeep {
            limit: MAX_NESTING_DEPTH
        })
    );

    let text = format!("rgb({}1{}, 0, 0)", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(
        parse_color_expression(&text),
        Err(ColorError::TooDeep {
            limit: MAX_NESTING_DEPTH
        })
    );
}

#[test]
fn test_moderate_nesting_is_accepted() {
    let text = format!("{}#fff{}", "lighter(".repeat(8), ")".repeat(8));
    assert!(!fails(&text));
}
