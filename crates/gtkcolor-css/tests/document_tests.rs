//! Integration tests for finding and rewriting colors in declaration text.

use gtkcolor_css::document::{CounterPlaceholders, PlaceholderSource};
use gtkcolor_css::{Color, ColorError, Resolver, parse_document, rewrite, rewrite_with};

fn rewritten(text: &str) -> String {
    let parse = parse_document(text).unwrap_or_else(|err| panic!("`{text}`: {err}"));
    rewrite(&parse).unwrap_or_else(|err| panic!("`{text}`: {err}"))
}

#[test]
fn test_plain_text_has_no_matches() {
    let parse = parse_document("1px solid red").unwrap();
    assert!(parse.is_empty());
    assert_eq!(parse.text, "1px solid red");
    assert_eq!(rewrite(&parse).unwrap(), "1px solid red");
}

#[test]
fn test_defined_references_are_found() {
    let parse = parse_document("1px solid @borders").unwrap();
    assert_eq!(parse.matches.len(), 1);
    assert_eq!(
        parse.matches.get("@borders"),
        Some(&Color::Defined {
            name: "borders".to_string()
        })
    );
}

#[test]
fn test_composite_calls_are_found() {
    let parse = parse_document("0 1px mix(@a, #fff, 0.5) inset, 0 0 2px alpha(black, 0.2)").unwrap();
    let keys: Vec<&str> = parse.matches.keys().map(String::as_str).collect();
    // References inside a composite belong to the composite's match.
    assert_eq!(keys, ["alpha(black, 0.2)", "mix(@a, #fff, 0.5)"]);
}

#[test]
fn test_every_key_occurs_in_text() {
    let text = "linear-gradient(to top, shade(@bg, 0.9), lighter(@bg)) @fg";
    let parse = parse_document(text).unwrap();
    assert!(!parse.is_empty());
    for key in parse.matches.keys() {
        assert!(text.contains(key.as_str()), "{key}");
    }
}

#[test]
fn test_rewrite_defined_reference() {
    assert_eq!(
        rewritten("1px solid @borders"),
        "1px solid rgba(var(--borders-r),var(--borders-g),var(--borders-b),var(--borders-a))"
    );
}

#[test]
fn test_rewrite_composite() {
    assert_eq!(rewritten("mix(#000, #fff, 0.5)"), "#7f7f7f");
    assert_eq!(
        rewritten("0 0 0 1px alpha(#000, 0.5), inset 0 1px shade(#ff0000, 0.5)"),
        "0 0 0 1px #0000007f, inset 0 1px hsl(0,50%,25%)"
    );
}

#[test]
fn test_plain_colors_are_untouched() {
    assert_eq!(rewritten("rgb(1, 2, 3) #abc red"), "rgb(1, 2, 3) #abc red");
}

#[test]
fn test_overlapping_names_are_replaced_once() {
    assert_eq!(
        rewritten("@a @ab"),
        "rgba(var(--a-r),var(--a-g),var(--a-b),var(--a-a)) \
         rgba(var(--ab-r),var(--ab-g),var(--ab-b),var(--ab-a))"
    );
}

#[test]
fn test_composite_containing_reference() {
    let rewritten = rewritten("alpha(@a, 0.5) @a");
    assert!(rewritten.starts_with("rgba(var(--a-r),var(--a-g),var(--a-b),clamp(0, var(--a-a)*0.5, 1))"));
    assert!(rewritten.ends_with(" rgba(var(--a-r),var(--a-g),var(--a-b),var(--a-a))"));
}

#[test]
fn test_text_outside_matches_may_be_unbalanced() {
    assert_eq!(rewritten("foo) @a"), "foo) rgba(var(--a-r),var(--a-g),var(--a-b),var(--a-a))");
}

#[test]
fn test_malformed_composite_fails() {
    assert!(matches!(
        parse_document("1px solid shade(@a)"),
        Err(ColorError::Syntax { .. })
    ));
    assert!(parse_document("mix(@a, @b, 0.5").is_err());
}

#[test]
fn test_unresolvable_match_fails() {
    let parse = parse_document("mix(hsl(0, 0%, 0%), #fff, 0.5)").unwrap();
    assert!(matches!(
        rewrite(&parse),
        Err(ColorError::UnsupportedColorModel(_))
    ));
}

#[test]
fn test_placeholders_avoid_existing_text() {
    let mut placeholders = CounterPlaceholders::default();
    let first = placeholders.next_placeholder("");
    let taken = format!("x{first}y");
    let mut fresh = CounterPlaceholders::default();
    let second = fresh.next_placeholder(&taken);
    assert_ne!(first, second);
    assert!(!taken.contains(&second));
}

#[test]
fn test_rewrite_with_custom_placeholders() {
    struct Brackets(usize);

    impl PlaceholderSource for Brackets {
        fn next_placeholder(&mut self, _text: &str) -> String {
            self.0 += 1;
            format!("[[{}]]", self.0)
        }
    }

    let parse = parse_document("currentColor mix(currentColor, #fff, 1)").unwrap();
    let mut resolver = Resolver::new();
    let text = rewrite_with(&parse, &mut resolver, &mut Brackets(0)).unwrap();
    assert_eq!(text, "currentColor #fff");
    assert_eq!(resolver.take_warnings().len(), 1);
}

#[test]
fn test_spans_locate_each_occurrence() {
    let parse = parse_document("@a 1px @a mix(@a, #fff, 0.5)").unwrap();
    assert_eq!(parse.spans, [0..2, 7..9, 10..28]);
    for span in &parse.spans {
        assert!(parse.matches.contains_key(&parse.text[span.clone()]));
    }
}

#[test]
fn test_keys_inside_strings_and_urls_are_untouched() {
    assert_eq!(
        rewritten(r#"@a url("@a.png") "@ab""#),
        r#"rgba(var(--a-r),var(--a-g),var(--a-b),var(--a-a)) url("@a.png") "@ab""#
    );
    assert_eq!(
        rewritten("@ab @a"),
        "rgba(var(--ab-r),var(--ab-g),var(--ab-b),var(--ab-a)) \
         rgba(var(--a-r),var(--a-g),var(--a-b),var(--a-a))"
    );
}
