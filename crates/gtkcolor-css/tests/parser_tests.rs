//! Integration tests for the span-preserving stylesheet parser.

use gtkcolor_css::parser::{AtRuleBlock, CSSParser, Declaration, Rule, Stylesheet};
use gtkcolor_css::tokenizer::CSSTokenizer;

fn parse(css: &str) -> Stylesheet {
    CSSParser::new(CSSTokenizer::tokenize(css)).parse_stylesheet()
}

fn value<'a>(css: &'a str, declaration: &Declaration) -> &'a str {
    &css[declaration.value.clone()]
}

#[test]
fn test_parse_style_rule() {
    let css = "button { color: red; background: mix(@a, @b, 0.5); }";
    let stylesheet = parse(css);
    assert_eq!(stylesheet.rules.len(), 1);

    let Rule::Style(rule) = &stylesheet.rules[0] else {
        panic!("expected a style rule");
    };
    assert_eq!(&css[rule.prelude.clone()], "button");
    assert_eq!(rule.declarations.len(), 2);
    assert_eq!(rule.declarations[0].name, "color");
    assert_eq!(value(css, &rule.declarations[0]), "red");
    assert_eq!(rule.declarations[1].name, "background");
    assert_eq!(value(css, &rule.declarations[1]), "mix(@a, @b, 0.5)");
}

#[test]
fn test_value_span_excludes_important() {
    let css = "a { color: @fg !important; border: 1px solid  @bd  ; }";
    let Rule::Style(rule) = &parse(css).rules[0] else {
        panic!("expected a style rule");
    };
    assert!(rule.declarations[0].important);
    assert_eq!(value(css, &rule.declarations[0]), "@fg");
    assert!(!rule.declarations[1].important);
    assert_eq!(value(css, &rule.declarations[1]), "1px solid  @bd");
}

#[test]
fn test_last_declaration_without_semicolon() {
    let css = "a{color:shade(@x,1.2)}";
    let Rule::Style(rule) = &parse(css).rules[0] else {
        panic!("expected a style rule");
    };
    assert_eq!(value(css, &rule.declarations[0]), "shade(@x,1.2)");
}

#[test]
fn test_define_color_at_rule() {
    let css = "@define-color accent #3584e4;\nlabel { color: @accent; }";
    let stylesheet = parse(css);
    assert_eq!(stylesheet.rules.len(), 2);

    let Rule::At(at_rule) = &stylesheet.rules[0] else {
        panic!("expected an at-rule");
    };
    assert_eq!(at_rule.name, "define-color");
    assert_eq!(&css[at_rule.prelude.clone()], "accent #3584e4");
    assert_eq!(&css[at_rule.span.clone()], "@define-color accent #3584e4;");
    assert!(at_rule.block.is_none());
}

#[test]
fn test_media_rule_holds_rules() {
    let css = "@media (min-width: 10px) { a { color: @x; } b { color: red; } }";
    let Rule::At(at_rule) = &parse(css).rules[0] else {
        panic!("expected an at-rule");
    };
    assert_eq!(&css[at_rule.prelude.clone()], "(min-width: 10px)");
    let Some(AtRuleBlock::Rules(rules)) = &at_rule.block else {
        panic!("expected nested rules");
    };
    assert_eq!(rules.len(), 2);
    assert_eq!(at_rule.span, 0..css.len());
}

#[test]
fn test_font_face_holds_declarations() {
    let css = "@font-face { font-family: Cantarell; }";
    let Rule::At(at_rule) = &parse(css).rules[0] else {
        panic!("expected an at-rule");
    };
    let Some(AtRuleBlock::Declarations(declarations)) = &at_rule.block else {
        panic!("expected declarations");
    };
    assert_eq!(declarations[0].name, "font-family");
    assert_eq!(value(css, &declarations[0]), "Cantarell");
}

#[test]
fn test_invalid_declaration_is_skipped() {
    let css = "a { 42; color red; color: blue; }";
    let Rule::Style(rule) = &parse(css).rules[0] else {
        panic!("expected a style rule");
    };
    assert_eq!(rule.declarations.len(), 1);
    assert_eq!(value(css, &rule.declarations[0]), "blue");
}

#[test]
fn test_parse_declaration_list() {
    let css = "color: @fg; margin: 0";
    let declarations = CSSParser::new(CSSTokenizer::tokenize(css)).parse_declaration_list();
    assert_eq!(declarations.len(), 2);
    assert_eq!(value(css, &declarations[0]), "@fg");
    assert_eq!(value(css, &declarations[1]), "0");
}

#[test]
fn test_stray_closing_brace_is_dropped() {
    let css = "} a { color: red; }";
    let stylesheet = parse(css);
    assert_eq!(stylesheet.rules.len(), 1);
}
