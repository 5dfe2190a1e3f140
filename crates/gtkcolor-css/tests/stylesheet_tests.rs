//! Integration tests for whole-stylesheet conversion.

use gtkcolor_css::{
    ColorError, Conversion, ConvertError, ConvertOptions, Rgb, convert_stylesheet,
};

fn convert(css: &str) -> Conversion {
    convert_stylesheet(css, &ConvertOptions::default())
        .unwrap_or_else(|err| panic!("conversion failed: {err}"))
}

const DARK_2_VAR: &str = "rgba(var(--dark-2-r),var(--dark-2-g),var(--dark-2-b),var(--dark-2-a))";

#[test]
fn test_define_color_becomes_root_properties() {
    let conversion = convert("@define-color dark_2 #5e5c64;\nlabel { color: @dark_2; }\n");
    assert_eq!(
        conversion.css,
        format!(
            "label {{ color: {DARK_2_VAR}; }}\n\
             :root {{\n  --dark-2-r: 94;\n  --dark-2-g: 92;\n  --dark-2-b: 100;\n  --dark-2-a: 1;\n}}\n"
        )
    );
}

#[test]
fn test_definitions_are_reported() {
    let conversion = convert("@define-color dark_2 #5e5c64;");
    assert_eq!(conversion.definitions.len(), 1);
    let definition = &conversion.definitions[0];
    assert_eq!(definition.name, "dark_2");
    assert_eq!(definition.properties.red, "--dark-2-r");
    assert_eq!(definition.color, Rgb::opaque(94.0, 92.0, 100.0));
    let declarations: Vec<(&str, String)> = definition
        .declarations()
        .map(|(property, value)| (property, value.to_string()))
        .collect();
    assert_eq!(
        declarations,
        [
            ("--dark-2-r", "94".to_string()),
            ("--dark-2-g", "92".to_string()),
            ("--dark-2-b", "100".to_string()),
            ("--dark-2-a", "1".to_string()),
        ]
    );
}

#[test]
fn test_unrelated_text_is_byte_identical() {
    let css = "/* theme */\nbutton:hover  {  color : red ;\n\tmargin:0 }\n\n@media print { a { b: c } }";
    let conversion = convert(css);
    assert_eq!(conversion.css, css);
    assert!(conversion.definitions.is_empty());
    assert!(conversion.warnings.is_empty());
}

#[test]
fn test_only_values_are_rewritten() {
    let css = "a {\n  color:   mix(#000, #fff, 0.5)  ;\n  border: 1px solid red;\n}";
    assert_eq!(
        convert(css).css,
        "a {\n  color:   #7f7f7f  ;\n  border: 1px solid red;\n}"
    );
}

#[test]
fn test_important_is_kept() {
    let css = "a { color: @dark_2 !important; }";
    assert_eq!(
        convert(css).css,
        format!("a {{ color: {DARK_2_VAR} !important; }}")
    );
}

#[test]
fn test_nested_rules_are_rewritten() {
    let css = "@media (min-width: 10px) { a { color: shade(#ff0000, 0.5); } }";
    assert_eq!(
        convert(css).css,
        "@media (min-width: 10px) { a { color: hsl(0,50%,25%); } }"
    );
}

#[test]
fn test_definitions_may_reference_each_other() {
    let conversion = convert("@define-color a #fff;\n@define-color b alpha(@a, 0.5);\n");
    assert_eq!(conversion.definitions.len(), 2);
    assert_eq!(
        conversion.css,
        ":root {\n  --a-r: 255;\n  --a-g: 255;\n  --a-b: 255;\n  --a-a: 1;\n  \
         --b-r: var(--a-r);\n  --b-g: var(--a-g);\n  --b-b: var(--a-b);\n  \
         --b-a: clamp(0, var(--a-a)*0.5, 1);\n}\n"
    );
}

#[test]
fn test_custom_root_selector() {
    let options = ConvertOptions {
        root_selector: "window".to_string(),
    };
    let conversion = convert_stylesheet("@define-color x red;\r\nb{}", &options).unwrap();
    assert_eq!(
        conversion.css,
        "b{}\nwindow {\n  --x-r: 255;\n  --x-g: 0;\n  --x-b: 0;\n  --x-a: 1;\n}\n"
    );
}

#[test]
fn test_non_rgb_definitions_fail() {
    for value in ["hsl(0, 0%, 0%)", "currentColor", "inherit", "shade(#fff, 0.5)"] {
        let css = format!("@define-color bad {value};");
        match convert_stylesheet(&css, &ConvertOptions::default()) {
            Err(ConvertError::Definition { name, source }) => {
                assert_eq!(name, "bad");
                assert!(
                    matches!(source, ColorError::UnsupportedColorModel(_)),
                    "{value}: {source:?}"
                );
            }
            other => panic!("{value}: {other:?}"),
        }
    }
}

#[test]
fn test_malformed_definitions_fail() {
    assert_eq!(
        convert_stylesheet("@define-color accent;", &ConvertOptions::default()),
        Err(ConvertError::MalformedDefinition { offset: 0 })
    );
    assert_eq!(
        convert_stylesheet("a{}\n@define-color accent #fff { }", &ConvertOptions::default()),
        Err(ConvertError::MalformedDefinition { offset: 4 })
    );
}

#[test]
fn test_invalid_definition_value_fails() {
    let err = convert_stylesheet("@define-color accent #ggg;", &ConvertOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Definition {
            source: ColorError::Syntax { .. },
            ..
        }
    ));
    assert!(err.to_string().starts_with("@define-color accent: "));
}

#[test]
fn test_invalid_declaration_fails() {
    let err = convert_stylesheet("a { color: mix(@a); }", &ConvertOptions::default())
        .unwrap_err();
    assert!(matches!(
        &err,
        ConvertError::Declaration { property, source: ColorError::Syntax { .. } }
            if property == "color"
    ));
}

#[test]
fn test_fallback_warnings_are_collected() {
    let conversion = convert("a { color: mix(currentColor, #fff, 0.5); }");
    assert_eq!(conversion.css, "a { color: #7f7f7f; }");
    assert_eq!(conversion.warnings.len(), 1);
    assert_eq!(conversion.warnings[0].operator, "mix");
}

#[test]
fn test_edits_next_to_multibyte_text() {
    let conversion = convert(
        "/* thème sombre */\n@define-color dark_2 #5e5c64;\nlabel::after { content: \"→\"; color: @dark_2; }\n",
    );
    assert_eq!(
        conversion.css,
        format!(
            "/* thème sombre */\nlabel::after {{ content: \"→\"; color: {DARK_2_VAR}; }}\n\
             :root {{\n  --dark-2-r: 94;\n  --dark-2-g: 92;\n  --dark-2-b: 100;\n  --dark-2-a: 1;\n}}\n"
        )
    );
}
