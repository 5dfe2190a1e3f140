//! Whole-stylesheet conversion.
//!
//! `@define-color name value;` rules become custom properties on a root rule
//! and every declaration value is rewritten through [`rewrite_with`]. Text
//! that contains no color expression is copied unchanged.

use core::ops::Range;

use serde::Serialize;

use crate::color::expr::Expr;
use crate::color::grammar::parse_color_expression;
use crate::color::names::{ChannelNames, names_for};
use crate::color::resolve::{Resolver, Warning};
use crate::color::{CanonicalColor, Rgb};
use crate::document::{CounterPlaceholders, parse_document, rewrite_with};
use crate::error::{ColorError, ConvertError};
use crate::parser::{AtRule, AtRuleBlock, CSSParser, Declaration, Rule};
use crate::tokenizer::CSSTokenizer;

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Selector of the rule that receives the defined colors.
    pub root_selector: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root_selector: ":root".to_string(),
        }
    }
}

/// A color declared with `@define-color`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    /// The name as written.
    pub name: String,
    /// The custom properties that carry it.
    pub properties: ChannelNames,
    /// The resolved color.
    pub color: Rgb,
}

impl Definition {
    /// `(property, value)` pairs in red, green, blue, alpha order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Expr)> {
        self.properties.iter().zip([
            &self.color.red,
            &self.color.green,
            &self.color.blue,
            &self.color.alpha,
        ])
    }
}

/// The result of [`convert_stylesheet`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    /// The converted stylesheet.
    pub css: String,
    /// The `@define-color` rules, in source order.
    pub definitions: Vec<Definition>,
    /// Fallback substitutions made while resolving.
    pub warnings: Vec<Warning>,
}

/// Convert a GTK stylesheet into standard CSS.
///
/// # Errors
///
/// The first `@define-color` rule or declaration that cannot be converted.
pub fn convert_stylesheet(css: &str, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let mut parser = CSSParser::new(CSSTokenizer::tokenize(css));
    let stylesheet = parser.parse_stylesheet();

    let mut converter = Converter {
        css,
        resolver: Resolver::new(),
        placeholders: CounterPlaceholders::default(),
        edits: Vec::new(),
        definitions: Vec::new(),
    };
    for rule in &stylesheet.rules {
        match rule {
            Rule::At(at_rule) if at_rule.name.eq_ignore_ascii_case("define-color") => {
                converter.define(at_rule)?;
            }
            rule => converter.rewrite_rule(rule)?,
        }
    }

    let mut output = converter.apply_edits();
    if !converter.definitions.is_empty() {
        append_root_rule(&mut output, &options.root_selector, &converter.definitions);
    }

    Ok(Conversion {
        css: output,
        definitions: converter.definitions,
        warnings: converter.resolver.take_warnings(),
    })
}

struct Converter<'a> {
    css: &'a str,
    resolver: Resolver,
    placeholders: CounterPlaceholders,
    edits: Vec<(Range<usize>, String)>,
    definitions: Vec<Definition>,
}

impl<'a> Converter<'a> {
    fn text(&self, span: Range<usize>) -> &'a str {
        self.css.get(span).unwrap_or_default()
    }

    /// `@define-color <name> <value>;`, split at the first whitespace.
    fn define(&mut self, rule: &AtRule) -> Result<(), ConvertError> {
        let malformed = || ConvertError::MalformedDefinition {
            offset: rule.span.start,
        };
        let prelude = self.text(rule.prelude.clone());
        let (name, value) = prelude.split_once(char::is_whitespace).ok_or_else(malformed)?;
        let value = value.trim();
        if value.is_empty() || rule.block.is_some() {
            return Err(malformed());
        }

        let failed = |source: ColorError| ConvertError::Definition {
            name: name.to_string(),
            source,
        };
        let properties = names_for(name).map_err(failed)?;
        let color = parse_color_expression(value).map_err(failed)?;
        let color = match self.resolver.resolve(&color).map_err(failed)? {
            CanonicalColor::Rgb(rgb) => rgb,
            other => {
                return Err(failed(ColorError::UnsupportedColorModel(format!(
                    "@define-color needs an rgb color, found `{other}`"
                ))));
            }
        };

        self.definitions.push(Definition {
            name: name.to_string(),
            properties,
            color,
        });
        let removal = self.removal_span(&rule.span);
        self.edits.push((removal, String::new()));
        Ok(())
    }

    /// The rule plus the line break that follows it.
    fn removal_span(&self, span: &Range<usize>) -> Range<usize> {
        let rest = self.css.get(span.end..).unwrap_or_default();
        let newline = if rest.starts_with("\r\n") {
            2
        } else {
            usize::from(rest.starts_with('\n'))
        };
        span.start..span.end + newline
    }

    fn rewrite_rule(&mut self, rule: &Rule) -> Result<(), ConvertError> {
        match rule {
            Rule::Style(style) => self.rewrite_declarations(&style.declarations),
            Rule::At(at_rule) => match &at_rule.block {
                Some(AtRuleBlock::Rules(rules)) => {
                    for rule in rules {
                        self.rewrite_rule(rule)?;
                    }
                    Ok(())
                }
                Some(AtRuleBlock::Declarations(declarations)) => {
                    self.rewrite_declarations(declarations)
                }
                None => Ok(()),
            },
        }
    }

    fn rewrite_declarations(&mut self, declarations: &[Declaration]) -> Result<(), ConvertError> {
        for declaration in declarations {
            let failed = |source: ColorError| ConvertError::Declaration {
                property: declaration.name.clone(),
                source,
            };
            let document = parse_document(self.text(declaration.value.clone())).map_err(failed)?;
            if document.is_empty() {
                continue;
            }
            let value = rewrite_with(&document, &mut self.resolver, &mut self.placeholders)
                .map_err(failed)?;
            self.edits.push((declaration.value.clone(), value));
        }
        Ok(())
    }

    /// Apply the collected edits, last one first so earlier spans stay valid.
    fn apply_edits(&mut self) -> String {
        self.edits.sort_by_key(|(span, _)| span.start);
        let mut output = self.css.to_string();
        for (span, replacement) in self.edits.iter().rev() {
            debug_assert!(output.get(span.clone()).is_some(), "edit {span:?} splits a character");
            output.replace_range(span.clone(), replacement);
        }
        output
    }
}

/// `<selector> { --name-r: R; --name-g: G; --name-b: B; --name-a: A; }`
fn append_root_rule(output: &mut String, selector: &str, definitions: &[Definition]) {
    if !output.trim().is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    output.push_str(selector);
    output.push_str(" {\n");
    for definition in definitions {
        for (property, value) in definition.declarations() {
            output.push_str(&format!("  {property}: {value};\n"));
        }
    }
    output.push_str("}\n");
}
