//! Color substitution inside declaration values.
//!
//! [`parse_document`] finds the color expressions embedded in a value such as
//! `1px solid mix(@accent, white, 0.2)`, [`rewrite`] replaces each of them
//! with its resolved CSS.

use core::ops::Range;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::color::Color;
use crate::color::resolve::Resolver;
use crate::color::serialize::serialize;
use crate::error::ColorError;

pub use crate::color::grammar::parse_document;

/// Declaration text together with the color expressions found in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentParse {
    /// The scanned text.
    pub text: String,
    /// Each matched substring of `text` and the color it denotes.
    pub matches: BTreeMap<String, Color>,
    /// Byte ranges of every recognized occurrence in `text`, in source order.
    /// Each one slices out a key of `matches`.
    pub spans: Vec<Range<usize>>,
}

impl DocumentParse {
    /// Whether no color expression was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Supplies the temporary tokens [`rewrite_with`] substitutes in a first pass.
pub trait PlaceholderSource {
    /// A token that does not occur in `text` and differs from every token
    /// returned before.
    fn next_placeholder(&mut self, text: &str) -> String;
}

/// Numbered placeholders delimited by private use code points.
#[derive(Debug, Default, Clone)]
pub struct CounterPlaceholders {
    next: u64,
}

impl PlaceholderSource for CounterPlaceholders {
    fn next_placeholder(&mut self, text: &str) -> String {
        loop {
            let candidate = format!("\u{E000}{}\u{E001}", self.next);
            self.next += 1;
            if !text.contains(&candidate) {
                return candidate;
            }
        }
    }
}

/// Replace every match with its resolved color, using a default [`Resolver`].
///
/// # Errors
///
/// Fails when one of the matches cannot be resolved.
pub fn rewrite(parse: &DocumentParse) -> Result<String, ColorError> {
    rewrite_with(
        parse,
        &mut Resolver::new(),
        &mut CounterPlaceholders::default(),
    )
}

/// Replace every match with its resolved color.
///
/// The recognized occurrences are swapped for placeholders first, one per
/// distinct match, so text that merely contains a match key (a string, a url,
/// a longer `@name`) is never touched. The placeholders are then swapped for
/// the serialized colors.
///
/// # Errors
///
/// Fails when one of the matches cannot be resolved.
pub fn rewrite_with(
    parse: &DocumentParse,
    resolver: &mut Resolver,
    placeholders: &mut dyn PlaceholderSource,
) -> Result<String, ColorError> {
    let mut matches: Vec<(&String, &Color)> = parse.matches.iter().collect();
    matches.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    let mut tokens = HashMap::with_capacity(matches.len());
    let mut replacements = Vec::with_capacity(matches.len());
    for (source, color) in matches {
        let css = serialize(&resolver.resolve(color)?);
        let placeholder = placeholders.next_placeholder(&parse.text);
        let _ = tokens.insert(source.as_str(), placeholder.clone());
        replacements.push((placeholder, css));
    }

    let mut text = String::with_capacity(parse.text.len());
    let mut copied = 0;
    for span in &parse.spans {
        let source = parse.text.get(span.clone()).unwrap_or_default();
        let before = parse.text.get(copied..span.start);
        let placeholder = tokens.get(source);
        debug_assert!(
            before.is_some() && placeholder.is_some(),
            "span {span:?} does not slice out a match"
        );
        let (Some(before), Some(placeholder)) = (before, placeholder) else {
            continue;
        };
        text.push_str(before);
        text.push_str(placeholder);
        copied = span.end;
    }
    text.push_str(parse.text.get(copied..).unwrap_or_default());

    for (placeholder, css) in &replacements {
        text = text.replace(placeholder.as_str(), css);
    }
    Ok(text)
}
