//! Color expression grammar.
//!
//! Text is tokenized with [`CSSTokenizer`] first; the parser then works on
//! token index ranges and slices the source through the token spans whenever
//! it needs verbatim text (opaque operands, document match keys).

use core::ops::Range;
use std::collections::BTreeMap;

use super::expr::{Expr, MathFunction, Quantity};
use super::{Color, Hsl, Rgb};
use crate::document::DocumentParse;
use crate::error::{ColorError, MAX_NESTING_DEPTH};
use crate::tokenizer::{CSSToken, CSSTokenizer, SpannedToken};

static EOF: CSSToken = CSSToken::EOF;

/// Composite functions recognized inside arbitrary declaration text.
const COMPOSITES: [&str; 5] = ["mix", "shade", "alpha", "lighter", "darker"];

/// Parse one color expression.
///
/// # Errors
///
/// [`ColorError::Syntax`] when `text` is empty, unbalanced, or not a color;
/// [`ColorError::TooDeep`] when it nests deeper than [`MAX_NESTING_DEPTH`].
pub fn parse_color_expression(text: &str) -> Result<Color, ColorError> {
    let tokens = CSSTokenizer::tokenize(text);
    let grammar = Grammar::new(text, &tokens);
    let range = grammar.trim(0..grammar.end());
    if range.is_empty() {
        return Err(ColorError::syntax(0, "empty color expression"));
    }
    grammar.check_balanced(range.clone())?;
    grammar.color(range, 0)
}

/// Find every `@name` reference and composite call in a piece of CSS text.
///
/// Everything that is neither is left alone, including unbalanced text
/// outside the matched calls.
///
/// # Errors
///
/// Fails when a composite call is malformed.
pub fn parse_document(text: &str) -> Result<DocumentParse, ColorError> {
    let tokens = CSSTokenizer::tokenize(text);
    let grammar = Grammar::new(text, &tokens);
    let end = grammar.end();
    let mut matches = BTreeMap::new();
    let mut spans = Vec::new();

    let mut index = 0;
    while index < end {
        match grammar.token(index) {
            CSSToken::AtKeyword(name) => {
                let key = grammar.text(index..index + 1).to_string();
                let _ = matches.insert(key, Color::Defined { name: name.clone() });
                spans.push(grammar.byte_span(index..index + 1));
            }
            CSSToken::Function(name) if is_composite(name) => {
                let close = grammar.scan_block(index, end)?;
                let color = grammar.color(index..close + 1, 0)?;
                let _ = matches.insert(grammar.text(index..close + 1).to_string(), color);
                spans.push(grammar.byte_span(index..close + 1));
                index = close;
            }
            _ => {}
        }
        index += 1;
    }

    Ok(DocumentParse {
        text: text.to_string(),
        matches,
        spans,
    })
}

fn is_composite(name: &str) -> bool {
    COMPOSITES.iter().any(|c| c.eq_ignore_ascii_case(name))
}

/// Recursive descent over a token slice.
///
/// Ranges are half-open token index ranges that never include the final EOF.
struct Grammar<'a> {
    source: &'a str,
    tokens: &'a [SpannedToken],
}

impl<'a> Grammar<'a> {
    const fn new(source: &'a str, tokens: &'a [SpannedToken]) -> Self {
        Self { source, tokens }
    }

    /// Index of the EOF token.
    const fn end(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    fn token(&self, index: usize) -> &'a CSSToken {
        self.tokens.get(index).map_or(&EOF, |t| &t.token)
    }

    fn peek(&self, index: usize, end: usize) -> Option<&'a CSSToken> {
        (index < end).then(|| self.token(index))
    }

    fn offset(&self, index: usize) -> usize {
        self.tokens
            .get(index)
            .map_or(self.source.len(), |t| t.span.start)
    }

    /// Byte range of the source covered by a token range.
    fn byte_span(&self, range: Range<usize>) -> Range<usize> {
        let start = self.offset(range.start);
        if range.is_empty() {
            return start..start;
        }
        let end = self
            .tokens
            .get(range.end - 1)
            .map_or(self.source.len(), |t| t.span.end);
        start..end
    }

    /// Source text covered by a token range.
    fn text(&self, range: Range<usize>) -> &'a str {
        self.source.get(self.byte_span(range)).unwrap_or_default()
    }

    fn trim(&self, mut range: Range<usize>) -> Range<usize> {
        while range.start < range.end && self.token(range.start).is_whitespace() {
            range.start += 1;
        }
        while range.end > range.start && self.token(range.end - 1).is_whitespace() {
            range.end -= 1;
        }
        range
    }

    fn skip_whitespace(&self, pos: &mut usize, end: usize) {
        while self.peek(*pos, end).is_some_and(CSSToken::is_whitespace) {
            *pos += 1;
        }
    }

    fn unexpected(&self, index: usize, context: &str) -> ColorError {
        ColorError::syntax(
            self.offset(index),
            format!("unexpected `{}` {context}", self.text(index..index + 1)),
        )
    }

    // Balancing

    /// Reject bad strings and strings cut off by the end of input.
    ///
    /// [§ 4.3.4](https://www.w3.org/TR/css-syntax-3/#consume-string-token)
    /// "EOF: This is a parse error. Return the <string-token>." The tokenizer
    /// returns it, so the closing quote is checked here.
    fn check_string(&self, index: usize) -> Result<(), ColorError> {
        let closed = match self.token(index) {
            CSSToken::BadString => false,
            CSSToken::String(_) => {
                let text = self.text(index..index + 1);
                let quote = text.chars().next();
                let body = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
                let escapes = body.chars().rev().take_while(|&c| c == '\\').count();
                text.len() >= 2 && text.chars().next_back() == quote && escapes % 2 == 0
            }
            _ => true,
        };
        if closed {
            Ok(())
        } else {
            Err(ColorError::syntax(self.offset(index), "unterminated string"))
        }
    }

    /// Index of the token that closes the block opened at `open`.
    ///
    /// Every token up to the closer is checked: brackets must match the
    /// innermost opener and strings must be terminated.
    fn scan_block(&self, open: usize, end: usize) -> Result<usize, ColorError> {
        let mut expected: Vec<CSSToken> = self.token(open).closing().into_iter().collect();
        if expected.is_empty() {
            return Err(self.unexpected(open, "where a block was expected"));
        }

        for index in open + 1..end {
            let token = self.token(index);
            if let Some(closer) = token.closing() {
                if expected.len() >= MAX_NESTING_DEPTH {
                    return Err(ColorError::TooDeep {
                        limit: MAX_NESTING_DEPTH,
                    });
                }
                expected.push(closer);
            } else if token.is_closing() {
                if expected.last() != Some(token) {
                    return Err(self.unexpected(index, "does not close the open block"));
                }
                let _ = expected.pop();
                if expected.is_empty() {
                    return Ok(index);
                }
            } else {
                self.check_string(index)?;
            }
        }

        Err(ColorError::syntax(
            self.offset(open),
            format!("unclosed `{}`", self.text(open..open + 1)),
        ))
    }

    fn check_balanced(&self, range: Range<usize>) -> Result<(), ColorError> {
        let mut index = range.start;
        while index < range.end {
            let token = self.token(index);
            if token.opens_block() {
                index = self.scan_block(index, range.end)?;
            } else if token.is_closing() {
                return Err(self.unexpected(index, "without a matching opener"));
            } else {
                self.check_string(index)?;
            }
            index += 1;
        }
        Ok(())
    }

    /// Split a function body on top-level commas.
    ///
    /// An empty body has no arguments; an empty argument between commas is an
    /// error.
    fn split_arguments(&self, inner: Range<usize>) -> Result<Vec<Range<usize>>, ColorError> {
        let inner = self.trim(inner);
        if inner.is_empty() {
            return Ok(Vec::new());
        }

        let mut arguments = Vec::new();
        let mut push = |range: Range<usize>| {
            let trimmed = self.trim(range.clone());
            if trimmed.is_empty() {
                return Err(ColorError::syntax(self.offset(range.start), "empty argument"));
            }
            arguments.push(trimmed);
            Ok(())
        };

        let mut start = inner.start;
        let mut index = inner.start;
        while index < inner.end {
            let token = self.token(index);
            if token.opens_block() {
                index = self.scan_block(index, inner.end)?;
            } else if token.is_closing() {
                return Err(self.unexpected(index, "without a matching opener"));
            } else if matches!(token, CSSToken::Comma) {
                push(start..index)?;
                start = index + 1;
            } else {
                self.check_string(index)?;
            }
            index += 1;
        }
        push(start..inner.end)?;

        Ok(arguments)
    }

    /// Exactly `N` comma separated arguments of the function at `index`.
    fn arguments<const N: usize>(
        &self,
        index: usize,
        name: &str,
        inner: Range<usize>,
    ) -> Result<[Range<usize>; N], ColorError> {
        <[Range<usize>; N]>::try_from(self.split_arguments(inner)?).map_err(|found| {
            let noun = if N == 1 { "argument" } else { "arguments" };
            ColorError::syntax(
                self.offset(index),
                format!("`{name}()` takes {N} {noun}, found {}", found.len()),
            )
        })
    }

    // Colors

    fn color(&self, range: Range<usize>, depth: usize) -> Result<Color, ColorError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(ColorError::TooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        let range = self.trim(range);
        let Some(token) = self.peek(range.start, range.end) else {
            return Err(ColorError::syntax(self.offset(range.start), "expected a color"));
        };
        let single = range.len() == 1;

        match token {
            CSSToken::Hash(value) if single => self.hex(value, self.offset(range.start)),
            CSSToken::AtKeyword(name) if single => Ok(Color::Defined { name: name.clone() }),
            CSSToken::Ident(name) if single => Ok(keyword(name)),
            CSSToken::Function(name) => {
                let close = self.scan_block(range.start, range.end)?;
                if close + 1 < range.end {
                    return Err(self.unexpected(close + 1, "after color"));
                }
                self.function(range.start, name, range.start + 1..close, depth)
            }
            _ if single => Err(ColorError::syntax(
                self.offset(range.start),
                format!("`{}` is not a color", self.text(range)),
            )),
            _ => Err(self.unexpected(range.start + 1, "after color")),
        }
    }

    /// [CSS Color Level 4 § 5.2 The RGB Hexadecimal Notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    fn hex(&self, value: &str, offset: usize) -> Result<Color, ColorError> {
        let invalid = || ColorError::syntax(offset, format!("invalid hex color `#{value}`"));
        let width = match value.len() {
            3 | 4 => 1,
            6 | 8 => 2,
            _ => return Err(invalid()),
        };

        // "The three-digit RGB notation (#RGB) is converted into six-digit form
        // (#RRGGBB) by replicating digits, not by adding zeros."
        let bytes: Option<Vec<u8>> = (0..value.len() / width)
            .map(|i| {
                let digits = value.get(i * width..(i + 1) * width)?;
                if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                    return None;
                }
                u8::from_str_radix(&digits.repeat(3 - width), 16).ok()
            })
            .collect();
        let bytes = bytes.ok_or_else(invalid)?;

        let channel = |i: usize| Expr::number(bytes.get(i).copied().map_or(0.0, f64::from));
        Ok(Color::Rgb(Rgb {
            red: channel(0),
            green: channel(1),
            blue: channel(2),
            alpha: Expr::number(bytes.get(3).map_or(1.0, |&a| f64::from(a) / 255.0)),
        }))
    }

    fn function(
        &self,
        index: usize,
        name: &str,
        inner: Range<usize>,
        depth: usize,
    ) -> Result<Color, ColorError> {
        let depth = depth + 1;
        match name.to_ascii_lowercase().as_str() {
            "rgb" | "rgba" => self.rgb(index, name, inner, depth),
            "hsl" | "hsla" => self.hsl(index, name, inner, depth),
            "mix" => {
                let [a, b, factor] = self.arguments(index, name, inner)?;
                Ok(Color::Mix {
                    a: Box::new(self.color(a, depth)?),
                    b: Box::new(self.color(b, depth)?),
                    factor: self.operand(factor, depth)?,
                })
            }
            "shade" => {
                let [color, factor] = self.arguments(index, name, inner)?;
                Ok(Color::Shade {
                    color: Box::new(self.color(color, depth)?),
                    factor: self.operand(factor, depth)?,
                })
            }
            "alpha" => {
                let [color, factor] = self.arguments(index, name, inner)?;
                Ok(Color::Alpha {
                    color: Box::new(self.color(color, depth)?),
                    factor: self.operand(factor, depth)?,
                })
            }
            "lighter" => {
                let [color] = self.arguments(index, name, inner)?;
                Ok(Color::Lighter {
                    color: Box::new(self.color(color, depth)?),
                })
            }
            "darker" => {
                let [color] = self.arguments(index, name, inner)?;
                Ok(Color::Darker {
                    color: Box::new(self.color(color, depth)?),
                })
            }
            _ => Err(ColorError::syntax(
                self.offset(index),
                format!("unknown color function `{name}()`"),
            )),
        }
    }

    /// The three channel ranges and the optional alpha range of an `rgb()` or
    /// `hsl()` body, in either the legacy comma syntax or the space syntax.
    ///
    /// [CSS Color Level 4 § 5.1](https://www.w3.org/TR/css-color-4/#rgb-functions)
    fn channel_arguments(
        &self,
        index: usize,
        name: &str,
        inner: Range<usize>,
    ) -> Result<([Range<usize>; 3], Option<Range<usize>>), ColorError> {
        let mut arguments = self.split_arguments(inner)?;
        let mut alpha = None;

        if arguments.len() == 1 {
            if let Some(only) = arguments.pop() {
                (arguments, alpha) = self.split_components(only)?;
            }
        } else {
            // The comma syntax has no `/ alpha` separator.
            for argument in &arguments {
                self.reject_slash(argument.clone())?;
            }
            if arguments.len() == 4 {
                alpha = arguments.pop();
            }
        }

        let found = arguments.len();
        let channels = <[Range<usize>; 3]>::try_from(arguments).map_err(|_| {
            ColorError::syntax(
                self.offset(index),
                format!("`{name}()` takes 3 channels and an optional alpha, found {found} channels"),
            )
        })?;
        Ok((channels, alpha))
    }

    /// Fails on a `/` outside any block; `calc(a / b)` is fine.
    fn reject_slash(&self, range: Range<usize>) -> Result<(), ColorError> {
        let mut index = range.start;
        while index < range.end {
            let token = self.token(index);
            if token.opens_block() {
                index = self.scan_block(index, range.end)?;
            } else if matches!(token, CSSToken::Delim('/')) {
                return Err(self.unexpected(index, "in comma separated color channels"));
            }
            index += 1;
        }
        Ok(())
    }

    /// `r g b / a`: components separated by whitespace, alpha after `/`.
    fn split_components(
        &self,
        range: Range<usize>,
    ) -> Result<(Vec<Range<usize>>, Option<Range<usize>>), ColorError> {
        let mut components = Vec::new();
        let mut after_slash: Option<usize> = None;
        let mut start: Option<usize> = None;

        let mut index = range.start;
        while index < range.end {
            let token = self.token(index);
            match token {
                CSSToken::Whitespace => {
                    if let Some(s) = start.take() {
                        components.push(s..index);
                    }
                }
                CSSToken::Delim('/') => {
                    if let Some(s) = start.take() {
                        components.push(s..index);
                    }
                    if after_slash.is_some() {
                        return Err(self.unexpected(index, "after alpha separator"));
                    }
                    after_slash = Some(components.len());
                }
                _ => {
                    let _ = start.get_or_insert(index);
                    if token.opens_block() {
                        index = self.scan_block(index, range.end)?;
                    }
                }
            }
            index += 1;
        }
        if let Some(s) = start {
            components.push(s..range.end);
        }

        let Some(split) = after_slash else {
            return Ok((components, None));
        };
        let alpha = components.split_off(split);
        match <[Range<usize>; 1]>::try_from(alpha) {
            Ok([alpha]) => Ok((components, Some(alpha))),
            Err(_) => Err(ColorError::syntax(
                self.offset(range.start),
                "expected exactly one alpha value after `/`",
            )),
        }
    }

    fn rgb(
        &self,
        index: usize,
        name: &str,
        inner: Range<usize>,
        depth: usize,
    ) -> Result<Color, ColorError> {
        let ([red, green, blue], alpha) = self.channel_arguments(index, name, inner)?;
        Ok(Color::Rgb(Rgb {
            red: self.rgb_channel(red, depth)?,
            green: self.rgb_channel(green, depth)?,
            blue: self.rgb_channel(blue, depth)?,
            alpha: self.alpha_value(alpha, depth)?,
        }))
    }

    fn hsl(
        &self,
        index: usize,
        name: &str,
        inner: Range<usize>,
        depth: usize,
    ) -> Result<Color, ColorError> {
        let ([hue, saturation, lightness], alpha) = self.channel_arguments(index, name, inner)?;
        Ok(Color::Hsl(Hsl {
            hue: self.hue(hue, depth)?,
            saturation: self.percentage(saturation, depth)?,
            lightness: self.percentage(lightness, depth)?,
            alpha: self.alpha_value(alpha, depth)?,
        }))
    }

    fn bad_unit(&self, range: Range<usize>, unit: &str) -> ColorError {
        ColorError::syntax(
            self.offset(range.start),
            format!("unit `{unit}` is not allowed in `{}`", self.text(range)),
        )
    }

    /// Channels are numbers on `0..=255`; `p%` means `p * 2.55`.
    fn rgb_channel(&self, range: Range<usize>, depth: usize) -> Result<Expr, ColorError> {
        match self.operand(range.clone(), depth)? {
            Expr::Quantity(q) if q.unit == "%" => Ok(Expr::number(q.value * 2.55)),
            Expr::Quantity(q) if !q.is_unitless() => Err(self.bad_unit(range, &q.unit)),
            expr => Ok(expr),
        }
    }

    /// [CSS Color Level 4 § 4.2](https://www.w3.org/TR/css-color-4/#typedef-alpha-value)
    /// "<alpha-value> = <number> | <percentage>", 1 when absent.
    fn alpha_value(&self, range: Option<Range<usize>>, depth: usize) -> Result<Expr, ColorError> {
        let Some(range) = range else {
            return Ok(Expr::number(1.0));
        };
        match self.operand(range.clone(), depth)? {
            Expr::Quantity(q) if q.unit == "%" => Ok(Expr::number(q.value / 100.0)),
            Expr::Quantity(q) if !q.is_unitless() => Err(self.bad_unit(range, &q.unit)),
            expr => Ok(expr),
        }
    }

    /// "<hue> = <number> | <angle>"
    fn hue(&self, range: Range<usize>, depth: usize) -> Result<Expr, ColorError> {
        match self.operand(range.clone(), depth)? {
            Expr::Quantity(q)
                if !matches!(q.unit.to_ascii_lowercase().as_str(), "" | "deg" | "grad" | "rad" | "turn") =>
            {
                Err(self.bad_unit(range, &q.unit))
            }
            expr => Ok(expr),
        }
    }

    /// Saturation and lightness; plain numbers are read as percentages.
    fn percentage(&self, range: Range<usize>, depth: usize) -> Result<Expr, ColorError> {
        match self.operand(range.clone(), depth)? {
            Expr::Quantity(q) if q.is_unitless() => Ok(Expr::percent(q.value)),
            Expr::Quantity(q) if q.unit != "%" => Err(self.bad_unit(range, &q.unit)),
            expr => Ok(expr),
        }
    }

    // Arithmetic

    /// [CSS Values Level 4 § 10.1](https://www.w3.org/TR/css-values-4/#calc-syntax)
    ///
    /// A numeric operand. Functions other than `calc()`, `min()`, `max()` and
    /// `clamp()` and parenthesized groups that are not arithmetic are kept as
    /// opaque text.
    fn operand(&self, range: Range<usize>, depth: usize) -> Result<Expr, ColorError> {
        let range = self.trim(range);
        if range.is_empty() {
            return Err(ColorError::syntax(self.offset(range.start), "expected a number"));
        }
        let mut pos = range.start;
        let expr = self.sum(&mut pos, range.end, depth)?;
        self.skip_whitespace(&mut pos, range.end);
        if pos < range.end {
            return Err(self.unexpected(pos, "in numeric value"));
        }
        Ok(expr)
    }

    /// "<calc-sum> = <calc-product> [ [ '+' | '-' ] <calc-product> ]*"
    fn sum(&self, pos: &mut usize, end: usize, depth: usize) -> Result<Expr, ColorError> {
        let mut lhs = self.product(pos, end, depth)?;
        loop {
            self.skip_whitespace(pos, end);
            lhs = match self.peek(*pos, end) {
                Some(CSSToken::Delim('+')) => {
                    *pos += 1;
                    Expr::add(lhs, self.product(pos, end, depth)?)
                }
                Some(CSSToken::Delim('-')) => {
                    *pos += 1;
                    Expr::sub(lhs, self.product(pos, end, depth)?)
                }
                // `4+4` tokenizes as two numbers, the second one signed.
                Some(
                    CSSToken::Number { signed: true, .. }
                    | CSSToken::Percentage { signed: true, .. }
                    | CSSToken::Dimension { signed: true, .. },
                ) => Expr::add(lhs, self.product(pos, end, depth)?),
                _ => break,
            };
        }
        Ok(lhs)
    }

    /// "<calc-product> = <calc-value> [ [ '*' | '/' ] <calc-value> ]*"
    fn product(&self, pos: &mut usize, end: usize, depth: usize) -> Result<Expr, ColorError> {
        let mut lhs = self.value(pos, end, depth)?;
        loop {
            self.skip_whitespace(pos, end);
            lhs = match self.peek(*pos, end) {
                Some(CSSToken::Delim('*')) => {
                    *pos += 1;
                    Expr::mul(lhs, self.value(pos, end, depth)?)
                }
                Some(CSSToken::Delim('/')) => {
                    *pos += 1;
                    Expr::div(lhs, self.value(pos, end, depth)?)
                }
                _ => break,
            };
        }
        Ok(lhs)
    }

    /// "<calc-value> = <number> | <dimension> | <percentage> | ( <calc-sum> )"
    fn value(&self, pos: &mut usize, end: usize, depth: usize) -> Result<Expr, ColorError> {
        if depth > MAX_NESTING_DEPTH {
            return Err(ColorError::TooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.skip_whitespace(pos, end);
        let index = *pos;
        let Some(token) = self.peek(index, end) else {
            return Err(ColorError::syntax(self.offset(index), "expected a number"));
        };
        *pos += 1;

        match token {
            CSSToken::Number { value, .. } => Ok(Expr::number(*value)),
            CSSToken::Percentage { value, .. } => Ok(Expr::percent(*value)),
            CSSToken::Dimension { value, unit, .. } => {
                Ok(Expr::Quantity(Quantity::new(*value, unit.clone())))
            }
            CSSToken::LeftParen => {
                let close = self.scan_block(index, end)?;
                *pos = close + 1;
                match self.operand(index + 1..close, depth + 1) {
                    Ok(expr) => Ok(expr),
                    Err(err) if err.is_syntax() => Ok(Expr::opaque(self.text(index..close + 1))),
                    Err(err) => Err(err),
                }
            }
            CSSToken::Function(name) => {
                let close = self.scan_block(index, end)?;
                *pos = close + 1;
                self.math_function(index, name, index + 1..close, depth + 1)
            }
            _ => Err(self.unexpected(index, "in numeric value")),
        }
    }

    fn math_function(
        &self,
        index: usize,
        name: &str,
        inner: Range<usize>,
        depth: usize,
    ) -> Result<Expr, ColorError> {
        if name.eq_ignore_ascii_case("calc") {
            return self.operand(inner, depth);
        }
        let Some(function) = MathFunction::from_name(name) else {
            return Ok(Expr::opaque(self.text(index..inner.end + 1)));
        };

        match function {
            MathFunction::Clamp => {
                let [min, value, max] = self.arguments(index, name, inner)?;
                Ok(Expr::clamp(
                    self.operand(min, depth)?,
                    self.operand(value, depth)?,
                    self.operand(max, depth)?,
                ))
            }
            MathFunction::Min | MathFunction::Max => {
                let arguments = self.split_arguments(inner)?;
                if arguments.is_empty() {
                    return Err(ColorError::syntax(
                        self.offset(index),
                        format!("`{name}()` needs at least one argument"),
                    ));
                }
                let operands = arguments
                    .into_iter()
                    .map(|range| self.operand(range, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(if function == MathFunction::Min {
                    Expr::min(operands)
                } else {
                    Expr::max(operands)
                })
            }
        }
    }
}

/// `currentColor`, `inherit` and the named colors.
fn keyword(name: &str) -> Color {
    if name.eq_ignore_ascii_case("currentcolor") {
        Color::Current
    } else if name.eq_ignore_ascii_case("inherit") {
        Color::Inherit
    } else {
        Color::Named {
            name: name.to_string(),
        }
    }
}
