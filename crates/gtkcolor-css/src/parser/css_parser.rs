//! CSS Parser per [§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing).
//!
//! "The input to the parsing stage is a stream of tokens from the tokenization stage."
//!
//! The parser does not build component values. It only locates rules and
//! declarations and records the byte spans they cover, so callers can edit
//! the stylesheet text in place and leave everything else byte-identical.

use core::ops::Range;

use crate::tokenizer::{CSSToken, SpannedToken};

/// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
///
/// A CSS declaration (e.g., `color: red`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The property name.
    pub name: String,
    /// Bytes of the value, without surrounding whitespace and without a
    /// trailing `!important`. Empty for an empty value.
    pub value: Range<usize>,
    /// Whether the declaration has `!important`.
    pub important: bool,
}

/// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
///
/// A CSS style rule (selector + declarations).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Bytes of the selector list.
    pub prelude: Range<usize>,
    /// The declarations in this rule block.
    pub declarations: Vec<Declaration>,
}

/// The block of an at-rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtRuleBlock {
    /// Nested rules, as in `@media` or `@supports`.
    Rules(Vec<Rule>),
    /// Declarations, as in `@font-face` or `@page`.
    Declarations(Vec<Declaration>),
}

/// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
///
/// A CSS at-rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    /// The at-keyword name (without the `@`).
    pub name: String,
    /// Bytes of the prelude, trimmed.
    pub prelude: Range<usize>,
    /// The optional block contents.
    pub block: Option<AtRuleBlock>,
    /// Bytes of the whole rule, from `@` through the final `;` or `}`.
    pub span: Range<usize>,
}

/// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
///
/// A CSS rule (either a style rule or an at-rule).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// A style rule (qualified rule).
    Style(StyleRule),
    /// An at-rule.
    At(AtRule),
}

/// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
///
/// A parsed CSS stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// The list of rules in the stylesheet.
    pub rules: Vec<Rule>,
}

/// CSS parser
pub struct CSSParser {
    tokens: Vec<SpannedToken>,
    position: usize,
}

impl CSSParser {
    /// Create a new parser from a list of tokens.
    #[must_use]
    pub const fn new(tokens: Vec<SpannedToken>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// "To parse a stylesheet from input..."
    pub fn parse_stylesheet(&mut self) -> Stylesheet {
        // "Consume a list of rules from input, with the top-level flag set."
        let rules = self.consume_list_of_rules(true);
        Stylesheet { rules }
    }

    /// [§ 5.3.6 Parse a list of declarations](https://www.w3.org/TR/css-syntax-3/#parse-list-of-declarations)
    ///
    /// Parse declarations from a style attribute or similar.
    pub fn parse_declaration_list(&mut self) -> Vec<Declaration> {
        self.consume_list_of_declarations()
    }

    /// [§ 5.4.1 Consume a list of rules](https://www.w3.org/TR/css-syntax-3/#consume-list-of-rules)
    ///
    /// Nested lists stop at the `}` that closes their block.
    fn consume_list_of_rules(&mut self, top_level: bool) -> Vec<Rule> {
        // "Create an initially empty list of rules."
        let mut rules = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace) => {
                    let _ = self.consume();
                }

                // "<EOF-token>"
                // "Return the list of rules."
                None | Some(CSSToken::EOF) => return rules,

                Some(CSSToken::RightBrace) if !top_level => return rules,

                // "<CDO-token>" or "<CDC-token>"
                Some(CSSToken::CDO | CSSToken::CDC) if top_level => {
                    // "Do nothing."
                    let _ = self.consume();
                }

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule, and append
                // the returned value to the list of rules."
                Some(CSSToken::AtKeyword(_)) => {
                    if let Some(at_rule) = self.consume_at_rule() {
                        rules.push(Rule::At(at_rule));
                    }
                }

                // "anything else"
                // "Reconsume the current input token. Consume a qualified rule. If
                // anything is returned, append it to the list of rules."
                Some(_) => {
                    if let Some(rule) = self.consume_qualified_rule() {
                        rules.push(Rule::Style(rule));
                    }
                }
            }
        }
    }

    /// [§ 5.4.2 Consume an at-rule](https://www.w3.org/TR/css-syntax-3/#consume-at-rule)
    fn consume_at_rule(&mut self) -> Option<AtRule> {
        let start = self.offset();
        // "Consume the next input token."
        let name = match self.consume() {
            Some(CSSToken::AtKeyword(name)) => name.clone(),
            _ => return None,
        };
        let prelude_start = self.position;

        loop {
            match self.peek() {
                // "<semicolon-token>"
                // "Return the at-rule."
                Some(CSSToken::Semicolon) => {
                    let prelude = self.trimmed_span(prelude_start, self.position);
                    let _ = self.consume();
                    return Some(AtRule {
                        name,
                        prelude,
                        block: None,
                        span: start..self.previous_end(),
                    });
                }

                // "<EOF-token>"
                // "This is a parse error. Return the at-rule."
                None | Some(CSSToken::EOF) => {
                    let prelude = self.trimmed_span(prelude_start, self.position);
                    return Some(AtRule {
                        name,
                        prelude,
                        block: None,
                        span: start..self.previous_end(),
                    });
                }

                // "<{-token>"
                // "Consume a simple block and assign it to the at-rule's block.
                // Return the at-rule."
                Some(CSSToken::LeftBrace) => {
                    let prelude = self.trimmed_span(prelude_start, self.position);
                    let _ = self.consume();
                    let block = if has_rule_list(&name) {
                        AtRuleBlock::Rules(self.consume_list_of_rules(false))
                    } else {
                        AtRuleBlock::Declarations(self.consume_list_of_declarations())
                    };
                    self.consume_block_end();
                    return Some(AtRule {
                        name,
                        prelude,
                        block: Some(block),
                        span: start..self.previous_end(),
                    });
                }

                // A `}` closing an enclosing block ends the rule.
                Some(CSSToken::RightBrace) => {
                    let prelude = self.trimmed_span(prelude_start, self.position);
                    return Some(AtRule {
                        name,
                        prelude,
                        block: None,
                        span: start..self.previous_end(),
                    });
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the at-rule's prelude."
                Some(_) => self.consume_component_value(),
            }
        }
    }

    /// [§ 5.4.3 Consume a qualified rule](https://www.w3.org/TR/css-syntax-3/#consume-qualified-rule)
    fn consume_qualified_rule(&mut self) -> Option<StyleRule> {
        let prelude_start = self.position;

        loop {
            match self.peek() {
                // "<EOF-token>"
                // "This is a parse error. Return nothing."
                None | Some(CSSToken::EOF) => return None,

                // "<{-token>"
                // "Consume a simple block and assign it to the qualified rule's block.
                // Return the qualified rule."
                Some(CSSToken::LeftBrace) => {
                    let prelude = self.trimmed_span(prelude_start, self.position);
                    let _ = self.consume(); // {
                    let declarations = self.consume_style_block_contents();
                    self.consume_block_end();
                    return Some(StyleRule {
                        prelude,
                        declarations,
                    });
                }

                // A `}` ends the rule without a block. A stray one at the
                // start is dropped.
                Some(CSSToken::RightBrace) => {
                    if self.position == prelude_start {
                        let _ = self.consume();
                    }
                    return None;
                }

                // "anything else"
                // "Reconsume the current input token. Consume a component value.
                // Append the returned value to the qualified rule's prelude."
                Some(_) => self.consume_component_value(),
            }
        }
    }

    /// [§ 5.4.4 Consume a style block's contents](https://www.w3.org/TR/css-syntax-3/#consume-style-block)
    ///
    /// "This algorithm consumes the content of a style block..."
    fn consume_style_block_contents(&mut self) -> Vec<Declaration> {
        self.consume_list_of_declarations()
    }

    /// [§ 5.4.5 Consume a list of declarations](https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations)
    fn consume_list_of_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                // "<whitespace-token>" or "<semicolon-token>"
                // "Do nothing."
                Some(CSSToken::Whitespace | CSSToken::Semicolon) => {
                    let _ = self.consume();
                }

                // "<EOF-token>" or "<}-token>"
                // "Return the list of declarations."
                None | Some(CSSToken::EOF | CSSToken::RightBrace) => return declarations,

                // "<at-keyword-token>"
                // "Reconsume the current input token. Consume an at-rule. Append the
                // returned rule to the list of declarations."
                Some(CSSToken::AtKeyword(_)) => {
                    // Nested at-rules are not rewritten.
                    let _ = self.consume_at_rule();
                }

                // "<ident-token>"
                // "Consume a declaration. If anything was returned, append it to
                // the list of declarations."
                Some(CSSToken::Ident(_)) => {
                    if let Some(decl) = self.consume_declaration() {
                        declarations.push(decl);
                    }
                }

                // "anything else"
                // "This is a parse error. Reconsume the current input token. As long as
                // the next input token is anything other than a <semicolon-token> or
                // <EOF-token>, consume a component value and throw away the returned value."
                Some(_) => {
                    while !matches!(
                        self.peek(),
                        None | Some(CSSToken::Semicolon | CSSToken::RightBrace | CSSToken::EOF)
                    ) {
                        self.consume_component_value();
                    }
                }
            }
        }
    }

    /// [§ 5.4.6 Consume a declaration](https://www.w3.org/TR/css-syntax-3/#consume-declaration)
    fn consume_declaration(&mut self) -> Option<Declaration> {
        // "Consume the next input token."
        let name = match self.consume() {
            Some(CSSToken::Ident(name)) => name.clone(),
            _ => return None,
        };

        // "While the next input token is a <whitespace-token>, consume the next input token."
        self.skip_whitespace();

        // "If the next input token is anything other than a <colon-token>, this is a parse error.
        // Return nothing."
        if self.peek() != Some(&CSSToken::Colon) {
            // Skip the rest of the invalid declaration.
            while !matches!(
                self.peek(),
                None | Some(CSSToken::Semicolon | CSSToken::RightBrace | CSSToken::EOF)
            ) {
                self.consume_component_value();
            }
            return None;
        }
        let _ = self.consume(); // :

        // "While the next input token is a <whitespace-token>, consume the next input token."
        self.skip_whitespace();

        // "As long as the next input token is anything other than an <EOF-token>, consume a
        // component value and append it to the declaration's value."
        let mut components = Vec::new();
        while !matches!(
            self.peek(),
            None | Some(CSSToken::EOF | CSSToken::Semicolon | CSSToken::RightBrace)
        ) {
            let start = self.position;
            self.consume_component_value();
            components.push(start);
        }

        // Check for !important
        let important = self.check_important(&components);

        // Remove trailing whitespace and !important from value
        let components = self.trim_important(components);

        let value = match (components.first(), components.last()) {
            (Some(&first), Some(&last)) => {
                // The last component runs up to the next component or the terminator.
                let end = self.component_end(last);
                self.span_of(first)..end
            }
            _ => self.offset()..self.offset(),
        };

        Some(Declaration {
            name,
            value,
            important,
        })
    }

    /// [§ 5.4.8 Consume a component value](https://www.w3.org/TR/css-syntax-3/#consume-component-value)
    ///
    /// Skips one preserved token, or a whole function or simple block.
    fn consume_component_value(&mut self) {
        let Some(token) = self.peek() else {
            return;
        };
        if token.is_eof() {
            return;
        }
        let ending_token = token.closing();
        let _ = self.consume();

        let Some(ending_token) = ending_token else {
            return;
        };
        loop {
            match self.peek() {
                Some(token) if *token == ending_token => {
                    let _ = self.consume();
                    return;
                }
                None | Some(CSSToken::EOF) => return,
                // A mismatched closer is kept as a preserved token.
                Some(_) => self.consume_component_value(),
            }
        }
    }

    /// Consume the `}` that ends a block, if present.
    fn consume_block_end(&mut self) {
        if self.peek() == Some(&CSSToken::RightBrace) {
            let _ = self.consume();
        }
    }

    /// Check if the value ends with !important.
    ///
    /// [§ 6.4.2 Important declarations](https://www.w3.org/TR/css-cascade-4/#importance)
    ///
    /// "A declaration is important if it has a !important annotation, i.e.
    /// if the last two (non-whitespace, non-comment) tokens in its value are
    /// a <delim-token> with the value "!" followed by an <ident-token> with
    /// a value that is an ASCII case-insensitive match for "important"."
    fn check_important(&self, components: &[usize]) -> bool {
        let mut iter = components
            .iter()
            .rev()
            .map(|&index| self.token_at(index))
            .filter(|token| !token.is_whitespace());

        match iter.next() {
            Some(CSSToken::Ident(s)) if s.eq_ignore_ascii_case("important") => {}
            _ => return false,
        }
        matches!(iter.next(), Some(CSSToken::Delim('!')))
    }

    /// Remove trailing whitespace and !important from a declaration value.
    ///
    /// STEP 1: Remove trailing whitespace.
    /// STEP 2: Remove "important" ident token.
    /// STEP 3: Remove whitespace between ! and important.
    /// STEP 4: Remove "!" delim token.
    /// STEP 5: Remove any remaining trailing whitespace.
    fn trim_important(&self, mut components: Vec<usize>) -> Vec<usize> {
        // STEP 1: Remove trailing whitespace
        while self.last_is(&components, CSSToken::is_whitespace) {
            let _ = components.pop();
        }

        // STEP 2: Check and remove "important"
        if self.last_is(&components, |t| {
            matches!(t, CSSToken::Ident(s) if s.eq_ignore_ascii_case("important"))
        }) {
            let _ = components.pop();

            // STEP 3: Remove whitespace between ! and important
            while self.last_is(&components, CSSToken::is_whitespace) {
                let _ = components.pop();
            }

            // STEP 4: Remove !
            if self.last_is(&components, |t| matches!(t, CSSToken::Delim('!'))) {
                let _ = components.pop();
            }
        }

        // STEP 5: Remove trailing whitespace again
        while self.last_is(&components, CSSToken::is_whitespace) {
            let _ = components.pop();
        }

        components
    }

    fn last_is(&self, components: &[usize], test: impl Fn(&CSSToken) -> bool) -> bool {
        components
            .last()
            .is_some_and(|&index| test(self.token_at(index)))
    }

    /// Byte offset just past the component value starting at token `index`.
    fn component_end(&self, index: usize) -> usize {
        let ending_token = self.token_at(index).closing();
        let Some(ending_token) = ending_token else {
            return self.tokens.get(index).map_or(0, |t| t.span.end);
        };

        let mut depth = Vec::from([ending_token]);
        for token in self.tokens.iter().skip(index + 1) {
            if token.token.is_eof() {
                return token.span.start;
            }
            if let Some(closer) = token.token.closing() {
                depth.push(closer);
            } else if depth.last() == Some(&token.token) {
                let _ = depth.pop();
                if depth.is_empty() {
                    return token.span.end;
                }
            }
        }
        self.tokens.last().map_or(0, |t| t.span.end)
    }

    /// Bytes covered by tokens `start..end`, without leading or trailing whitespace.
    fn trimmed_span(&self, mut start: usize, mut end: usize) -> Range<usize> {
        while start < end && self.token_at(start).is_whitespace() {
            start += 1;
        }
        while end > start && self.token_at(end - 1).is_whitespace() {
            end -= 1;
        }
        if start == end {
            let offset = self.span_of(start);
            return offset..offset;
        }
        self.span_of(start)..self.tokens.get(end - 1).map_or(0, |t| t.span.end)
    }

    fn skip_whitespace(&mut self) {
        while self.peek() == Some(&CSSToken::Whitespace) {
            let _ = self.consume();
        }
    }

    fn token_at(&self, index: usize) -> &CSSToken {
        self.tokens.get(index).map_or(&EOF, |t| &t.token)
    }

    fn span_of(&self, index: usize) -> usize {
        self.tokens.get(index).map_or(0, |t| t.span.start)
    }

    /// Byte offset of the next token.
    fn offset(&self) -> usize {
        self.span_of(self.position)
    }

    /// Byte offset just past the last consumed token.
    fn previous_end(&self) -> usize {
        self.position
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .map_or(0, |t| t.span.end)
    }

    fn consume(&mut self) -> Option<&CSSToken> {
        let token = &self.tokens.get(self.position)?.token;
        self.position += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&CSSToken> {
        self.tokens.get(self.position).map(|t| &t.token)
    }
}

static EOF: CSSToken = CSSToken::EOF;

/// At-rules whose block holds rules rather than declarations.
fn has_rule_list(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    matches!(
        name.as_str(),
        "media" | "supports" | "layer" | "container" | "document" | "scope" | "starting-style"
    ) || name.ends_with("keyframes")
}
