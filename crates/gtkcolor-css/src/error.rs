//! Error types for color parsing, resolution and stylesheet conversion.

use thiserror::Error;

/// Maximum nesting of colors, blocks and arithmetic the parser and the
/// resolver accept before giving up with [`ColorError::TooDeep`].
pub const MAX_NESTING_DEPTH: usize = 64;

/// Maximum number of arithmetic nodes in one resolved color before the
/// resolver gives up with [`ColorError::TooLarge`].
pub const MAX_EXPRESSION_SIZE: usize = 65_536;

/// Failure of a single parse, resolve or naming call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Malformed expression or document text.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax {
        /// Byte offset into the parsed text.
        offset: usize,
        /// What was wrong.
        message: String,
    },

    /// An operator received an operand in a color model it cannot combine.
    #[error("unsupported color model: {0}")]
    UnsupportedColorModel(String),

    /// The identifier cannot be turned into a custom property name.
    #[error("cannot convert {0:?} to a custom property name")]
    InvalidIdentifier(String),

    /// The input nests deeper than [`MAX_NESTING_DEPTH`].
    #[error("expression nests deeper than {limit} levels")]
    TooDeep {
        /// The limit that was exceeded.
        limit: usize,
    },

    /// A resolved color needs more than [`MAX_EXPRESSION_SIZE`] arithmetic
    /// nodes, as nested `mix()` of symbolic colors quickly does.
    #[error("resolved color exceeds {limit} arithmetic nodes")]
    TooLarge {
        /// The limit that was exceeded.
        limit: usize,
    },
}

impl ColorError {
    /// Shorthand for a [`ColorError::Syntax`] error.
    pub fn syntax(offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            offset,
            message: message.into(),
        }
    }

    /// Returns true for [`ColorError::Syntax`].
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Self::Syntax { .. })
    }
}

/// Failure while converting a whole stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// A `@define-color` rule could not be turned into custom properties.
    #[error("@define-color {name}: {source}")]
    Definition {
        /// The color name as written in the stylesheet.
        name: String,
        /// The underlying failure.
        #[source]
        source: ColorError,
    },

    /// A `@define-color` rule without a name or without a value.
    #[error("malformed @define-color rule at byte {offset}")]
    MalformedDefinition {
        /// Byte offset of the rule.
        offset: usize,
    },

    /// A declaration value could not be rewritten.
    #[error("declaration {property}: {source}")]
    Declaration {
        /// The property name.
        property: String,
        /// The underlying failure.
        #[source]
        source: ColorError,
    },
}
