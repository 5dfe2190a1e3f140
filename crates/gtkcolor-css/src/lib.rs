//! GTK color expressions translated into standard CSS.
//!
//! # Scope
//!
//! This crate implements:
//! - **CSS Tokenizer** ([§ 4 Tokenization](https://www.w3.org/TR/css-syntax-3/#tokenization))
//!   - All token types, each with its byte span in the input
//!   - Comment handling
//!   - Sign tracking on numeric tokens
//!
//! - **CSS Parser** ([§ 5 Parsing](https://www.w3.org/TR/css-syntax-3/#parsing))
//!   - Stylesheet parsing into style rules and at-rules
//!   - Declaration spans, so values can be rewritten in place
//!
//! - **Color Expressions**
//!   - Hex, `rgb()`, `rgba()`, `hsl()`, `hsla()` and color keywords
//!     ([CSS Color Level 4](https://www.w3.org/TR/css-color-4/))
//!   - GTK composites: `mix()`, `shade()`, `alpha()`, `lighter()`, `darker()`
//!   - `@name` references to `@define-color` rules
//!   - `calc()`, `min()`, `max()` and `clamp()` arithmetic
//!     ([CSS Values Level 4 § 10](https://www.w3.org/TR/css-values-4/#math))
//!
//! - **Resolution**
//!   - Composites folded into `rgb()`/`hsl()` expressions, symbolically when
//!     an operand is only known at run time
//!   - Branchless RGB to HSL conversion for run-time values
//!
//! - **Stylesheet Conversion**
//!   - `@define-color` rules become custom properties on a root rule
//!   - Declaration values are rewritten, all other text is kept verbatim
//!
//! # Example
//!
//! ```
//! use gtkcolor_css::{ColorError, parse_color_expression, resolve, serialize};
//!
//! let color = parse_color_expression("shade(#ff0000, 0.5)")?;
//! assert_eq!(serialize(&resolve(&color)?), "hsl(0,50%,25%)");
//! # Ok::<(), ColorError>(())
//! ```

/// Color expression model, parser, resolver and serializer.
pub mod color;
/// Color substitution inside declaration values.
pub mod document;
/// Error types.
pub mod error;
/// CSS stylesheet parser.
pub mod parser;
/// Whole-stylesheet conversion.
pub mod stylesheet;
/// CSS tokenizer.
pub mod tokenizer;

pub use color::expr::{Expr, Quantity};
pub use color::grammar::parse_color_expression;
pub use color::hsl::rgb_to_hsl;
pub use color::named::{CssNamedColors, NamedColorLookup, NamedRgba};
pub use color::names::{ChannelNames, names_for};
pub use color::resolve::{Resolver, Warning, resolve};
pub use color::serialize::serialize;
pub use color::{CanonicalColor, Color, Hsl, Rgb};
pub use document::{DocumentParse, parse_document, rewrite, rewrite_with};
pub use error::{ColorError, ConvertError, MAX_EXPRESSION_SIZE, MAX_NESTING_DEPTH};
pub use stylesheet::{Conversion, ConvertOptions, Definition, convert_stylesheet};
pub use tokenizer::{CSSToken, CSSTokenizer, SpannedToken};
