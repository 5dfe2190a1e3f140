//! Custom property names for defined colors.

use serde::Serialize;

use crate::error::ColorError;

/// The four custom properties `@define-color name ...` expands into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelNames {
    /// `--name-r`
    pub red: String,
    /// `--name-g`
    pub green: String,
    /// `--name-b`
    pub blue: String,
    /// `--name-a`
    pub alpha: String,
}

impl ChannelNames {
    /// The property names in red, green, blue, alpha order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.red.as_str(),
            self.green.as_str(),
            self.blue.as_str(),
            self.alpha.as_str(),
        ]
        .into_iter()
    }

    /// `var()` references to the properties, in the same order.
    pub fn references(&self) -> impl Iterator<Item = String> {
        self.iter().map(|name| format!("var({name})"))
    }
}

/// Derive the channel property names for a color identifier.
///
/// The identifier is lowercased, every `@` is removed, surrounding whitespace
/// is trimmed and `_` becomes `-`. `"Dark_2"` yields `--dark-2-r`,
/// `--dark-2-g`, `--dark-2-b` and `--dark-2-a`.
///
/// # Errors
///
/// [`ColorError::InvalidIdentifier`] when nothing is left after sanitizing or
/// the result still contains whitespace.
pub fn names_for(identifier: &str) -> Result<ChannelNames, ColorError> {
    let lowered = identifier.to_lowercase().replace('@', "");
    let core = lowered.trim().replace('_', "-");
    if core.is_empty() || core.chars().any(char::is_whitespace) {
        return Err(ColorError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(ChannelNames {
        red: format!("--{core}-r"),
        green: format!("--{core}-g"),
        blue: format!("--{core}-b"),
        alpha: format!("--{core}-a"),
    })
}
