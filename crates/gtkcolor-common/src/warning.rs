//! Translator warnings with colored terminal output.
//!
//! Provides deduplication so a stylesheet that mixes the same dynamic color
//! a hundred times reports it once.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Record `message` for `component` and report whether it is new.
fn first_time(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key)
}

/// Print a warning to stderr once per unique message.
///
/// Returns `true` when the warning was printed.
///
/// # Example
/// ```
/// use gtkcolor_common::warning::warn_once;
///
/// let _ = warn_once("doc-test", "mix() received currentColor");
/// assert!(!warn_once("doc-test", "mix() received currentColor"));
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let fresh = first_time(component, message);
    if fresh {
        eprintln!("{}", format!("[gtkcolor {component}] ⚠ {message}").yellow());
    }
    fresh
}

/// Forget every recorded warning (call before converting another input)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_is_deduplicated_per_component() {
        assert!(first_time("unit-a", "same message"));
        assert!(!first_time("unit-a", "same message"));
        assert!(first_time("unit-b", "same message"));
    }
}
