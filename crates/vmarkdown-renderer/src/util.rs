//! Shared utility functions for markdown rendering.

use pulldown_cmark::HeadingLevel;

/// Convert heading level enum to number (1-6).
#[must_use]
pub(crate) fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Extract the language from a fence info string.
///
/// Only the first word counts: `python title="x"` declares `python`.
#[must_use]
pub(crate) fn fence_language(info: &str) -> Option<String> {
    info.split_whitespace().next().map(str::to_owned)
}
