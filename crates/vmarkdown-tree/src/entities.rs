//! HTML character reference decoding.
//!
//! The XML reader reports `&name;` references as separate events. Named HTML
//! entities that XML does not know (`&rarr;`, `&nbsp;`, ...) are resolved
//! here, together with numeric references.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Ampersand, optionally followed by a complete character reference.
static AMPERSAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*;|#[0-9]+;|#[xX][0-9a-fA-F]+;)?")
        .expect("invalid ampersand regex")
});

/// Escape every `&` that does not start a character reference.
///
/// HTML tolerates bare ampersands in text; XML does not.
pub(crate) fn escape_bare_ampersands(html: &str) -> Cow<'_, str> {
    AMPERSAND.replace_all(html, |caps: &Captures<'_>| {
        if caps.get(1).is_some() {
            caps[0].to_owned()
        } else {
            "&amp;".to_owned()
        }
    })
}

/// Resolve the body of a character reference (without `&` and `;`).
///
/// Unknown references are returned verbatim, including the delimiters.
pub(crate) fn decode_entity(entity: &str) -> String {
    if let Some(numeric) = entity.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => numeric.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map_or_else(|| format!("&{entity};"), String::from);
    }

    named_entity(entity).map_or_else(|| format!("&{entity};"), String::from)
}

/// Decode every character reference in a string.
pub(crate) fn decode_entities(text: &str) -> Cow<'_, str> {
    AMPERSAND.replace_all(text, |caps: &Captures<'_>| match caps.get(1) {
        Some(body) => decode_entity(body.as_str().trim_end_matches(';')),
        None => "&".to_owned(),
    })
}

fn named_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        // XML
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",

        // Punctuation
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "middot" => "\u{00b7}",

        // Arrows
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "harr" => "\u{2194}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "rArr" => "\u{21d2}",
        "lArr" => "\u{21d0}",

        // Math
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "deg" => "\u{00b0}",

        // Symbols
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "dagger" => "\u{2020}",
        "Dagger" => "\u{2021}",

        _ => return None,
    })
}
