use once_cell::sync::Lazy;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

/// Characters kept verbatim in a fragment id besides ASCII letters, digits and
/// `_`. Covers the punctuation and accented letters used by the supported
/// locales (German, French, Italian, Spanish, Portuguese).
const EXTRA_ID_CHARS: &str = "ÜÄÖäöü,!.$£¨*ç()§+«»€°´‘\u{2013}\u{2014}ô’àÀèÈìÌòÒùÙáÁéÉíÍóÓúÚýÝâÂêÊîÎôÔûÛãÃñÑõÕÇç¢œŒÆæß¿";

/// Everything `encodeURIComponent` escapes: all but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// The capture ends at any line terminator: \n, \r, U+2028 or U+2029.
static NUMERIC_ORDERING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9]+\.\s*([^\n\r\x{2028}\x{2029}]*)").expect("numeric ordering regex")
});
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static HYPHEN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("hyphen regex"));

pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Drops a single leading `N.` ordinal from a heading, e.g. `1. Intro` -> `Intro`.
///
/// Only the first `digits.` group goes, so `1.2 Scope` becomes `2 Scope`.
/// The capture stops at the first line break.
pub fn strip_numeric_ordering(text: &str) -> String {
    match NUMERIC_ORDERING.captures(text) {
        Some(captures) => captures
            .get(1)
            .map_or("", |m| m.as_str())
            .trim()
            .to_owned(),
        None => text.trim().to_owned(),
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || EXTRA_ID_CHARS.contains(c)
}

/// Human-readable slug for a heading, before percent-encoding.
pub fn anchor_slug(text: &str) -> String {
    let replaced = decode_entities(text)
        .chars()
        .map(|c| if is_id_char(c) { c } else { '-' })
        .collect::<String>();
    let replaced = WHITESPACE_RUN.replace_all(&replaced, "-");
    let collapsed = HYPHEN_RUN.replace_all(&replaced, "-");

    collapsed.trim_matches('-').to_lowercase()
}

/// URL-safe fragment id for a heading.
///
/// Identical heading texts produce identical ids; callers that need unique
/// fragments must disambiguate themselves.
pub fn anchor_id(text: &str) -> String {
    utf8_percent_encode(&anchor_slug(text), FRAGMENT).to_string()
}
