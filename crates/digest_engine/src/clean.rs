use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s.,!?-]").expect("punctuation regex is valid"));

/// Normalizes page text: whitespace runs become one space, then everything but
/// word characters, whitespace and `. , ! ? -` is dropped, then the result is trimmed.
///
/// Absent or empty input yields an empty string.
pub fn clean_text(text: Option<&str>) -> String {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return String::new();
    };
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    let filtered = DISALLOWED.replace_all(&collapsed, "");
    filtered.trim().to_string()
}

/// Collapses whitespace runs to single spaces and trims; used for table cells.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
