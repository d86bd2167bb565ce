//! Whitespace normalization for free-form text pulled out of the form.

use std::sync::LazyLock;

use regex::Regex;

static RE_INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid inline space regex"));
static RE_AFTER_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s+").expect("valid after-newline regex"));
static RE_BEFORE_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\n").expect("valid before-newline regex"));
static RE_LOCATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@Location:.*\n?").expect("valid location marker regex"));

/// Normalize whitespace in scraped text.
///
/// Runs of spaces/tabs collapse to a single space, whitespace directly after
/// or before a newline is dropped (which also folds blank lines), and the
/// result is trimmed.
pub fn normalize_text(text: &str) -> String {
    let collapsed = RE_INLINE_SPACE.replace_all(text, " ");
    let after = RE_AFTER_NEWLINE.replace_all(&collapsed, "\n");
    let before = RE_BEFORE_NEWLINE.replace_all(&after, "\n");
    before.trim().to_string()
}

/// Remove the first `@Location:` marker line the scheduler embeds in the
/// reason-for-visit text.
pub fn strip_location_marker(text: &str) -> String {
    RE_LOCATION_MARKER.replacen(text, 1, "").into_owned()
}
