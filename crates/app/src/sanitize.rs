//! Free-text sanitization applied to request payloads before validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches HTML tags.
static HTML_TAG_PATTERN: Lazy<Regex> = Lazy::new(|| compile(r"<[^>]*>"));

/// Matches control characters other than newline and tab.
static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| compile(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]"));

#[expect(clippy::expect_used, reason = "patterns are string literals")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("sanitizer pattern should compile")
}

/// A payload whose string fields can be cleaned in one pass.
pub trait Sanitize {
    /// Return the payload with every string field sanitized.
    #[must_use]
    fn sanitize(self) -> Self;
}

/// Trim, drop control characters and strip HTML tags.
#[must_use]
pub fn sanitize_text(value: &str) -> String {
    let no_control = CONTROL_CHARS.replace_all(value.trim(), "");
    let no_html = HTML_TAG_PATTERN.replace_all(&no_control, "");

    no_html.trim().to_string()
}

/// Sanitize an optional field, keeping `None` as `None`.
#[must_use]
pub fn sanitize_optional(value: Option<String>) -> Option<String> {
    value.map(|value| sanitize_text(&value))
}

/// Sanitize every entry of an optional list.
#[must_use]
pub fn sanitize_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    values.map(|values| values.iter().map(|value| sanitize_text(value)).collect())
}
