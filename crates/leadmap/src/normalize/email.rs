//! Email address formatting.

use once_cell::sync::Lazy;
use regex::Regex;

use super::is_missing;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]{2,}$").unwrap());

/// Lowercase and trim an email address.
///
/// Returns an empty string when the input is missing or not shaped like
/// an address.
pub fn format_email(raw: &str) -> String {
    if is_missing(raw) {
        return String::new();
    }

    let normalized = raw.trim().to_lowercase();
    if EMAIL_RE.is_match(&normalized) {
        normalized
    } else {
        String::new()
    }
}
