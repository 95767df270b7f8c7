//! Phone number cleaning.

use super::is_missing;

/// Minimum digits for a usable phone number (8 covers Brazilian
/// landlines without an area code).
const MIN_DIGITS: usize = 8;

/// Upper bound: anything longer than E.164 max is line noise.
const MAX_DIGITS: usize = 15;

/// Strip formatting from a phone number.
///
/// Keeps an optional leading `+` and the digits; drops spaces, dots,
/// dashes, parentheses, and extension markers. Returns an empty string
/// for missing or unusable input (too few or too many digits, or
/// letters mixed in).
pub fn clean_phone(raw: &str) -> String {
    if is_missing(raw) {
        return String::new();
    }

    let trimmed = raw.trim();
    let plus = trimmed.starts_with('+');

    let mut digits = String::new();
    for c in trimmed.chars().skip(if plus { 1 } else { 0 }) {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if matches!(c, ' ' | '.' | '-' | '(' | ')' | '/') {
            continue;
        } else {
            // Letters or anything else: not a phone number.
            return String::new();
        }
    }

    if digits.len() < MIN_DIGITS || digits.len() > MAX_DIGITS {
        return String::new();
    }

    if plus {
        format!("+{}", digits)
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_formatting() {
        assert_eq!(clean_phone("(11) 98765-4321"), "11987654321");
        assert_eq!(clean_phone("11 3456.7890"), "1134567890");
    }

    #[test]
    fn test_keeps_leading_plus() {
        assert_eq!(clean_phone("+55 11 98765-4321"), "+5511987654321");
    }

    #[test]
    fn test_too_short_is_empty() {
        assert_eq!(clean_phone("1234567"), "");
        assert_eq!(clean_phone("42"), "");
    }

    #[test]
    fn test_too_long_is_empty() {
        assert_eq!(clean_phone("1234567890123456"), "");
    }

    #[test]
    fn test_missing_and_garbage() {
        assert_eq!(clean_phone(""), "");
        assert_eq!(clean_phone("NaN"), "");
        assert_eq!(clean_phone("n/a"), "");
        assert_eq!(clean_phone("call me maybe"), "");
        assert_eq!(clean_phone("user@example.com"), "");
    }
}
