//! Person/display name formatting.

use super::is_missing;

/// Portuguese connectives that stay lowercase inside a name.
const CONNECTIVES: &[&str] = &["da", "de", "do", "das", "dos", "e"];

/// Title-case a person's name.
///
/// "joão DA silva" becomes "João da Silva". Connectives keep their
/// lowercase form except in first position. Returns an empty string for
/// missing input.
pub fn format_name(raw: &str) -> String {
    if is_missing(raw) {
        return String::new();
    }

    raw.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i > 0 && CONNECTIVES.contains(&lower.as_str()) {
                lower
            } else {
                capitalize(&lower)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a display name, synthesizing a fallback when absent.
///
/// Records must always carry a non-empty display name, so a blank or
/// sentinel source yields a deterministic placeholder built from the
/// record id.
pub fn display_name(raw: &str, record_id: usize) -> String {
    let formatted = format_name(raw);
    if formatted.is_empty() {
        format!("Lead {}", record_id)
    } else {
        formatted
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(format_name("maria souza"), "Maria Souza");
        assert_eq!(format_name("JOÃO DA SILVA"), "João da Silva");
    }

    #[test]
    fn test_connective_in_first_position() {
        assert_eq!(format_name("da silva"), "Da Silva");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(format_name(""), "");
        assert_eq!(format_name("   "), "");
        assert_eq!(format_name("NaN"), "");
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name("", 7), "Lead 7");
        assert_eq!(display_name("   ", 7), "Lead 7");
        assert_eq!(display_name("null", 12), "Lead 12");
        // Deterministic: same id, same placeholder.
        assert_eq!(display_name("", 7), display_name("", 7));
    }

    #[test]
    fn test_display_name_passthrough() {
        assert_eq!(display_name("ana clara", 3), "Ana Clara");
    }
}
