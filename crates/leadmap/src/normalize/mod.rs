//! Pure data normalizers for lead field values.
//!
//! Every function here is total: arbitrary input, including empty
//! strings and spreadsheet missing-value sentinels ("NaN", "n/a", ...),
//! yields a well-defined result. Nothing in this module returns an
//! error or panics.

mod currency;
mod email;
mod name;
mod phone;

pub use currency::parse_currency;
pub use email::format_email;
pub use name::{display_name, format_name};
pub use phone::clean_phone;

/// Whether a raw cell value represents missing data.
///
/// Covers the sentinel strings pandas-style exports leave behind for
/// null cells, plus plain blanks.
pub fn is_missing(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "-"
        || trimmed == "."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sentinels() {
        for sentinel in ["", "  ", "NA", "n/a", "NaN", "null", "None", "-", "."] {
            assert!(is_missing(sentinel), "{:?} should be missing", sentinel);
        }
    }

    #[test]
    fn test_real_values_not_missing() {
        for value in ["0", "Nadia", "no", "-1", "a."] {
            assert!(!is_missing(value), "{:?} should not be missing", value);
        }
    }
}
