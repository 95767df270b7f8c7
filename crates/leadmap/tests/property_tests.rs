//! Property-based tests: normalizers are total, folding is stable.

use proptest::prelude::*;

use leadmap::normalize::{clean_phone, display_name, format_email, format_name, parse_currency};
use leadmap::rules::fold_header;
use leadmap::{ColumnSample, FieldMapper};

proptest! {
    /// Normalizers accept arbitrary input without panicking and keep
    /// their output contracts.
    #[test]
    fn phone_never_panics_and_output_is_digits(input in ".*") {
        let cleaned = clean_phone(&input);
        if !cleaned.is_empty() {
            let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
            prop_assert!(digits.chars().all(|c| c.is_ascii_digit()));
            prop_assert!(digits.len() >= 8);
        }
    }

    #[test]
    fn email_never_panics_and_output_is_lowercase(input in ".*") {
        let formatted = format_email(&input);
        if !formatted.is_empty() {
            prop_assert!(formatted.contains('@'));
            prop_assert_eq!(formatted.clone(), formatted.to_lowercase());
        }
    }

    #[test]
    fn name_never_panics(input in ".*") {
        let _ = format_name(&input);
    }

    #[test]
    fn display_name_is_never_empty(input in ".*", id in 0usize..10_000) {
        let name = display_name(&input, id);
        prop_assert!(!name.is_empty());
        // Deterministic for the same input.
        prop_assert_eq!(name, display_name(&input, id));
    }

    #[test]
    fn currency_never_panics_and_is_finite(input in ".*") {
        if let Some(value) = parse_currency(&input) {
            prop_assert!(value.is_finite());
        }
    }

    /// Folding is idempotent: folding a folded header changes nothing.
    #[test]
    fn fold_header_is_idempotent(input in ".*") {
        let once = fold_header(&input);
        prop_assert_eq!(once.clone(), fold_header(&once));
    }

    /// The mapper itself is total over arbitrary header strings.
    #[test]
    fn mapper_never_panics_on_arbitrary_headers(headers in proptest::collection::vec(".*", 0..8)) {
        let mut mapper = FieldMapper::new();
        let columns: Vec<ColumnSample> = headers
            .iter()
            .map(ColumnSample::name_only)
            .collect();
        let report = mapper.map_columns(&columns);
        prop_assert_eq!(report.mappings.len(), columns.len());
    }
}
