//! Currency and financial value parsing.

use super::is_missing;

/// Currency markers stripped before numeric parsing. Order matters:
/// longer tokens first so "R$" goes before "$".
const CURRENCY_MARKERS: &[&str] = &["r$", "us$", "brl", "usd", "eur", "$", "€", "£"];

/// Parse a currency or financial string into a number.
///
/// Handles symbol prefixes ("R$ 1.234,56", "$1,234.56") and both the
/// Brazilian (`.` thousands, `,` decimal) and US (`,` thousands, `.`
/// decimal) separator conventions. Unparseable input is missing data,
/// not an error: the result is `None`.
pub fn parse_currency(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }

    let mut text = raw.trim().to_lowercase();
    for marker in CURRENCY_MARKERS {
        text = text.replace(marker, "");
    }
    let text = text.replace(char::is_whitespace, "");

    // Accounting-style negatives: (1.234,56)
    let (text, negative) = if text.starts_with('(') && text.ends_with(')') {
        (text[1..text.len() - 1].to_string(), true)
    } else if let Some(stripped) = text.strip_prefix('-') {
        (stripped.to_string(), true)
    } else {
        (text, false)
    };

    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return None;
    }

    let normalized = normalize_separators(&text)?;
    let value: f64 = normalized.parse().ok()?;

    Some(if negative { -value } else { value })
}

/// Resolve thousands vs. decimal separators into plain `1234.56` form.
fn normalize_separators(text: &str) -> Option<String> {
    let dots = text.matches('.').count();
    let commas = text.matches(',').count();

    let result = match (dots, commas) {
        (0, 0) => text.to_string(),
        // Both present: the last-occurring separator is the decimal one.
        (d, c) if d > 0 && c > 0 => {
            let last_dot = text.rfind('.')?;
            let last_comma = text.rfind(',')?;
            if last_comma > last_dot {
                text.replace('.', "").replace(',', ".")
            } else {
                text.replace(',', "")
            }
        }
        // Comma only: decimal if it looks like cents, thousands otherwise.
        (0, 1) => {
            let after = text.len() - text.rfind(',')? - 1;
            if after <= 2 {
                text.replace(',', ".")
            } else {
                text.replace(',', "")
            }
        }
        (0, _) => text.replace(',', ""),
        // Dot only: three digits after a single dot reads as a Brazilian
        // thousands group ("1.234" = 1234), shorter tails as decimals.
        (1, 0) => {
            let after = text.len() - text.rfind('.')? - 1;
            if after == 3 {
                text.replace('.', "")
            } else {
                text.to_string()
            }
        }
        (_, 0) => text.replace('.', ""),
        _ => return None,
    };

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brazilian_format() {
        assert_eq!(parse_currency("R$ 1.234,56"), Some(1234.56));
        assert_eq!(parse_currency("1.234.567,89"), Some(1_234_567.89));
        assert_eq!(parse_currency("R$1,50"), Some(1.5));
    }

    #[test]
    fn test_us_format() {
        assert_eq!(parse_currency("$1,234.56"), Some(1234.56));
        assert_eq!(parse_currency("1,234,567.89"), Some(1_234_567.89));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_currency("1234"), Some(1234.0));
        assert_eq!(parse_currency("99.9"), Some(99.9));
    }

    #[test]
    fn test_bare_thousands_group() {
        // "1.234" with exactly three trailing digits is a pt-BR thousands
        // group, not 1.234.
        assert_eq!(parse_currency("1.234"), Some(1234.0));
    }

    #[test]
    fn test_negatives() {
        assert_eq!(parse_currency("-1.234,56"), Some(-1234.56));
        assert_eq!(parse_currency("(500,00)"), Some(-500.0));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_currency(""), None);
        assert_eq!(parse_currency("NaN"), None);
        assert_eq!(parse_currency("a combinar"), None);
        assert_eq!(parse_currency("R$"), None);
        assert_eq!(parse_currency("12,34,56.7.8"), None);
    }
}
