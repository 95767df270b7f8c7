//! Diacritic and case folding for column-name matching.
//!
//! Spreadsheets arrive with headers in either NFC ("Descrição" as
//! precomposed characters) or NFD ("Descrição" as base letters plus
//! combining marks), depending on what produced the file. Rule patterns
//! must match both, so every name is decomposed, stripped of combining
//! marks, and lowercased before it reaches the regex table.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold a column header into the canonical matching space.
///
/// NFKD-decomposes, drops combining marks, lowercases, and collapses
/// runs of whitespace into single spaces. "Descrição", "DESCRIÇÃO", and
/// the NFD spelling of either all fold to "descricao".
pub fn fold_header(input: &str) -> String {
    let stripped: String = input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
