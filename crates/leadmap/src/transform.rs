//! Apply a mapping set to a parsed table: rename, drop, normalize.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::crm::{CrmField, ObjectType};
use crate::error::{LeadmapError, Result};
use crate::input::DataTable;
use crate::mapping::ColumnMapping;
use crate::normalize;

/// Produce a CRM-ready table from a source table and its mappings.
///
/// Mapped columns are renamed to their CRM API names and their values
/// normalized per field; unmapped columns are dropped. When two source
/// columns map to the same field the first wins.
///
/// # Errors
/// Returns [`LeadmapError::MissingRequiredField`] when the mapping set
/// leaves one of the object's required identifying fields without a
/// source column. Fabricating an identifier would corrupt downstream
/// records, so that is the caller's problem to resolve.
pub fn apply_mappings(
    table: &DataTable,
    mappings: &[ColumnMapping],
    object: ObjectType,
) -> Result<DataTable> {
    let schema = object.schema();

    if let Some(field) = schema.missing_required(mappings).first() {
        return Err(LeadmapError::MissingRequiredField {
            object,
            field: *field,
        });
    }

    // Field -> source column index, first mapping wins, input order kept.
    let mut targets: IndexMap<CrmField, usize> = IndexMap::new();
    for mapping in mappings {
        let Some(field) = mapping.target_field() else {
            debug!(column = %mapping.source_column, "dropping unmapped column");
            continue;
        };
        if !schema.allows(field) {
            warn!(column = %mapping.source_column, field = %field, object = %object,
                "field not allowed on object; dropping column");
            continue;
        }
        let Some(idx) = table.headers.iter().position(|h| h == &mapping.source_column) else {
            warn!(column = %mapping.source_column, "mapped column missing from table");
            continue;
        };
        if let Some(prev) = targets.get(&field) {
            warn!(field = %field, kept = %table.headers[*prev], dropped = %mapping.source_column,
                "duplicate mapping target; keeping first");
            continue;
        }
        targets.insert(field, idx);
    }

    let headers: Vec<String> = targets
        .keys()
        .map(|f| f.api_name().to_string())
        .collect();

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            targets
                .iter()
                .map(|(field, col_idx)| {
                    let raw = row.get(*col_idx).map(String::as_str).unwrap_or("");
                    normalize_value(*field, raw, row_idx + 1, &schema.required)
                })
                .collect()
        })
        .collect();

    Ok(DataTable::new(headers, rows, table.delimiter))
}

/// Normalize one cell for its target field.
fn normalize_value(field: CrmField, raw: &str, record_id: usize, required: &[CrmField]) -> String {
    match field {
        CrmField::Phone | CrmField::MobilePhone => normalize::clean_phone(raw),
        CrmField::Email => normalize::format_email(raw),
        CrmField::FirstName => normalize::format_name(raw),
        CrmField::LastName => {
            // Required display names get the synthesized fallback; an
            // optional LastName (not the identifying field) stays blank.
            if required.contains(&CrmField::LastName) {
                normalize::display_name(raw, record_id)
            } else {
                normalize::format_name(raw)
            }
        }
        CrmField::AnnualRevenue => normalize::parse_currency(raw)
            .map(|v| {
                if v.fract() == 0.0 {
                    format!("{}", v as i64)
                } else {
                    format!("{:.2}", v)
                }
            })
            .unwrap_or_default(),
        _ => {
            if normalize::is_missing(raw) {
                String::new()
            } else {
                raw.trim().to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingOutcome;

    fn rule_mapping(source: &str, field: CrmField) -> ColumnMapping {
        ColumnMapping {
            source_column: source.to_string(),
            outcome: MappingOutcome::RuleMatched {
                field,
                confidence: 95,
            },
        }
    }

    fn unmapped(source: &str) -> ColumnMapping {
        ColumnMapping {
            source_column: source.to_string(),
            outcome: MappingOutcome::Unmapped {
                reasoning: "none".to_string(),
            },
        }
    }

    fn sample_table() -> DataTable {
        DataTable::new(
            vec![
                "Lead".to_string(),
                "E-mail".to_string(),
                "Telefone".to_string(),
                "Interno".to_string(),
            ],
            vec![
                vec![
                    "maria souza".to_string(),
                    "Maria@Ex.COM".to_string(),
                    "(11) 98765-4321".to_string(),
                    "x1".to_string(),
                ],
                vec![
                    "".to_string(),
                    "not-an-email".to_string(),
                    "na".to_string(),
                    "x2".to_string(),
                ],
            ],
            b',',
        )
    }

    fn sample_mappings() -> Vec<ColumnMapping> {
        vec![
            rule_mapping("Lead", CrmField::LastName),
            rule_mapping("E-mail", CrmField::Email),
            rule_mapping("Telefone", CrmField::Phone),
            unmapped("Interno"),
        ]
    }

    #[test]
    fn test_renames_and_normalizes() {
        let result = apply_mappings(&sample_table(), &sample_mappings(), ObjectType::Lead).unwrap();

        assert_eq!(result.headers, vec!["LastName", "Email", "Phone"]);
        assert_eq!(result.rows[0][0], "Maria Souza");
        assert_eq!(result.rows[0][1], "maria@ex.com");
        assert_eq!(result.rows[0][2], "11987654321");
    }

    #[test]
    fn test_unmapped_column_dropped() {
        let result = apply_mappings(&sample_table(), &sample_mappings(), ObjectType::Lead).unwrap();
        assert!(!result.headers.contains(&"Interno".to_string()));
    }

    #[test]
    fn test_missing_name_gets_fallback() {
        let result = apply_mappings(&sample_table(), &sample_mappings(), ObjectType::Lead).unwrap();
        // Row 2 has a blank name; the display-name fallback kicks in.
        assert_eq!(result.rows[1][0], "Lead 2");
        // Bad email and sentinel phone fold to empty.
        assert_eq!(result.rows[1][1], "");
        assert_eq!(result.rows[1][2], "");
    }

    #[test]
    fn test_missing_required_field_errors() {
        let table = sample_table();
        let mappings = vec![rule_mapping("E-mail", CrmField::Email)];

        let err = apply_mappings(&table, &mappings, ObjectType::Lead).unwrap_err();
        assert!(matches!(
            err,
            LeadmapError::MissingRequiredField {
                object: ObjectType::Lead,
                field: CrmField::LastName,
            }
        ));
    }

    #[test]
    fn test_duplicate_target_keeps_first() {
        let table = DataTable::new(
            vec!["Telefone".to_string(), "Tel. Fixo".to_string(), "Nome".to_string()],
            vec![vec![
                "11 98765-4321".to_string(),
                "11 3456-7890".to_string(),
                "Ana".to_string(),
            ]],
            b',',
        );
        let mappings = vec![
            rule_mapping("Telefone", CrmField::Phone),
            rule_mapping("Tel. Fixo", CrmField::Phone),
            rule_mapping("Nome", CrmField::LastName),
        ];

        let result = apply_mappings(&table, &mappings, ObjectType::Lead).unwrap();
        assert_eq!(result.headers, vec!["Phone", "LastName"]);
        assert_eq!(result.rows[0][0], "11987654321");
    }

    #[test]
    fn test_revenue_formatting() {
        let table = DataTable::new(
            vec!["Nome".to_string(), "Faturamento".to_string()],
            vec![
                vec!["Ana".to_string(), "R$ 1.234,56".to_string()],
                vec!["Bia".to_string(), "R$ 2.000".to_string()],
                vec!["Clara".to_string(), "a combinar".to_string()],
            ],
            b',',
        );
        let mappings = vec![
            rule_mapping("Nome", CrmField::LastName),
            rule_mapping("Faturamento", CrmField::AnnualRevenue),
        ];

        let result = apply_mappings(&table, &mappings, ObjectType::Lead).unwrap();
        assert_eq!(result.rows[0][1], "1234.56");
        assert_eq!(result.rows[1][1], "2000");
        assert_eq!(result.rows[2][1], "");
    }
}
