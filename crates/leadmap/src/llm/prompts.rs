//! Prompt templates for LLM interactions.

use crate::crm::CrmField;
use crate::mapping::MappingHints;

use super::provider::UnresolvedColumn;

/// Sample values included per column, at most.
const MAX_PROMPT_SAMPLES: usize = 5;

/// Build the classification prompt for a batch of unresolved columns.
pub fn classification_prompt(columns: &[UnresolvedColumn], hints: &MappingHints) -> String {
    let catalog = CrmField::all()
        .iter()
        .map(|f| format!("  - {} ({})", f.api_name(), f.label()))
        .collect::<Vec<_>>()
        .join("\n");

    let column_block = columns
        .iter()
        .map(|col| {
            if col.samples.is_empty() {
                format!("- \"{}\" (no sample values available)", col.name)
            } else {
                let samples = col
                    .samples
                    .iter()
                    .take(MAX_PROMPT_SAMPLES)
                    .map(|s| format!("\"{}\"", s))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("- \"{}\" with samples: {}", col.name, samples)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Map each spreadsheet column below to one of the canonical CRM fields, or to null if none fits.

## Canonical fields
{}

## Columns to map
{}

## Context
{}

## Rules
1. Sample values outrank the column label. If a column named "Phone" holds
   email addresses, it maps to Email.
2. When no samples are given, reason from the name alone and lower your
   confidence accordingly.
3. Use null for the field when no canonical field is a reasonable fit. Never
   invent a field name outside the list above.

Respond with a JSON array, one object per column, in the same order:
[
  {{
    "column": "the column name exactly as given",
    "field": "CanonicalFieldName" or null,
    "confidence": 0-100,
    "reasoning": "One sentence on the evidence used."
  }}
]"#,
        catalog,
        column_block,
        hints.to_prompt_string()
    )
}

/// Build the prompt for validating samples already assigned to a field.
pub fn validation_prompt(field: CrmField, samples: &[String], hints: &MappingHints) -> String {
    let sample_block = if samples.is_empty() {
        "No samples available".to_string()
    } else {
        samples
            .iter()
            .take(10)
            .map(|s| format!("  - \"{}\"", s))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"Assess these sample values destined for the CRM field "{}" ({}).

## Samples
{}

## Context
{}

## Task
List concrete data-quality issues (wrong value shapes, mixed content,
placeholder junk) and practical suggestions for fixing them before import.
An empty issues list means the samples look fine.

Respond with a JSON object:
{{
  "issues_found": ["..."],
  "suggestions": ["..."],
  "confidence": 0-100
}}"#,
        field.api_name(),
        field.label(),
        sample_block,
        hints.to_prompt_string()
    )
}

/// System prompt for all leadmap LLM interactions.
pub fn system_prompt() -> &'static str {
    r#"You are a data-mapping assistant for a sales-leads import pipeline.

Your role is to:
1. Assign spreadsheet columns to canonical CRM field names
2. Flag data-quality problems in field values before CRM import

Guidelines:
- Evidence in the data outranks the column label
- Be conservative: when unsure, prefer null over a wrong field
- Column headers may be Portuguese, English, or a mix, with or without accents
- Always respond with valid JSON in exactly the requested shape, no prose
  around it"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_prompt_contents() {
        let columns = vec![
            UnresolvedColumn::new("Contato Principal")
                .with_samples(vec!["Maria Souza".to_string(), "João Lima".to_string()]),
            UnresolvedColumn::new("Col X"),
        ];
        let hints = MappingHints::new().with_locale("pt-BR");

        let prompt = classification_prompt(&columns, &hints);

        assert!(prompt.contains("Contato Principal"));
        assert!(prompt.contains("Maria Souza"));
        assert!(prompt.contains("no sample values available"));
        assert!(prompt.contains("MobilePhone"));
        assert!(prompt.contains("pt-BR"));
        assert!(prompt.contains("outrank the column label"));
    }

    #[test]
    fn test_validation_prompt_contents() {
        let samples = vec!["11 98765-4321".to_string()];
        let prompt = validation_prompt(CrmField::Phone, &samples, &MappingHints::new());

        assert!(prompt.contains("\"Phone\""));
        assert!(prompt.contains("98765"));
        assert!(prompt.contains("issues_found"));
    }
}
