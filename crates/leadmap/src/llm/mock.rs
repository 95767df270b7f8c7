//! Mock LLM provider for tests and offline dry runs.

use crate::crm::CrmField;
use crate::error::Result;
use crate::mapping::{MappingHints, ValidationResult};
use crate::normalize;
use crate::rules::fold_header;

use super::prompts;
use super::provider::{
    ClassificationReply, ColumnAssignment, LlmConfig, LlmProvider, LlmUsage, UnresolvedColumn,
};

/// Confidence for assignments backed by sample-value evidence.
const DATA_CONFIDENCE: u8 = 85;

/// Confidence for name-only guesses (no samples available).
const NAME_ONLY_CONFIDENCE: u8 = 55;

/// Deterministic provider that mimics the hosted model's behavior.
///
/// Follows the same precedence the real prompt demands: the shape of
/// the sample values decides first, the column name second. That makes
/// the "data content overrides column label" rule testable without a
/// network.
pub struct MockProvider {
    config: LlmConfig,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            config: LlmConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: LlmConfig) -> Self {
        Self { config }
    }

    /// Classify by the dominant shape of the sample values.
    fn field_from_samples(samples: &[String]) -> Option<(CrmField, &'static str)> {
        let usable: Vec<&str> = samples
            .iter()
            .map(String::as_str)
            .filter(|s| !normalize::is_missing(s))
            .collect();
        if usable.is_empty() {
            return None;
        }

        let majority = usable.len() / 2 + 1;
        let count = |pred: &dyn Fn(&str) -> bool| usable.iter().filter(|s| pred(s)).count();

        if count(&|s| !normalize::format_email(s).is_empty()) >= majority {
            return Some((CrmField::Email, "samples are email-shaped"));
        }
        if count(&|s| s.starts_with("http://") || s.starts_with("https://") || s.starts_with("www."))
            >= majority
        {
            return Some((CrmField::Website, "samples are URLs"));
        }
        if count(&|s| !normalize::clean_phone(s).is_empty()) >= majority {
            return Some((CrmField::Phone, "samples are phone-shaped"));
        }
        if count(&|s| {
            s.contains('$') || s.contains("R$") || fold_header(s).contains("reais")
        }) >= majority
            && count(&|s| normalize::parse_currency(s).is_some()) >= majority
        {
            return Some((CrmField::AnnualRevenue, "samples are currency amounts"));
        }

        None
    }

    /// Name-only guesses for headers the rule table's exact patterns
    /// miss but a model would still read correctly.
    fn field_from_name(name: &str) -> Option<CrmField> {
        let folded = fold_header(name);
        if folded.contains("resp") || folded.contains("pessoa") {
            Some(CrmField::LastName)
        } else if folded.contains("mail") {
            Some(CrmField::Email)
        } else if folded.contains("fone") || folded.contains("tel") {
            Some(CrmField::Phone)
        } else if folded.contains("valor") || folded.contains("orcamento") {
            Some(CrmField::AnnualRevenue)
        } else {
            None
        }
    }

    /// Synthesized token usage so the ledger gets exercised in tests.
    fn synthesize_usage(prompt: &str, columns: usize) -> LlmUsage {
        LlmUsage {
            input_tokens: (prompt.len() / 4) as u64,
            output_tokens: (columns * 30) as u64,
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn classify_columns(
        &self,
        columns: &[UnresolvedColumn],
        hints: &MappingHints,
    ) -> Result<ClassificationReply> {
        let prompt = prompts::classification_prompt(columns, hints);

        let assignments = columns
            .iter()
            .map(|col| {
                if let Some((field, evidence)) = Self::field_from_samples(&col.samples) {
                    ColumnAssignment {
                        column: col.name.clone(),
                        field: Some(field),
                        confidence: DATA_CONFIDENCE,
                        reasoning: evidence.to_string(),
                    }
                } else if let Some(field) = Self::field_from_name(&col.name) {
                    ColumnAssignment {
                        column: col.name.clone(),
                        field: Some(field),
                        confidence: NAME_ONLY_CONFIDENCE,
                        reasoning: "guessed from the column name; no usable samples".to_string(),
                    }
                } else {
                    ColumnAssignment {
                        column: col.name.clone(),
                        field: None,
                        confidence: 0,
                        reasoning: "no canonical field fits the name or samples".to_string(),
                    }
                }
            })
            .collect();

        Ok(ClassificationReply {
            assignments,
            usage: Self::synthesize_usage(&prompt, columns.len()),
        })
    }

    fn validate_samples(
        &self,
        field: CrmField,
        samples: &[String],
        hints: &MappingHints,
    ) -> Result<(ValidationResult, LlmUsage)> {
        let prompt = prompts::validation_prompt(field, samples, hints);
        let usage = Self::synthesize_usage(&prompt, 1);

        let mut result = ValidationResult::clean(DATA_CONFIDENCE);

        let bad_count = match field {
            CrmField::Email => samples
                .iter()
                .filter(|s| !normalize::is_missing(s) && normalize::format_email(s).is_empty())
                .count(),
            CrmField::Phone | CrmField::MobilePhone => samples
                .iter()
                .filter(|s| !normalize::is_missing(s) && normalize::clean_phone(s).is_empty())
                .count(),
            CrmField::AnnualRevenue => samples
                .iter()
                .filter(|s| !normalize::is_missing(s) && normalize::parse_currency(s).is_none())
                .count(),
            _ => 0,
        };

        if bad_count > 0 {
            result.issues_found.push(format!(
                "{} of {} samples do not match the expected {} shape",
                bad_count,
                samples.len(),
                field.label()
            ));
            result
                .suggestions
                .push("Normalize the column before import and re-check".to_string());
        }

        let missing = samples.iter().filter(|s| normalize::is_missing(s)).count();
        if missing > 0 {
            result
                .issues_found
                .push(format!("{} of {} samples are empty", missing, samples.len()));
            result
                .suggestions
                .push("Decide a default or drop rows with no value".to_string());
        }

        Ok((result, usage))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}
