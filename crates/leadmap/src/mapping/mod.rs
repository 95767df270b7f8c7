//! Mapping result types shared across the rule and LLM stages.

mod hints;

pub use hints::MappingHints;

use serde::{Deserialize, Serialize};

use crate::crm::CrmField;

/// Confidence scale maximum. Scores are integer percentages.
pub const CONFIDENCE_MAX: u8 = 100;

/// How a source column was (or was not) resolved to a target field.
///
/// The two-stage pipeline produces a tagged outcome rather than a bare
/// confidence number, so callers can tell a rule hit from an AI guess
/// from a genuine miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum MappingOutcome {
    /// The deterministic rule table matched the column name.
    RuleMatched { field: CrmField, confidence: u8 },

    /// The LLM fallback assigned a field.
    AiMatched {
        field: CrmField,
        confidence: u8,
        reasoning: String,
    },

    /// No suitable canonical field was found.
    Unmapped { reasoning: String },
}

/// Mapping of one spreadsheet column to a canonical CRM field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    /// The column header as it appears in the source spreadsheet.
    pub source_column: String,
    /// How the column was resolved.
    #[serde(flatten)]
    pub outcome: MappingOutcome,
}

impl ColumnMapping {
    /// The target field, if one was assigned.
    pub fn target_field(&self) -> Option<CrmField> {
        match &self.outcome {
            MappingOutcome::RuleMatched { field, .. } => Some(*field),
            MappingOutcome::AiMatched { field, .. } => Some(*field),
            MappingOutcome::Unmapped { .. } => None,
        }
    }

    /// Confidence in the assignment, 0-100. Unmapped columns score 0.
    pub fn confidence(&self) -> u8 {
        match &self.outcome {
            MappingOutcome::RuleMatched { confidence, .. } => *confidence,
            MappingOutcome::AiMatched { confidence, .. } => *confidence,
            MappingOutcome::Unmapped { .. } => 0,
        }
    }

    /// Whether a target field was assigned.
    pub fn is_mapped(&self) -> bool {
        !matches!(self.outcome, MappingOutcome::Unmapped { .. })
    }
}

/// Data-quality concerns for a single field's sample values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Problems detected in the samples.
    pub issues_found: Vec<String>,
    /// Suggested remediations.
    pub suggestions: Vec<String>,
    /// Confidence in the assessment, 0-100.
    pub confidence: u8,
}

impl ValidationResult {
    /// A clean result: nothing flagged.
    pub fn clean(confidence: u8) -> Self {
        Self {
            issues_found: Vec::new(),
            suggestions: Vec::new(),
            confidence,
        }
    }

    /// Whether any issue was flagged.
    pub fn has_issues(&self) -> bool {
        !self.issues_found.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let rule = ColumnMapping {
            source_column: "Telefone".to_string(),
            outcome: MappingOutcome::RuleMatched {
                field: CrmField::Phone,
                confidence: 95,
            },
        };
        assert_eq!(rule.target_field(), Some(CrmField::Phone));
        assert_eq!(rule.confidence(), 95);
        assert!(rule.is_mapped());

        let missed = ColumnMapping {
            source_column: "Coluna X".to_string(),
            outcome: MappingOutcome::Unmapped {
                reasoning: "no rule matched and no LLM configured".to_string(),
            },
        };
        assert_eq!(missed.target_field(), None);
        assert_eq!(missed.confidence(), 0);
        assert!(!missed.is_mapped());
    }

    #[test]
    fn test_serialized_stage_tag() {
        let mapping = ColumnMapping {
            source_column: "E-mail".to_string(),
            outcome: MappingOutcome::RuleMatched {
                field: CrmField::Email,
                confidence: 95,
            },
        };
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["stage"], "rule_matched");
        assert_eq!(json["field"], "Email");
        assert_eq!(json["source_column"], "E-mail");
    }
}
