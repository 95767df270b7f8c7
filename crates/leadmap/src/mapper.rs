//! Main field mapper: rule stage, LLM fallback, usage accounting.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::crm::CrmField;
use crate::input::ColumnSample;
use crate::llm::{ColumnAssignment, LlmProvider, UnresolvedColumn};
use crate::mapping::{ColumnMapping, MappingHints, MappingOutcome, ValidationResult};
use crate::rules::{RuleClassifier, RULE_CONFIDENCE};
use crate::usage::{fingerprint, UsageLedger, UsageStats};

/// Configuration for the field mapper.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// Confidence below which a column goes to the LLM stage. Rule
    /// matches always score above this, so in practice the LLM sees
    /// exactly the columns the rules missed.
    pub ai_threshold: u8,
    /// Sample values per column handed to the LLM.
    pub max_samples: usize,
    /// Context hints forwarded to the LLM.
    pub hints: MappingHints,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            ai_threshold: 80,
            max_samples: 5,
            hints: MappingHints::default(),
        }
    }
}

/// Result of mapping one spreadsheet's columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingReport {
    /// One mapping per input column, in input order.
    pub mappings: Vec<ColumnMapping>,
    /// Usage counters at the time the report was produced.
    pub usage: UsageStats,
    /// When the mapping ran.
    pub generated_at: DateTime<Utc>,
}

impl MappingReport {
    /// Columns that received a target field.
    pub fn mapped_count(&self) -> usize {
        self.mappings.iter().filter(|m| m.is_mapped()).count()
    }

    /// Columns left unmapped.
    pub fn unmapped_count(&self) -> usize {
        self.mappings.len() - self.mapped_count()
    }
}

/// Two-stage spreadsheet-column-to-CRM-field mapper.
///
/// Owns its usage counters and classification cache; both live exactly
/// as long as the instance. The mutable entry points take `&mut self`,
/// so an instance shared across threads needs an external mutex.
pub struct FieldMapper {
    config: MapperConfig,
    rules: RuleClassifier,
    llm: Option<Arc<dyn LlmProvider>>,
    ledger: UsageLedger,
}

impl FieldMapper {
    /// Create a mapper with default configuration and no LLM fallback.
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create a mapper with custom configuration.
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            config,
            rules: RuleClassifier::new(),
            llm: None,
            ledger: UsageLedger::new(),
        }
    }

    /// Add an LLM provider for fallback classification.
    pub fn with_llm(mut self, provider: impl LlmProvider + 'static) -> Self {
        self.llm = Some(Arc::new(provider));
        self
    }

    /// Set context hints forwarded to the LLM stage.
    pub fn with_hints(mut self, hints: MappingHints) -> Self {
        self.config.hints = hints;
        self
    }

    /// Map a set of columns to canonical CRM fields.
    ///
    /// Never fails as a whole: provider errors downgrade the affected
    /// columns to `Unmapped` and the rest of the batch completes.
    pub fn map_columns(&mut self, columns: &[ColumnSample]) -> MappingReport {
        let mut mappings: Vec<Option<ColumnMapping>> = vec![None; columns.len()];
        let mut unresolved: Vec<(usize, UnresolvedColumn)> = Vec::new();

        // Stage 1: deterministic rules on the folded header.
        for (idx, col) in columns.iter().enumerate() {
            // A rule hit below the configured threshold still goes to
            // the LLM, same as a miss.
            let rule_hit = self
                .rules
                .classify(&col.name)
                .filter(|_| RULE_CONFIDENCE >= self.config.ai_threshold);

            match rule_hit {
                Some(field) => {
                    debug!(column = %col.name, field = %field, "rule match");
                    self.ledger.record_rule_hit();
                    mappings[idx] = Some(ColumnMapping {
                        source_column: col.name.clone(),
                        outcome: MappingOutcome::RuleMatched {
                            field,
                            confidence: RULE_CONFIDENCE,
                        },
                    });
                }
                None => {
                    let samples = col
                        .samples
                        .iter()
                        .take(self.config.max_samples)
                        .cloned()
                        .collect();
                    unresolved.push((
                        idx,
                        UnresolvedColumn::new(col.name.clone()).with_samples(samples),
                    ));
                }
            }
        }

        // Stage 2: LLM fallback for everything the rules missed.
        if !unresolved.is_empty() {
            let batch: Vec<UnresolvedColumn> =
                unresolved.iter().map(|(_, c)| c.clone()).collect();
            let assignments = self.classify_with_fallback(&batch);

            for (idx, col) in unresolved {
                let assignment = assignments
                    .iter()
                    .find(|a| a.column == col.name)
                    .cloned();
                let mapping = self.assignment_to_mapping(&col.name, assignment);
                mappings[idx] = Some(mapping);
            }
        }

        let mappings: Vec<ColumnMapping> = mappings.into_iter().flatten().collect();

        MappingReport {
            mappings,
            usage: self.ledger.stats(),
            generated_at: Utc::now(),
        }
    }

    /// Assess sample values assigned to a field for quality concerns.
    ///
    /// Requires an LLM provider; without one, returns a zero-confidence
    /// empty result rather than guessing.
    pub fn validate_column(&mut self, field: CrmField, samples: &[String]) -> ValidationResult {
        let Some(llm) = self.llm.clone() else {
            return ValidationResult::default();
        };

        match llm.validate_samples(field, samples, &self.config.hints) {
            Ok((result, usage)) => {
                self.ledger.record_call(usage, llm.config());
                result
            }
            Err(e) => {
                warn!(field = %field, error = %e, "validation call failed");
                ValidationResult::default()
            }
        }
    }

    /// Snapshot of the usage counters.
    pub fn usage(&self) -> UsageStats {
        self.ledger.stats()
    }

    /// Run the LLM stage, consulting the cache first. Provider failure
    /// yields an empty assignment list, which downgrades every column
    /// in the batch to `Unmapped`.
    fn classify_with_fallback(&mut self, batch: &[UnresolvedColumn]) -> Vec<ColumnAssignment> {
        let Some(llm) = self.llm.clone() else {
            return Vec::new();
        };

        let key = fingerprint(batch);
        if let Some(cached) = self.ledger.cache_get(&key) {
            debug!(columns = batch.len(), "classification served from cache");
            return cached;
        }

        match llm.classify_columns(batch, &self.config.hints) {
            Ok(reply) => {
                self.ledger.record_call(reply.usage, llm.config());
                self.ledger.cache_put(key, reply.assignments.clone());
                reply.assignments
            }
            Err(e) => {
                warn!(provider = llm.name(), error = %e, "LLM classification failed; columns left unmapped");
                Vec::new()
            }
        }
    }

    /// Turn a provider assignment (or lack of one) into a mapping.
    fn assignment_to_mapping(
        &mut self,
        column: &str,
        assignment: Option<ColumnAssignment>,
    ) -> ColumnMapping {
        let outcome = match assignment {
            Some(a) => match a.field {
                Some(field) if a.confidence > 0 && self.llm.is_some() => {
                    self.ledger.record_ai_hit();
                    MappingOutcome::AiMatched {
                        field,
                        confidence: a.confidence,
                        reasoning: a.reasoning,
                    }
                }
                _ => {
                    self.ledger.record_unmapped();
                    MappingOutcome::Unmapped {
                        reasoning: if a.reasoning.is_empty() {
                            "no suitable canonical field".to_string()
                        } else {
                            a.reasoning
                        },
                    }
                }
            },
            None => {
                self.ledger.record_unmapped();
                let reasoning = if self.llm.is_some() {
                    "classification unavailable for this column".to_string()
                } else {
                    "no rule matched and no LLM configured".to_string()
                };
                MappingOutcome::Unmapped { reasoning }
            }
        };

        ColumnMapping {
            source_column: column.to_string(),
            outcome,
        }
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeadmapError;
    use crate::llm::{ClassificationReply, LlmConfig, LlmUsage, MockProvider};
    use crate::mapping::MappingHints;

    fn name_only(names: &[&str]) -> Vec<ColumnSample> {
        names.iter().map(|n| ColumnSample::name_only(*n)).collect()
    }

    #[test]
    fn test_rules_only_no_llm_calls() {
        let mut mapper = FieldMapper::new().with_llm(MockProvider::new());
        let report = mapper.map_columns(&name_only(&["Lead", "Tel. Fixo", "Celular", "E-mail"]));

        let targets: Vec<Option<CrmField>> =
            report.mappings.iter().map(|m| m.target_field()).collect();
        assert_eq!(
            targets,
            vec![
                Some(CrmField::LastName),
                Some(CrmField::Phone),
                Some(CrmField::MobilePhone),
                Some(CrmField::Email),
            ]
        );
        for mapping in &report.mappings {
            assert!(mapping.confidence() >= 80);
        }
        assert_eq!(report.usage.total_calls, 0);
        assert_eq!(report.usage.rule_resolved, 4);
        assert_eq!(report.usage.ai_skip_ratio(), 1.0);
    }

    #[test]
    fn test_llm_fallback_for_unknown_columns() {
        let mut mapper = FieldMapper::new().with_llm(MockProvider::new());
        let columns = vec![ColumnSample::with_samples(
            "Coluna 7",
            vec!["ana@ex.com".to_string(), "bia@ex.com".to_string()],
        )];

        let report = mapper.map_columns(&columns);

        assert_eq!(report.mappings[0].target_field(), Some(CrmField::Email));
        assert!(matches!(
            report.mappings[0].outcome,
            MappingOutcome::AiMatched { .. }
        ));
        assert_eq!(report.usage.total_calls, 1);
        assert!(report.usage.total_tokens() > 0);
        assert!(report.usage.estimated_cost_usd > 0.0);
    }

    #[test]
    fn test_cache_prevents_repeat_calls() {
        let mut mapper = FieldMapper::new().with_llm(MockProvider::new());
        let columns = vec![ColumnSample::with_samples(
            "Coluna 7",
            vec!["ana@ex.com".to_string()],
        )];

        mapper.map_columns(&columns);
        let report = mapper.map_columns(&columns);

        assert_eq!(report.usage.total_calls, 1);
        assert_eq!(report.usage.cache_hits, 1);
        assert!(report.usage.cache_hit_ratio() > 0.0);
        // Cached result still classifies.
        assert_eq!(report.mappings[0].target_field(), Some(CrmField::Email));
    }

    #[test]
    fn test_no_llm_leaves_unmapped() {
        let mut mapper = FieldMapper::new();
        let report = mapper.map_columns(&name_only(&["Coluna Misteriosa"]));

        assert!(!report.mappings[0].is_mapped());
        assert_eq!(report.mappings[0].confidence(), 0);
        assert_eq!(report.usage.total_calls, 0);
    }

    /// Provider that always fails, to exercise the fallback path.
    struct FailingProvider {
        config: LlmConfig,
    }

    impl LlmProvider for FailingProvider {
        fn classify_columns(
            &self,
            _columns: &[UnresolvedColumn],
            _hints: &MappingHints,
        ) -> crate::error::Result<ClassificationReply> {
            Err(LeadmapError::LlmService("connection refused".to_string()))
        }

        fn validate_samples(
            &self,
            _field: CrmField,
            _samples: &[String],
            _hints: &MappingHints,
        ) -> crate::error::Result<(ValidationResult, LlmUsage)> {
            Err(LeadmapError::LlmService("connection refused".to_string()))
        }

        fn config(&self) -> &LlmConfig {
            &self.config
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_provider_failure_degrades_to_unmapped() {
        let mut mapper = FieldMapper::new().with_llm(FailingProvider {
            config: LlmConfig::default(),
        });
        let report = mapper.map_columns(&name_only(&["E-mail", "Coluna Misteriosa"]));

        // Rule-resolved column is unaffected by the provider failure.
        assert_eq!(report.mappings[0].target_field(), Some(CrmField::Email));
        // The LLM-bound column degrades instead of aborting the batch.
        assert!(!report.mappings[1].is_mapped());
        assert_eq!(report.mappings[1].confidence(), 0);
        assert_eq!(report.usage.total_calls, 0);
    }

    #[test]
    fn test_validation_without_llm() {
        let mut mapper = FieldMapper::new();
        let result = mapper.validate_column(CrmField::Email, &["x".to_string()]);
        assert!(!result.has_issues());
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn test_mapped_counts() {
        let mut mapper = FieldMapper::new();
        let report = mapper.map_columns(&name_only(&["E-mail", "Coluna Misteriosa"]));
        assert_eq!(report.mapped_count(), 1);
        assert_eq!(report.unmapped_count(), 1);
    }
}
