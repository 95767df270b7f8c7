//! LLM provider trait and types.

use serde::{Deserialize, Serialize};

use crate::crm::CrmField;
use crate::error::Result;
use crate::mapping::{MappingHints, ValidationResult};

/// A column the rule stage could not resolve, with sample values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnresolvedColumn {
    /// The raw column header.
    pub name: String,
    /// Up to a handful of non-null sample values. May be empty.
    #[serde(default)]
    pub samples: Vec<String>,
}

impl UnresolvedColumn {
    /// Create an unresolved column with no sample data.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            samples: Vec::new(),
        }
    }

    /// Attach sample values.
    pub fn with_samples(mut self, samples: Vec<String>) -> Self {
        self.samples = samples;
        self
    }
}

/// One column→field assignment returned by a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnAssignment {
    /// The source column the assignment is for.
    pub column: String,
    /// Assigned field, or `None` when no catalog field fits.
    pub field: Option<CrmField>,
    /// Provider confidence, 0-100.
    pub confidence: u8,
    /// Free-text reasoning for the assignment.
    pub reasoning: String,
}

/// Token usage for a single provider call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LlmUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl LlmUsage {
    /// Total tokens for the call.
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Full reply to a classification request.
#[derive(Debug, Clone)]
pub struct ClassificationReply {
    /// One assignment per requested column.
    pub assignments: Vec<ColumnAssignment>,
    /// Token usage reported by the provider.
    pub usage: LlmUsage,
}

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g. "gpt-4o-mini").
    pub model: String,

    /// Maximum tokens in the response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0). Low by default: this is
    /// classification, not prose.
    pub temperature: f64,

    /// Price per million input tokens, USD. Used for cost estimation.
    pub input_cost_per_mtok: f64,

    /// Price per million output tokens, USD.
    pub output_cost_per_mtok: f64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_tokens: 1024,
            temperature: 0.1,
            input_cost_per_mtok: 0.15,
            output_cost_per_mtok: 0.60,
        }
    }
}

impl LlmConfig {
    /// Estimated cost of a call in USD.
    pub fn estimate_cost(&self, usage: LlmUsage) -> f64 {
        (usage.input_tokens as f64 * self.input_cost_per_mtok
            + usage.output_tokens as f64 * self.output_cost_per_mtok)
            / 1_000_000.0
    }
}

/// Trait for LLM providers.
///
/// Implementations must be thread-safe (Send + Sync) so a configured
/// provider can be shared across mapper instances.
pub trait LlmProvider: Send + Sync {
    /// Classify unresolved columns in one batched call.
    ///
    /// Providers must weigh sample values over column labels when the
    /// two disagree: a column named "Phone" full of email addresses is
    /// an Email column. With no samples available, classification
    /// proceeds on the name alone at reduced confidence.
    ///
    /// # Errors
    /// Network failures, non-success HTTP statuses, and unparseable
    /// replies are errors; the caller decides the fallback.
    fn classify_columns(
        &self,
        columns: &[UnresolvedColumn],
        hints: &MappingHints,
    ) -> Result<ClassificationReply>;

    /// Assess sample values already assigned to a field for quality
    /// concerns (wrong shapes, mixed content, suspicious uniformity).
    fn validate_samples(
        &self,
        field: CrmField,
        samples: &[String],
        hints: &MappingHints,
    ) -> Result<(ValidationResult, LlmUsage)>;

    /// Get the configuration for this provider.
    fn config(&self) -> &LlmConfig;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
