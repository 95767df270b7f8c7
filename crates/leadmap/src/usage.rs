//! Usage accounting and the classification cache.
//!
//! One ledger per mapper instance. Counters reset only when the mapper
//! is dropped; nothing here is durable and nothing is global.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::llm::{ColumnAssignment, LlmConfig, LlmUsage, UnresolvedColumn};

/// Process-lifetime API usage counters for one mapper instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageStats {
    /// Provider calls actually made (cache hits excluded).
    pub total_calls: u64,
    /// Input tokens across all calls.
    pub total_input_tokens: u64,
    /// Output tokens across all calls.
    pub total_output_tokens: u64,
    /// Estimated spend in USD, from the provider's configured pricing.
    pub estimated_cost_usd: f64,
    /// Classification requests answered from the cache.
    pub cache_hits: u64,
    /// Classification requests that went to the provider.
    pub cache_misses: u64,
    /// Columns resolved by the rule stage.
    pub rule_resolved: u64,
    /// Columns resolved by the LLM stage.
    pub ai_resolved: u64,
    /// Columns left unmapped.
    pub unmapped: u64,
}

impl UsageStats {
    /// Total tokens across all calls.
    pub fn total_tokens(&self) -> u64 {
        self.total_input_tokens + self.total_output_tokens
    }

    /// Fraction of classification requests served from the cache.
    pub fn cache_hit_ratio(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    /// Fraction of columns that never needed the LLM.
    pub fn ai_skip_ratio(&self) -> f64 {
        let total = self.rule_resolved + self.ai_resolved + self.unmapped;
        if total == 0 {
            0.0
        } else {
            self.rule_resolved as f64 / total as f64
        }
    }
}

/// In-memory ledger: counters plus the classification cache.
#[derive(Debug, Default)]
pub(crate) struct UsageLedger {
    stats: UsageStats,
    cache: HashMap<String, Vec<ColumnAssignment>>,
}

impl UsageLedger {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current counters.
    pub(crate) fn stats(&self) -> UsageStats {
        self.stats.clone()
    }

    pub(crate) fn record_rule_hit(&mut self) {
        self.stats.rule_resolved += 1;
    }

    pub(crate) fn record_ai_hit(&mut self) {
        self.stats.ai_resolved += 1;
    }

    pub(crate) fn record_unmapped(&mut self) {
        self.stats.unmapped += 1;
    }

    /// Record a completed provider call.
    pub(crate) fn record_call(&mut self, usage: LlmUsage, config: &LlmConfig) {
        self.stats.total_calls += 1;
        self.stats.total_input_tokens += usage.input_tokens;
        self.stats.total_output_tokens += usage.output_tokens;
        self.stats.estimated_cost_usd += config.estimate_cost(usage);
    }

    /// Look up a cached classification reply.
    pub(crate) fn cache_get(&mut self, key: &str) -> Option<Vec<ColumnAssignment>> {
        match self.cache.get(key) {
            Some(assignments) => {
                self.stats.cache_hits += 1;
                Some(assignments.clone())
            }
            None => {
                self.stats.cache_misses += 1;
                None
            }
        }
    }

    /// Store a classification reply.
    pub(crate) fn cache_put(&mut self, key: String, assignments: Vec<ColumnAssignment>) {
        self.cache.insert(key, assignments);
    }
}

/// Fingerprint a batch of unresolved columns for cache keying.
///
/// Covers both the column names and the sample values, so the same
/// headers with different data classify independently.
pub(crate) fn fingerprint(columns: &[UnresolvedColumn]) -> String {
    let mut hasher = Sha256::new();
    for col in columns {
        hasher.update(col.name.as_bytes());
        hasher.update([0u8]);
        for sample in &col.samples {
            hasher.update(sample.as_bytes());
            hasher.update([1u8]);
        }
        hasher.update([0xff]);
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_on_empty_stats() {
        let stats = UsageStats::default();
        assert_eq!(stats.cache_hit_ratio(), 0.0);
        assert_eq!(stats.ai_skip_ratio(), 0.0);
    }

    #[test]
    fn test_cache_hit_counting() {
        let mut ledger = UsageLedger::new();
        assert!(ledger.cache_get("k").is_none());
        ledger.cache_put("k".to_string(), Vec::new());
        assert!(ledger.cache_get("k").is_some());

        let stats = ledger.stats();
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.cache_hit_ratio(), 0.5);
    }

    #[test]
    fn test_cost_accumulates() {
        let mut ledger = UsageLedger::new();
        let config = LlmConfig::default();
        let usage = LlmUsage {
            input_tokens: 1_000_000,
            output_tokens: 1_000_000,
        };

        ledger.record_call(usage, &config);

        let stats = ledger.stats();
        assert_eq!(stats.total_calls, 1);
        assert_eq!(stats.total_tokens(), 2_000_000);
        let expected = config.input_cost_per_mtok + config.output_cost_per_mtok;
        assert!((stats.estimated_cost_usd - expected).abs() < 1e-9);
    }

    #[test]
    fn test_fingerprint_sensitivity() {
        let a = vec![UnresolvedColumn::new("Col").with_samples(vec!["x".to_string()])];
        let b = vec![UnresolvedColumn::new("Col").with_samples(vec!["y".to_string()])];
        let c = vec![UnresolvedColumn::new("Col").with_samples(vec!["x".to_string()])];

        assert_ne!(fingerprint(&a), fingerprint(&b));
        assert_eq!(fingerprint(&a), fingerprint(&c));
    }

    #[test]
    fn test_ai_skip_ratio() {
        let mut ledger = UsageLedger::new();
        ledger.record_rule_hit();
        ledger.record_rule_hit();
        ledger.record_rule_hit();
        ledger.record_ai_hit();

        assert_eq!(ledger.stats().ai_skip_ratio(), 0.75);
    }
}
