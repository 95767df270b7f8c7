//! Context hints passed to the LLM fallback.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// User-provided context that sharpens LLM classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingHints {
    /// Where the spreadsheet came from (e.g. "trade fair signup export").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_description: Option<String>,

    /// Primary language of the column headers (e.g. "pt-BR").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Per-column descriptions keyed by header.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub column_hints: HashMap<String, String>,

    /// Custom key-value hints.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub custom: HashMap<String, String>,
}

impl MappingHints {
    /// Create empty hints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source description.
    pub fn with_source(mut self, description: impl Into<String>) -> Self {
        self.source_description = Some(description.into());
        self
    }

    /// Set the header locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Add a per-column hint.
    pub fn with_column_hint(
        mut self,
        column: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.column_hints.insert(column.into(), description.into());
        self
    }

    /// Add a custom hint.
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Check if any hints are provided.
    pub fn is_empty(&self) -> bool {
        self.source_description.is_none()
            && self.locale.is_none()
            && self.column_hints.is_empty()
            && self.custom.is_empty()
    }

    /// Format hints as a string for LLM prompts.
    pub fn to_prompt_string(&self) -> String {
        let mut parts = Vec::new();

        if let Some(ref source) = self.source_description {
            parts.push(format!("Source: {}", source));
        }
        if let Some(ref locale) = self.locale {
            parts.push(format!("Header language: {}", locale));
        }
        for (column, description) in &self.column_hints {
            parts.push(format!("Column '{}': {}", column, description));
        }
        for (key, value) in &self.custom {
            parts.push(format!("{}: {}", key, value));
        }

        if parts.is_empty() {
            "No additional context provided.".to_string()
        } else {
            parts.join("\n")
        }
    }
}
