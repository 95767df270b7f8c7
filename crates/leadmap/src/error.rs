//! Error types for the leadmap library.

use std::path::PathBuf;
use thiserror::Error;

use crate::crm::{CrmField, ObjectType};

/// Main error type for leadmap operations.
///
/// Data-quality problems (bad phone numbers, unparseable currency) are
/// never errors; the normalizers fold them to safe defaults. This enum
/// covers external-service failures and contract violations only.
#[derive(Debug, Error)]
pub enum LeadmapError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid delimiter detected or specified.
    #[error("Invalid delimiter: {0}")]
    InvalidDelimiter(String),

    /// Empty file or no columns to map.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error (missing API key, bad model name, etc.).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The LLM service could not be reached or returned an error status.
    #[error("LLM service error: {0}")]
    LlmService(String),

    /// The LLM replied, but the reply could not be parsed as mappings.
    #[error("Unparseable LLM response: {0}")]
    LlmResponse(String),

    /// A mapping set leaves a required identifying field unmapped.
    ///
    /// Raised rather than fabricating an identifier, since a synthesized
    /// identifier would corrupt downstream CRM records.
    #[error("No source column maps to required {object} field '{field}'")]
    MissingRequiredField { object: ObjectType, field: CrmField },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for leadmap operations.
pub type Result<T> = std::result::Result<T, LeadmapError>;
