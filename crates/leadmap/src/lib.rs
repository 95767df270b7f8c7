//! Leadmap: rule-and-LLM field mapper for sales-lead spreadsheets.
//!
//! Takes the column headers of a leads spreadsheet (optionally with
//! sample values) and maps them onto canonical CRM field names in two
//! stages:
//!
//! - **Rules first**: a deterministic, diacritic-insensitive pattern
//!   table resolves the well-known header variants at high confidence.
//! - **LLM fallback**: columns the rules miss go to a hosted model in
//!   one batched call, with sample values outranking column labels.
//!
//! Every LLM call is counted (calls, tokens, estimated cost) and cached
//! by input fingerprint for the mapper's lifetime.
//!
//! # Example
//!
//! ```
//! use leadmap::{ColumnSample, FieldMapper};
//!
//! let mut mapper = FieldMapper::new();
//! let report = mapper.map_columns(&[
//!     ColumnSample::name_only("Lead"),
//!     ColumnSample::name_only("E-mail"),
//! ]);
//!
//! assert_eq!(report.mapped_count(), 2);
//! assert_eq!(report.usage.total_calls, 0);
//! ```

pub mod crm;
pub mod error;
pub mod input;
pub mod llm;
pub mod mapping;
pub mod normalize;
pub mod rules;
pub mod transform;

mod mapper;
mod usage;

pub use crate::crm::{CrmField, ObjectSchema, ObjectType};
pub use crate::error::{LeadmapError, Result};
pub use crate::input::{ColumnSample, DataTable, Parser, ParserConfig, SourceMetadata};
pub use crate::llm::{LlmConfig, LlmProvider, MockProvider, OpenAiProvider};
pub use crate::mapper::{FieldMapper, MapperConfig, MappingReport};
pub use crate::mapping::{ColumnMapping, MappingHints, MappingOutcome, ValidationResult};
pub use crate::transform::apply_mappings;
pub use crate::usage::UsageStats;
