//! Spreadsheet ingestion: CSV parsing and per-column sampling.

mod parser;
mod source;

pub use parser::{Parser, ParserConfig};
pub use source::{ColumnSample, DataTable, SourceMetadata};
