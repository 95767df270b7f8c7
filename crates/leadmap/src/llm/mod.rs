//! LLM fallback classification for columns the rule table cannot place.
//!
//! The LLM stage is optional: without a provider the mapper still runs,
//! leaving unresolved columns as `Unmapped`.
//!
//! # Supported Providers
//!
//! - **OpenAI** - hosted chat-completion models (requires `OPENAI_API_KEY`)
//! - **Mock** - deterministic offline provider for tests and dry runs
//!
//! # Example
//!
//! ```no_run
//! use leadmap::{FieldMapper, OpenAiProvider};
//!
//! let mapper = FieldMapper::new()
//!     .with_llm(OpenAiProvider::from_env().unwrap());
//! ```

mod mock;
mod openai;
mod prompts;
mod provider;

pub use mock::MockProvider;
pub use openai::OpenAiProvider;
pub use provider::{
    ClassificationReply, ColumnAssignment, LlmConfig, LlmProvider, LlmUsage, UnresolvedColumn,
};
