//! Command implementations.

pub mod clean;
pub mod fields;
pub mod map;

use leadmap::{FieldMapper, LlmConfig, MappingHints, MockProvider, OpenAiProvider};

use crate::cli::LlmProviderChoice;

/// Build a mapper from the shared CLI flags.
pub(crate) fn build_mapper(
    llm: LlmProviderChoice,
    model: Option<String>,
    locale: Option<String>,
) -> Result<FieldMapper, Box<dyn std::error::Error>> {
    let mut mapper = match llm {
        LlmProviderChoice::None => FieldMapper::new(),
        LlmProviderChoice::Mock => FieldMapper::new().with_llm(MockProvider::new()),
        LlmProviderChoice::OpenAi => {
            let provider = match model {
                Some(model) => {
                    let config = LlmConfig {
                        model,
                        ..LlmConfig::default()
                    };
                    let api_key = std::env::var("OPENAI_API_KEY")
                        .map_err(|_| "OPENAI_API_KEY environment variable not set")?;
                    OpenAiProvider::with_config(api_key, config)?
                }
                None => OpenAiProvider::from_env()?,
            };
            FieldMapper::new().with_llm(provider)
        }
    };

    if let Some(locale) = locale {
        mapper = mapper.with_hints(MappingHints::new().with_locale(locale));
    }

    Ok(mapper)
}
