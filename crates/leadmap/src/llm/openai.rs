//! OpenAI chat-completions provider implementation.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::crm::CrmField;
use crate::error::{LeadmapError, Result};
use crate::mapping::{MappingHints, ValidationResult};

use super::prompts;
use super::provider::{
    ClassificationReply, ColumnAssignment, LlmConfig, LlmProvider, LlmUsage, UnresolvedColumn,
};

/// OpenAI API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions provider.
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl OpenAiProvider {
    /// Create a new provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| LeadmapError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            LeadmapError::Config("OPENAI_API_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| LeadmapError::Config(format!("Invalid API key: {}", e)))?,
        );
        Ok(headers)
    }

    /// Send one message and return the reply text plus token usage.
    fn send_message(&self, user_prompt: &str) -> Result<(String, LlmUsage)> {
        let body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                {
                    "role": "user",
                    "content": user_prompt
                }
            ]
        });

        debug!(model = %self.config.model, "sending classification request");

        let response = self
            .client
            .post(API_URL)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .map_err(|e| LeadmapError::LlmService(format!("API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();
            return Err(LeadmapError::LlmService(format!(
                "OpenAI API error ({}): {}",
                status, error_text
            )));
        }

        let api_response: OpenAiResponse = response.json().map_err(|e| {
            LeadmapError::LlmResponse(format!("Failed to parse API response: {}", e))
        })?;

        let usage = LlmUsage {
            input_tokens: api_response.usage.prompt_tokens,
            output_tokens: api_response.usage.completion_tokens,
        };

        let text = api_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| LeadmapError::LlmResponse("No choices in response".to_string()))?;

        Ok((text, usage))
    }

    /// Parse JSON from the reply, tolerating markdown code fences.
    fn parse_json_reply<T: for<'de> Deserialize<'de>>(&self, reply: &str) -> Result<T> {
        let json_str = if reply.contains("```json") {
            reply
                .split("```json")
                .nth(1)
                .and_then(|s| s.split("```").next())
                .map(str::trim)
                .unwrap_or(reply)
        } else if reply.contains("```") {
            reply
                .split("```")
                .nth(1)
                .map(str::trim)
                .unwrap_or(reply)
        } else {
            reply.trim()
        };

        serde_json::from_str(json_str)
            .map_err(|e| LeadmapError::LlmResponse(format!("Unparseable JSON reply: {}", e)))
    }
}

impl LlmProvider for OpenAiProvider {
    fn classify_columns(
        &self,
        columns: &[UnresolvedColumn],
        hints: &MappingHints,
    ) -> Result<ClassificationReply> {
        let prompt = prompts::classification_prompt(columns, hints);
        let (reply, usage) = self.send_message(&prompt)?;

        let raw: Vec<RawAssignment> = self.parse_json_reply(&reply)?;

        let assignments = raw
            .into_iter()
            .map(|r| {
                // Field names outside the catalog are discarded, not trusted.
                let field = r.field.as_deref().and_then(CrmField::from_api_name);
                ColumnAssignment {
                    column: r.column,
                    field,
                    confidence: clamp_confidence(r.confidence),
                    reasoning: r.reasoning.unwrap_or_default(),
                }
            })
            .collect();

        Ok(ClassificationReply { assignments, usage })
    }

    fn validate_samples(
        &self,
        field: CrmField,
        samples: &[String],
        hints: &MappingHints,
    ) -> Result<(ValidationResult, LlmUsage)> {
        let prompt = prompts::validation_prompt(field, samples, hints);
        let (reply, usage) = self.send_message(&prompt)?;

        let raw: RawValidation = self.parse_json_reply(&reply)?;

        Ok((
            ValidationResult {
                issues_found: raw.issues_found,
                suggestions: raw.suggestions,
                confidence: clamp_confidence(raw.confidence),
            },
            usage,
        ))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Clamp a model-reported confidence into the 0-100 scale.
fn clamp_confidence(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}

/// OpenAI API response structure.
#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: ApiUsage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

#[derive(Debug, Default, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

/// One parsed assignment from the model reply.
#[derive(Debug, Deserialize)]
struct RawAssignment {
    column: String,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    confidence: f64,
    #[serde(default)]
    reasoning: Option<String>,
}

/// Parsed validation reply.
#[derive(Debug, Deserialize)]
struct RawValidation {
    #[serde(default)]
    issues_found: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
    #[serde(default)]
    confidence: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_json() {
        let provider = OpenAiProvider::new("test-key").unwrap();
        let reply = "```json\n[{\"column\": \"X\", \"field\": \"Email\", \"confidence\": 90, \"reasoning\": \"samples\"}]\n```";

        let parsed: Vec<RawAssignment> = provider.parse_json_reply(reply).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].field.as_deref(), Some("Email"));
    }

    #[test]
    fn test_parse_bare_json() {
        let provider = OpenAiProvider::new("test-key").unwrap();
        let reply = "  [{\"column\": \"X\", \"confidence\": 10}]  ";

        let parsed: Vec<RawAssignment> = provider.parse_json_reply(reply).unwrap();
        assert_eq!(parsed[0].column, "X");
        assert!(parsed[0].field.is_none());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let provider = OpenAiProvider::new("test-key").unwrap();
        let result: Result<Vec<RawAssignment>> =
            provider.parse_json_reply("I cannot help with that.");
        assert!(matches!(result, Err(LeadmapError::LlmResponse(_))));
    }

    #[test]
    fn test_clamp_confidence() {
        assert_eq!(clamp_confidence(88.4), 88);
        assert_eq!(clamp_confidence(150.0), 100);
        assert_eq!(clamp_confidence(-3.0), 0);
        // Some models answer on a 0-1 scale by mistake; that reads as
        // very low confidence, which is the safe direction.
        assert_eq!(clamp_confidence(0.9), 1);
    }
}
