use std::env;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{ProviderConfig, RequestConfig};
use crate::error::{GeneratorError, Result};
use crate::llm::LLMProvider;

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    system: String,
    messages: Vec<AnthropicMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
    stop_reason: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    usage: Option<AnthropicUsage>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
    #[serde(rename = "type")]
    content_type: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    #[allow(dead_code)]
    input_tokens: usize,
    #[allow(dead_code)]
    output_tokens: usize,
}

/// Anthropic Claude API provider
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
    max_tokens: usize,
    temperature: f32,
}

impl AnthropicProvider {
    /// Create a provider from configuration. Fails when `ANTHROPIC_API_KEY`
    /// is not set.
    pub fn new(config: &ProviderConfig, request: &RequestConfig) -> Result<Self> {
        let api_key = env::var("ANTHROPIC_API_KEY").map_err(|_| {
            GeneratorError::Config(
                "ANTHROPIC_API_KEY not found in environment variables".to_string(),
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(request.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: "https://api.anthropic.com/v1".to_string(),
            client,
            max_tokens: config.max_tokens.unwrap_or(2000),
            temperature: config.temperature.unwrap_or(0.3),
        })
    }

    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "Anthropic"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = AnthropicRequest {
            model: self.model.clone(),
            system: system_prompt.to_string(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::Api(format!("failed to reach Anthropic API: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Api(format!(
                "Anthropic API error ({status}): {error_text}"
            )));
        }

        let api_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Api(format!("failed to parse Anthropic response: {e}")))?;

        // Check if response was truncated
        if let Some(stop_reason) = &api_response.stop_reason {
            match stop_reason.as_str() {
                "max_tokens" => {
                    warn!(
                        "Anthropic response was truncated due to max_tokens limit ({}). Response may be incomplete.",
                        self.max_tokens
                    );
                }
                "end_turn" => {}
                other => {
                    warn!("Anthropic response stopped with reason: {}", other);
                }
            }
        }

        // Extract text from the first content block
        api_response
            .content
            .into_iter()
            .find(|c| c.content_type == "text")
            .map(|c| c.text)
            .ok_or_else(|| GeneratorError::Api("no text content in Anthropic response".to_string()))
    }
}
