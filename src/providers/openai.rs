use std::env;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{ProviderConfig, RequestConfig};
use crate::error::{GeneratorError, Result};
use crate::llm::LLMProvider;

/// OpenAI chat-completions provider
pub struct OpenAIProvider {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    #[allow(dead_code)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[allow(dead_code)]
    prompt_tokens: usize,
    #[allow(dead_code)]
    completion_tokens: usize,
    #[allow(dead_code)]
    total_tokens: usize,
}

impl OpenAIProvider {
    /// Create a provider from configuration. Fails when `OPENAI_API_KEY`
    /// is not set.
    pub fn new(config: &ProviderConfig, request: &RequestConfig) -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
            GeneratorError::Config("OPENAI_API_KEY not found in environment variables".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(request.timeout_secs))
            .build()
            .map_err(|e| GeneratorError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api_key,
            model: config.model.clone(),
            base_url: "https://api.openai.com/v1".to_string(),
            client,
            temperature: config.temperature.unwrap_or(0.3),
            max_tokens: config.max_tokens.unwrap_or(2000),
        })
    }

    /// Set custom base URL (for API-compatible services)
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::Api(format!("failed to reach OpenAI API: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenAI API returned {}: {}", status, error_text);
            return Err(GeneratorError::Api(format!(
                "OpenAI API error ({status}): {error_text}"
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Api(format!("failed to parse OpenAI response: {e}")))?;

        debug!("OpenAI reply parsed, {} choice(s)", chat_response.choices.len());

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GeneratorError::Api("no choices in OpenAI response".to_string()))
    }
}
