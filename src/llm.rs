use async_trait::async_trait;

use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::providers::anthropic::AnthropicProvider;
use crate::providers::openai::OpenAIProvider;

/// Trait representing an LLM completion provider.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Name of the provider.
    fn name(&self) -> &str;

    /// Model name of the provider.
    fn model_name(&self) -> &str {
        "Unknown"
    }

    /// Send a system instruction plus a user prompt and return the raw
    /// text reply. One blocking call, no retries.
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String>;
}

/// Construct the provider selected by the configuration.
///
/// Exactly one enabled provider is used per process; OpenAI wins when both
/// are enabled. Credential lookup happens here, so a missing API key fails
/// before any request-specific work begins.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn LLMProvider>> {
    if let Some(openai) = &config.ai_providers.openai {
        if openai.enabled {
            let provider = OpenAIProvider::new(openai, &config.request)?;
            return Ok(Box::new(provider));
        }
    }

    if let Some(anthropic) = &config.ai_providers.anthropic {
        if anthropic.enabled {
            let provider = AnthropicProvider::new(anthropic, &config.request)?;
            return Ok(Box::new(provider));
        }
    }

    Err(GeneratorError::Config(
        "no AI provider is enabled in the configuration".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_no_enabled_provider_is_a_config_error() {
        let mut config = Config::default();
        if let Some(openai) = &mut config.ai_providers.openai {
            openai.enabled = false;
        }
        if let Some(anthropic) = &mut config.ai_providers.anthropic {
            anthropic.enabled = false;
        }
        let err = match provider_from_config(&config) {
            Ok(_) => panic!("expected a config error"),
            Err(err) => err,
        };
        assert!(matches!(err, GeneratorError::Config(_)));
    }
}
