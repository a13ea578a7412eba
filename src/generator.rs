use log::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::extract::parse_suite;
use crate::llm::{provider_from_config, LLMProvider};
use crate::models::{StoryInput, TestSuite};
use crate::prompt;

/// Drives one story through the full pipeline: validate, prompt, call the
/// provider, parse the reply into a [`TestSuite`].
///
/// Each generation call is independent; instances hold no request state
/// beyond the provider handle.
pub struct TestCaseGenerator {
    provider: Box<dyn LLMProvider>,
}

impl TestCaseGenerator {
    /// Build a generator from configuration. Fails when no provider is
    /// enabled or its credential is missing.
    pub fn new(config: &Config) -> Result<Self> {
        let provider = provider_from_config(config)?;
        info!(
            "using provider {} with model {}",
            provider.name(),
            provider.model_name()
        );
        Ok(Self { provider })
    }

    /// Build a generator around an explicit provider.
    pub fn with_provider(provider: Box<dyn LLMProvider>) -> Self {
        Self { provider }
    }

    #[allow(dead_code)]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    #[allow(dead_code)]
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Validate a raw story and criteria list without calling the service.
    pub fn validate_user_story(
        &self,
        story: &str,
        acceptance_criteria: Option<Vec<String>>,
    ) -> Result<StoryInput> {
        StoryInput::new(story, acceptance_criteria)
    }

    /// Generate a test suite for a user story.
    ///
    /// Strictly sequential: a failure at any stage aborts the rest, and no
    /// partial suite is ever returned.
    pub async fn generate(
        &self,
        story: &str,
        acceptance_criteria: Option<Vec<String>>,
    ) -> Result<TestSuite> {
        let input = self.validate_user_story(story, acceptance_criteria)?;

        let system_prompt = prompt::system_prompt();
        let user_prompt = prompt::build_user_prompt(&input);
        debug!("user prompt is {} characters", user_prompt.len());

        let response = self.provider.generate(system_prompt, &user_prompt).await?;
        debug!("provider returned {} characters", response.len());

        parse_suite(&response)
    }
}
