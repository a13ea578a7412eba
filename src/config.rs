use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main configuration structure for testgen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// AI provider configurations
    #[serde(default)]
    pub ai_providers: AIProvidersConfig,

    /// HTTP request configuration
    #[serde(default)]
    pub request: RequestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AIProvidersConfig {
    /// OpenAI configuration
    pub openai: Option<ProviderConfig>,

    /// Anthropic configuration
    pub anthropic: Option<ProviderConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,

    /// Model to use
    pub model: String,

    /// Temperature setting
    pub temperature: Option<f32>,

    /// Maximum output tokens per reply
    pub max_tokens: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Upper bound on a single API call, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_timeout_secs() -> u64 { 120 }
fn default_temperature() -> f32 { 0.3 }
fn default_max_tokens() -> usize { 2000 }

impl Default for AIProvidersConfig {
    fn default() -> Self {
        AIProvidersConfig {
            openai: Some(ProviderConfig {
                enabled: true,
                model: "gpt-3.5-turbo".to_string(),
                temperature: Some(default_temperature()),
                max_tokens: Some(default_max_tokens()),
            }),
            anthropic: Some(ProviderConfig {
                enabled: false,
                model: "claude-sonnet-4-0".to_string(),
                temperature: Some(default_temperature()),
                max_tokens: Some(default_max_tokens()),
            }),
        }
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        RequestConfig {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ai_providers: AIProvidersConfig::default(),
            request: RequestConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))
    }

    /// Load configuration from command line argument or default locations
    pub fn load(config_path: &Option<String>) -> Result<Self> {
        let mut config = Self::load_file_or_default(config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    fn load_file_or_default(config_path: &Option<String>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::from_file(path);
        }

        // Try loading from default locations
        let default_paths = vec![
            "testgen.toml",
            ".testgen.toml",
            "~/.config/testgen/config.toml",
        ];

        for path in default_paths {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                match Self::from_file(expanded_path.as_ref()) {
                    Ok(config) => return Ok(config),
                    Err(e) => eprintln!("Warning: Failed to load config from {}: {}", path, e),
                }
            }
        }

        // Return default config if no file found
        Ok(Self::default())
    }

    /// Apply environment overrides to whichever provider is enabled.
    ///
    /// `MODEL_NAME`, `TEMPERATURE` and `MAX_TOKENS` mirror the knobs read
    /// from the process environment at initialization; API keys are read by
    /// the providers themselves.
    fn apply_env_overrides(&mut self) {
        let model = env::var("MODEL_NAME").ok();
        let temperature = env::var("TEMPERATURE").ok().and_then(|v| v.parse::<f32>().ok());
        let max_tokens = env::var("MAX_TOKENS").ok().and_then(|v| v.parse::<usize>().ok());

        for provider in [&mut self.ai_providers.openai, &mut self.ai_providers.anthropic]
            .into_iter()
            .flatten()
        {
            if !provider.enabled {
                continue;
            }
            if let Some(model) = &model {
                provider.model = model.clone();
            }
            if let Some(temperature) = temperature {
                provider.temperature = Some(temperature);
            }
            if let Some(max_tokens) = max_tokens {
                provider.max_tokens = Some(max_tokens);
            }
        }
    }
}
