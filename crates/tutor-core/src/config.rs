//! Pipeline configuration: thresholds and the ordered provider table.
//!
//! Loaded from a TOML file with `TUTOR_*` environment overrides. Credentials
//! come exclusively from the environment and are never read from or written
//! to disk.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tutor_llm::{ProviderDescriptor, ProviderRegistry, RequestShape};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    /// Fallback order is this order.
    #[serde(default = "default_providers")]
    pub providers: Vec<ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            summary: SummaryConfig::default(),
            providers: default_providers(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TUTOR_PARSE_TIMEOUT_SECS")
            && let Ok(secs) = v.parse::<u64>()
        {
            self.extraction.parse_timeout_secs = secs;
        }
        if let Ok(v) = std::env::var("TUTOR_MIN_TEXT_CHARS")
            && let Ok(chars) = v.parse::<usize>()
        {
            self.summary.min_text_chars = chars;
        }
        if let Ok(v) = std::env::var("TUTOR_MAX_PROMPT_CHARS")
            && let Ok(chars) = v.parse::<usize>()
        {
            self.summary.max_prompt_chars = chars;
        }
        if let Ok(v) = std::env::var("TUTOR_MIN_RESPONSE_CHARS")
            && let Ok(chars) = v.parse::<usize>()
        {
            self.summary.min_response_chars = chars;
        }
        if let Ok(v) = std::env::var("TUTOR_MIN_DEEP_RESPONSE_CHARS")
            && let Ok(chars) = v.parse::<usize>()
        {
            self.summary.min_deep_response_chars = chars;
        }

        for provider in &mut self.providers {
            let env_key = format!("TUTOR_{}_API_KEY", provider.name.to_uppercase());
            if let Ok(key) = std::env::var(&env_key) {
                provider.api_key = Some(key);
            }
        }
    }

    /// Build the ordered, immutable registry handed to the orchestrator.
    #[must_use]
    pub fn registry(&self) -> ProviderRegistry {
        ProviderRegistry::new(
            self.providers
                .iter()
                .map(|p| ProviderDescriptor {
                    name: p.name.clone(),
                    url: p.url.clone(),
                    model: p.model.clone(),
                    api_key: p.api_key.clone(),
                    shape: p.shape,
                })
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Bound on document open/parse time, in seconds.
    #[serde(default = "default_parse_timeout_secs")]
    pub parse_timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            parse_timeout_secs: default_parse_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryConfig {
    /// Extracted text below this length is rejected before any provider call.
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,
    /// Hard cap on the text embedded in a prompt.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
    /// Minimum useful reply length for quick summaries.
    #[serde(default = "default_min_response_chars")]
    pub min_response_chars: usize,
    /// Minimum useful reply length for deep-dive summaries.
    #[serde(default = "default_min_deep_response_chars")]
    pub min_deep_response_chars: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_text_chars: default_min_text_chars(),
            max_prompt_chars: default_max_prompt_chars(),
            min_response_chars: default_min_response_chars(),
            min_deep_response_chars: default_min_deep_response_chars(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub name: String,
    pub url: String,
    pub model: String,
    #[serde(default)]
    pub shape: RequestShape,
    /// Injected from `TUTOR_<NAME>_API_KEY`; never serialized.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_parse_timeout_secs() -> u64 {
    tutor_extract::DEFAULT_PARSE_TIMEOUT_SECS
}

fn default_min_text_chars() -> usize {
    100
}

fn default_max_prompt_chars() -> usize {
    10_000
}

fn default_min_response_chars() -> usize {
    50
}

fn default_min_deep_response_chars() -> usize {
    500
}

fn default_providers() -> Vec<ProviderConfig> {
    let openai = |name: &str, url: &str, model: &str| ProviderConfig {
        name: name.into(),
        url: url.into(),
        model: model.into(),
        shape: RequestShape::OpenAi,
        api_key: None,
    };
    vec![
        openai(
            "OpenRouter",
            "https://openrouter.ai/api/v1/chat/completions",
            "openai/gpt-3.5-turbo",
        ),
        openai(
            "Groq",
            "https://api.groq.com/openai/v1/chat/completions",
            "gpt-3.5-turbo",
        ),
        openai(
            "Together",
            "https://api.together.xyz/v1/chat/completions",
            "gpt-3.5-turbo",
        ),
        ProviderConfig {
            name: "Claude".into(),
            url: "https://api.anthropic.com/v1/messages".into(),
            model: "claude-3-opus-20240229".into(),
            shape: RequestShape::Anthropic,
            api_key: None,
        },
        openai(
            "HuggingFace",
            "https://api-inference.huggingface.co/models/tiiuae/falcon-7b",
            "gpt-3.5-turbo",
        ),
    ]
}
