//! Configuration for the OpenAI chat provider.

use std::fmt;
use std::time::Duration;

use crate::error::{ProviderError, Result};

/// Base URL of the public OpenAI API.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Default deadline for a single request or stream read.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for an [`OpenAIClient`](super::OpenAIClient).
#[derive(Clone)]
pub struct OpenAIConfig {
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier (e.g. `gpt-4o-mini`).
    pub model: String,
    /// Base URL override for OpenAI-compatible servers.
    pub base_url: Option<String>,
    /// Optional `OpenAI-Organization` header.
    pub organization_id: Option<String>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Maximum number of generated tokens.
    pub max_tokens: Option<u32>,
    /// Deadline for a complete response, for connecting a stream, and for
    /// each subsequent stream read.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Create a config for the public OpenAI API.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            organization_id: None,
            temperature: None,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a config for an OpenAI-compatible server.
    pub fn compatible(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self { base_url: Some(base_url.into()), ..Self::new(api_key, model) }
    }

    /// Create a config reading the key from `OPENAI_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ProviderError::MissingCredential {
                provider: "OpenAI".into(),
                variable: "OPENAI_API_KEY".into(),
            })?;
        Ok(Self::new(api_key, model))
    }

    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL requests are sent to, without a trailing slash.
    pub(crate) fn api_base(&self) -> &str {
        self.base_url.as_deref().unwrap_or(OPENAI_API_BASE).trim_end_matches('/')
    }
}

impl fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("organization_id", &self.organization_id)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}
