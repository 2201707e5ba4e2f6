//! Configuration for the answer engine.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RagError, Result};

/// The default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// The default embedding model.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Settings for a [`AnswerEngine`](crate::AnswerEngine).
///
/// The API key is read at startup and never serialised.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DocentConfig {
    /// Chat model used for rewriting, classification and answers.
    pub model_name: String,
    /// Model used to embed queries.
    pub embedding_model_name: String,
    /// Number of documents handed to the model per question.
    pub top_k: usize,
    /// Log every query rewrite with its input and output.
    pub verbose: bool,
    /// Deadline for each external call, in seconds.
    pub request_timeout_secs: u64,
    /// Embed extracted keywords instead of the full query.
    pub keyword_retrieval: bool,
    #[serde(skip)]
    pub api_key: String,
}

impl Default for DocentConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            embedding_model_name: DEFAULT_EMBEDDING_MODEL.to_string(),
            top_k: crate::retriever::DEFAULT_TOP_K,
            verbose: false,
            request_timeout_secs: 30,
            keyword_retrieval: false,
            api_key: String::new(),
        }
    }
}

impl DocentConfig {
    /// Create a new builder for constructing a [`DocentConfig`].
    pub fn builder() -> DocentConfigBuilder {
        DocentConfigBuilder::default()
    }

    /// Read the configuration from the process environment.
    ///
    /// `OPENAI_API_KEY` is required. `DOCENT_MODEL`,
    /// `DOCENT_EMBEDDING_MODEL`, `DOCENT_TOP_K`, `DOCENT_VERBOSE`,
    /// `DOCENT_TIMEOUT_SECS` and `DOCENT_KEYWORD_RETRIEVAL` override the
    /// defaults when set.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if the key is missing, a value does
    /// not parse, or the result fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| RagError::ConfigError("OPENAI_API_KEY is not set".to_string()))?;

        let mut builder = Self::builder().api_key(api_key);
        if let Some(model) = lookup("DOCENT_MODEL") {
            builder = builder.model_name(model);
        }
        if let Some(model) = lookup("DOCENT_EMBEDDING_MODEL") {
            builder = builder.embedding_model_name(model);
        }
        if let Some(value) = lookup("DOCENT_TOP_K") {
            builder = builder.top_k(parse_var("DOCENT_TOP_K", &value)?);
        }
        if let Some(value) = lookup("DOCENT_VERBOSE") {
            builder = builder.verbose(parse_flag("DOCENT_VERBOSE", &value)?);
        }
        if let Some(value) = lookup("DOCENT_TIMEOUT_SECS") {
            builder = builder.request_timeout_secs(parse_var("DOCENT_TIMEOUT_SECS", &value)?);
        }
        if let Some(value) = lookup("DOCENT_KEYWORD_RETRIEVAL") {
            builder = builder.keyword_retrieval(parse_flag("DOCENT_KEYWORD_RETRIEVAL", &value)?);
        }
        builder.build()
    }

    /// The per-call deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| RagError::ConfigError(format!("{name}={value:?} is invalid: {e}")))
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(RagError::ConfigError(format!("{name}={value:?} is not a boolean"))),
    }
}

impl fmt::Debug for DocentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocentConfig")
            .field("model_name", &self.model_name)
            .field("embedding_model_name", &self.embedding_model_name)
            .field("top_k", &self.top_k)
            .field("verbose", &self.verbose)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("keyword_retrieval", &self.keyword_retrieval)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .finish()
    }
}

/// Builder for constructing a validated [`DocentConfig`].
#[derive(Debug, Clone, Default)]
pub struct DocentConfigBuilder {
    config: DocentConfig,
}

impl DocentConfigBuilder {
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.config.model_name = name.into();
        self
    }

    pub fn embedding_model_name(mut self, name: impl Into<String>) -> Self {
        self.config.embedding_model_name = name.into();
        self
    }

    /// Set the number of documents retrieved per question.
    pub fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn keyword_retrieval(mut self, enabled: bool) -> Self {
        self.config.keyword_retrieval = enabled;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    /// Build the [`DocentConfig`], validating its values.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if:
    /// - `top_k == 0`
    /// - `request_timeout_secs == 0`
    /// - a model name is empty
    pub fn build(self) -> Result<DocentConfig> {
        let config = self.config;
        if config.top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        if config.request_timeout_secs == 0 {
            return Err(RagError::ConfigError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        if config.model_name.trim().is_empty() || config.embedding_model_name.trim().is_empty() {
            return Err(RagError::ConfigError("model names must not be empty".to_string()));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DocentConfig::builder().build().unwrap();
        assert_eq!(config.model_name, "gpt-4o-mini");
        assert_eq!(config.embedding_model_name, "text-embedding-3-small");
        assert_eq!(config.top_k, 5);
        assert!(!config.verbose);
        assert!(!config.keyword_retrieval);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_validation() {
        assert!(matches!(DocentConfig::builder().top_k(0).build(), Err(RagError::ConfigError(_))));
        assert!(matches!(
            DocentConfig::builder().request_timeout_secs(0).build(),
            Err(RagError::ConfigError(_))
        ));
        assert!(matches!(
            DocentConfig::builder().model_name(" ").build(),
            Err(RagError::ConfigError(_))
        ));
    }

    #[test]
    fn test_from_lookup_requires_key() {
        let err = DocentConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = DocentConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("DOCENT_MODEL", "gpt-4o"),
            ("DOCENT_TOP_K", "3"),
            ("DOCENT_VERBOSE", "true"),
            ("DOCENT_TIMEOUT_SECS", "10"),
            ("DOCENT_KEYWORD_RETRIEVAL", "1"),
        ]))
        .unwrap();

        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model_name, "gpt-4o");
        assert_eq!(config.embedding_model_name, DEFAULT_EMBEDDING_MODEL);
        assert_eq!(config.top_k, 3);
        assert!(config.verbose);
        assert!(config.keyword_retrieval);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let bad_number = lookup(&[("OPENAI_API_KEY", "sk"), ("DOCENT_TOP_K", "five")]);
        assert!(matches!(DocentConfig::from_lookup(bad_number), Err(RagError::ConfigError(_))));

        let bad_flag = lookup(&[("OPENAI_API_KEY", "sk"), ("DOCENT_VERBOSE", "loud")]);
        assert!(matches!(DocentConfig::from_lookup(bad_flag), Err(RagError::ConfigError(_))));
    }

    #[test]
    fn test_api_key_never_serialized_or_printed() {
        let config = DocentConfig::builder().api_key("sk-secret").build().unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(!format!("{config:?}").contains("sk-secret"));

        let back: DocentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.top_k, config.top_k);
        assert!(back.api_key.is_empty());
    }
}
