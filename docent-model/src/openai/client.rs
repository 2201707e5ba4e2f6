//! OpenAI client implementation.

use async_openai::Client;
use async_openai::config::OpenAIConfig as AsyncOpenAIConfig;
use async_openai::types::{CreateChatCompletionRequest, CreateChatCompletionRequestArgs};
use async_stream::stream;
use async_trait::async_trait;
use futures::StreamExt;
use tracing::{debug, error, instrument};

use super::config::OpenAIConfig;
use super::convert::{self, PROVIDER};
use crate::error::{ProviderError, Result};
use crate::message::Message;
use crate::provider::{ChatProvider, ChatStream};
use crate::timeout::with_timeout;

/// OpenAI client for the standard OpenAI API and OpenAI-compatible APIs.
///
/// Every call is bounded by [`OpenAIConfig::timeout`]: complete responses as a
/// whole, streams per read. Failed calls are never retried.
pub struct OpenAIClient {
    client: Client<AsyncOpenAIConfig>,
    config: OpenAIConfig,
}

impl OpenAIClient {
    /// Create a new OpenAI client.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredential {
                provider: PROVIDER.into(),
                variable: "api_key".into(),
            });
        }

        let mut openai_config = AsyncOpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(config.api_base());
        if let Some(org_id) = &config.organization_id {
            openai_config = openai_config.with_org_id(org_id);
        }

        let http = reqwest::Client::builder().connect_timeout(config.timeout).build().map_err(
            |e| ProviderError::Request {
                provider: PROVIDER.into(),
                message: format!("failed to build HTTP client: {e}"),
            },
        )?;

        let client =
            Client::with_config(openai_config).with_http_client(http).with_backoff(no_retry());

        Ok(Self { client, config })
    }

    /// Create a client for an OpenAI-compatible API.
    pub fn compatible(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        Self::new(OpenAIConfig::compatible(api_key, base_url, model))
    }

    /// The active configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn request(&self, messages: &[Message]) -> Result<CreateChatCompletionRequest> {
        let messages =
            messages.iter().map(convert::to_request_message).collect::<Result<Vec<_>>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.config.model).messages(messages);
        if let Some(temperature) = self.config.temperature {
            builder.temperature(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            builder.max_tokens(max_tokens);
        }
        builder.build().map_err(convert::provider_error)
    }
}

/// A backoff policy that gives up on the first failure.
fn no_retry() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoff {
        max_elapsed_time: Some(std::time::Duration::ZERO),
        ..Default::default()
    }
}

#[async_trait]
impl ChatProvider for OpenAIClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    #[instrument(skip_all, fields(model = %self.config.model, messages.count = messages.len()))]
    async fn generate(&self, messages: &[Message]) -> Result<String> {
        let request = self.request(messages)?;
        with_timeout("chat completion", self.config.timeout, async {
            let response = self.client.chat().create(request).await.map_err(|e| {
                error!(provider = PROVIDER, error = %e, "chat completion failed");
                convert::provider_error(e)
            })?;
            let text = convert::response_text(response)?;
            debug!(reply_len = text.len(), "chat completion received");
            Ok(text)
        })
        .await
    }

    #[instrument(skip_all, fields(model = %self.config.model, messages.count = messages.len()))]
    async fn generate_stream(&self, messages: &[Message]) -> Result<ChatStream> {
        let timeout = self.config.timeout;
        let request = self.request(messages)?;

        let mut chunks = with_timeout("chat stream connect", timeout, async {
            self.client.chat().create_stream(request).await.map_err(convert::provider_error)
        })
        .await?;

        // The connection is only known to be good once the first event
        // arrives; failing before that is a failure to open the stream.
        let first =
            with_timeout("chat stream connect", timeout, async { Ok(chunks.next().await) }).await?;
        if let Some(Err(e)) = first {
            error!(provider = PROVIDER, error = %e, "failed to open chat stream");
            return Err(convert::provider_error(e));
        }

        // Errors end the stream after being yielded once.
        let stream = stream! {
            let mut next = first;
            while let Some(item) = next {
                match item {
                    Ok(chunk) => {
                        if let Some(text) = convert::chunk_text(chunk) {
                            yield Ok(text);
                        }
                    }
                    Err(e) => {
                        error!(provider = PROVIDER, error = %e, "stream error");
                        yield Err(convert::provider_error(e));
                        break;
                    }
                }

                next = match with_timeout("chat stream read", timeout, async {
                    Ok(chunks.next().await)
                })
                .await
                {
                    Ok(item) => item,
                    Err(e) => {
                        yield Err(e);
                        break;
                    }
                };
            }
        };

        Ok(Box::pin(stream))
    }
}
