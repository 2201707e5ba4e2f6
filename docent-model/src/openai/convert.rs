//! Mapping between Docent messages and `async-openai` types.

use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionResponse, CreateChatCompletionStreamResponse,
};

use crate::error::{ProviderError, Result};
use crate::message::{Message, Role};

pub(crate) const PROVIDER: &str = "OpenAI";

/// Convert one conversation turn into a request message.
pub(crate) fn to_request_message(message: &Message) -> Result<ChatCompletionRequestMessage> {
    let content = message.content.as_str();
    let converted: ChatCompletionRequestMessage = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(provider_error)?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(provider_error)?
            .into(),
        Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map_err(provider_error)?
            .into(),
    };
    Ok(converted)
}

/// Text of the first choice. A missing choice is a decode error; a choice
/// with null content yields an empty string.
pub(crate) fn response_text(response: CreateChatCompletionResponse) -> Result<String> {
    let choice = response.choices.into_iter().next().ok_or_else(|| ProviderError::Decode {
        provider: PROVIDER.into(),
        message: "response contained no choices".into(),
    })?;
    Ok(choice.message.content.unwrap_or_default())
}

/// Text delta of one streamed chunk, `None` for chunks without text (role
/// announcements, finish markers).
pub(crate) fn chunk_text(chunk: CreateChatCompletionStreamResponse) -> Option<String> {
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|text| !text.is_empty())
}

/// Map an `async-openai` error onto the shared provider taxonomy.
pub(crate) fn provider_error(error: OpenAIError) -> ProviderError {
    match error {
        OpenAIError::ApiError(api) => {
            ProviderError::Api { provider: PROVIDER.into(), status: None, message: api.message }
        }
        OpenAIError::JSONDeserialize(e) => ProviderError::Decode {
            provider: PROVIDER.into(),
            message: format!("failed to parse response: {e}"),
        },
        OpenAIError::Reqwest(e) => ProviderError::Request {
            provider: PROVIDER.into(),
            message: format!("request failed: {e}"),
        },
        OpenAIError::StreamError(message) => ProviderError::Request {
            provider: PROVIDER.into(),
            message: format!("stream error: {message}"),
        },
        other => ProviderError::Request { provider: PROVIDER.into(), message: other.to_string() },
    }
}
