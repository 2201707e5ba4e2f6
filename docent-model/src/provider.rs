//! Chat provider trait.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::Result;
use crate::message::Message;

/// An incremental stream of generated text chunks.
///
/// The stream is single-consumer and cannot be restarted. Dropping it before
/// the end cancels generation and releases the underlying connection.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// A hosted model that generates a message from a sequence of role-tagged
/// messages.
///
/// Implementations perform a network call per invocation and do not cache.
///
/// # Example
///
/// ```rust,ignore
/// use docent_model::{ChatProvider, Message};
///
/// let reply = provider.generate(&[Message::user("Who painted the Mona Lisa?")]).await?;
/// ```
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// The model identifier used for requests.
    fn name(&self) -> &str;

    /// Generate a single complete response.
    async fn generate(&self, messages: &[Message]) -> Result<String>;

    /// Generate a response as a lazy stream of text chunks.
    async fn generate_stream(&self, messages: &[Message]) -> Result<ChatStream>;
}
