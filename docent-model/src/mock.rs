//! Scripted chat provider for tests and offline demos.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{ProviderError, Result};
use crate::message::{Conversation, Message};
use crate::provider::{ChatProvider, ChatStream};

/// A [`ChatProvider`] that answers from scripted queues.
///
/// Complete replies ([`generate`](ChatProvider::generate)) and streams
/// ([`generate_stream`](ChatProvider::generate_stream)) are popped from two
/// separate FIFO queues. Every request is recorded, and the number of streams
/// that are still alive can be observed to check that dropping a stream
/// releases it.
///
/// # Example
///
/// ```rust,ignore
/// use docent_model::MockChatProvider;
///
/// let mock = MockChatProvider::new()
///     .with_reply("Who painted the Mona Lisa?")
///     .with_reply("True")
///     .with_stream(["Leonardo ", "da Vinci."]);
/// ```
#[derive(Debug, Default)]
pub struct MockChatProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    streams: Mutex<VecDeque<Vec<Result<String>>>>,
    requests: Mutex<Vec<Conversation>>,
    delay: Option<Duration>,
    open_streams: Arc<AtomicUsize>,
}

impl MockChatProvider {
    /// Create a provider with empty scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a complete reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        lock(&self.replies).push_back(Ok(reply.into()));
        self
    }

    /// Queue a failing complete reply.
    pub fn with_error(self, error: ProviderError) -> Self {
        lock(&self.replies).push_back(Err(error));
        self
    }

    /// Queue a stream that yields the given chunks in order.
    pub fn with_stream<I, S>(self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let chunks = chunks.into_iter().map(|c| Ok(c.into())).collect();
        lock(&self.streams).push_back(chunks);
        self
    }

    /// Queue a stream made of arbitrary chunk results.
    pub fn with_stream_results(self, chunks: Vec<Result<String>>) -> Self {
        lock(&self.streams).push_back(chunks);
        self
    }

    /// Sleep for `delay` before answering each request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<Conversation> {
        lock(&self.requests).clone()
    }

    /// Number of streams handed out that have not been dropped yet.
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    async fn record(&self, messages: &[Message]) {
        lock(&self.requests).push(messages.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn script_exhausted(kind: &str) -> ProviderError {
    ProviderError::Request { provider: "mock".into(), message: format!("no scripted {kind} left") }
}

/// Decrements the open-stream counter when the stream it lives in is dropped.
struct StreamGuard(Arc<AtomicUsize>);

impl StreamGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, messages: &[Message]) -> Result<String> {
        self.record(messages).await;
        let reply =
            lock(&self.replies).pop_front().unwrap_or_else(|| Err(script_exhausted("reply")));
        debug!(ok = reply.is_ok(), "mock reply");
        reply
    }

    async fn generate_stream(&self, messages: &[Message]) -> Result<ChatStream> {
        self.record(messages).await;
        let chunks = lock(&self.streams).pop_front().ok_or_else(|| script_exhausted("stream"))?;
        let guard = StreamGuard::new(self.open_streams.clone());

        let stream = async_stream::stream! {
            let _guard = guard;
            for chunk in chunks {
                yield chunk;
            }
        };

        Ok(Box::pin(stream))
    }
}
