//! The question answering pipeline.
//!
//! [`AnswerEngine::ask`] runs three stages strictly in order:
//!
//! 1. rewrite the last user turn into a standalone query,
//! 2. classify it and retrieve matching documents,
//! 3. stream an answer grounded on those documents.
//!
//! A failure at any stage aborts the request; no partial or ungrounded
//! answer is produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use docent_rag::{AnswerEngine, DocentConfig};
//! use futures::StreamExt;
//!
//! let engine = AnswerEngine::builder()
//!     .config(DocentConfig::default())
//!     .chat_provider(Arc::new(chat))
//!     .embedding_provider(Arc::new(embedder))
//!     .build()?;
//!
//! let mut answer = engine.ask(&history, &artwork, &auxiliary).await?;
//! while let Some(chunk) = answer.next().await {
//!     print!("{}", chunk?);
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use docent_model::{ChatProvider, ChatStream, Conversation, Message, Role, with_timeout};
use tracing::{info, instrument};

use crate::collection::DocumentCollection;
use crate::config::DocentConfig;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::intent::IntentClassifier;
use crate::keywords::KeywordExtractor;
use crate::prompts;
use crate::retriever::Retriever;
use crate::rewrite::{QueryRewriter, last_user_turn};

/// Answers questions about artworks from a conversation history.
///
/// Holds no per-request state; one engine can serve concurrent requests.
/// Construct one via [`AnswerEngine::builder()`].
#[derive(Clone)]
pub struct AnswerEngine {
    config: DocentConfig,
    chat: Arc<dyn ChatProvider>,
    rewriter: QueryRewriter,
    retriever: Retriever,
}

impl AnswerEngine {
    /// Create a new [`AnswerEngineBuilder`].
    pub fn builder() -> AnswerEngineBuilder {
        AnswerEngineBuilder::default()
    }

    /// Build an engine backed by OpenAI chat and embedding models.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Provider`] if the API key is empty or the HTTP
    /// client cannot be created.
    #[cfg(feature = "openai")]
    pub fn from_config(config: DocentConfig) -> Result<Self> {
        use docent_model::{OpenAIClient, OpenAIConfig};

        use crate::openai::OpenAIEmbeddingProvider;

        let timeout = config.request_timeout();
        let chat = OpenAIClient::new(
            OpenAIConfig::new(config.api_key.clone(), config.model_name.clone())
                .with_timeout(timeout),
        )?;
        let embedder = OpenAIEmbeddingProvider::new(config.api_key.clone())?
            .with_model(config.embedding_model_name.clone())
            .with_timeout(timeout);

        Self::builder()
            .config(config)
            .chat_provider(Arc::new(chat))
            .embedding_provider(Arc::new(embedder))
            .build()
    }

    pub fn config(&self) -> &DocentConfig {
        &self.config
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Answer the last user turn of `history` as a stream of text chunks.
    ///
    /// `history` is not modified. The returned stream is handed through
    /// untouched; dropping it cancels the generation.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyHistory`] / [`RagError::LastTurnNotUser`] for an
    ///   unusable history.
    /// - [`RagError::Provider`] if rewriting, classification, embedding or
    ///   opening the answer stream fails or times out.
    /// - [`RagError::DimensionMismatch`] if the query embedding does not fit
    ///   a collection.
    #[instrument(skip_all, fields(turns = history.len()))]
    pub async fn ask(
        &self,
        history: &[Message],
        artwork: &DocumentCollection,
        auxiliary: &DocumentCollection,
    ) -> Result<ChatStream> {
        last_user_turn(history)?;

        let query = self.rewriter.rewrite(history).await?;
        let context = self.retriever.retrieve(&query, artwork, auxiliary).await?;
        let messages = build_messages(history, &query, &context)?;

        info!(messages = messages.len(), grounded = !context.is_empty(), "generating answer");
        let stream = with_timeout(
            "answer stream",
            self.config.request_timeout(),
            self.chat.generate_stream(&messages),
        )
        .await?;
        Ok(stream)
    }

    /// An opening greeting for a new visitor.
    pub async fn greeting(&self) -> Result<String> {
        let messages = prompts::greeting_messages();
        let greeting =
            with_timeout("greeting", self.config.request_timeout(), self.chat.generate(&messages))
                .await?;
        Ok(greeting)
    }

    /// A short summary of `text`.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        let messages = prompts::summary_messages(text);
        let summary =
            with_timeout("summary", self.config.request_timeout(), self.chat.generate(&messages))
                .await?;
        Ok(summary)
    }

    /// A short summary of the latest assistant turn in `history`, or `None`
    /// if nothing has been answered yet.
    pub async fn summarize_last_answer(&self, history: &[Message]) -> Result<Option<String>> {
        match history.iter().rev().find(|m| m.role == Role::Assistant) {
            Some(answer) => self.summarize(&answer.content).await.map(Some),
            None => Ok(None),
        }
    }
}

/// The message list sent to the answering model.
///
/// A copy of `history` whose last turn reads `query`. A non-empty `context`
/// is inserted as a system message directly before that turn.
///
/// # Errors
///
/// Returns [`RagError::EmptyHistory`] or [`RagError::LastTurnNotUser`] if
/// `history` does not end with a user turn.
pub fn build_messages(history: &[Message], query: &str, context: &str) -> Result<Conversation> {
    last_user_turn(history)?;

    let mut messages = history.to_vec();
    let mut last = messages.pop().ok_or(RagError::EmptyHistory)?;
    last.content = query.to_string();

    if !context.is_empty() {
        messages.push(prompts::grounding_message(context));
    }
    messages.push(last);
    Ok(messages)
}

impl fmt::Debug for AnswerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerEngine")
            .field("config", &self.config)
            .field("chat", &self.chat.name())
            .field("retriever", &self.retriever)
            .finish()
    }
}

/// Builder for constructing an [`AnswerEngine`].
///
/// The chat and embedding providers are required; the configuration
/// defaults to [`DocentConfig::default()`].
#[derive(Default)]
pub struct AnswerEngineBuilder {
    config: Option<DocentConfig>,
    chat: Option<Arc<dyn ChatProvider>>,
    embedder: Option<Arc<dyn EmbeddingProvider>>,
}

impl AnswerEngineBuilder {
    pub fn config(mut self, config: DocentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the chat model used by every stage.
    pub fn chat_provider(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.chat = Some(provider);
        self
    }

    /// Set the embedding model used for queries.
    pub fn embedding_provider(mut self, provider: Arc<dyn EmbeddingProvider>) -> Self {
        self.embedder = Some(provider);
        self
    }

    /// Build the [`AnswerEngine`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a provider is missing or the
    /// configuration asks for zero documents.
    pub fn build(self) -> Result<AnswerEngine> {
        let config = self.config.unwrap_or_default();
        let chat = self
            .chat
            .ok_or_else(|| RagError::ConfigError("chat_provider is required".to_string()))?;
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::ConfigError("embedding_provider is required".to_string()))?;

        let timeout = config.request_timeout();
        let rewriter = QueryRewriter::new(chat.clone(), timeout).with_verbose(config.verbose);
        let classifier = IntentClassifier::new(chat.clone(), timeout);
        let mut retriever =
            Retriever::new(embedder, classifier, timeout).with_top_k(config.top_k)?;
        if config.keyword_retrieval {
            retriever = retriever.with_keywords(KeywordExtractor::new(chat.clone(), timeout));
        }

        Ok(AnswerEngine { config, chat, rewriter, retriever })
    }
}
