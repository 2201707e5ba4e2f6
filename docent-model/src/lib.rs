//! # docent-model
//!
//! Chat model providers for the Docent assistant.
//!
//! ## Overview
//!
//! This crate provides the chat side of the assistant:
//!
//! - [`Message`] / [`Role`] - role-tagged conversation turns
//! - [`ChatProvider`] - "generate text given messages", complete or streamed
//! - [`ProviderError`] - the failure taxonomy shared by every external model call
//! - [`OpenAIClient`] - OpenAI (and OpenAI-compatible) chat completions
//! - [`MockChatProvider`] - scripted provider for tests and offline demos
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docent_model::{ChatProvider, Message};
//! use docent_model::openai::{OpenAIClient, OpenAIConfig};
//! use futures::StreamExt;
//!
//! let model = OpenAIClient::new(OpenAIConfig::new(
//!     std::env::var("OPENAI_API_KEY")?,
//!     "gpt-4o-mini",
//! ))?;
//!
//! let mut stream = model.generate_stream(&[Message::user("Hello")]).await?;
//! while let Some(chunk) = stream.next().await {
//!     print!("{}", chunk?);
//! }
//! ```
//!
//! ## Streaming
//!
//! Streams are single-consumer and not restartable. Dropping a [`ChatStream`]
//! before it is exhausted cancels the generation and releases the underlying
//! connection.

pub mod error;
pub mod message;
pub mod mock;
#[cfg(feature = "openai")]
pub mod openai;
pub mod provider;
pub mod timeout;

pub use error::{ProviderError, Result};
pub use message::{Conversation, Message, Role, last_user_content};
pub use mock::MockChatProvider;
#[cfg(feature = "openai")]
pub use openai::{OpenAIClient, OpenAIConfig};
pub use provider::{ChatProvider, ChatStream};
pub use timeout::with_timeout;
