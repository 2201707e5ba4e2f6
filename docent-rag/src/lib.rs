//! # docent-rag
//!
//! Retrieval-augmented question answering over curated artwork
//! descriptions.
//!
//! ## Overview
//!
//! - [`DocumentCollection`] - an immutable corpus with a prebuilt [`FlatIndex`]
//! - [`EmbeddingProvider`] - "generate a vector given text"
//! - [`QueryRewriter`] - resolves references in the last user turn
//! - [`IntentClassifier`] - artwork-only or general routing, failing open
//! - [`Retriever`] - embeds, routes, searches and formats the context block
//! - [`AnswerEngine`] - rewrite, retrieve, then stream a grounded answer
//!
//! Chat models come from [`docent_model`].
//!
//! ## Features
//!
//! - `openai` (default) - [`OpenAIEmbeddingProvider`](openai::OpenAIEmbeddingProvider)
//!   and [`AnswerEngine::from_config`]

pub mod collection;
pub mod config;
pub mod context;
pub mod document;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod index;
pub mod intent;
pub mod keywords;
#[cfg(feature = "openai")]
pub mod openai;
pub mod prompts;
pub mod retriever;
pub mod rewrite;

pub use collection::DocumentCollection;
pub use config::{DocentConfig, DocentConfigBuilder};
pub use context::format_context;
pub use document::{CollectionTag, Document, EmbeddedDocument, RetrievalResult, SearchResult};
pub use embedding::EmbeddingProvider;
pub use engine::{AnswerEngine, AnswerEngineBuilder, build_messages};
pub use error::{RagError, Result};
pub use index::{FlatIndex, Neighbor, squared_l2};
pub use intent::{Intent, IntentClassifier, parse_intent};
pub use keywords::KeywordExtractor;
#[cfg(feature = "openai")]
pub use openai::OpenAIEmbeddingProvider;
pub use retriever::{DEFAULT_TOP_K, Retriever, merge_by_distance};
pub use rewrite::QueryRewriter;
