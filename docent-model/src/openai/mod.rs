//! OpenAI chat completions provider.
//!
//! Works with the OpenAI API and any server exposing the same
//! `/chat/completions` contract (vLLM, Ollama, LM Studio, ...).
//!
//! # Example
//!
//! ```rust,ignore
//! use docent_model::openai::{OpenAIClient, OpenAIConfig};
//!
//! // OpenAI
//! let chat = OpenAIClient::new(OpenAIConfig::from_env("gpt-4o-mini")?)?;
//!
//! // OpenAI-compatible server
//! let local = OpenAIClient::new(OpenAIConfig::compatible(
//!     "unused",
//!     "http://localhost:11434/v1",
//!     "llama3.1",
//! ))?;
//! ```

mod client;
mod config;
mod convert;

pub use client::OpenAIClient;
pub use config::{OPENAI_API_BASE, OpenAIConfig};
