//! Error types for the `docent-rag` crate.

use docent_model::{ProviderError, Role};
use thiserror::Error;

/// Errors that can occur while answering a query.
///
/// Every stage of the pipeline surfaces its failure unchanged; none is
/// retried or replaced by a degraded answer.
#[derive(Debug, Error)]
pub enum RagError {
    /// A hosted chat or embedding call failed or timed out.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A vector's length disagrees with the index it is used against.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality of the index.
        expected: usize,
        /// Dimensionality of the offending vector.
        actual: usize,
    },

    /// The conversation to answer has no messages.
    #[error("Conversation history is empty")]
    EmptyHistory,

    /// The last message of the conversation is not a user turn.
    #[error("Last message must be a user turn, found {role}")]
    LastTurnNotUser {
        /// Role of the last message.
        role: Role,
    },

    /// A collection could not be built or loaded.
    #[error("Collection error ({name}): {message}")]
    Collection {
        /// Name of the collection.
        name: String,
        /// A description of the failure.
        message: String,
    },

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl RagError {
    /// Returns `true` if the error is a provider timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Provider(e) if e.is_timeout())
    }
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
