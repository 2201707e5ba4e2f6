//! Turning the last user turn into a standalone query.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use docent_model::{ChatProvider, Message, last_user_content, with_timeout};
use tracing::{debug, info};

use crate::error::{RagError, Result};
use crate::prompts;

/// Rewrites the final user turn of a conversation so that it can be
/// retrieved against without the rest of the conversation.
///
/// The model's reply is returned verbatim. With `verbose` set, every rewrite
/// is logged at `info` with `before` and `after` fields.
#[derive(Clone)]
pub struct QueryRewriter {
    chat: Arc<dyn ChatProvider>,
    timeout: Duration,
    verbose: bool,
}

impl QueryRewriter {
    pub fn new(chat: Arc<dyn ChatProvider>, timeout: Duration) -> Self {
        Self { chat, timeout, verbose: false }
    }

    /// Log each rewrite with its input and output.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Rewrite the last turn of `history`. The history is not modified.
    ///
    /// # Errors
    ///
    /// - [`RagError::EmptyHistory`] if `history` is empty.
    /// - [`RagError::LastTurnNotUser`] if the last message is not a user turn.
    /// - [`RagError::Provider`] if the model call fails or times out.
    pub async fn rewrite(&self, history: &[Message]) -> Result<String> {
        let before = last_user_turn(history)?;

        let messages = prompts::rewrite_messages(history);
        let rewritten =
            with_timeout("query rewrite", self.timeout, self.chat.generate(&messages)).await?;

        if self.verbose {
            info!(%before, after = %rewritten, "rewrote query");
        } else {
            debug!(turns = history.len(), "rewrote query");
        }
        Ok(rewritten)
    }
}

/// The content of the final message of `history`, which must be a user turn.
pub(crate) fn last_user_turn(history: &[Message]) -> Result<&str> {
    last_user_content(history).ok_or_else(|| match history.last() {
        None => RagError::EmptyHistory,
        Some(last) => RagError::LastTurnNotUser { role: last.role },
    })
}

impl fmt::Debug for QueryRewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryRewriter")
            .field("chat", &self.chat.name())
            .field("timeout", &self.timeout)
            .field("verbose", &self.verbose)
            .finish()
    }
}
