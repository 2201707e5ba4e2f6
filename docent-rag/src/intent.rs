//! Routing a query to the artwork collection alone or to every collection.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use docent_model::{ChatProvider, with_timeout};
use tracing::debug;

use crate::error::Result;
use crate::prompts;

/// Which collections a query should be answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Artwork descriptions alone are enough.
    ArtworkOnly,
    /// Search artwork and auxiliary documents.
    General,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Intent::ArtworkOnly => "artwork_only",
            Intent::General => "general",
        })
    }
}

/// Parse a classifier reply.
///
/// Only a reply reading `true` (ignoring ASCII case, surrounding whitespace,
/// quotes and one trailing period) narrows the search to
/// [`Intent::ArtworkOnly`]. Anything else, including empty or malformed
/// output, is [`Intent::General`].
pub fn parse_intent(reply: &str) -> Intent {
    let token = reply.trim();
    let token = token.strip_suffix('.').unwrap_or(token);
    let token = token.trim_matches(|c| c == '"' || c == '\'' || c == '`').trim();

    if token.eq_ignore_ascii_case("true") { Intent::ArtworkOnly } else { Intent::General }
}

/// Asks the chat model whether a query is about artworks only.
#[derive(Clone)]
pub struct IntentClassifier {
    chat: Arc<dyn ChatProvider>,
    timeout: Duration,
}

impl IntentClassifier {
    pub fn new(chat: Arc<dyn ChatProvider>, timeout: Duration) -> Self {
        Self { chat, timeout }
    }

    /// Classify `query`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Provider`](crate::RagError::Provider) if the model
    /// call fails or exceeds the timeout. An unparseable reply is not an
    /// error.
    pub async fn classify(&self, query: &str) -> Result<Intent> {
        let messages = prompts::classifier_messages(query);
        let reply =
            with_timeout("intent classification", self.timeout, self.chat.generate(&messages))
                .await?;

        let intent = parse_intent(&reply);
        debug!(%intent, reply = %reply, "classified query");
        Ok(intent)
    }
}

impl fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentClassifier")
            .field("chat", &self.chat.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_variants_are_artwork_only() {
        for reply in ["True", "true", " TRUE \n", "True.", "\"True\"", "'true'."] {
            assert_eq!(parse_intent(reply), Intent::ArtworkOnly, "reply {reply:?}");
        }
    }

    #[test]
    fn test_everything_else_is_general() {
        let replies =
            ["False", "", "   ", "Yes", "True, because it asks about a painting", "maybe", "Tru"];
        for reply in replies {
            assert_eq!(parse_intent(reply), Intent::General, "reply {reply:?}");
        }
    }
}
