//! Keyword extraction for keyword-based retrieval.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use docent_model::{ChatProvider, with_timeout};
use tracing::debug;

use crate::error::Result;
use crate::prompts;

/// Asks the chat model for the search keywords of a query.
#[derive(Clone)]
pub struct KeywordExtractor {
    chat: Arc<dyn ChatProvider>,
    timeout: Duration,
}

impl KeywordExtractor {
    pub fn new(chat: Arc<dyn ChatProvider>, timeout: Duration) -> Self {
        Self { chat, timeout }
    }

    /// The keywords of `query` as a comma separated list.
    ///
    /// Falls back to `query` itself when the model replies with nothing, so
    /// the result is always embeddable.
    pub async fn extract(&self, query: &str) -> Result<String> {
        let messages = prompts::keyword_messages(query);
        let reply =
            with_timeout("keyword extraction", self.timeout, self.chat.generate(&messages)).await?;

        let keywords = normalize_keywords(&reply);
        debug!(query = %query, keywords = %keywords, "extracted keywords");
        if keywords.is_empty() { Ok(query.to_string()) } else { Ok(keywords) }
    }
}

/// Trim every keyword, drop empty ones and rejoin with `", "`.
fn normalize_keywords(reply: &str) -> String {
    reply
        .split([',', '\n'])
        .map(|k| k.trim().trim_start_matches(['-', '*']).trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Debug for KeywordExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordExtractor").field("chat", &self.chat.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keywords() {
        assert_eq!(
            normalize_keywords(" Mona Lisa ,Leonardo,, Louvre\n"),
            "Mona Lisa, Leonardo, Louvre"
        );
        assert_eq!(normalize_keywords("- sfumato\n- Renaissance"), "sfumato, Renaissance");
        assert_eq!(normalize_keywords("  \n "), "");
    }
}
