//! Deadline helper for external calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{ProviderError, Result};

/// Run `future` with a deadline, mapping expiry to [`ProviderError::Timeout`].
///
/// The future is dropped when the deadline passes, which cancels any
/// in-flight request it owns.
///
/// # Example
///
/// ```rust,ignore
/// let after = Duration::from_secs(30);
/// let reply = with_timeout("query rewrite", after, chat.generate(&prompt)).await?;
/// ```
pub async fn with_timeout<T, F>(operation: &str, after: Duration, future: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(after, future).await {
        Ok(result) => result,
        Err(_) => {
            warn!(operation, timeout_ms = after.as_millis() as u64, "operation timed out");
            Err(ProviderError::Timeout { operation: operation.to_string(), after })
        }
    }
}
