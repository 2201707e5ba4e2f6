//! Embedding provider trait for generating vector embeddings from text.

use async_trait::async_trait;
use docent_model::Result;

/// A provider that generates vector embeddings from text input.
///
/// Implementations wrap a hosted embedding model. Failures are reported as
/// [`ProviderError`](docent_model::ProviderError) and are never swallowed.
/// The default [`embed_batch`](EmbeddingProvider::embed_batch)
/// implementation calls [`embed`](EmbeddingProvider::embed) sequentially;
/// backends that support native batching should override it.
///
/// # Example
///
/// ```rust,ignore
/// use docent_rag::EmbeddingProvider;
///
/// let embedding = provider.embed("Tell me about the Mona Lisa").await?;
/// assert_eq!(embedding.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding vector for a single text input.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding vectors for a batch of text inputs, in input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }

    /// Return the dimensionality of embeddings produced by this provider.
    fn dimensions(&self) -> usize;
}
