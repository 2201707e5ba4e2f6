//! Intent-routed retrieval across the artwork and auxiliary collections.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use docent_model::with_timeout;
use tracing::{info, instrument};

use crate::collection::DocumentCollection;
use crate::context::format_context;
use crate::document::RetrievalResult;
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::intent::{Intent, IntentClassifier};
use crate::keywords::KeywordExtractor;

/// The default number of documents handed to the model.
pub const DEFAULT_TOP_K: usize = 5;

/// Embeds a query, routes it by intent and searches the matching collections.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingProvider>,
    classifier: IntentClassifier,
    keywords: Option<KeywordExtractor>,
    top_k: usize,
    timeout: Duration,
}

impl Retriever {
    /// Create a retriever returning [`DEFAULT_TOP_K`] documents.
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        classifier: IntentClassifier,
        timeout: Duration,
    ) -> Self {
        Self { embedder, classifier, keywords: None, top_k: DEFAULT_TOP_K, timeout }
    }

    /// Set the combined number of documents returned.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `top_k` is zero.
    pub fn with_top_k(mut self, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        self.top_k = top_k;
        Ok(self)
    }

    /// Embed the query's keywords instead of the query itself.
    pub fn with_keywords(mut self, extractor: KeywordExtractor) -> Self {
        self.keywords = Some(extractor);
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Retrieve context for `query` as a `data<n>: <text>//` block.
    ///
    /// Returns an empty string when nothing was retrieved.
    pub async fn retrieve(
        &self,
        query: &str,
        artwork: &DocumentCollection,
        auxiliary: &DocumentCollection,
    ) -> Result<String> {
        let (_, results) = self.retrieve_documents(query, artwork, auxiliary).await?;
        Ok(format_context(&results))
    }

    /// Retrieve the documents for `query` along with the intent that routed it.
    ///
    /// For [`Intent::ArtworkOnly`] only `artwork` is searched. For
    /// [`Intent::General`] both collections are searched and merged with
    /// [`merge_by_distance`].
    #[instrument(skip_all, fields(top_k = self.top_k))]
    pub async fn retrieve_documents(
        &self,
        query: &str,
        artwork: &DocumentCollection,
        auxiliary: &DocumentCollection,
    ) -> Result<(Intent, RetrievalResult)> {
        let embedding = self.embed_query(query).await?;
        let intent = self.classifier.classify(query).await?;

        let results = match intent {
            Intent::ArtworkOnly => artwork.search(&embedding, self.top_k)?,
            Intent::General => {
                let from_artwork = artwork.search(&embedding, self.top_k)?;
                let from_auxiliary = auxiliary.search(&embedding, self.top_k)?;
                merge_by_distance(from_artwork, from_auxiliary, self.top_k)
            }
        };

        info!(%intent, documents = results.len(), "retrieved context");
        Ok((intent, results))
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let text = match &self.keywords {
            Some(extractor) => extractor.extract(query).await?,
            None => query.to_string(),
        };
        let embedding =
            with_timeout("query embedding", self.timeout, self.embedder.embed(&text)).await?;
        Ok(embedding)
    }
}

/// Merge two ascending result lists into one, keeping the `k` closest.
///
/// On equal distances `artwork` entries come first; each side keeps its own
/// order.
pub fn merge_by_distance(
    artwork: RetrievalResult,
    auxiliary: RetrievalResult,
    k: usize,
) -> RetrievalResult {
    let mut merged = Vec::with_capacity(k.min(artwork.len() + auxiliary.len()));
    let mut artwork = artwork.into_iter().peekable();
    let mut auxiliary = auxiliary.into_iter().peekable();

    while merged.len() < k {
        let take_artwork = match (artwork.peek(), auxiliary.peek()) {
            (Some(a), Some(b)) => a.distance <= b.distance,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_artwork { artwork.next() } else { auxiliary.next() };
        merged.extend(next);
    }
    merged
}

impl fmt::Debug for Retriever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retriever")
            .field("classifier", &self.classifier)
            .field("keywords", &self.keywords.is_some())
            .field("top_k", &self.top_k)
            .field("timeout", &self.timeout)
            .finish()
    }
}
