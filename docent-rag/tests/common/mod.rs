//! Shared test doubles for the docent-rag integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use docent_model::{MockChatProvider, ProviderError};
use docent_rag::{
    AnswerEngine, CollectionTag, DocentConfig, Document, DocumentCollection, EmbeddedDocument,
    EmbeddingProvider,
};

/// An embedder answering from a fixed text-to-vector table.
///
/// Unknown texts fail with a [`ProviderError::Request`], so a test notices
/// when the pipeline embeds something unexpected.
#[derive(Default)]
pub struct TableEmbedder {
    table: HashMap<String, Vec<f32>>,
    dimensions: usize,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl TableEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions, ..Self::default() }
    }

    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.table.insert(text.to_string(), vector);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Texts embedded so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl EmbeddingProvider for TableEmbedder {
    async fn embed(&self, text: &str) -> docent_model::Result<Vec<f32>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(text.to_string());
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.table.get(text).cloned().ok_or_else(|| ProviderError::Request {
            provider: "table".into(),
            message: format!("no embedding for {text:?}"),
        })
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

pub fn collection(tag: CollectionTag, records: &[(&str, &str, Vec<f32>)]) -> DocumentCollection {
    let records = records
        .iter()
        .map(|(id, text, embedding)| EmbeddedDocument {
            document: Document::new(*id, *text, tag),
            embedding: embedding.clone(),
        })
        .collect();
    DocumentCollection::new(tag, records).unwrap()
}

/// A small museum: three artworks and two auxiliary documents on a 2-D plane.
pub fn museum() -> (DocumentCollection, DocumentCollection) {
    let artwork = collection(
        CollectionTag::Artwork,
        &[
            (
                "mona-lisa",
                "Mona Lisa, portrait by Leonardo da Vinci, oil on poplar.",
                vec![1.0, 0.0],
            ),
            ("starry-night", "The Starry Night, Vincent van Gogh, 1889.", vec![0.0, 1.0]),
            ("night-watch", "The Night Watch, Rembrandt, 1642.", vec![-1.0, 0.0]),
        ],
    );
    let auxiliary = collection(
        CollectionTag::Auxiliary,
        &[
            ("leonardo", "Leonardo da Vinci was a Renaissance polymath.", vec![0.9, 0.1]),
            (
                "louvre",
                "The Louvre is the museum in Paris that holds the Mona Lisa.",
                vec![5.0, 5.0],
            ),
        ],
    );
    (artwork, auxiliary)
}

pub fn engine(
    chat: Arc<MockChatProvider>,
    embedder: Arc<TableEmbedder>,
    config: DocentConfig,
) -> AnswerEngine {
    AnswerEngine::builder()
        .config(config)
        .chat_provider(chat)
        .embedding_provider(embedder)
        .build()
        .unwrap()
}
