//! # Offline Docent
//!
//! Runs one multi-turn exchange through the full pipeline with scripted
//! chat replies and a vocabulary-based embedder, so it needs **no API keys**.
//!
//! Run: `RUST_LOG=debug cargo run --example offline_docent`

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use docent_model::{Message, MockChatProvider};
use docent_rag::{
    AnswerEngine, CollectionTag, DocentConfig, Document, DocumentCollection, EmbeddingProvider,
};
use futures::StreamExt;

const VOCABULARY: [&str; 6] = ["mona", "lisa", "leonardo", "starry", "gogh", "museum"];

/// Counts vocabulary words, one dimension per word.
struct VocabularyEmbedder;

#[async_trait]
impl EmbeddingProvider for VocabularyEmbedder {
    async fn embed(&self, text: &str) -> docent_model::Result<Vec<f32>> {
        let text = text.to_lowercase();
        Ok(VOCABULARY.iter().map(|word| text.matches(word).count() as f32).collect())
    }

    fn dimensions(&self) -> usize {
        VOCABULARY.len()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    docent_telemetry::init_telemetry("offline-docent");

    let embedder = Arc::new(VocabularyEmbedder);
    let artwork = DocumentCollection::embed(
        CollectionTag::Artwork,
        vec![
            Document::artwork("mona-lisa", "Mona Lisa: portrait by Leonardo, oil on poplar."),
            Document::artwork("starry-night", "The Starry Night: Van Gogh, 1889."),
        ],
        embedder.as_ref(),
    )
    .await?;
    let auxiliary = DocumentCollection::embed(
        CollectionTag::Auxiliary,
        vec![Document::auxiliary("leonardo", "Leonardo da Vinci, Renaissance painter.")],
        embedder.as_ref(),
    )
    .await?;

    let chat = Arc::new(
        MockChatProvider::new()
            // rewrite, classify
            .with_reply("Who painted the Mona Lisa?")
            .with_reply("False")
            .with_stream(["The Mona Lisa ", "was painted by ", "Leonardo da Vinci."]),
    );
    let config = DocentConfig::builder().top_k(2).verbose(true).build()?;
    let engine = AnswerEngine::builder()
        .config(config)
        .chat_provider(chat.clone())
        .embedding_provider(embedder)
        .build()?;

    let history = vec![
        Message::user("Tell me about the Mona Lisa."),
        Message::assistant("It is a portrait on a poplar panel."),
        Message::user("Who painted it?"),
    ];

    let mut answer = engine.ask(&history, &artwork, &auxiliary).await?;
    while let Some(chunk) = answer.next().await {
        print!("{}", chunk?);
    }
    println!();

    if let Some(request) = chat.requests().last() {
        println!("\n--- prompt sent for the answer ---");
        for message in request {
            println!("[{}] {}", message.role, message.content);
        }
    }
    Ok(())
}
