//! # Art Docent
//!
//! An interactive museum guide in the terminal, answering from OpenAI chat
//! and embedding models.
//!
//! Collections are read from JSON files of `{document, embedding}` records.
//! Without arguments a handful of built-in descriptions are embedded at
//! startup instead.
//!
//! Type `/summary` to summarise the last answer and `/quit` to leave.
//!
//! Run: `cargo run --example art_docent -- [artwork.json auxiliary.json]`
//!
//! Requires `OPENAI_API_KEY` (a `.env` file is honoured). Set
//! `DOCENT_LOG_FORMAT=json` for JSON logs.

use std::io::Write;

use anyhow::{Context, Result};
use docent_model::{Conversation, Message};
use docent_rag::{
    AnswerEngine, CollectionTag, DocentConfig, Document, DocumentCollection,
    OpenAIEmbeddingProvider,
};
use futures::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    if std::env::var("DOCENT_LOG_FORMAT").is_ok_and(|f| f == "json") {
        docent_telemetry::init_json_telemetry("art-docent");
    } else {
        docent_telemetry::init_telemetry("art-docent");
    }

    let config = DocentConfig::from_env().context("invalid configuration")?;
    tracing::info!(?config, "starting");

    let (artwork, auxiliary) = load_collections(&config).await?;
    let engine = AnswerEngine::from_config(config)?;

    println!("{}\n", engine.greeting().await?);

    let mut history = Conversation::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else { break };
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" => break,
            "/summary" => {
                match engine.summarize_last_answer(&history).await {
                    Ok(Some(summary)) => println!("{summary}\n"),
                    Ok(None) => println!("Nothing to summarise yet.\n"),
                    Err(e) => eprintln!("error: {e:#}\n"),
                }
                continue;
            }
            _ => {}
        }

        history.push(Message::user(line));
        match answer(&engine, &history, &artwork, &auxiliary).await {
            Ok(text) => history.push(Message::assistant(text)),
            Err(e) => {
                eprintln!("\nerror: {e:#}\n");
                history.pop();
            }
        }
    }

    Ok(())
}

/// Stream one answer to stdout and return its full text.
async fn answer(
    engine: &AnswerEngine,
    history: &[Message],
    artwork: &DocumentCollection,
    auxiliary: &DocumentCollection,
) -> Result<String> {
    let mut stream = engine.ask(history, artwork, auxiliary).await?;
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        print!("{chunk}");
        std::io::stdout().flush()?;
        text.push_str(&chunk);
    }
    println!("\n");
    Ok(text)
}

async fn load_collections(
    config: &DocentConfig,
) -> Result<(DocumentCollection, DocumentCollection)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [artwork, auxiliary] = args.as_slice() {
        let artwork = DocumentCollection::from_json_file(CollectionTag::Artwork, artwork)?;
        let auxiliary = DocumentCollection::from_json_file(CollectionTag::Auxiliary, auxiliary)?;
        return Ok((artwork, auxiliary));
    }

    let embedder = OpenAIEmbeddingProvider::new(config.api_key.clone())?
        .with_model(config.embedding_model_name.clone())
        .with_timeout(config.request_timeout());

    let artwork = DocumentCollection::embed(
        CollectionTag::Artwork,
        vec![
            Document::artwork(
                "mona-lisa",
                "Mona Lisa (1503-1519), Leonardo da Vinci. Oil on poplar panel, 77 x 53 cm. \
                 Half-length portrait of Lisa Gherardini, known for her elusive smile and the \
                 sfumato modelling of the face.",
            ),
            Document::artwork(
                "starry-night",
                "The Starry Night (1889), Vincent van Gogh. Oil on canvas, 73.7 x 92.1 cm. \
                 A swirling night sky over the village of Saint-Remy, painted from memory.",
            ),
            Document::artwork(
                "night-watch",
                "The Night Watch (1642), Rembrandt van Rijn. Oil on canvas, 363 x 437 cm. \
                 Militia company of Captain Frans Banninck Cocq, famous for its dramatic light.",
            ),
        ],
        &embedder,
    )
    .await?;

    let auxiliary = DocumentCollection::embed(
        CollectionTag::Auxiliary,
        vec![
            Document::auxiliary(
                "leonardo",
                "Leonardo da Vinci (1452-1519) was an Italian painter, engineer and scientist \
                 of the High Renaissance.",
            ),
            Document::auxiliary(
                "opening-hours",
                "The museum is open daily from 9:00 to 18:00 and until 21:45 on Fridays.",
            ),
        ],
        &embedder,
    )
    .await?;

    Ok((artwork, auxiliary))
}
