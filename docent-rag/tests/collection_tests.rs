//! Tests for building, searching and persisting document collections.

mod common;

use common::{TableEmbedder, collection, museum};
use docent_rag::{CollectionTag, Document, DocumentCollection, EmbeddedDocument, RagError};

#[tokio::test]
async fn test_embed_builds_searchable_collection() {
    let embedder = TableEmbedder::new(2)
        .with("Water Lilies, Claude Monet.", vec![0.0, 1.0])
        .with("The Kiss, Gustav Klimt.", vec![1.0, 0.0]);
    let documents = vec![
        Document::artwork("water-lilies", "Water Lilies, Claude Monet."),
        Document::artwork("the-kiss", "The Kiss, Gustav Klimt."),
    ];

    let collection =
        DocumentCollection::embed(CollectionTag::Artwork, documents, &embedder).await.unwrap();

    assert_eq!(collection.len(), 2);
    assert_eq!(collection.dimensions(), Some(2));
    let hits = collection.search(&[0.9, 0.0], 1).unwrap();
    assert_eq!(hits[0].document.id, "the-kiss");
}

#[tokio::test]
async fn test_embed_empty_documents_is_empty_collection() {
    let embedder = TableEmbedder::new(2);
    let collection =
        DocumentCollection::embed(CollectionTag::Auxiliary, Vec::new(), &embedder).await.unwrap();

    assert!(collection.is_empty());
    assert!(embedder.calls().is_empty());
    assert!(collection.search(&[1.0, 2.0], 3).unwrap().is_empty());
}

#[tokio::test]
async fn test_embed_failure_propagates() {
    let embedder = TableEmbedder::new(2);
    let documents = vec![Document::artwork("unknown", "not in the table")];

    let err = DocumentCollection::embed(CollectionTag::Artwork, documents, &embedder)
        .await
        .unwrap_err();

    assert!(matches!(err, RagError::Provider(_)));
}

#[test]
fn test_documents_from_another_collection_are_rejected() {
    let records = vec![EmbeddedDocument {
        document: Document::auxiliary("louvre", "The Louvre."),
        embedding: vec![1.0],
    }];

    let err = DocumentCollection::new(CollectionTag::Artwork, records).unwrap_err();
    assert!(matches!(err, RagError::Collection { .. }));
}

#[test]
fn test_mixed_dimensions_are_rejected() {
    let records = vec![
        EmbeddedDocument { document: Document::artwork("a", "a"), embedding: vec![1.0, 0.0] },
        EmbeddedDocument { document: Document::artwork("b", "b"), embedding: vec![1.0] },
    ];

    let err = DocumentCollection::new(CollectionTag::Artwork, records).unwrap_err();
    assert!(matches!(err, RagError::DimensionMismatch { expected: 2, actual: 1 }));
}

#[test]
fn test_json_file_round_trip() {
    let (artwork, _) = museum();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("artwork.json");

    artwork.to_json_writer(std::fs::File::create(&path).unwrap()).unwrap();
    let loaded = DocumentCollection::from_json_file(CollectionTag::Artwork, &path).unwrap();

    assert_eq!(loaded.documents(), artwork.documents());
    assert_eq!(
        loaded.search(&[1.0, 0.0], 3).unwrap(),
        artwork.search(&[1.0, 0.0], 3).unwrap()
    );
}

#[test]
fn test_invalid_json_is_a_collection_error() {
    let err = DocumentCollection::from_json_reader(CollectionTag::Artwork, "not json".as_bytes())
        .unwrap_err();
    assert!(matches!(err, RagError::Collection { .. }));
}

#[test]
fn test_missing_file_is_a_collection_error() {
    let dir = tempfile::tempdir().unwrap();
    let err =
        DocumentCollection::from_json_file(CollectionTag::Artwork, dir.path().join("missing.json"))
            .unwrap_err();
    assert!(matches!(err, RagError::Collection { .. }));
}

#[test]
fn test_search_ties_keep_load_order() {
    let collection = collection(
        CollectionTag::Artwork,
        &[("first", "a", vec![0.0, 1.0]), ("second", "b", vec![1.0, 0.0])],
    );
    let hits = collection.search(&[0.0, 0.0], 2).unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.document.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}
