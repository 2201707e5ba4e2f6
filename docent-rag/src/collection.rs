//! Document collections with their prebuilt search index.
//!
//! A [`DocumentCollection`] owns its documents and vectors. The
//! [`FlatIndex`] is built once at construction and reused read-only for every
//! query, so a collection can be wrapped in an `Arc` and shared across
//! concurrent requests without locking.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{error, info};

use crate::document::{CollectionTag, Document, EmbeddedDocument, RetrievalResult, SearchResult};
use crate::embedding::EmbeddingProvider;
use crate::error::{RagError, Result};
use crate::index::FlatIndex;

/// An immutable, searchable set of embedded documents from one corpus.
#[derive(Debug, Clone)]
pub struct DocumentCollection {
    tag: CollectionTag,
    documents: Vec<Document>,
    index: FlatIndex,
}

impl DocumentCollection {
    /// Build a collection from embedded records, in order.
    ///
    /// # Errors
    ///
    /// - [`RagError::Collection`] if a document is tagged for another corpus.
    /// - [`RagError::DimensionMismatch`] if the embeddings differ in length.
    pub fn new(tag: CollectionTag, records: Vec<EmbeddedDocument>) -> Result<Self> {
        if let Some(stray) = records.iter().find(|r| r.document.collection != tag) {
            return Err(RagError::Collection {
                name: tag.to_string(),
                message: format!(
                    "document '{}' belongs to the {} collection",
                    stray.document.id, stray.document.collection
                ),
            });
        }

        let (documents, embeddings): (Vec<Document>, Vec<Vec<f32>>) =
            records.into_iter().map(|r| (r.document, r.embedding)).unzip();
        let index = FlatIndex::build(&embeddings)?;

        info!(
            collection = %tag,
            documents = documents.len(),
            dimensions = ?index.dimensions(),
            "collection built"
        );
        Ok(Self { tag, documents, index })
    }

    /// An empty collection that never matches.
    pub fn empty(tag: CollectionTag) -> Self {
        Self { tag, documents: Vec::new(), index: FlatIndex::default() }
    }

    /// Embed raw documents with `embedder` and build a collection from them.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::Provider`] if embedding fails, plus the errors of
    /// [`DocumentCollection::new`].
    pub async fn embed(
        tag: CollectionTag,
        documents: Vec<Document>,
        embedder: &dyn EmbeddingProvider,
    ) -> Result<Self> {
        if documents.is_empty() {
            return Ok(Self::empty(tag));
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.text.as_str()).collect();
        let embeddings = embedder.embed_batch(&texts).await.inspect_err(|e| {
            error!(collection = %tag, error = %e, "embedding failed while building collection");
        })?;

        if embeddings.len() != documents.len() {
            return Err(RagError::Collection {
                name: tag.to_string(),
                message: format!(
                    "embedder returned {} vectors for {} documents",
                    embeddings.len(),
                    documents.len()
                ),
            });
        }

        let records = documents
            .into_iter()
            .zip(embeddings)
            .map(|(document, embedding)| EmbeddedDocument { document, embedding })
            .collect();
        Self::new(tag, records)
    }

    /// Load a collection from a JSON array of [`EmbeddedDocument`] records.
    pub fn from_json_reader<R: Read>(tag: CollectionTag, reader: R) -> Result<Self> {
        let records: Vec<EmbeddedDocument> =
            serde_json::from_reader(reader).map_err(|e| RagError::Collection {
                name: tag.to_string(),
                message: format!("invalid collection JSON: {e}"),
            })?;
        Self::new(tag, records)
    }

    /// Load a collection from a JSON file written by [`to_json_writer`](Self::to_json_writer).
    pub fn from_json_file(tag: CollectionTag, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| RagError::Collection {
            name: tag.to_string(),
            message: format!("cannot open {}: {e}", path.display()),
        })?;
        Self::from_json_reader(tag, BufReader::new(file))
    }

    /// Write the collection as a JSON array of [`EmbeddedDocument`] records.
    pub fn to_json_writer<W: Write>(&self, writer: W) -> Result<()> {
        let records: Vec<EmbeddedDocument> = self
            .documents
            .iter()
            .enumerate()
            .map(|(position, document)| EmbeddedDocument {
                document: document.clone(),
                embedding: self.index.vector(position).map(<[f32]>::to_vec).unwrap_or_default(),
            })
            .collect();

        let write_error = |message: String| RagError::Collection {
            name: self.tag.to_string(),
            message: format!("failed to write collection: {message}"),
        };
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer(&mut writer, &records).map_err(|e| write_error(e.to_string()))?;
        writer.flush().map_err(|e| write_error(e.to_string()))
    }

    pub fn tag(&self) -> CollectionTag {
        self.tag
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Embedding dimensionality, `None` when empty.
    pub fn dimensions(&self) -> Option<usize> {
        self.index.dimensions()
    }

    /// The `k` documents nearest to `query`, ascending by distance.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if `query` has the wrong length
    /// for a non-empty collection.
    pub fn search(&self, query: &[f32], k: usize) -> Result<RetrievalResult> {
        let neighbors = self.index.search(query, k)?;
        Ok(neighbors
            .into_iter()
            .map(|n| SearchResult {
                document: self.documents[n.position].clone(),
                distance: n.distance,
            })
            .collect())
    }
}
