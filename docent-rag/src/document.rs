//! Data types for documents, embedded records, and search results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which corpus a [`Document`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionTag {
    /// Curated artwork descriptions.
    Artwork,
    /// Auxiliary documents (artists, movements, museum information, ...).
    Auxiliary,
}

impl CollectionTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionTag::Artwork => "artwork",
            CollectionTag::Auxiliary => "auxiliary",
        }
    }
}

impl fmt::Display for CollectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source document. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Stable identifier, unique within its collection.
    pub id: String,
    /// The body text.
    pub text: String,
    /// The corpus this document belongs to.
    pub collection: CollectionTag,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>, collection: CollectionTag) -> Self {
        Self { id: id.into(), text: text.into(), collection }
    }

    pub fn artwork(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, CollectionTag::Artwork)
    }

    pub fn auxiliary(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, text, CollectionTag::Auxiliary)
    }
}

/// A [`Document`] paired with its embedding vector, as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddedDocument {
    pub document: Document,
    pub embedding: Vec<f32>,
}

/// A retrieved [`Document`] paired with its distance to the query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The retrieved document.
    pub document: Document,
    /// Squared Euclidean distance to the query vector (lower is closer).
    pub distance: f32,
}

/// Search results ordered by ascending distance.
pub type RetrievalResult = Vec<SearchResult>;
