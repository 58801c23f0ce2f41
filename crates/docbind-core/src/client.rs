//! The consumed store capability.
//!
//! [`StoreClient`] is the seam between the document layer and a concrete
//! document/search store. Implementations own connection pooling and
//! timeouts; the layer above imposes no additional locking and shares one
//! client across all document types.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::DocbindError;
use crate::mapping::MappingDocument;

/// A stored document as returned by the store: its internal id plus the
/// source fields it was written with.
#[derive(Debug, Clone, PartialEq)]
pub struct GetResponse {
    pub id: String,
    pub source: Value,
}

/// The store's answer to a single-document write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexResponse {
    pub id: String,
}

/// One per-action outcome of a bulk submission.
///
/// The store returns exactly one item per submitted action, in submission
/// order; that positional contract is what the aggregator correlates on.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItem {
    /// Store status code for this action; `201` means created.
    pub status: u16,
    /// Internal id, assigned on success.
    pub id: Option<String>,
    /// Store error payload, present on failure.
    pub error: Option<Value>,
}

/// The store's answer to a bulk submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkResponse {
    pub items: Vec<BulkItem>,
}

/// Client capability of the document/search index store.
#[async_trait]
pub trait StoreClient: Send + Sync {
    /// Fetch a document by id. `None` when the store has no such id.
    async fn get_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<GetResponse>, DocbindError>;

    /// Write a single document body, with a caller-assigned id or a
    /// store-assigned one.
    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        body: Value,
    ) -> Result<IndexResponse, DocbindError>;

    /// Submit a flat sequence of action headers and bodies in one round trip.
    async fn bulk(&self, actions: Vec<Value>) -> Result<BulkResponse, DocbindError>;

    /// Create an index with the given mapping.
    ///
    /// Fails with [`DocbindError::IndexExists`] when the index is already
    /// present; callers decide whether that is an error.
    async fn create_index(
        &self,
        index: &str,
        mapping: &MappingDocument,
    ) -> Result<(), DocbindError>;
}
