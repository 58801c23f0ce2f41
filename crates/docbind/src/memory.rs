use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use docbind_core::{
    BulkItem, BulkResponse, DocbindError, GetResponse, IndexResponse, MappingDocument, StoreClient,
};

#[derive(Default)]
struct Index {
    /// Mapping the index was created with; `None` for indices auto-created
    /// by a write.
    mapping: Option<MappingDocument>,
    documents: HashMap<String, Value>,
}

/// In-memory implementation of [`StoreClient`].
///
/// Mirrors the store semantics the layer depends on: ids are assigned as v4
/// UUIDs when the caller supplies none, bulk create actions conflict with
/// status `409` on an existing id, and creating an existing index fails with
/// [`DocbindError::IndexExists`]. Useful as a test double and for running the
/// document layer without a server.
pub struct MemoryStoreClient {
    indices: RwLock<HashMap<String, Index>>,
}

impl Default for MemoryStoreClient {
    fn default() -> Self {
        Self {
            indices: RwLock::new(HashMap::new()),
        }
    }
}

impl MemoryStoreClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping an index was created with, if the index exists.
    pub async fn mapping(&self, index: &str) -> Option<MappingDocument> {
        self.indices
            .read()
            .await
            .get(index)
            .and_then(|idx| idx.mapping.clone())
    }

    /// The raw stored body of a document, exactly as written.
    pub async fn raw_source(&self, index: &str, id: &str) -> Option<Value> {
        self.indices
            .read()
            .await
            .get(index)
            .and_then(|idx| idx.documents.get(id).cloned())
    }

    /// Number of documents held by an index.
    pub async fn document_count(&self, index: &str) -> usize {
        self.indices
            .read()
            .await
            .get(index)
            .map(|idx| idx.documents.len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl StoreClient for MemoryStoreClient {
    async fn get_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<GetResponse>, DocbindError> {
        let indices = self.indices.read().await;
        Ok(indices.get(index).and_then(|idx| {
            idx.documents.get(id).map(|source| GetResponse {
                id: id.to_string(),
                source: source.clone(),
            })
        }))
    }

    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        body: Value,
    ) -> Result<IndexResponse, DocbindError> {
        let mut indices = self.indices.write().await;
        let idx = indices.entry(index.to_string()).or_default();

        let id = id
            .map(String::from)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        idx.documents.insert(id.clone(), body);
        Ok(IndexResponse { id })
    }

    async fn bulk(&self, actions: Vec<Value>) -> Result<BulkResponse, DocbindError> {
        if actions.len() % 2 != 0 {
            return Err(DocbindError::Store(
                "bulk request has a header without a body".to_string(),
            ));
        }

        let mut indices = self.indices.write().await;
        let mut items = Vec::with_capacity(actions.len() / 2);

        for pair in actions.chunks_exact(2) {
            let header = pair[0].get("create").ok_or_else(|| {
                DocbindError::Store("bulk action header is not a create action".to_string())
            })?;
            let index = header
                .get("_index")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    DocbindError::Store("bulk create action is missing _index".to_string())
                })?;

            let idx = indices.entry(index.to_string()).or_default();
            let id = header
                .get("_id")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            if idx.documents.contains_key(&id) {
                items.push(BulkItem {
                    status: 409,
                    id: Some(id.clone()),
                    error: Some(serde_json::json!({
                        "type": "version_conflict_engine_exception",
                        "reason": format!("[{id}]: version conflict, document already exists"),
                    })),
                });
                continue;
            }

            idx.documents.insert(id.clone(), pair[1].clone());
            items.push(BulkItem {
                status: 201,
                id: Some(id),
                error: None,
            });
        }

        Ok(BulkResponse { items })
    }

    async fn create_index(
        &self,
        index: &str,
        mapping: &MappingDocument,
    ) -> Result<(), DocbindError> {
        let mut indices = self.indices.write().await;
        if indices.contains_key(index) {
            return Err(DocbindError::IndexExists(index.to_string()));
        }
        indices.insert(
            index.to_string(),
            Index {
                mapping: Some(mapping.clone()),
                documents: HashMap::new(),
            },
        );
        Ok(())
    }
}
