//! Typed document-mapping layer for document/search index stores.
//!
//! Declare a schema as a serde struct implementing [`Document`] and bind it
//! to an index through a [`DocumentStore`], which derives the index mapping
//! from the schema's declared field kinds and creates the index idempotently.
//! Documents are then inserted, bulk-inserted, and fetched through a shared
//! [`StoreClient`].
//!
//! Backends implement [`StoreClient`]; [`MemoryStoreClient`] ships here for
//! tests and serverless runs, and the `docbind-elastic` crate provides the
//! Elasticsearch REST backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use chrono::{DateTime, Utc};
//! use docbind::{Document, DocumentStore, FieldDescriptor, FieldKind, Keyword, MemoryStoreClient};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct Article {
//!     #[serde(skip)]
//!     id: Option<String>,
//!     created: Option<DateTime<Utc>>,
//!     title: Keyword,
//! }
//!
//! impl Document for Article {
//!     fn name() -> &'static str {
//!         "Article"
//!     }
//!
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![FieldDescriptor::new("title", FieldKind::Keyword)]
//!     }
//!
//!     fn id(&self) -> Option<&str> {
//!         self.id.as_deref()
//!     }
//!
//!     fn set_id(&mut self, id: String) {
//!         self.id = Some(id);
//!     }
//!
//!     fn created(&self) -> Option<DateTime<Utc>> {
//!         self.created
//!     }
//!
//!     fn set_created(&mut self, at: DateTime<Utc>) {
//!         self.created = Some(at);
//!     }
//! }
//!
//! # async fn example() -> Result<(), docbind::DocbindError> {
//! let store = DocumentStore::new();
//! store.initialize::<Article>(Arc::new(MemoryStoreClient::new())).await?;
//!
//! let article = Article { id: None, created: None, title: "hello".into() };
//! let article = store.insert(article, None).await?;
//! let fetched: Article = store.get(article.id().unwrap()).await?;
//! # Ok(())
//! # }
//! ```

mod bulk;
mod memory;
mod store;

pub use bulk::BulkInsertResult;
pub use memory::MemoryStoreClient;
pub use store::{Binding, DocumentStore};

// Re-export core types for convenience.
pub use docbind_core::{
    mapping_for, BulkItem, BulkResponse, Byte, DocbindError, Document, FieldDescriptor, FieldKind,
    GetResponse, IndexResponse, Integer, Keyword, Long, MappingDocument, Short, StoreClient,
};
