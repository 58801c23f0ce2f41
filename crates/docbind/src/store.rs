use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;

use docbind_core::{mapping_for, DocbindError, Document, StoreClient};

use crate::bulk::{aggregate, create_actions, BulkInsertResult};

/// The runtime association of a document type with an index and a client.
///
/// Bindings are shared (`Arc`), never owned by a single call; the client
/// handles its own connection pooling.
pub struct Binding {
    /// Index name, derived from the document type's name (lower-cased).
    pub index_name: String,
    /// Shared store connection.
    pub client: Arc<dyn StoreClient>,
}

/// Document store operations over lazily-bound indices.
///
/// Each document type must be bound exactly once with
/// [`initialize`](DocumentStore::initialize) before any operation touches it;
/// an operation on an unbound type is a programming error and fails with
/// [`DocbindError::NotInitialized`] without any store interaction.
///
/// The store is an explicit object rather than state attached to the document
/// types themselves, so several independent stores can coexist (tests bind
/// the same types against different backends).
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use docbind::{DocumentStore, MemoryStoreClient};
/// # use chrono::{DateTime, Utc};
/// # use docbind::{Document, FieldDescriptor, FieldKind, Keyword};
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Debug, Clone, Serialize, Deserialize)]
/// # struct Article {
/// #     #[serde(skip)]
/// #     id: Option<String>,
/// #     created: Option<DateTime<Utc>>,
/// #     title: Keyword,
/// # }
/// # impl Document for Article {
/// #     fn name() -> &'static str { "Article" }
/// #     fn fields() -> Vec<FieldDescriptor> {
/// #         vec![FieldDescriptor::new("title", FieldKind::Keyword)]
/// #     }
/// #     fn id(&self) -> Option<&str> { self.id.as_deref() }
/// #     fn set_id(&mut self, id: String) { self.id = Some(id); }
/// #     fn created(&self) -> Option<DateTime<Utc>> { self.created }
/// #     fn set_created(&mut self, at: DateTime<Utc>) { self.created = Some(at); }
/// # }
///
/// # async fn example() -> Result<(), docbind::DocbindError> {
/// let client = Arc::new(MemoryStoreClient::new());
/// let store = DocumentStore::new();
/// store.initialize::<Article>(client).await?;
///
/// let article = store
///     .insert(Article { id: None, created: None, title: "hello".into() }, None)
///     .await?;
/// let fetched: Article = store.get(article.id().unwrap()).await?;
/// # Ok(())
/// # }
/// ```
pub struct DocumentStore {
    bindings: RwLock<HashMap<TypeId, Arc<Binding>>>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `T` to its index, creating the index from the translated mapping.
    ///
    /// An already-existing index is reused as-is; its mapping is not
    /// reconciled. Any other store failure propagates. Re-initializing a type
    /// overwrites its cached binding. The write lock is held across the store
    /// call, so concurrent initializers serialize and readers never observe a
    /// half-constructed binding.
    pub async fn initialize<T: Document>(
        &self,
        client: Arc<dyn StoreClient>,
    ) -> Result<Arc<Binding>, DocbindError> {
        let mut bindings = self.bindings.write().await;

        let index_name = T::name().to_lowercase();
        let mapping = mapping_for(&T::fields());
        match client.create_index(&index_name, &mapping).await {
            Ok(()) => tracing::debug!(index = %index_name, "created index"),
            Err(DocbindError::IndexExists(_)) => {
                tracing::debug!(index = %index_name, "index already exists, reusing")
            }
            Err(e) => return Err(e),
        }

        let binding = Arc::new(Binding { index_name, client });
        bindings.insert(TypeId::of::<T>(), Arc::clone(&binding));
        Ok(binding)
    }

    /// Return the cached binding for `T`.
    pub async fn resolve<T: Document>(&self) -> Result<Arc<Binding>, DocbindError> {
        self.bindings
            .read()
            .await
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| DocbindError::NotInitialized(T::name().to_string()))
    }

    /// Drop all bindings, returning the store to its unbound state.
    pub async fn reset(&self) {
        self.bindings.write().await.clear();
    }

    /// Fetch a document by its store-assigned id.
    ///
    /// The store's internal id always wins over any id embedded in the stored
    /// body. A body that does not decode into `T` fails with
    /// [`DocbindError::TypeMismatch`].
    pub async fn get<T: Document>(&self, id: &str) -> Result<T, DocbindError> {
        let binding = self.resolve::<T>().await?;

        let stored = binding
            .client
            .get_document(&binding.index_name, id)
            .await?
            .ok_or_else(|| DocbindError::NotFound {
                index: binding.index_name.clone(),
                id: id.to_string(),
            })?;

        let mut document: T = serde_json::from_value(stored.source).map_err(|e| {
            DocbindError::TypeMismatch(format!(
                "stored document does not decode as `{}`: {e}",
                T::name()
            ))
        })?;
        document.set_id(stored.id);
        Ok(document)
    }

    /// Persist a single document and return it with its assigned id.
    ///
    /// `created` is stamped with the current time, overwriting any caller
    /// value; the body is written without the `id` field. A caller-assigned
    /// id is passed through to the store, otherwise the store assigns one.
    pub async fn insert<T: Document>(
        &self,
        mut document: T,
        id: Option<&str>,
    ) -> Result<T, DocbindError> {
        let binding = self.resolve::<T>().await?;

        document.set_created(Utc::now());
        let body = document_body(&document)?;
        let response = binding
            .client
            .index_document(&binding.index_name, id, body)
            .await?;

        document.set_id(response.id);
        Ok(document)
    }

    /// Persist a batch of documents in one store round trip.
    ///
    /// Every document is stamped `created` first, then encoded as a create
    /// action. Per-document failures are returned as data in the result, in
    /// input order alongside the successes; only whole-batch failures (the
    /// store call itself) surface as `Err`.
    pub async fn bulk_insert<T: Document>(
        &self,
        mut documents: Vec<T>,
    ) -> Result<BulkInsertResult<T>, DocbindError> {
        let binding = self.resolve::<T>().await?;

        for document in &mut documents {
            document.set_created(Utc::now());
        }
        let actions = create_actions(&documents, &binding.index_name)?;
        let response = binding.client.bulk(actions).await?;
        aggregate(documents, response)
    }
}

/// Serialize a document body for a write, with the `id` field stripped.
///
/// The id is a store key, never body content; implementors already skip it in
/// serde, the strip here keeps the invariant independent of their attributes.
pub(crate) fn document_body<T: Document>(document: &T) -> Result<Value, DocbindError> {
    let mut body = serde_json::to_value(document)
        .map_err(|e| DocbindError::Store(format!("failed to serialize document body: {e}")))?;
    if let Some(fields) = body.as_object_mut() {
        fields.remove("id");
    }
    Ok(body)
}
