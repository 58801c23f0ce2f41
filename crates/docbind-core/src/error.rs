/// Errors produced by the document-mapping layer.
///
/// Store-reported failures are wrapped verbatim into [`DocbindError::Store`];
/// the one store condition with dedicated handling is
/// [`DocbindError::IndexExists`], which `initialize` tolerates so that index
/// creation stays idempotent.
#[derive(Debug, thiserror::Error)]
pub enum DocbindError {
    /// A field value is outside its declared bounds or of the wrong kind.
    #[error("validation error: {0}")]
    Validation(String),

    /// A stored body does not decode into the requested document type.
    #[error("document type mismatch: {0}")]
    TypeMismatch(String),

    /// A store operation was attempted before `initialize` for that type.
    #[error("index for document type `{0}` was not initialized")]
    NotInitialized(String),

    /// The store has no document with the requested id.
    #[error("document `{id}` not found in index `{index}`")]
    NotFound { index: String, id: String },

    /// The index already exists; tolerated during initialization.
    #[error("index `{0}` already exists")]
    IndexExists(String),

    /// Any other store-reported failure, propagated unchanged.
    #[error("store error: {0}")]
    Store(String),

    /// Connection configuration could not be loaded.
    #[error("config error: {0}")]
    Config(String),
}
