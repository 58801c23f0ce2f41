//! Schema declaration.
//!
//! A document type is a serde struct that also reports its type name and an
//! ordered list of field descriptors. The descriptors drive the index
//! mapping; serde drives the document bodies.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::fields::FieldKind;

/// A named, typed field of a schema.
///
/// A descriptor without a kind is "unmapped": it is omitted from the index
/// mapping and the store infers its treatment dynamically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: Option<FieldKind>,
}

impl FieldDescriptor {
    /// A field with a declared store kind.
    pub fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind: Some(kind),
        }
    }

    /// A field left for the store to map dynamically.
    pub fn unmapped(name: &'static str) -> Self {
        Self { name, kind: None }
    }
}

/// A schema: a document type persisted to its own index.
///
/// Implementors are plain serde structs. Two fields are implicit in every
/// schema and managed by the layer, never by callers:
///
/// - `id`: the store-assigned identifier. It must be excluded from
///   serialized bodies (`#[serde(skip)]` on the field); the layer also strips
///   any `id` key before a write.
/// - `created`: stamped with the current time when the document is first
///   persisted, overwriting any caller-supplied value.
///
/// # Example
///
/// ```rust
/// use chrono::{DateTime, Utc};
/// use docbind_core::{Document, FieldDescriptor, FieldKind, Keyword};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Article {
///     #[serde(skip)]
///     id: Option<String>,
///     created: Option<DateTime<Utc>>,
///     title: Keyword,
///     published: bool,
/// }
///
/// impl Document for Article {
///     fn name() -> &'static str {
///         "Article"
///     }
///
///     fn fields() -> Vec<FieldDescriptor> {
///         vec![
///             FieldDescriptor::new("title", FieldKind::Keyword),
///             FieldDescriptor::new("published", FieldKind::Boolean),
///         ]
///     }
///
///     fn id(&self) -> Option<&str> {
///         self.id.as_deref()
///     }
///
///     fn set_id(&mut self, id: String) {
///         self.id = Some(id);
///     }
///
///     fn created(&self) -> Option<DateTime<Utc>> {
///         self.created
///     }
///
///     fn set_created(&mut self, at: DateTime<Utc>) {
///         self.created = Some(at);
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The document type's name. The index name is this, lower-cased.
    fn name() -> &'static str;

    /// Ordered descriptors of the schema's declared fields, excluding the
    /// implicit `id` and `created`.
    fn fields() -> Vec<FieldDescriptor>;

    /// The store-assigned identifier, if this document has been persisted.
    fn id(&self) -> Option<&str>;

    /// Record the store-assigned identifier.
    fn set_id(&mut self, id: String);

    /// The first-persistence timestamp, if stamped.
    fn created(&self) -> Option<DateTime<Utc>>;

    /// Stamp the first-persistence timestamp.
    fn set_created(&mut self, at: DateTime<Utc>);
}
