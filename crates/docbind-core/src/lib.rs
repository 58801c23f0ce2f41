//! Core traits and types for docbind.
//!
//! This crate holds everything the document layer and its backends agree on:
//! the [`Document`] schema trait, the typed field vocabulary, the pure
//! schema-to-mapping translator, the [`StoreClient`] capability consumed from
//! a concrete store, and [`DocbindError`]. It performs no I/O.

mod client;
mod error;
mod fields;
mod mapping;
mod schema;

pub use client::{BulkItem, BulkResponse, GetResponse, IndexResponse, StoreClient};
pub use error::DocbindError;
pub use fields::{Byte, FieldKind, Integer, Keyword, Long, Short};
pub use mapping::{mapping_for, MappingDocument, Properties, Property};
pub use schema::{Document, FieldDescriptor};
