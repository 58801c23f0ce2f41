//! Elasticsearch backend for docbind.
//!
//! This crate provides [`ElasticClient`], an implementation of the
//! [`StoreClient`](docbind_core::StoreClient) trait over the
//! [Elasticsearch](https://www.elastic.co/elasticsearch/) REST API.
//!
//! # Example
//!
//! ```rust,no_run
//! use docbind_elastic::{ElasticClient, ElasticConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ElasticConfig::new("http://localhost:9200");
//! let client = ElasticClient::new(config)?;
//! # Ok(())
//! # }
//! ```

mod client;

pub use client::{ElasticClient, ElasticConfig};

// Re-export the core trait for convenience.
pub use docbind_core::StoreClient;
