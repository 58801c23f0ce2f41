use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use docbind_core::{
    BulkItem, BulkResponse, DocbindError, GetResponse, IndexResponse, MappingDocument, StoreClient,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`ElasticClient`].
#[derive(Debug, Clone)]
pub struct ElasticConfig {
    /// Base URL of the cluster, e.g. `http://localhost:9200`.
    pub base_url: String,
    /// Request timeout applied to every call.
    pub timeout: Duration,
}

impl ElasticConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the connection endpoint from `ELASTICSEARCH_HOSTS` and
    /// `ELASTICSEARCH_PORT`.
    pub fn from_env() -> Result<Self, DocbindError> {
        let host = std::env::var("ELASTICSEARCH_HOSTS")
            .map_err(|_| DocbindError::Config("ELASTICSEARCH_HOSTS is not set".to_string()))?;
        let port = std::env::var("ELASTICSEARCH_PORT")
            .map_err(|_| DocbindError::Config("ELASTICSEARCH_PORT is not set".to_string()))?;
        Ok(Self::new(format!("{host}:{port}")))
    }
}

/// Elasticsearch-backed implementation of the [`StoreClient`] trait, using
/// the REST API over a pooled [`reqwest::Client`].
///
/// # Example
///
/// ```rust,no_run
/// use docbind_elastic::{ElasticClient, ElasticConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ElasticConfig::new("http://localhost:9200");
/// let client = ElasticClient::new(config)?;
/// assert!(client.ping().await?);
/// # Ok(())
/// # }
/// ```
pub struct ElasticClient {
    config: ElasticConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct GetDocBody {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_source")]
    source: Value,
}

#[derive(Deserialize)]
struct IndexDocBody {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Deserialize)]
struct BulkBody {
    items: Vec<BulkBodyItem>,
}

#[derive(Deserialize)]
struct BulkBodyItem {
    create: BulkBodyAction,
}

#[derive(Deserialize)]
struct BulkBodyAction {
    status: u16,
    #[serde(rename = "_id")]
    id: Option<String>,
    error: Option<Value>,
}

impl ElasticClient {
    /// Create a new `ElasticClient` from the given configuration.
    pub fn new(config: ElasticConfig) -> Result<Self, DocbindError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DocbindError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Result<Self, DocbindError> {
        Self::new(ElasticConfig::from_env()?)
    }

    /// Check that the cluster answers at all.
    pub async fn ping(&self) -> Result<bool, DocbindError> {
        let response = self
            .http
            .head(&self.config.base_url)
            .send()
            .await
            .map_err(|e| DocbindError::Store(format!("ping failed: {e}")))?;
        Ok(response.status().is_success())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }
}

/// Encode bulk actions as NDJSON: one JSON object per line, trailing newline.
fn ndjson(actions: &[Value]) -> Result<String, DocbindError> {
    let mut body = String::new();
    for action in actions {
        let line = serde_json::to_string(action)
            .map_err(|e| DocbindError::Store(format!("failed to encode bulk action: {e}")))?;
        body.push_str(&line);
        body.push('\n');
    }
    Ok(body)
}

/// Whether a store error body reports `resource_already_exists_exception`,
/// either at the top level or in the first root cause.
fn is_already_exists(body: &Value) -> bool {
    const EXISTS: &str = "resource_already_exists_exception";
    let error = &body["error"];
    error["type"].as_str() == Some(EXISTS)
        || error["root_cause"][0]["type"].as_str() == Some(EXISTS)
}

async fn read_json(response: reqwest::Response) -> Result<Value, DocbindError> {
    response
        .json()
        .await
        .map_err(|e| DocbindError::Store(format!("failed to decode store response: {e}")))
}

#[async_trait]
impl StoreClient for ElasticClient {
    async fn get_document(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<GetResponse>, DocbindError> {
        let response = self
            .http
            .get(self.url(&format!("{index}/_doc/{id}")))
            .send()
            .await
            .map_err(|e| DocbindError::Store(format!("get request failed: {e}")))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocbindError::Store(format!("get failed ({status}): {body}")));
        }

        let body: GetDocBody = serde_json::from_value(read_json(response).await?)
            .map_err(|e| DocbindError::Store(format!("unexpected get response shape: {e}")))?;
        Ok(Some(GetResponse {
            id: body.id,
            source: body.source,
        }))
    }

    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        body: Value,
    ) -> Result<IndexResponse, DocbindError> {
        let request = match id {
            Some(id) => self.http.put(self.url(&format!("{index}/_doc/{id}"))),
            None => self.http.post(self.url(&format!("{index}/_doc"))),
        };
        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| DocbindError::Store(format!("index request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocbindError::Store(format!(
                "index failed ({status}): {body}"
            )));
        }

        let body: IndexDocBody = serde_json::from_value(read_json(response).await?)
            .map_err(|e| DocbindError::Store(format!("unexpected index response shape: {e}")))?;
        Ok(IndexResponse { id: body.id })
    }

    async fn bulk(&self, actions: Vec<Value>) -> Result<BulkResponse, DocbindError> {
        tracing::debug!(actions = actions.len() / 2, "submitting bulk request");

        let response = self
            .http
            .post(self.url("_bulk"))
            .header("Content-Type", "application/x-ndjson")
            .body(ndjson(&actions)?)
            .send()
            .await
            .map_err(|e| DocbindError::Store(format!("bulk request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DocbindError::Store(format!(
                "bulk failed ({status}): {body}"
            )));
        }

        let body: BulkBody = serde_json::from_value(read_json(response).await?)
            .map_err(|e| DocbindError::Store(format!("unexpected bulk response shape: {e}")))?;
        Ok(BulkResponse {
            items: body
                .items
                .into_iter()
                .map(|item| BulkItem {
                    status: item.create.status,
                    id: item.create.id,
                    error: item.create.error,
                })
                .collect(),
        })
    }

    async fn create_index(
        &self,
        index: &str,
        mapping: &MappingDocument,
    ) -> Result<(), DocbindError> {
        let response = self
            .http
            .put(self.url(index))
            .json(mapping)
            .send()
            .await
            .map_err(|e| DocbindError::Store(format!("create index request failed: {e}")))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let body = read_json(response).await.unwrap_or(Value::Null);
        if is_already_exists(&body) {
            return Err(DocbindError::IndexExists(index.to_string()));
        }
        Err(DocbindError::Store(format!(
            "create index failed ({status}): {body}"
        )))
    }
}
