use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::app_config::StoreConfig;
use crate::errors::StoreError;
use crate::store::DocumentStore;

/// Couchbase Server client reading documents through the REST API
#[derive(Debug)]
pub struct CouchbaseStore {
    /// HTTP client for API requests
    client: Client,
    /// Cluster management endpoint, e.g. `http://localhost:8091`
    endpoint: Url,
    /// Bucket holding the translation documents
    bucket: String,
    /// Basic auth user name (empty disables auth)
    username: String,
    /// Basic auth password
    password: String,
}

/// An open bucket connection
///
/// Released when dropped, on success and error paths alike.
#[derive(Debug)]
pub struct StoreSession<'a> {
    store: &'a CouchbaseStore,
}

/// Envelope returned by the document endpoint
#[derive(Debug, Deserialize)]
struct DocumentEnvelope {
    /// Document body, either inline JSON or a JSON-encoded string
    json: Value,
}

impl CouchbaseStore {
    /// Create a new client from the store configuration
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| StoreError::ConnectionError(format!("Invalid endpoint {}: {}", config.endpoint, e)))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StoreError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            bucket: config.bucket.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    /// Open the configured bucket
    ///
    /// Fails when the cluster is unreachable, the credentials are rejected or
    /// the bucket does not exist.
    pub async fn connect(&self) -> Result<StoreSession<'_>, StoreError> {
        let url = self.url(&["pools", "default", "buckets", self.bucket.as_str()])?;
        debug!("Connecting to bucket {} at {}", self.bucket, self.endpoint);

        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, &format!("bucket {}", self.bucket)));
        }

        Ok(StoreSession { store: self })
    }

    /// Build an endpoint URL from percent-encoded path segments
    pub fn url(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::ConnectionError(format!("Endpoint cannot be a base URL: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, StoreError> {
        let mut request = self.client.get(url);
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, Some(&self.password));
        }

        request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                StoreError::ConnectionError(e.to_string())
            } else {
                StoreError::RequestFailed(e.to_string())
            }
        })
    }
}

impl StoreSession<'_> {
    /// Fetch the document body stored under `id`
    pub async fn get(&self, id: &str) -> Result<Value, StoreError> {
        let store = self.store;
        let url = store.url(&["pools", "default", "buckets", store.bucket.as_str(), "docs", id])?;
        debug!("Fetching document {}", id);

        let response = store.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body, &format!("document {}", id)));
        }

        let envelope = response
            .json::<DocumentEnvelope>()
            .await
            .map_err(|e| StoreError::ParseError(e.to_string()))?;

        decode_body(envelope.json)
    }
}

impl Drop for StoreSession<'_> {
    fn drop(&mut self) {
        debug!("Disconnected from bucket {}", self.store.bucket);
    }
}

#[async_trait]
impl DocumentStore for CouchbaseStore {
    async fn fetch_record(&self, id: &str) -> Result<Value, StoreError> {
        let session = self.connect().await?;
        session.get(id).await
    }
}

/// Unwrap a document body that older servers return as an encoded string
fn decode_body(body: Value) -> Result<Value, StoreError> {
    match body {
        Value::String(encoded) => {
            serde_json::from_str(&encoded).map_err(|e| StoreError::ParseError(e.to_string()))
        }
        inline => Ok(inline),
    }
}

/// Map a failed response to a store error
fn status_error(status: StatusCode, body: String, what: &str) -> StoreError {
    match status {
        StatusCode::NOT_FOUND => StoreError::DocumentNotFound(what.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            StoreError::AuthenticationError(format!("access to {} denied ({})", what, status))
        }
        _ => {
            error!("Store error ({}) for {}: {}", status, what, body);
            StoreError::ApiError {
                status_code: status.as_u16(),
                message: body,
            }
        }
    }
}
