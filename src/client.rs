//! HTTP client for the storage service.
//!
//! Thin wrapper over the four endpoints the console consumes. Every method
//! parses the reply body as JSON and hands it to the classifier, so callers
//! always branch on a three-way [`Outcome`] and never on raw statuses.
//! Transport failures (connect, timeout, undecodable body) surface as
//! [`crate::ConsoleError::Transport`].

use serde_json::{Value, json};

use crate::classify::{Outcome, classify};
use crate::error::Result;
use crate::listing::ListingQuery;

/// Client for one storage-service instance.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl StoreClient {
    /// Create a client for the service at `base_url` (trailing slash tolerated).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The normalized service base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a key/value pair.
    pub async fn put(&self, key: &str, value: &str) -> Result<Outcome> {
        let url = format!("{}/put", self.base_url);
        tracing::debug!(%key, "PUT");
        let response = self
            .http
            .post(url)
            .json(&json!({ "key": key, "value": value }))
            .send()
            .await?;
        let status = response.status();
        let body: Value = response.json().await?;
        Ok(classify(status, body, "PUT failed"))
    }

    /// Look a key up. `found: false` in the reply classifies as
    /// [`Outcome::NotFound`], not as an error.
    pub async fn get(&self, key: &str) -> Result<Outcome> {
        let url = format!("{}/get?key={}", self.base_url, urlencoding::encode(key));
        tracing::debug!(%key, "GET");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        Ok(classify(status, body, "GET failed"))
    }

    /// Fetch aggregate store statistics.
    pub async fn stats(&self) -> Result<Outcome> {
        let url = format!("{}/stats", self.base_url);
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        Ok(classify(status, body, "Stats request failed"))
    }

    /// Fetch one page of the key listing described by `query`.
    pub async fn list_keys(&self, query: &ListingQuery) -> Result<Outcome> {
        let mut url = format!(
            "{}/keys?page={}&per_page={}",
            self.base_url, query.page, query.page_size
        );
        if let Some(filter) = &query.filter {
            url.push_str("&q=");
            url.push_str(&urlencoding::encode(filter));
        }
        tracing::debug!(page = query.page, seq = query.seq, "LIST KEYS");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body: Value = response.json().await?;
        Ok(classify(status, body, "Failed to load keys"))
    }
}
