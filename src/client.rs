//! HTTP client for the MTGJSON data provider.
//!
//! Three fetch surfaces: the full set list, a single set with its cards, and
//! the daily price snapshot as an unconsumed byte stream. No retries happen
//! here — retry and backoff policy belongs to the caller.

use bytes::Bytes;
use futures::Stream;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

use crate::config;
use crate::error::{IngestError, Result};
use crate::models::SetData;

// ---------------------------------------------------------------------------
// ProviderClientBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ProviderClient`].
pub struct ProviderClientBuilder {
    base_url: String,
    connect_timeout: Duration,
}

impl Default for ProviderClientBuilder {
    fn default() -> Self {
        Self {
            base_url: config::PROVIDER_BASE.to_string(),
            connect_timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl ProviderClientBuilder {
    /// Override the provider base URL (mainly for tests against a local
    /// mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the connection timeout. No total-request timeout is applied —
    /// the price snapshot download is long-lived by design, and
    /// request-level timeout policy belongs to the caller.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<ProviderClient> {
        let http = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| IngestError::ProviderUnavailable(e.to_string()))?;
        Ok(ProviderClient {
            http,
            base_url: self.base_url,
        })
    }
}

// ---------------------------------------------------------------------------
// ProviderClient
// ---------------------------------------------------------------------------

/// Issues outbound requests against the MTGJSON v5 API.
pub struct ProviderClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    pub fn builder() -> ProviderClientBuilder {
        ProviderClientBuilder::default()
    }

    /// Fetch the full set-list metadata.
    ///
    /// Returns the raw set-meta elements; decoding each element is left to
    /// the caller so one malformed set record stays a per-record problem.
    /// A well-formed response with zero sets is an empty vec, not an error.
    pub async fn fetch_set_list(&self) -> Result<Vec<Value>> {
        let url = config::set_list_url(&self.base_url);
        info!("data provider calling {}", url);
        let body = self.get_json(&url).await?;
        match body.get("data") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(IngestError::MalformedPayload(
                "set list response has no 'data' array".into(),
            )),
        }
    }

    /// Fetch one set, including its cards. The code is case-insensitive at
    /// this boundary. `Ok(None)` means the provider has no such set.
    pub async fn fetch_set(&self, code: &str) -> Result<Option<SetData>> {
        let url = config::set_url(&self.base_url, code);
        info!("data provider calling {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| IngestError::ProviderUnavailable(e.to_string()))?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let resp = resp
            .error_for_status()
            .map_err(|e| IngestError::ProviderUnavailable(e.to_string()))?;
        let body: Value = resp
            .json()
            .await
            .map_err(|e| IngestError::MalformedPayload(e.to_string()))?;
        let data = body.get("data").cloned().ok_or_else(|| {
            IngestError::MalformedPayload("set response has no 'data' envelope".into())
        })?;
        let set = serde_json::from_value(data)
            .map_err(|e| IngestError::MalformedPayload(format!("set payload: {}", e)))?;
        Ok(Some(set))
    }

    /// Open the daily price snapshot as an unconsumed byte stream.
    ///
    /// Nothing is buffered here; the caller owns draining (and thereby
    /// closing) the stream.
    pub async fn open_price_stream(
        &self,
    ) -> Result<impl Stream<Item = std::result::Result<Bytes, reqwest::Error>>> {
        let url = config::prices_today_url(&self.base_url);
        info!("data provider calling {}", url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| IngestError::ProviderUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| IngestError::ProviderUnavailable(e.to_string()))?;
        Ok(resp.bytes_stream())
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| IngestError::ProviderUnavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| IngestError::ProviderUnavailable(e.to_string()))?;
        resp.json()
            .await
            .map_err(|e| IngestError::MalformedPayload(e.to_string()))
    }
}
