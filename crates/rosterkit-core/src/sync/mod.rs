//! Shared monitoring document sync client
//!
//! The monitoring board lives in one shared remote document so every
//! clerk sees the same checklist. Last write wins; `updated_at` is the
//! change marker polled by other clients.

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::MonitoringEntry;

/// The shared document: the full board plus its write timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedMonitoringDoc {
    pub data: Vec<MonitoringEntry>,
    /// Unix seconds of the last write
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl SharedMonitoringDoc {
    /// Wrap the current board in a document stamped now.
    #[must_use]
    pub fn now(data: Vec<MonitoringEntry>) -> Self {
        Self {
            data,
            updated_at: unix_timestamp_now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Invalid sync configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Sync HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Sync API error: {0}")]
    Api(String),
}

pub type SyncResult<T> = Result<T, SyncError>;

/// HTTP client for the shared monitoring document.
#[derive(Clone)]
pub struct MonitoringSyncClient {
    endpoint: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl MonitoringSyncClient {
    /// Build a client against a document endpoint. An optional bearer
    /// token is attached to every request.
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> SyncResult<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        let token = token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        Ok(Self {
            endpoint,
            token,
            client: reqwest::Client::builder().build()?,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch the shared document. `None` when it does not exist yet.
    pub async fn fetch(&self) -> SyncResult<Option<SharedMonitoringDoc>> {
        let response = self
            .authorize(self.client.get(&self.endpoint))
            .header("Accept", "application/json")
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Api(parse_api_error(status, &body)));
        }

        Ok(Some(response.json::<SharedMonitoringDoc>().await?))
    }

    /// Replace the shared document with the given board, stamped now.
    /// Returns the written document so the caller can keep the stamp.
    pub async fn publish(&self, entries: Vec<MonitoringEntry>) -> SyncResult<SharedMonitoringDoc> {
        let doc = SharedMonitoringDoc::now(entries);
        let response = self
            .authorize(self.client.put(&self.endpoint))
            .json(&doc)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Api(parse_api_error(status, &body)));
        }

        debug!(updated_at = doc.updated_at, "monitoring document published");
        Ok(doc)
    }

    /// Fetch the document only if it changed after `since` (unix
    /// seconds). `None` means nothing newer exists.
    pub async fn poll_changes(&self, since: i64) -> SyncResult<Option<SharedMonitoringDoc>> {
        Ok(self
            .fetch()
            .await?
            .filter(|doc| doc.updated_at > since))
    }
}

#[derive(Debug, Deserialize)]
struct SyncErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<SyncErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_endpoint(raw: String) -> SyncResult<String> {
    let endpoint = raw.trim().to_string();
    if endpoint.is_empty() {
        return Err(SyncError::InvalidConfiguration(
            "endpoint must not be empty".to_string(),
        ));
    }
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(SyncError::InvalidConfiguration(
            "endpoint must include http:// or https://".to_string(),
        ))
    }
}

fn unix_timestamp_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| {
            i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
        })
}
