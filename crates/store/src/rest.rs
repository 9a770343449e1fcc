//! PostgREST-style insert client (the wire format Supabase exposes).

use std::time::Duration;

use async_trait::async_trait;

use crate::{RecordStore, StoreError};

const CONNECT_TIMEOUT_SECS: u64 = 5;
const REST_PREFIX: &str = "rest/v1";

pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Collections are table names; anything that would need escaping in a
    /// path segment is refused before a request is built.
    fn collection_url(&self, collection: &str) -> Result<String, StoreError> {
        let valid = !collection.is_empty()
            && collection
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidCollection(collection.to_string()));
        }
        Ok(format!("{}/{}/{}", self.base_url, REST_PREFIX, collection))
    }
}

#[async_trait]
impl RecordStore for RestStore {
    fn kind(&self) -> &'static str {
        "rest"
    }

    async fn insert(&self, collection: &str, record: serde_json::Value) -> Result<(), StoreError> {
        let url = self.collection_url(collection)?;

        let mut request = self
            .http
            .post(&url)
            .header("Prefer", "return=minimal")
            .json(&[record]);
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "record inserted");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
