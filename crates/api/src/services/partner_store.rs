//! Hosted partner directory client.
//!
//! Partners are not stored in the local database; they live in a hosted
//! row-level REST datastore following PostgREST conventions. The trait
//! keeps the HTTP client out of the handlers so tests can swap in an
//! in-memory store.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

use crate::config::PartnerStoreConfig;

/// One partner row as the datastore returns it.
pub type PartnerRecord = Map<String, Value>;

#[derive(Debug, Error)]
pub enum PartnerStoreError {
    #[error("Partner store is not configured")]
    Unconfigured,

    #[error("Partner store request failed: {0}")]
    Transport(String),

    #[error("Partner store returned status {0}")]
    Upstream(u16),

    #[error("Partner store returned an unexpected payload: {0}")]
    Payload(String),
}

/// Row-level access to the hosted partner table.
#[async_trait]
pub trait PartnerStore: Send + Sync {
    /// All partners, active first, then by company name.
    async fn list(&self) -> Result<Vec<PartnerRecord>, PartnerStoreError>;

    /// One partner by id, if present.
    async fn get(&self, id: i64) -> Result<Option<PartnerRecord>, PartnerStoreError>;

    /// Inserts a partner and returns the stored representation.
    async fn create(&self, record: PartnerRecord) -> Result<PartnerRecord, PartnerStoreError>;

    /// Replaces the given columns of a partner. Returns the stored row,
    /// or None when no row matched the id.
    async fn update(
        &self,
        id: i64,
        record: PartnerRecord,
    ) -> Result<Option<PartnerRecord>, PartnerStoreError>;

    /// Deletes a partner. Returns the removed row, or None when no row
    /// matched the id.
    async fn delete(&self, id: i64) -> Result<Option<PartnerRecord>, PartnerStoreError>;
}

/// `PartnerStore` over a hosted PostgREST endpoint.
pub struct HostedPartnerStore {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
    enabled: bool,
}

impl HostedPartnerStore {
    pub fn from_config(config: &PartnerStoreConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
            enabled: config.enabled,
        }
    }

    fn ensure_configured(&self) -> Result<(), PartnerStoreError> {
        if !self.enabled || self.base_url.is_empty() {
            return Err(PartnerStoreError::Unconfigured);
        }
        Ok(())
    }

    /// Sends a request with the datastore's auth headers and checks the
    /// status.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, PartnerStoreError> {
        let response = request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PartnerStoreError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PartnerStoreError::Upstream(status.as_u16()));
        }
        Ok(response)
    }

    async fn rows(&self, response: reqwest::Response) -> Result<Vec<PartnerRecord>, PartnerStoreError> {
        response
            .json::<Vec<PartnerRecord>>()
            .await
            .map_err(|e| PartnerStoreError::Payload(e.to_string()))
    }
}

#[async_trait]
impl PartnerStore for HostedPartnerStore {
    async fn list(&self) -> Result<Vec<PartnerRecord>, PartnerStoreError> {
        self.ensure_configured()?;
        let request = self.client.get(&self.base_url).query(&[
            ("select", "*"),
            ("order", "status.asc,razao_social.asc"),
        ]);
        let response = self.send(request).await?;
        self.rows(response).await
    }

    async fn get(&self, id: i64) -> Result<Option<PartnerRecord>, PartnerStoreError> {
        self.ensure_configured()?;
        let request = self
            .client
            .get(&self.base_url)
            .query(&[("id", format!("eq.{id}")), ("limit", "1".to_string())]);
        let response = self.send(request).await?;
        Ok(self.rows(response).await?.into_iter().next())
    }

    async fn create(&self, record: PartnerRecord) -> Result<PartnerRecord, PartnerStoreError> {
        self.ensure_configured()?;
        let request = self
            .client
            .post(&self.base_url)
            .header("Prefer", "return=representation")
            .header(header::CONTENT_TYPE, "application/json")
            .json(&Value::Object(record));
        let response = self.send(request).await?;
        self.rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PartnerStoreError::Payload("insert returned no row".to_string()))
    }

    async fn update(
        &self,
        id: i64,
        record: PartnerRecord,
    ) -> Result<Option<PartnerRecord>, PartnerStoreError> {
        self.ensure_configured()?;
        let request = self
            .client
            .patch(&self.base_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .header(header::CONTENT_TYPE, "application/json")
            .json(&Value::Object(record));
        let response = self.send(request).await?;
        Ok(self.rows(response).await?.into_iter().next())
    }

    async fn delete(&self, id: i64) -> Result<Option<PartnerRecord>, PartnerStoreError> {
        self.ensure_configured()?;
        let request = self
            .client
            .delete(&self.base_url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation");
        let response = self.send(request).await?;
        Ok(self.rows(response).await?.into_iter().next())
    }
}
