// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Walrus blob store adapter for the Soulfan service.
//!
//! Uploads go to a publisher node with a fixed epoch count; reads go to an
//! aggregator node. Implements [`BlobStore`].

pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use soulfan_config::model::WalrusConfig;
use soulfan_core::{
    AdapterType, BlobId, BlobStore, BlobUpload, HealthStatus, PluginAdapter, SoulfanError,
};
use tracing::{debug, info, warn};

use crate::types::StoreResponse;

/// HTTP client for a Walrus publisher/aggregator pair.
#[derive(Debug, Clone)]
pub struct WalrusClient {
    client: reqwest::Client,
    publisher_url: String,
    aggregator_url: String,
    epochs: u32,
    treat_already_certified_as_success: bool,
}

impl WalrusClient {
    pub fn new(config: &WalrusConfig) -> Result<Self, SoulfanError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| SoulfanError::BlobStore {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        info!(
            publisher = %config.publisher_url,
            aggregator = %config.aggregator_url,
            epochs = config.epochs,
            "Walrus client initialized"
        );

        Ok(Self {
            client,
            publisher_url: config.publisher_url.trim_end_matches('/').to_string(),
            aggregator_url: config.aggregator_url.trim_end_matches('/').to_string(),
            epochs: config.epochs,
            treat_already_certified_as_success: config.treat_already_certified_as_success,
        })
    }

    fn interpret(&self, response: StoreResponse) -> Result<BlobUpload, SoulfanError> {
        if let Some(created) = response.newly_created {
            return Ok(BlobUpload::NewlyCreated(BlobId(created.blob_object.blob_id)));
        }
        if let Some(certified) = response.already_certified {
            if self.treat_already_certified_as_success {
                debug!(blob_id = %certified.blob_id, "blob already certified, reusing id");
                return Ok(BlobUpload::AlreadyCertified(BlobId(certified.blob_id)));
            }
            return Err(SoulfanError::AlreadyCertified {
                blob_id: certified.blob_id,
            });
        }
        Err(SoulfanError::BlobStore {
            message: "unexpected publisher response: neither newlyCreated nor alreadyCertified"
                .into(),
            source: None,
        })
    }
}

fn request_error(e: reqwest::Error) -> SoulfanError {
    SoulfanError::BlobStore {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl PluginAdapter for WalrusClient {
    fn name(&self) -> &str {
        "walrus"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::BlobStore
    }

    async fn health_check(&self) -> Result<HealthStatus, SoulfanError> {
        // The aggregator has no status route; any HTTP answer means it is reachable.
        match self.client.get(&self.aggregator_url).send().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!("aggregator unreachable: {e}"))),
        }
    }
}

#[async_trait]
impl BlobStore for WalrusClient {
    async fn store(&self, bytes: Vec<u8>) -> Result<BlobUpload, SoulfanError> {
        let size = bytes.len();
        let url = format!("{}/v1/blobs?epochs={}", self.publisher_url, self.epochs);
        let response = self
            .client
            .put(&url)
            .body(bytes)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;
        if !status.is_success() {
            warn!(status = %status, "blob upload rejected");
            return Err(SoulfanError::BlobStore {
                message: format!("publisher returned {status}: {body}"),
                source: None,
            });
        }

        let parsed: StoreResponse =
            serde_json::from_str(&body).map_err(|e| SoulfanError::BlobStore {
                message: format!("failed to parse publisher response: {e}"),
                source: Some(Box::new(e)),
            })?;
        let upload = self.interpret(parsed)?;
        info!(blob_id = %upload.blob_id(), size, "blob stored");
        Ok(upload)
    }

    async fn read(&self, blob_id: &BlobId) -> Result<Vec<u8>, SoulfanError> {
        let response = self
            .client
            .get(self.blob_url(blob_id))
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SoulfanError::NotFound(format!("blob {blob_id}")));
        }
        if !status.is_success() {
            return Err(SoulfanError::BlobStore {
                message: format!("aggregator returned {status} for blob {blob_id}"),
                source: None,
            });
        }
        let bytes = response.bytes().await.map_err(request_error)?;
        Ok(bytes.to_vec())
    }

    fn blob_url(&self, blob_id: &BlobId) -> String {
        format!("{}/v1/blobs/{}", self.aggregator_url, blob_id)
    }
}
