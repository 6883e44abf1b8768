// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Replicate model adapters for the Soulfan service.
//!
//! This crate implements [`ImageModel`] and [`TextModel`] on top of the
//! Replicate predictions API, plus the two policies layered over them:
//! [`ImageSynthesizer`] picks the image model for the deployment and turns
//! failures into "no image", and [`ChatResponder`] wraps chat text in the
//! persona prompt.

pub mod client;
pub mod responder;
pub mod synthesizer;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;
use serde_json::json;
use soulfan_config::model::ReplicateConfig;
use soulfan_core::{
    AdapterType, HealthStatus, ImageModel, ImagePurpose, ImageRequest, PluginAdapter,
    SoulfanError, TextModel, TextRequest,
};
use tracing::{debug, info};

pub use client::ReplicateClient;
pub use responder::ChatResponder;
pub use synthesizer::ImageSynthesizer;

impl ReplicateClient {
    /// Builds a client from the `[replicate]` config section.
    ///
    /// # API Token Resolution
    /// 1. `replicate.api_token` if set
    /// 2. `REPLICATE_API_TOKEN` environment variable
    /// 3. Returns error if neither is available
    pub fn from_config(config: &ReplicateConfig) -> Result<Self, SoulfanError> {
        let token = resolve_api_token(&config.api_token)?;
        let client = Self::new(
            &token,
            &config.base_url,
            Duration::from_millis(config.poll_interval_ms),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(base_url = %config.base_url, "Replicate client initialized");
        Ok(client)
    }
}

fn resolve_api_token(config_token: &Option<String>) -> Result<SecretString, SoulfanError> {
    if let Some(token) = config_token
        && !token.is_empty()
    {
        return Ok(SecretString::from(token.clone()));
    }

    std::env::var("REPLICATE_API_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            SoulfanError::Config(
                "Replicate API token not found. Set replicate.api_token in config or REPLICATE_API_TOKEN environment variable.".into(),
            )
        })
}

/// Image generation through Replicate.
#[derive(Debug, Clone)]
pub struct ReplicateImageModel {
    client: ReplicateClient,
}

impl ReplicateImageModel {
    pub fn new(client: ReplicateClient) -> Self {
        Self { client }
    }
}

/// Model input for an image request: avatars are square PNGs, chat pictures
/// are portrait WebPs.
fn image_input(request: &ImageRequest) -> serde_json::Value {
    let (aspect_ratio, output_format) = match request.purpose {
        ImagePurpose::Avatar => ("1:1", "png"),
        ImagePurpose::Chat => ("3:4", "webp"),
    };
    json!({
        "prompt": request.prompt,
        "aspect_ratio": aspect_ratio,
        "output_format": output_format,
    })
}

#[async_trait]
impl PluginAdapter for ReplicateImageModel {
    fn name(&self) -> &str {
        "replicate-image"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ImageModel
    }

    async fn health_check(&self) -> Result<HealthStatus, SoulfanError> {
        Ok(match self.client.verify_account().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        })
    }
}

#[async_trait]
impl ImageModel for ReplicateImageModel {
    async fn generate(&self, request: ImageRequest) -> Result<String, SoulfanError> {
        debug!(model = %request.model, purpose = %request.purpose, "requesting image");
        let prediction = self.client.predict(&request.model, image_input(&request)).await?;
        prediction
            .output
            .as_ref()
            .and_then(types::first_url)
            .ok_or_else(|| SoulfanError::Provider {
                message: format!("prediction {} returned no image URL", prediction.id),
                source: None,
            })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SoulfanError> {
        self.client.download(url).await
    }
}

/// Text completion through Replicate.
#[derive(Debug, Clone)]
pub struct ReplicateTextModel {
    client: ReplicateClient,
}

impl ReplicateTextModel {
    pub fn new(client: ReplicateClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PluginAdapter for ReplicateTextModel {
    fn name(&self) -> &str {
        "replicate-text"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::TextModel
    }

    async fn health_check(&self) -> Result<HealthStatus, SoulfanError> {
        Ok(match self.client.verify_account().await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(e.to_string()),
        })
    }
}

#[async_trait]
impl TextModel for ReplicateTextModel {
    async fn complete(&self, request: TextRequest) -> Result<String, SoulfanError> {
        let prediction = self
            .client
            .predict(&request.model, json!({ "prompt": request.prompt }))
            .await?;
        prediction
            .output
            .as_ref()
            .and_then(types::joined_text)
            .ok_or_else(|| SoulfanError::Provider {
                message: format!("prediction {} returned no text", prediction.id),
                source: None,
            })
    }
}
