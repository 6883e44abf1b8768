// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Image synthesis policy over an [`ImageModel`].

use std::sync::Arc;

use soulfan_config::Environment;
use soulfan_config::model::ReplicateConfig;
use soulfan_core::{ImageModel, ImagePurpose, ImageRequest, SoulfanError};
use tracing::{info, warn};

/// Generates persona images, choosing the model for the deployment.
///
/// Production uses the quality model; every other environment uses the fast
/// one. Generation failures are logged and surface as `None`.
#[derive(Clone)]
pub struct ImageSynthesizer {
    model: Arc<dyn ImageModel>,
    model_id: String,
}

impl ImageSynthesizer {
    pub fn new(model: Arc<dyn ImageModel>, config: &ReplicateConfig) -> Self {
        let model_id = match config.environment {
            Environment::Production => config.quality_image_model.clone(),
            Environment::Development => config.fast_image_model.clone(),
        };
        Self { model, model_id }
    }

    /// Model identifier every request goes to.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Generates one image and returns its URL.
    ///
    /// `is_creation` selects the avatar shape over the in-chat shape.
    pub async fn synthesize(&self, prompt: &str, is_creation: bool) -> Option<String> {
        let request = ImageRequest {
            model: self.model_id.clone(),
            prompt: prompt.to_string(),
            purpose: ImagePurpose::from_creation_flag(is_creation),
        };
        match self.model.generate(request).await {
            Ok(url) => {
                info!(model = %self.model_id, is_creation, "image generated");
                Some(url)
            }
            Err(e) => {
                warn!(model = %self.model_id, error = %e, "image generation failed");
                None
            }
        }
    }

    /// Fetches the bytes of a generated image.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, SoulfanError> {
        self.model.download(url).await
    }
}
