// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generative model traits (image synthesis and text completion).

use async_trait::async_trait;

use crate::error::SoulfanError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ImageRequest, TextRequest};

/// Adapter for a hosted image-generation model.
#[async_trait]
pub trait ImageModel: PluginAdapter {
    /// Runs the model and returns the URL of the first generated image.
    async fn generate(&self, request: ImageRequest) -> Result<String, SoulfanError>;

    /// Fetches the bytes behind a generated image URL.
    async fn download(&self, url: &str) -> Result<Vec<u8>, SoulfanError>;
}

/// Adapter for a hosted text-completion model.
#[async_trait]
pub trait TextModel: PluginAdapter {
    /// Runs the model and returns the full completion text.
    async fn complete(&self, request: TextRequest) -> Result<String, SoulfanError>;
}
