// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock image and text models with pre-configured outputs.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use soulfan_core::{AdapterType, ImageModel, ImageRequest, SoulfanError, TextModel, TextRequest};

use crate::mock_adapter;

/// URL returned when no image URL is queued.
pub const DEFAULT_IMAGE_URL: &str = "https://replicate.delivery/mock/out-0.png";

/// Bytes returned by every download.
pub const MOCK_IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nmock-image";

/// A mock image model.
///
/// URLs are popped from a FIFO queue; an empty queue yields
/// [`DEFAULT_IMAGE_URL`]. A failing model rejects every request.
pub struct MockImageModel {
    urls: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<ImageRequest>>>,
    downloads: Arc<Mutex<Vec<String>>>,
    fail_with: Option<String>,
}

impl MockImageModel {
    pub fn new() -> Self {
        Self {
            urls: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// A model whose every generation fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Queue a URL for the next generation.
    pub async fn add_url(&self, url: &str) {
        self.urls.lock().await.push_back(url.to_string());
    }

    /// Every request the model received.
    pub async fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().await.clone()
    }

    /// Every URL passed to `download`.
    pub async fn downloads(&self) -> Vec<String> {
        self.downloads.lock().await.clone()
    }
}

impl Default for MockImageModel {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockImageModel, "mock-image-model", AdapterType::ImageModel);

#[async_trait]
impl ImageModel for MockImageModel {
    async fn generate(&self, request: ImageRequest) -> Result<String, SoulfanError> {
        self.requests.lock().await.push(request);
        if let Some(message) = &self.fail_with {
            return Err(SoulfanError::Provider {
                message: message.clone(),
                source: None,
            });
        }
        Ok(self
            .urls
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string()))
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, SoulfanError> {
        self.downloads.lock().await.push(url.to_string());
        Ok(MOCK_IMAGE_BYTES.to_vec())
    }
}

/// A mock text model.
///
/// Replies are popped from a FIFO queue; an empty queue yields `"mock reply"`.
pub struct MockTextModel {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<TextRequest>>>,
    fail_with: Option<String>,
}

impl MockTextModel {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn with_replies(replies: Vec<String>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::new()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new()
        }
    }

    pub async fn requests(&self) -> Vec<TextRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockTextModel {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockTextModel, "mock-text-model", AdapterType::TextModel);

#[async_trait]
impl TextModel for MockTextModel {
    async fn complete(&self, request: TextRequest) -> Result<String, SoulfanError> {
        self.requests.lock().await.push(request);
        if let Some(message) = &self.fail_with {
            return Err(SoulfanError::Provider {
                message: message.clone(),
                source: None,
            });
        }
        Ok(self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock reply".to_string()))
    }
}
