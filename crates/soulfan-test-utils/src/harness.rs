// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end pipeline testing.
//!
//! `PipelineHarness` assembles a [`CreationPipeline`] over mock adapters and
//! keeps handles to every mock for assertions.

use std::sync::Arc;

use soulfan_config::model::{ReplicateConfig, SiteConfig, WalrusConfig};
use soulfan_pipeline::{CreationPipeline, PipelineParts};
use soulfan_replicate::ImageSynthesizer;
use soulfan_site::SiteSynthesizer;

use crate::mock_blob::MockBlobStore;
use crate::mock_chain::{MockRegistry, MockWallets};
use crate::mock_models::MockImageModel;
use crate::mock_publisher::MockPublisher;

/// Builder for a [`PipelineHarness`] with optional replacement mocks.
pub struct PipelineHarnessBuilder {
    image_model: Option<MockImageModel>,
    blob_store: Option<MockBlobStore>,
    publisher: Option<MockPublisher>,
    registry: Option<MockRegistry>,
    replicate: ReplicateConfig,
}

impl PipelineHarnessBuilder {
    fn new() -> Self {
        Self {
            image_model: None,
            blob_store: None,
            publisher: None,
            registry: None,
            replicate: ReplicateConfig::default(),
        }
    }

    pub fn with_image_model(mut self, model: MockImageModel) -> Self {
        self.image_model = Some(model);
        self
    }

    pub fn with_blob_store(mut self, store: MockBlobStore) -> Self {
        self.blob_store = Some(store);
        self
    }

    pub fn with_publisher(mut self, publisher: MockPublisher) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn with_registry(mut self, registry: MockRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Replicate settings, which decide the image model id.
    pub fn with_replicate_config(mut self, config: ReplicateConfig) -> Self {
        self.replicate = config;
        self
    }

    pub fn build(self) -> PipelineHarness {
        let image_model = Arc::new(self.image_model.unwrap_or_default());
        let blob_store = Arc::new(self.blob_store.unwrap_or_default());
        let publisher = Arc::new(self.publisher.unwrap_or_default());
        let registry = Arc::new(self.registry.unwrap_or_default());

        let pipeline = CreationPipeline::new(PipelineParts {
            images: ImageSynthesizer::new(image_model.clone(), &self.replicate),
            blobs: blob_store.clone(),
            wallets: Arc::new(MockWallets),
            sites: SiteSynthesizer::new(&SiteConfig::default(), &WalrusConfig::default()),
            publisher: publisher.clone(),
            registry: registry.clone(),
        });

        PipelineHarness {
            pipeline: Arc::new(pipeline),
            image_model,
            blob_store,
            publisher,
            registry,
        }
    }
}

/// A creation pipeline wired to mocks.
pub struct PipelineHarness {
    pub pipeline: Arc<CreationPipeline>,
    pub image_model: Arc<MockImageModel>,
    pub blob_store: Arc<MockBlobStore>,
    pub publisher: Arc<MockPublisher>,
    pub registry: Arc<MockRegistry>,
}

impl PipelineHarness {
    pub fn builder() -> PipelineHarnessBuilder {
        PipelineHarnessBuilder::new()
    }
}
