// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Soulfan integration tests.
//!
//! Provides mock adapters for every external collaborator and a
//! [`PipelineHarness`] that wires them into a [`CreationPipeline`](soulfan_pipeline::CreationPipeline).
//!
//! # Components
//!
//! - [`MockImageModel`] / [`MockTextModel`] - model adapters with queued outputs
//! - [`MockBlobStore`] - in-memory content-addressed store
//! - [`MockPublisher`] - site publisher that records bundles
//! - [`MockRegistry`] - registry that records `createBot` arguments
//! - [`MockReplySink`] - chat transport that captures replies
//! - [`MockWallets`] - deterministic persona wallets

/// Implements [`PluginAdapter`](soulfan_core::PluginAdapter) for a mock.
macro_rules! mock_adapter {
    ($ty:ty, $name:literal, $kind:expr) => {
        #[async_trait::async_trait]
        impl soulfan_core::PluginAdapter for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn version(&self) -> semver::Version {
                semver::Version::new(0, 1, 0)
            }

            fn adapter_type(&self) -> soulfan_core::AdapterType {
                $kind
            }

            async fn health_check(
                &self,
            ) -> Result<soulfan_core::HealthStatus, soulfan_core::SoulfanError> {
                Ok(soulfan_core::HealthStatus::Healthy)
            }
        }
    };
}
pub(crate) use mock_adapter;

pub mod harness;
pub mod mock_blob;
pub mod mock_chain;
pub mod mock_models;
pub mod mock_publisher;
pub mod mock_sink;

pub use harness::{PipelineHarness, PipelineHarnessBuilder};
pub use mock_blob::MockBlobStore;
pub use mock_chain::{MockRegistry, MockWallets};
pub use mock_models::{MockImageModel, MockTextModel};
pub use mock_publisher::MockPublisher;
pub use mock_sink::MockReplySink;
