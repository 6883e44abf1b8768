// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all external-service adapters implement.

use async_trait::async_trait;

use crate::error::SoulfanError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Soulfan adapters.
///
/// Provides identity and health check capabilities so the gateway can report
/// on every collaborator the same way.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of collaborator this adapter wraps.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, SoulfanError>;
}
