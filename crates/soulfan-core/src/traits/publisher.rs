// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Static-site publisher trait.

use async_trait::async_trait;

use crate::error::PublishError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{PublishedSite, SiteBundle};

/// Publishes a rendered site bundle to the hosting network.
///
/// Implementations own their scratch files and must remove them before
/// returning, whatever the outcome.
#[async_trait]
pub trait SitePublisher: PluginAdapter {
    async fn publish(&self, bundle: &SiteBundle) -> Result<PublishedSite, PublishError>;
}
