// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock site publisher.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use soulfan_core::{AdapterType, PublishError, PublishedSite, SiteBundle, SitePublisher};

use crate::mock_adapter;

enum Outcome {
    Publish,
    Fail { code: i32, stderr: String },
    NoUrl,
}

/// A publisher that records bundles and returns `https://mock-site-N.walrus.site`.
pub struct MockPublisher {
    bundles: Arc<Mutex<Vec<SiteBundle>>>,
    outcome: Outcome,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            bundles: Arc::new(Mutex::new(Vec::new())),
            outcome: Outcome::Publish,
        }
    }

    /// A publisher whose builder exits with `code`.
    pub fn failing(code: i32, stderr: &str) -> Self {
        Self {
            outcome: Outcome::Fail {
                code,
                stderr: stderr.to_string(),
            },
            ..Self::new()
        }
    }

    /// A publisher whose builder succeeds without printing a site URL.
    pub fn without_url() -> Self {
        Self {
            outcome: Outcome::NoUrl,
            ..Self::new()
        }
    }

    /// Every bundle handed to `publish`.
    pub async fn bundles(&self) -> Vec<SiteBundle> {
        self.bundles.lock().await.clone()
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockPublisher, "mock-publisher", AdapterType::SitePublisher);

#[async_trait]
impl SitePublisher for MockPublisher {
    async fn publish(&self, bundle: &SiteBundle) -> Result<PublishedSite, PublishError> {
        let mut bundles = self.bundles.lock().await;
        bundles.push(bundle.clone());
        match &self.outcome {
            Outcome::Publish => Ok(PublishedSite {
                url: format!("https://mock-site-{}.walrus.site", bundles.len()),
            }),
            Outcome::Fail { code, stderr } => Err(PublishError::Failed {
                code: Some(*code),
                stderr: stderr.clone(),
            }),
            Outcome::NoUrl => Err(PublishError::InvalidUrl {
                stdout: "Site updated".to_string(),
            }),
        }
    }
}
