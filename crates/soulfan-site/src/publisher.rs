// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publishes rendered bundles by running their script with the site builder.
//!
//! Every call gets its own scratch directory; it is removed when the call
//! returns, whether the builder succeeded or not.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use soulfan_config::model::SiteConfig;
use soulfan_core::{
    AdapterType, HealthStatus, PluginAdapter, PublishError, PublishedSite, SiteBundle,
    SitePublisher, SoulfanError,
};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::synthesizer::{INDEX_FILE, PUBLISH_SCRIPT, SITE_DIR};

static MARKED_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"WALRUS_URL:(https://[A-Za-z0-9.-]+\.walrus\.site)").expect("valid regex")
});

static ANY_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https://[A-Za-z0-9.-]+\.walrus\.site").expect("valid regex"));

/// Finds the published site URL in builder output.
///
/// A `WALRUS_URL:` line wins; otherwise the first walrus.site URL anywhere.
pub fn extract_site_url(stdout: &str) -> Option<String> {
    if let Some(caps) = MARKED_URL.captures(stdout) {
        return Some(caps[1].to_string());
    }
    ANY_URL.find(stdout).map(|m| m.as_str().to_string())
}

/// [`SitePublisher`] that shells out to the walrus site builder.
#[derive(Debug, Clone)]
pub struct SiteBuilderPublisher {
    shell: String,
    builder_bin: String,
}

impl SiteBuilderPublisher {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            shell: "sh".to_string(),
            builder_bin: config.builder_bin.clone(),
        }
    }
}

#[async_trait]
impl PluginAdapter for SiteBuilderPublisher {
    fn name(&self) -> &str {
        "site-builder"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::SitePublisher
    }

    async fn health_check(&self) -> Result<HealthStatus, SoulfanError> {
        let lookup = format!("command -v {}", shell_words::quote(&self.builder_bin));
        let found = Command::new(&self.shell)
            .arg("-c")
            .arg(lookup)
            .output()
            .await
            .map(|out| out.status.success())
            .unwrap_or(false);
        Ok(if found {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy(format!("{} not found on PATH", self.builder_bin))
        })
    }
}

#[async_trait]
impl SitePublisher for SiteBuilderPublisher {
    async fn publish(&self, bundle: &SiteBundle) -> Result<PublishedSite, PublishError> {
        let scratch = tempfile::Builder::new().prefix("soulfan-site-").tempdir()?;
        let root = scratch.path();
        let site_dir = root.join(SITE_DIR);
        tokio::fs::create_dir_all(&site_dir).await?;
        tokio::fs::write(site_dir.join(INDEX_FILE), &bundle.index_html).await?;
        tokio::fs::write(root.join(PUBLISH_SCRIPT), &bundle.publish_script).await?;
        debug!(blob_id = %bundle.blob_id, dir = %root.display(), "site bundle written");

        let output = Command::new(&self.shell)
            .arg(PUBLISH_SCRIPT)
            .current_dir(root)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| PublishError::Spawn(e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            warn!(
                blob_id = %bundle.blob_id,
                code = ?output.status.code(),
                stderr = %stderr.trim(),
                "site builder failed"
            );
            return Err(PublishError::Failed {
                code: output.status.code(),
                stderr,
            });
        }

        let url = extract_site_url(&stdout).ok_or(PublishError::InvalidUrl { stdout })?;
        info!(blob_id = %bundle.blob_id, url = %url, "site published");
        Ok(PublishedSite { url })
    }
}
