// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply transports.
//!
//! Replies leave the process through a chat relay that owns the actual
//! network identities. When no relay is configured, replies are logged and
//! dropped.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use soulfan_config::model::XmtpConfig;
use soulfan_core::{
    AdapterType, HealthStatus, OutboundMessage, PluginAdapter, ReplySink, SoulfanError,
};
use tracing::{debug, warn};

const RELAY_TIMEOUT: Duration = Duration::from_secs(15);

/// [`ReplySink`] that posts replies to `{relay_url}/send`.
pub struct RelaySink {
    client: reqwest::Client,
    base_url: String,
}

impl RelaySink {
    pub fn new(relay_url: &str) -> Result<Self, SoulfanError> {
        let client = reqwest::Client::builder()
            .timeout(RELAY_TIMEOUT)
            .build()
            .map_err(|e| SoulfanError::Transport {
                message: format!("failed to build relay client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self {
            client,
            base_url: relay_url.trim_end_matches('/').to_string(),
        })
    }

    fn send_url(&self) -> String {
        format!("{}/send", self.base_url)
    }
}

#[async_trait]
impl PluginAdapter for RelaySink {
    fn name(&self) -> &str {
        "xmtp-relay"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }

    async fn health_check(&self) -> Result<HealthStatus, SoulfanError> {
        Ok(match self.client.get(&self.base_url).send().await {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Degraded(format!("relay unreachable: {e}")),
        })
    }
}

#[async_trait]
impl ReplySink for RelaySink {
    async fn send(&self, msg: OutboundMessage) -> Result<(), SoulfanError> {
        let response = self
            .client
            .post(self.send_url())
            .json(&msg)
            .send()
            .await
            .map_err(|e| SoulfanError::Transport {
                message: format!("relay request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SoulfanError::Transport {
                message: format!("relay rejected reply ({status}): {body}"),
                source: None,
            });
        }
        debug!(from = %msg.from, to = %msg.to, "reply relayed");
        Ok(())
    }
}

/// [`ReplySink`] used when no relay is configured.
pub struct LogSink;

#[async_trait]
impl PluginAdapter for LogSink {
    fn name(&self) -> &str {
        "log-sink"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Transport
    }

    async fn health_check(&self) -> Result<HealthStatus, SoulfanError> {
        Ok(HealthStatus::Degraded("no relay configured".into()))
    }
}

#[async_trait]
impl ReplySink for LogSink {
    async fn send(&self, msg: OutboundMessage) -> Result<(), SoulfanError> {
        warn!(
            from = %msg.from,
            to = %msg.to,
            content = %msg.content,
            "xmtp.relay_url is unset; reply dropped"
        );
        Ok(())
    }
}

/// Picks the reply transport for `config`.
pub fn sink_from_config(config: &XmtpConfig) -> Result<Arc<dyn ReplySink>, SoulfanError> {
    Ok(match config.relay_url.as_deref() {
        Some(url) => Arc::new(RelaySink::new(url)?),
        None => Arc::new(LogSink),
    })
}
