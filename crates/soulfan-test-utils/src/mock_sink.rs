// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock chat transport that captures replies.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use soulfan_core::{AdapterType, OutboundMessage, ReplySink, SoulfanError};

use crate::mock_adapter;

/// Captures every reply passed to `send`.
pub struct MockReplySink {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    notify: Arc<Notify>,
}

impl MockReplySink {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
        }
    }

    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Waits until at least `count` replies were sent, or `timeout` elapses.
    ///
    /// Returns the replies captured so far either way.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> Vec<OutboundMessage> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let notified = self.notify.notified();
            {
                let sent = self.sent.lock().await;
                if sent.len() >= count {
                    return sent.clone();
                }
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return self.sent.lock().await.clone();
            }
        }
    }
}

impl Default for MockReplySink {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockReplySink, "mock-reply-sink", AdapterType::Transport);

#[async_trait]
impl ReplySink for MockReplySink {
    async fn send(&self, msg: OutboundMessage) -> Result<(), SoulfanError> {
        self.sent.lock().await.push(msg);
        self.notify.notify_waiters();
        Ok(())
    }
}
