// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound side of the chat transport.

use async_trait::async_trait;

use crate::error::SoulfanError;
use crate::traits::adapter::PluginAdapter;
use crate::types::OutboundMessage;

/// Delivers persona replies to the chat network.
#[async_trait]
pub trait ReplySink: PluginAdapter {
    async fn send(&self, msg: OutboundMessage) -> Result<(), SoulfanError>;
}
