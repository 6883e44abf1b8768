// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona registry and wallet derivation traits.

use async_trait::async_trait;

use crate::error::SoulfanError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Bot, NewBot, TokenId, TxHash, WalletAddress};

/// Adapter for the on-chain bot registry contract.
#[async_trait]
pub trait BotRegistry: PluginAdapter {
    /// Submits a `createBot` write and returns its transaction hash.
    async fn create_bot(&self, bot: &NewBot) -> Result<TxHash, SoulfanError>;

    /// Reads the token id the next `createBot` will be assigned.
    async fn next_token_id(&self) -> Result<TokenId, SoulfanError>;

    /// Reads a registered persona.
    async fn bot(&self, token_id: TokenId) -> Result<Bot, SoulfanError>;
}

/// Deterministic per-persona wallet derivation.
pub trait PersonaWallets: Send + Sync + 'static {
    fn address_for(&self, token_id: TokenId) -> Result<WalletAddress, SoulfanError>;
}
