// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock registry contract and persona wallets.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use soulfan_core::{
    AdapterType, Bot, BotRegistry, NewBot, PersonaWallets, SoulfanError, TokenId, TxHash,
    WalletAddress,
};

use crate::mock_adapter;

/// Deterministic wallets: token id `n` maps to `0x…` + `n + 0x5f00` in hex.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockWallets;

impl MockWallets {
    /// The address `address_for` returns for `token_id`.
    pub fn expected(token_id: TokenId) -> WalletAddress {
        WalletAddress::parse(&format!("0x{:040x}", u128::from(token_id.0) + 0x5f00))
            .expect("mock addresses are 20 bytes of hex")
    }
}

impl PersonaWallets for MockWallets {
    fn address_for(&self, token_id: TokenId) -> Result<WalletAddress, SoulfanError> {
        Ok(Self::expected(token_id))
    }
}

#[derive(Default)]
struct Ledger {
    created: Vec<NewBot>,
    bots: BTreeMap<u64, Bot>,
    next_token_id: u64,
}

/// A registry that records every `createBot` write.
pub struct MockRegistry {
    ledger: Arc<Mutex<Ledger>>,
    fail_with: Option<String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger::default())),
            fail_with: None,
        }
    }

    /// A registry whose writes revert with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Arguments of every `createBot` call, in order.
    pub async fn created(&self) -> Vec<NewBot> {
        self.ledger.lock().await.created.clone()
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockRegistry, "mock-registry", AdapterType::Registry);

#[async_trait]
impl BotRegistry for MockRegistry {
    async fn create_bot(&self, bot: &NewBot) -> Result<TxHash, SoulfanError> {
        let mut ledger = self.ledger.lock().await;
        ledger.created.push(bot.clone());
        if let Some(message) = &self.fail_with {
            return Err(SoulfanError::Registry {
                message: message.clone(),
                source: None,
            });
        }
        let token_id = ledger.next_token_id;
        ledger.next_token_id += 1;
        ledger.bots.insert(
            token_id,
            Bot {
                name: bot.name().to_string(),
                blob_id: bot.blob_id().clone(),
                wallet: bot.wallet().clone(),
                walrus_site: bot.site_url().to_string(),
                subscription_price: "0".into(),
                image_price: "0".into(),
                voice_price: "0".into(),
            },
        );
        Ok(TxHash(format!("0x{:064x}", ledger.created.len())))
    }

    async fn next_token_id(&self) -> Result<TokenId, SoulfanError> {
        Ok(TokenId(self.ledger.lock().await.next_token_id))
    }

    async fn bot(&self, token_id: TokenId) -> Result<Bot, SoulfanError> {
        self.ledger
            .lock()
            .await
            .bots
            .get(&token_id.0)
            .cloned()
            .ok_or_else(|| SoulfanError::NotFound(format!("bot {token_id}")))
    }
}
