// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Binding to the on-chain bot registry.

use std::sync::Arc;

use async_trait::async_trait;
use ethers::prelude::*;
use ethers::utils::to_checksum;
use secrecy::{ExposeSecret, SecretString};
use soulfan_config::model::ChainConfig;
use soulfan_core::{
    AdapterType, Bot, BotRegistry, HealthStatus, NewBot, PluginAdapter, SoulfanError, TokenId,
    TxHash, WalletAddress,
};
use tracing::{info, warn};

use crate::wallets::MnemonicWallets;

abigen!(
    BotFactory,
    r#"[
        function createBot(string name, string blob, string walrusSite, address botWallet) external
        function getNextTokenId() external view returns (uint256)
        function getBotWallet(uint256 tokenId) external view returns (address)
        function bots(uint256 tokenId) external view returns (string name, string blob, address wallet, string walrusSite, uint256 subscriptionPrice, uint256 imagePrice, uint256 voicePrice)
    ]"#
);

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// [`BotRegistry`] backed by the deployed registry contract.
///
/// Writes are signed by the deployer key and submitted without waiting for
/// inclusion unless `await_receipt` is set.
pub struct EthersRegistry {
    contract: BotFactory<SignerClient>,
    await_receipt: bool,
}

impl EthersRegistry {
    /// Connects to the registry described by `config`.
    ///
    /// # Signer Resolution
    /// 1. `chain.deployer_key` if set
    /// 2. Account 0 of `chain.mnemonic`
    /// 3. Returns error if neither is available
    pub fn from_config(config: &ChainConfig) -> Result<Self, SoulfanError> {
        let signer = resolve_signer(config)?.with_chain_id(config.chain_id);
        let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
            .map_err(|e| SoulfanError::Config(format!("invalid chain.rpc_url: {e}")))?;
        let address: Address = config.registry_address.parse().map_err(|e| {
            SoulfanError::Config(format!("invalid chain.registry_address: {e}"))
        })?;

        info!(
            registry = %config.registry_address,
            chain_id = config.chain_id,
            signer = %to_checksum(&signer.address(), None),
            "bot registry initialized"
        );

        let client = Arc::new(SignerMiddleware::new(provider, signer));
        Ok(Self {
            contract: BotFactory::new(address, client),
            await_receipt: config.await_receipt,
        })
    }

    /// Persona wallet recorded on-chain for `token_id`.
    pub async fn bot_wallet(&self, token_id: TokenId) -> Result<WalletAddress, SoulfanError> {
        let address = self
            .contract
            .get_bot_wallet(U256::from(token_id.0))
            .call()
            .await
            .map_err(|e| registry_error("getBotWallet call failed", e))?;
        WalletAddress::parse(&to_checksum(&address, None))
    }
}

fn resolve_signer(config: &ChainConfig) -> Result<LocalWallet, SoulfanError> {
    if let Some(key) = config.deployer_key.as_ref().filter(|k| !k.trim().is_empty()) {
        let key = SecretString::from(key.trim().trim_start_matches("0x").to_string());
        return key
            .expose_secret()
            .parse::<LocalWallet>()
            .map_err(|e| SoulfanError::Config(format!("invalid chain.deployer_key: {e}")));
    }
    if config.mnemonic.is_some() {
        return MnemonicWallets::from_config(config)?.signer_for(TokenId(0));
    }
    Err(SoulfanError::Config(
        "registry signer not found. Set chain.deployer_key or chain.mnemonic.".into(),
    ))
}

fn registry_error<E>(context: &str, e: E) -> SoulfanError
where
    E: std::error::Error + Send + Sync + 'static,
{
    SoulfanError::Registry {
        message: format!("{context}: {e}"),
        source: Some(Box::new(e)),
    }
}

#[async_trait]
impl PluginAdapter for EthersRegistry {
    fn name(&self) -> &str {
        "ethers-registry"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Registry
    }

    async fn health_check(&self) -> Result<HealthStatus, SoulfanError> {
        Ok(match self.contract.client().get_block_number().await {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(format!("rpc unreachable: {e}")),
        })
    }
}

#[async_trait]
impl BotRegistry for EthersRegistry {
    async fn create_bot(&self, bot: &NewBot) -> Result<TxHash, SoulfanError> {
        let wallet: Address = bot
            .wallet()
            .as_str()
            .parse()
            .map_err(|e| SoulfanError::Validation(format!("invalid bot wallet: {e}")))?;

        let call = self.contract.create_bot(
            bot.name().to_string(),
            bot.blob_id().0.clone(),
            bot.site_url().to_string(),
            wallet,
        );
        let pending = call
            .send()
            .await
            .map_err(|e| registry_error("createBot submission failed", e))?;
        let tx_hash = TxHash(format!("{:?}", pending.tx_hash()));
        info!(tx_hash = %tx_hash, name = bot.name(), blob_id = %bot.blob_id(), "createBot submitted");

        if self.await_receipt {
            let receipt = pending
                .confirmations(1)
                .await
                .map_err(|e| registry_error("createBot confirmation failed", e))?
                .ok_or_else(|| SoulfanError::Registry {
                    message: format!("createBot transaction {tx_hash} was dropped"),
                    source: None,
                })?;
            if receipt.status == Some(U64::zero()) {
                warn!(tx_hash = %tx_hash, "createBot reverted");
                return Err(SoulfanError::Registry {
                    message: format!("createBot transaction {tx_hash} reverted"),
                    source: None,
                });
            }
            info!(tx_hash = %tx_hash, block = ?receipt.block_number, "createBot confirmed");
        }

        Ok(tx_hash)
    }

    async fn next_token_id(&self) -> Result<TokenId, SoulfanError> {
        let next = self
            .contract
            .get_next_token_id()
            .call()
            .await
            .map_err(|e| registry_error("getNextTokenId call failed", e))?;
        if next > U256::from(u64::MAX) {
            return Err(SoulfanError::Registry {
                message: format!("next token id {next} does not fit in 64 bits"),
                source: None,
            });
        }
        Ok(TokenId(next.as_u64()))
    }

    async fn bot(&self, token_id: TokenId) -> Result<Bot, SoulfanError> {
        let (name, blob, wallet, walrus_site, subscription_price, image_price, voice_price) = self
            .contract
            .bots(U256::from(token_id.0))
            .call()
            .await
            .map_err(|e| registry_error("bots call failed", e))?;

        if wallet == Address::zero() && name.is_empty() {
            return Err(SoulfanError::NotFound(format!("bot {token_id}")));
        }

        Ok(Bot {
            name,
            blob_id: soulfan_core::BlobId(blob),
            wallet: WalletAddress::parse(&to_checksum(&wallet, None))?,
            walrus_site,
            subscription_price: subscription_price.to_string(),
            image_price: image_price.to_string(),
            voice_price: voice_price.to_string(),
        })
    }
}
