// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persona wallet derivation.
//!
//! Each persona owns the BIP-44 account `m/44'/60'/0'/0/{tokenId}` of the
//! configured mnemonic, so the same token id always maps to the same address.

use ethers::signers::coins_bip39::English;
use ethers::signers::{LocalWallet, MnemonicBuilder, Signer};
use ethers::utils::to_checksum;
use secrecy::{ExposeSecret, SecretString};
use soulfan_config::model::ChainConfig;
use soulfan_core::{PersonaWallets, SoulfanError, TokenId, WalletAddress};

/// Derives persona wallets from one mnemonic phrase.
pub struct MnemonicWallets {
    phrase: SecretString,
}

impl std::fmt::Debug for MnemonicWallets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MnemonicWallets")
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl MnemonicWallets {
    /// Wraps `phrase`, rejecting it up front if it is not a valid mnemonic.
    pub fn new(phrase: SecretString) -> Result<Self, SoulfanError> {
        let wallets = Self { phrase };
        wallets.signer_for(TokenId(0))?;
        Ok(wallets)
    }

    pub fn from_config(config: &ChainConfig) -> Result<Self, SoulfanError> {
        let phrase = config
            .mnemonic
            .as_ref()
            .filter(|m| !m.trim().is_empty())
            .ok_or_else(|| {
                SoulfanError::Config(
                    "persona wallet mnemonic not found. Set chain.mnemonic in config or SOULFAN_CHAIN_MNEMONIC.".into(),
                )
            })?;
        Self::new(SecretString::from(phrase.trim().to_string()))
    }

    /// The signing key for a persona.
    pub fn signer_for(&self, token_id: TokenId) -> Result<LocalWallet, SoulfanError> {
        let index = u32::try_from(token_id.0).map_err(|_| {
            SoulfanError::Validation(format!("token id {token_id} exceeds the derivation range"))
        })?;
        let derive_error = |e: &dyn std::fmt::Display| {
            SoulfanError::Wallet(format!("failed to derive wallet {index}: {e}"))
        };
        MnemonicBuilder::<English>::default()
            .phrase(self.phrase.expose_secret())
            .index(index)
            .map_err(|e| derive_error(&e))?
            .build()
            .map_err(|e| derive_error(&e))
    }
}

impl PersonaWallets for MnemonicWallets {
    fn address_for(&self, token_id: TokenId) -> Result<WalletAddress, SoulfanError> {
        let signer = self.signer_for(token_id)?;
        WalletAddress::parse(&to_checksum(&signer.address(), None))
    }
}
