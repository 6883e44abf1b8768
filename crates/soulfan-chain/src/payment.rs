// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EIP-681 payment request links for tips.

use ethers::types::U256;
use ethers::utils::parse_units;
use soulfan_core::{SoulfanError, WalletAddress};
use strum::{Display, EnumString};

/// Asset a tip is paid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TipToken {
    #[default]
    Eth,
    Usdc,
}

impl TipToken {
    pub fn decimals(self) -> u32 {
        match self {
            TipToken::Eth => 18,
            TipToken::Usdc => 6,
        }
    }
}

/// Converts a decimal amount string into base units of `token`.
pub fn to_base_units(amount: &str, token: TipToken) -> Result<U256, SoulfanError> {
    let amount = amount.trim();
    if amount.starts_with('-') {
        return Err(SoulfanError::Validation(format!(
            "tip amount must be positive, got {amount}"
        )));
    }
    let units: U256 = parse_units(amount, token.decimals())
        .map_err(|e| SoulfanError::Validation(format!("invalid tip amount {amount}: {e}")))?
        .into();
    if units.is_zero() {
        return Err(SoulfanError::Validation("tip amount must be positive".into()));
    }
    Ok(units)
}

/// Builds an EIP-681 link asking the payer to send `amount` of `token` to `to`.
///
/// ETH is a plain value transfer; USDC is a `transfer` call on `usdc_contract`.
pub fn payment_request(
    to: &WalletAddress,
    amount: &str,
    token: TipToken,
    chain_id: u64,
    usdc_contract: &str,
) -> Result<String, SoulfanError> {
    let units = to_base_units(amount, token)?;
    Ok(match token {
        TipToken::Eth => format!("ethereum:{to}@{chain_id}?value={units}"),
        TipToken::Usdc => {
            format!("ethereum:{usdc_contract}@{chain_id}/transfer?address={to}&uint256={units}")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const USDC: &str = "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238";

    fn persona() -> WalletAddress {
        WalletAddress::parse("0x14dC79964da2C08b23698B3D3cc7Ca32193d9955").unwrap()
    }

    #[test]
    fn token_parses_case_insensitively() {
        assert_eq!("ETH".parse::<TipToken>().unwrap(), TipToken::Eth);
        assert_eq!("usdc".parse::<TipToken>().unwrap(), TipToken::Usdc);
        assert!("doge".parse::<TipToken>().is_err());
        assert_eq!(TipToken::Usdc.to_string(), "usdc");
    }

    #[test]
    fn eth_request_uses_wei_value() {
        let uri = payment_request(&persona(), "0.01", TipToken::Eth, 11_155_111, USDC).unwrap();
        assert_eq!(
            uri,
            "ethereum:0x14dC79964da2C08b23698B3D3cc7Ca32193d9955@11155111?value=10000000000000000"
        );
    }

    #[test]
    fn usdc_request_calls_transfer_with_six_decimals() {
        let uri = payment_request(&persona(), "2.5", TipToken::Usdc, 11_155_111, USDC).unwrap();
        assert_eq!(
            uri,
            "ethereum:0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238@11155111/transfer?address=0x14dC79964da2C08b23698B3D3cc7Ca32193d9955&uint256=2500000"
        );
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(to_base_units("-1", TipToken::Eth).is_err());
        assert!(to_base_units("0", TipToken::Eth).is_err());
        assert!(to_base_units("lots", TipToken::Eth).is_err());
    }
}
