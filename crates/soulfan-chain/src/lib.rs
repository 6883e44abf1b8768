// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! EVM chain integration for the Soulfan service.
//!
//! - [`EthersRegistry`]: the bot registry contract (`createBot`, reads).
//! - [`MnemonicWallets`]: deterministic persona wallets per token id.
//! - [`payment_request`]: EIP-681 links used to request tips.

pub mod payment;
pub mod registry;
pub mod wallets;

pub use payment::{TipToken, payment_request, to_base_units};
pub use registry::EthersRegistry;
pub use wallets::MnemonicWallets;
