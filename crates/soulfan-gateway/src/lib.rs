// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API for the Soulfan service.
//!
//! Exposes the creation pipeline (`/create-bot`, `/publish-site`, `/bots`),
//! persona lookups (`/address`, `/bots/{id}`, `/blob`) and the chat client
//! lifecycle (`/xmtp/*`). Routes other than `/` and `/health` sit behind
//! optional bearer auth.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use error::ApiError;
pub use server::{AppState, router, start_server};
