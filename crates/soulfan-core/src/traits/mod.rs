// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the external collaborators.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod blob;
pub mod model;
pub mod publisher;
pub mod registry;
pub mod transport;

pub use adapter::PluginAdapter;
pub use blob::BlobStore;
pub use model::{ImageModel, TextModel};
pub use publisher::SitePublisher;
pub use registry::{BotRegistry, PersonaWallets};
pub use transport::ReplySink;
