// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat side of the Soulfan service.
//!
//! - [`command`]: classification of inbound content into text or commands
//! - [`dispatcher`]: per-message handlers (`/image`, `/tip`, plain text)
//! - [`coordinator`]: one running client per persona wallet
//! - [`relay`]: reply transports

pub mod command;
pub mod coordinator;
pub mod dispatcher;
pub mod relay;

pub use command::{Classified, Command, Network, classify};
pub use coordinator::ClientRegistry;
pub use dispatcher::Dispatcher;
pub use relay::{LogSink, RelaySink, sink_from_config};
