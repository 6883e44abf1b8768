// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle of active persona chat clients.
//!
//! A client is one spawned task per persona wallet. It owns an mpsc inbox and
//! stops when its [`CancellationToken`] fires or the inbox closes. The
//! registry is the only owner of client handles; request handlers reach it
//! through shared state.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use soulfan_core::{InboundMessage, PersonaWallets, SoulfanError, TokenId, WalletAddress};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::dispatcher::Dispatcher;

struct ClientHandle {
    address: WalletAddress,
    inbox: mpsc::Sender<InboundMessage>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Registry of active chat clients keyed by token id.
pub struct ClientRegistry {
    clients: DashMap<u64, ClientHandle>,
    wallets: Arc<dyn PersonaWallets>,
    dispatcher: Arc<Dispatcher>,
    inbox_capacity: usize,
    shutdown: CancellationToken,
}

impl ClientRegistry {
    pub fn new(
        wallets: Arc<dyn PersonaWallets>,
        dispatcher: Arc<Dispatcher>,
        inbox_capacity: usize,
    ) -> Self {
        Self {
            clients: DashMap::new(),
            wallets,
            dispatcher,
            inbox_capacity: inbox_capacity.max(1),
            shutdown: CancellationToken::new(),
        }
    }

    /// Starts a client for `token_id` and returns its wallet address.
    ///
    /// Fails with [`SoulfanError::Conflict`] if a client for the token is
    /// already running (the existing client is left untouched) or once
    /// [`shutdown_all`](Self::shutdown_all) has been called.
    pub fn register(&self, token_id: TokenId) -> Result<WalletAddress, SoulfanError> {
        let address = self.wallets.address_for(token_id)?;
        match self.clients.entry(token_id.0) {
            Entry::Occupied(existing) => Err(SoulfanError::Conflict(format!(
                "client for token {token_id} already active at {}",
                existing.get().address
            ))),
            // Checked under the entry guard: shutdown_all cancels before it
            // scans the map, so a client inserted here is always seen by it.
            Entry::Vacant(_) if self.shutdown.is_cancelled() => Err(SoulfanError::Conflict(
                format!("chat clients are shut down; token {token_id} not started"),
            )),
            Entry::Vacant(slot) => {
                let (inbox, rx) = mpsc::channel(self.inbox_capacity);
                let cancel = self.shutdown.child_token();
                let task = tokio::spawn(run_client(
                    address.clone(),
                    rx,
                    cancel.clone(),
                    Arc::clone(&self.dispatcher),
                ));
                slot.insert(ClientHandle {
                    address: address.clone(),
                    inbox,
                    cancel,
                    task,
                });
                info!(%token_id, %address, "chat client started");
                Ok(address)
            }
        }
    }

    /// Token id of the client listening as `address`, if any.
    pub fn lookup_by_address(&self, address: &str) -> Option<TokenId> {
        self.clients
            .iter()
            .find(|entry| entry.value().address.as_str().eq_ignore_ascii_case(address.trim()))
            .map(|entry| TokenId(*entry.key()))
    }

    /// Routes an inbound message to the client addressed by `msg.to`.
    pub async fn deliver(&self, msg: InboundMessage) -> Result<(), SoulfanError> {
        // Clone the sender so no map guard is held across the await.
        let inbox = self
            .clients
            .iter()
            .find(|entry| entry.value().address == msg.to)
            .map(|entry| entry.value().inbox.clone())
            .ok_or_else(|| SoulfanError::NotFound(format!("no active client for {}", msg.to)))?;
        let to = msg.to.clone();
        inbox
            .send(msg)
            .await
            .map_err(|_| SoulfanError::NotFound(format!("client for {to} has stopped")))
    }

    /// Stops and removes the client listening as `address`.
    ///
    /// Address matching is case-insensitive.
    pub fn remove_by_address(&self, address: &str) -> Result<TokenId, SoulfanError> {
        let token_id = self
            .lookup_by_address(address)
            .ok_or_else(|| SoulfanError::NotFound(format!("no active client for {address}")))?;
        let (_, handle) = self
            .clients
            .remove(&token_id.0)
            .ok_or_else(|| SoulfanError::NotFound(format!("no active client for {address}")))?;
        handle.cancel.cancel();
        info!(%token_id, address = %handle.address, "chat client removed");
        Ok(token_id)
    }

    /// Addresses of all running clients, ordered by token id.
    pub fn active_addresses(&self) -> Vec<WalletAddress> {
        let mut active: Vec<(u64, WalletAddress)> = self
            .clients
            .iter()
            .map(|entry| (*entry.key(), entry.value().address.clone()))
            .collect();
        active.sort_by_key(|(token_id, _)| *token_id);
        active.into_iter().map(|(_, address)| address).collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Cancels every client and waits for their tasks to finish.
    ///
    /// Returns the number of clients that were stopped.
    pub async fn shutdown_all(&self) -> usize {
        self.shutdown.cancel();
        let keys: Vec<u64> = self.clients.iter().map(|entry| *entry.key()).collect();
        let mut stopped = 0;
        for key in keys {
            let Some((_, handle)) = self.clients.remove(&key) else {
                continue;
            };
            if let Err(e) = handle.task.await {
                warn!(token_id = key, error = %e, "chat client task failed");
            }
            stopped += 1;
        }
        info!(count = stopped, "all chat clients stopped");
        stopped
    }
}

async fn run_client(
    address: WalletAddress,
    mut inbox: mpsc::Receiver<InboundMessage>,
    cancel: CancellationToken,
    dispatcher: Arc<Dispatcher>,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            msg = inbox.recv() => {
                let Some(msg) = msg else { break };
                if let Err(e) = dispatcher.handle(msg).await {
                    warn!(%address, error = %e, "message handling failed");
                }
            }
        }
    }
    debug!(%address, "chat client stopped");
}
