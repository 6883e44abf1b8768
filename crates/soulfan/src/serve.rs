// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `soulfan serve`: wires every adapter and runs the HTTP API.

use std::sync::Arc;

use soulfan_chain::{EthersRegistry, MnemonicWallets};
use soulfan_config::SoulfanConfig;
use soulfan_core::{
    BlobStore, BotRegistry, ImageModel, PersonaWallets, PluginAdapter, SitePublisher,
    SoulfanError, TextModel,
};
use soulfan_gateway::{AppState, AuthConfig, start_server};
use soulfan_pipeline::{CreationPipeline, PipelineParts};
use soulfan_replicate::{
    ChatResponder, ImageSynthesizer, ReplicateClient, ReplicateImageModel, ReplicateTextModel,
};
use soulfan_site::{SiteBuilderPublisher, SiteSynthesizer};
use soulfan_walrus::WalrusClient;
use soulfan_xmtp::{ClientRegistry, Dispatcher, sink_from_config};
use tracing::{info, warn};

use crate::shutdown;

/// Runs the service until SIGINT/SIGTERM, then stops every chat client.
pub async fn run_serve(config: SoulfanConfig) -> Result<(), SoulfanError> {
    init_tracing(&config.server.log_level);
    info!(environment = ?config.replicate.environment, "starting soulfan serve");

    let state = build_state(&config)?;
    let clients = Arc::clone(&state.clients);
    log_adapter_health(&state.adapters).await;

    let cancel = shutdown::install_signal_handler();
    let result = start_server(&config.server, state, cancel).await;

    let stopped = clients.shutdown_all().await;
    info!(clients = stopped, "soulfan stopped");
    result
}

/// Builds the live adapters and the gateway state.
pub fn build_state(config: &SoulfanConfig) -> Result<AppState, SoulfanError> {
    let replicate = ReplicateClient::from_config(&config.replicate)?;
    let image_model: Arc<dyn ImageModel> = Arc::new(ReplicateImageModel::new(replicate.clone()));
    let text_model: Arc<dyn TextModel> = Arc::new(ReplicateTextModel::new(replicate));
    let blobs: Arc<dyn BlobStore> = Arc::new(WalrusClient::new(&config.walrus)?);
    let publisher: Arc<dyn SitePublisher> = Arc::new(SiteBuilderPublisher::new(&config.site));
    let wallets: Arc<dyn PersonaWallets> = Arc::new(MnemonicWallets::from_config(&config.chain)?);
    let registry: Arc<dyn BotRegistry> = Arc::new(EthersRegistry::from_config(&config.chain)?);
    let sink = sink_from_config(&config.xmtp)?;

    let images = ImageSynthesizer::new(Arc::clone(&image_model), &config.replicate);
    let pipeline = CreationPipeline::new(PipelineParts {
        images: images.clone(),
        blobs: Arc::clone(&blobs),
        wallets: Arc::clone(&wallets),
        sites: SiteSynthesizer::new(&config.site, &config.walrus),
        publisher: Arc::clone(&publisher),
        registry: Arc::clone(&registry),
    });

    let dispatcher = Dispatcher::new(
        images,
        ChatResponder::new(Arc::clone(&text_model), &config.replicate),
        Arc::clone(&sink),
        &config.chain,
    );
    let clients = ClientRegistry::new(wallets, Arc::new(dispatcher), config.xmtp.inbox_capacity);

    let adapters: Vec<Arc<dyn PluginAdapter>> = vec![
        image_model,
        text_model,
        blobs,
        publisher,
        registry,
        sink,
    ];

    Ok(AppState {
        pipeline: Arc::new(pipeline),
        clients: Arc::new(clients),
        adapters: Arc::new(adapters),
        auth: AuthConfig::from_token(config.server.bearer_token.as_deref()),
    })
}

async fn log_adapter_health(adapters: &[Arc<dyn PluginAdapter>]) {
    for adapter in adapters {
        match adapter.health_check().await {
            Ok(status) => info!(adapter = adapter.name(), ?status, "adapter ready"),
            Err(e) => warn!(adapter = adapter.name(), error = %e, "adapter health check failed"),
        }
    }
}

/// Initializes the tracing subscriber with the configured log level.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("soulfan={log_level},warn")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str = "test test test test test test test test test test test junk";

    fn config() -> SoulfanConfig {
        let mut config = SoulfanConfig::default();
        config.replicate.api_token = Some("r8_test".into());
        config.chain.mnemonic = Some(TEST_MNEMONIC.into());
        config
    }

    #[tokio::test]
    async fn build_state_wires_every_adapter() {
        let state = build_state(&config()).unwrap();
        let names: Vec<&str> = state.adapters.iter().map(|a| a.name()).collect();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"ethers-registry"));
        assert!(names.contains(&"log-sink"));
        assert!(state.clients.is_empty());
        assert!(state.auth.bearer_token.is_none());
    }

    #[tokio::test]
    async fn build_state_requires_mnemonic() {
        let mut config = config();
        config.chain.mnemonic = None;
        assert!(matches!(build_state(&config), Err(SoulfanError::Config(_))));
    }
}
