// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Soulfan service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Soulfan configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SoulfanConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Replicate model API settings.
    #[serde(default)]
    pub replicate: ReplicateConfig,

    /// Walrus blob store settings.
    #[serde(default)]
    pub walrus: WalrusConfig,

    /// Static site publishing settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// EVM chain and registry contract settings.
    #[serde(default)]
    pub chain: ChainConfig,

    /// Chat relay settings.
    #[serde(default)]
    pub xmtp: XmtpConfig,
}

const REDACTED: &str = "[redacted]";

impl SoulfanConfig {
    /// Copy of this configuration with every secret replaced by a placeholder.
    pub fn redacted(&self) -> Self {
        let mask = |value: &Option<String>| value.as_ref().map(|_| REDACTED.to_string());
        let mut config = self.clone();
        config.server.bearer_token = mask(&self.server.bearer_token);
        config.replicate.api_token = mask(&self.replicate.api_token);
        config.chain.mnemonic = mask(&self.chain.mnemonic);
        config.chain.deployer_key = mask(&self.chain.deployer_key);
        config
    }
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on API routes. `None` leaves the API open.
    #[serde(default)]
    pub bearer_token: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Deployment environment, which selects the image model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

/// Replicate model API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReplicateConfig {
    /// Replicate API token. `None` requires `SOULFAN_REPLICATE_API_TOKEN`.
    #[serde(default)]
    pub api_token: Option<String>,

    /// API base URL.
    #[serde(default = "default_replicate_base_url")]
    pub base_url: String,

    /// Image model used outside production.
    #[serde(default = "default_fast_image_model")]
    pub fast_image_model: String,

    /// Image model used in production.
    #[serde(default = "default_quality_image_model")]
    pub quality_image_model: String,

    /// Text model for chat replies.
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Deployment environment flag.
    #[serde(default)]
    pub environment: Environment,

    /// Interval between prediction status polls.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Upper bound on a single prediction, including polling.
    #[serde(default = "default_replicate_timeout_secs")]
    pub timeout_secs: u64,

    /// Persona prompt prepended to every chat message.
    #[serde(default = "default_persona_prompt")]
    pub persona_prompt: String,
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            base_url: default_replicate_base_url(),
            fast_image_model: default_fast_image_model(),
            quality_image_model: default_quality_image_model(),
            text_model: default_text_model(),
            environment: Environment::default(),
            poll_interval_ms: default_poll_interval_ms(),
            timeout_secs: default_replicate_timeout_secs(),
            persona_prompt: default_persona_prompt(),
        }
    }
}

fn default_replicate_base_url() -> String {
    "https://api.replicate.com".to_string()
}

fn default_fast_image_model() -> String {
    "black-forest-labs/flux-schnell".to_string()
}

fn default_quality_image_model() -> String {
    "black-forest-labs/flux-1.1-pro".to_string()
}

fn default_text_model() -> String {
    "meta/meta-llama-3-8b-instruct".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_replicate_timeout_secs() -> u64 {
    120
}

fn default_persona_prompt() -> String {
    "You are a friendly companion persona chatting with a fan. Keep your messages short and warm, \
     and remember what they told you earlier in the conversation."
        .to_string()
}

/// Walrus blob store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WalrusConfig {
    /// Publisher endpoint used for uploads.
    #[serde(default = "default_publisher_url")]
    pub publisher_url: String,

    /// Aggregator endpoint used for reads.
    #[serde(default = "default_aggregator_url")]
    pub aggregator_url: String,

    /// Storage epochs requested per upload.
    #[serde(default = "default_epochs")]
    pub epochs: u32,

    /// Return the existing blob id when the store reports `alreadyCertified`.
    #[serde(default = "default_true")]
    pub treat_already_certified_as_success: bool,
}

impl Default for WalrusConfig {
    fn default() -> Self {
        Self {
            publisher_url: default_publisher_url(),
            aggregator_url: default_aggregator_url(),
            epochs: default_epochs(),
            treat_already_certified_as_success: true,
        }
    }
}

fn default_publisher_url() -> String {
    "https://walrus-testnet-publisher.nodes.guru".to_string()
}

fn default_aggregator_url() -> String {
    "https://walrus-testnet-aggregator.nodes.guru".to_string()
}

fn default_epochs() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

/// Static site publishing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Path or name of the site-builder binary.
    #[serde(default = "default_builder_bin")]
    pub builder_bin: String,

    /// Optional site-builder config file passed with `--config`.
    #[serde(default)]
    pub builder_config: Option<String>,

    /// Storage epochs for published sites.
    #[serde(default = "default_epochs")]
    pub epochs: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            builder_bin: default_builder_bin(),
            builder_config: None,
            epochs: default_epochs(),
        }
    }
}

fn default_builder_bin() -> String {
    "site-builder".to_string()
}

/// EVM chain and registry contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// JSON-RPC endpoint.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Chain id used when signing.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Address of the bot registry contract.
    #[serde(default = "default_registry_address")]
    pub registry_address: String,

    /// USDC token contract used for tip requests.
    #[serde(default = "default_usdc_address")]
    pub usdc_address: String,

    /// BIP-39 phrase persona wallets are derived from.
    #[serde(default)]
    pub mnemonic: Option<String>,

    /// Hex private key that signs registry writes.
    #[serde(default)]
    pub deployer_key: Option<String>,

    /// Wait for one confirmation after `createBot`.
    #[serde(default)]
    pub await_receipt: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: default_chain_id(),
            registry_address: default_registry_address(),
            usdc_address: default_usdc_address(),
            mnemonic: None,
            deployer_key: None,
            await_receipt: false,
        }
    }
}

fn default_rpc_url() -> String {
    "https://rpc.sepolia.org".to_string()
}

fn default_chain_id() -> u64 {
    11_155_111
}

fn default_registry_address() -> String {
    "0x97De204a535AE6B5Ab2Bb52F3429e5d7472C45Fe".to_string()
}

fn default_usdc_address() -> String {
    "0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238".to_string()
}

/// Chat relay configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct XmtpConfig {
    /// Relay base URL replies are posted to. `None` drops replies with a warning.
    #[serde(default)]
    pub relay_url: Option<String>,

    /// Per-client inbox capacity.
    #[serde(default = "default_inbox_capacity")]
    pub inbox_capacity: usize,
}

impl Default for XmtpConfig {
    fn default() -> Self {
        Self {
            relay_url: None,
            inbox_capacity: default_inbox_capacity(),
        }
    }
}

fn default_inbox_capacity() -> usize {
    64
}
