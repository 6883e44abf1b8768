// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by adapters, the creation pipeline, and the gateway.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

use crate::error::SoulfanError;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of external collaborator an adapter wraps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    ImageModel,
    TextModel,
    BlobStore,
    SitePublisher,
    Registry,
    Transport,
}

/// Sequential persona identifier assigned by the registry contract.
///
/// Accepts either a JSON number or a numeric string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TokenId {
    type Err = SoulfanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(TokenId)
            .map_err(|_| SoulfanError::Validation(format!("tokenId `{s}` is not a non-negative integer")))
    }
}

impl<'de> Deserialize<'de> for TokenId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(TokenId(n)),
            Raw::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Content identifier returned by the blob store after upload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobId(pub String);

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A `0x`-prefixed EVM account address.
///
/// Only constructed through [`WalletAddress::parse`], including when deserialized.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Parses and validates a `0x`-prefixed 20-byte hex address.
    pub fn parse(s: &str) -> Result<Self, SoulfanError> {
        let trimmed = s.trim();
        let hex_part = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| SoulfanError::Validation(format!("address `{s}` must start with 0x")))?;
        if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SoulfanError::Validation(format!(
                "address `{s}` must be 20 bytes of hex"
            )));
        }
        Ok(Self(format!("0x{hex_part}")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for WalletAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WalletAddress::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// Addresses compare case-insensitively: checksummed and lowercase forms are the same account.
impl PartialEq for WalletAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Hash for WalletAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_ascii_lowercase().hash(state);
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction hash returned by a registry write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// On-chain persona record as exposed by the registry's `bots(tokenId)` view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub name: String,
    pub blob_id: BlobId,
    pub wallet: WalletAddress,
    pub walrus_site: String,
    /// Prices are uint256 on-chain; carried as decimal strings.
    pub subscription_price: String,
    pub image_price: String,
    pub voice_price: String,
}

/// Arguments of a `createBot` registry write.
///
/// Construction guarantees that the blob id and site URL both resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBot {
    name: String,
    blob_id: BlobId,
    site: PublishedSite,
    wallet: WalletAddress,
}

impl NewBot {
    pub fn new(
        name: impl Into<String>,
        blob_id: BlobId,
        site: PublishedSite,
        wallet: WalletAddress,
    ) -> Result<Self, SoulfanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SoulfanError::Validation("bot name must not be empty".into()));
        }
        if blob_id.0.trim().is_empty() {
            return Err(SoulfanError::Validation("blob id must not be empty".into()));
        }
        if site.url.trim().is_empty() {
            return Err(SoulfanError::Validation("site url must not be empty".into()));
        }
        Ok(Self {
            name,
            blob_id,
            site,
            wallet,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blob_id(&self) -> &BlobId {
        &self.blob_id
    }

    pub fn site_url(&self) -> &str {
        &self.site.url
    }

    pub fn wallet(&self) -> &WalletAddress {
        &self.wallet
    }
}

/// One pipeline run's input. Never persisted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationRequest {
    pub prompt: String,
    pub name: String,
    pub token_id: TokenId,
}

/// Raw bytes held by the blob store under `blob_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobRecord {
    pub blob_id: BlobId,
    pub raw_bytes: Vec<u8>,
}

/// Outcome of a blob upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobUpload {
    /// The store created a new blob object.
    NewlyCreated(BlobId),
    /// Identical content was already certified under this id.
    AlreadyCertified(BlobId),
}

impl BlobUpload {
    pub fn blob_id(&self) -> &BlobId {
        match self {
            BlobUpload::NewlyCreated(id) | BlobUpload::AlreadyCertified(id) => id,
        }
    }

    pub fn into_blob_id(self) -> BlobId {
        match self {
            BlobUpload::NewlyCreated(id) | BlobUpload::AlreadyCertified(id) => id,
        }
    }
}

/// A site published to the walrus network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedSite {
    pub url: String,
}

/// Rendered site content handed to a [`SitePublisher`](crate::traits::SitePublisher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBundle {
    /// Blob the site embeds, for logging.
    pub blob_id: BlobId,
    /// `index.html` contents.
    pub index_html: String,
    /// Companion `publish.sh` contents.
    pub publish_script: String,
}

/// Whether an image is a persona avatar or an in-chat picture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ImagePurpose {
    Avatar,
    Chat,
}

impl ImagePurpose {
    pub fn from_creation_flag(is_creation: bool) -> Self {
        if is_creation {
            ImagePurpose::Avatar
        } else {
            ImagePurpose::Chat
        }
    }
}

/// A request to an image model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub purpose: ImagePurpose,
}

/// A request to a text-completion model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
}

/// Content of an inbound chat message.
///
/// The chat runtime delivers either plain text, a `{ content }` wrapper, or a
/// pre-parsed `{ command, params }` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Plain(String),
    Command {
        command: String,
        #[serde(default)]
        params: serde_json::Map<String, serde_json::Value>,
    },
    Text {
        content: String,
    },
}

/// A chat message addressed to one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Persona wallet the message was sent to.
    pub to: WalletAddress,
    /// Sender's chat address.
    pub from: String,
    pub content: MessageContent,
}

/// A reply from a persona to a chat participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub from: WalletAddress,
    pub to: String,
    pub content: String,
}
