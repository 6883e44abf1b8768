// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persona creation pipeline.
//!
//! A run goes prompt → image → blob → wallet → site → publish → registry.
//! Each step suspends on its collaborator and any failure aborts the run with
//! that step's error; nothing partial is returned.

use std::sync::Arc;

use soulfan_core::{
    BlobId, BlobStore, Bot, BotRegistry, CreationRequest, NewBot, PersonaWallets, PublishedSite,
    SitePublisher, SoulfanError, TokenId, TxHash, WalletAddress,
};
use soulfan_replicate::ImageSynthesizer;
use soulfan_site::SiteSynthesizer;
use tracing::{info, instrument, warn};

/// Result of the avatar half of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    /// URL the image model produced.
    pub image_url: String,
    pub blob_id: BlobId,
    pub wallet: WalletAddress,
    /// Image bytes as uploaded.
    pub raw_bytes: Vec<u8>,
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedBot {
    pub blob_id: BlobId,
    pub wallet: WalletAddress,
    pub site: PublishedSite,
    pub tx_hash: TxHash,
}

/// Collaborators a pipeline runs against.
pub struct PipelineParts {
    pub images: ImageSynthesizer,
    pub blobs: Arc<dyn BlobStore>,
    pub wallets: Arc<dyn PersonaWallets>,
    pub sites: SiteSynthesizer,
    pub publisher: Arc<dyn SitePublisher>,
    pub registry: Arc<dyn BotRegistry>,
}

/// Orchestrates persona creation.
pub struct CreationPipeline {
    images: ImageSynthesizer,
    blobs: Arc<dyn BlobStore>,
    wallets: Arc<dyn PersonaWallets>,
    sites: SiteSynthesizer,
    publisher: Arc<dyn SitePublisher>,
    registry: Arc<dyn BotRegistry>,
}

impl CreationPipeline {
    pub fn new(parts: PipelineParts) -> Self {
        let PipelineParts {
            images,
            blobs,
            wallets,
            sites,
            publisher,
            registry,
        } = parts;
        Self {
            images,
            blobs,
            wallets,
            sites,
            publisher,
            registry,
        }
    }

    /// Wallet for a persona.
    pub fn wallet_for(&self, token_id: TokenId) -> Result<WalletAddress, SoulfanError> {
        self.wallets.address_for(token_id)
    }

    /// Reads stored avatar bytes.
    pub async fn read_blob(&self, blob_id: &BlobId) -> Result<Vec<u8>, SoulfanError> {
        self.blobs.read(blob_id).await
    }

    /// Registered persona for `token_id`.
    pub async fn bot(&self, token_id: TokenId) -> Result<Bot, SoulfanError> {
        self.registry.bot(token_id).await
    }

    /// Generates the avatar, stores it, and derives the persona wallet.
    #[instrument(skip(self, prompt), fields(token_id = %token_id))]
    pub async fn create_avatar(
        &self,
        prompt: &str,
        token_id: TokenId,
    ) -> Result<Avatar, SoulfanError> {
        if prompt.trim().is_empty() {
            return Err(SoulfanError::Validation("prompt is required".into()));
        }

        let wallet = self.wallets.address_for(token_id)?;
        let image_url = self
            .images
            .synthesize(prompt, true)
            .await
            .ok_or_else(|| SoulfanError::Provider {
                message: "image generation produced no image".into(),
                source: None,
            })?;
        let raw_bytes = self.images.download(&image_url).await?;
        let upload = self.blobs.store(raw_bytes.clone()).await?;
        let blob_id = upload.into_blob_id();

        info!(blob_id = %blob_id, wallet = %wallet, "avatar stored");
        Ok(Avatar {
            image_url,
            blob_id,
            wallet,
            raw_bytes,
        })
    }

    /// Renders and publishes the persona site.
    #[instrument(skip(self, name), fields(token_id = %token_id, blob_id = %blob_id))]
    pub async fn publish_site(
        &self,
        blob_id: &BlobId,
        wallet: &WalletAddress,
        token_id: TokenId,
        name: &str,
    ) -> Result<PublishedSite, SoulfanError> {
        if blob_id.0.trim().is_empty() {
            return Err(SoulfanError::Validation("blobId is required".into()));
        }
        let bundle = self.sites.render(blob_id, wallet, token_id, name);
        let site = self.publisher.publish(&bundle).await.inspect_err(|e| {
            warn!(error = %e, "site publish failed");
        })?;
        info!(url = %site.url, "site published");
        Ok(site)
    }

    /// Runs every step and registers the persona on-chain.
    #[instrument(skip(self, request), fields(token_id = %request.token_id))]
    pub async fn run(&self, request: &CreationRequest) -> Result<CreatedBot, SoulfanError> {
        if request.name.trim().is_empty() {
            return Err(SoulfanError::Validation("name is required".into()));
        }

        let avatar = self.create_avatar(&request.prompt, request.token_id).await?;
        let site = self
            .publish_site(&avatar.blob_id, &avatar.wallet, request.token_id, &request.name)
            .await?;

        let new_bot = NewBot::new(
            request.name.clone(),
            avatar.blob_id.clone(),
            site.clone(),
            avatar.wallet.clone(),
        )?;
        let tx_hash = self.registry.create_bot(&new_bot).await?;

        info!(tx_hash = %tx_hash, url = %site.url, "persona created");
        Ok(CreatedBot {
            blob_id: avatar.blob_id,
            wallet: avatar.wallet,
            site,
            tx_hash,
        })
    }
}
