// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use soulfan_core::{
    BlobId, Bot, CreationRequest, HealthStatus, InboundMessage, MessageContent, SoulfanError,
    TokenId, WalletAddress,
};

use crate::error::ApiError;
use crate::server::AppState;

pub const BANNER: &str = "Soulfan persona service";

type ApiResult<T> = Result<T, ApiError>;

fn required<T>(value: Option<T>, field: &str) -> Result<T, SoulfanError> {
    value.ok_or_else(|| SoulfanError::Validation(format!("{field} is required")))
}

/// Request body for POST /create-bot.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBotRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub token_id: Option<TokenId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBotResponse {
    pub status: &'static str,
    pub blob_id: BlobId,
    pub wallet: WalletAddress,
    /// Avatar bytes, base64.
    pub raw_response: String,
}

/// Request body for POST /publish-site.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishSiteRequest {
    #[serde(default)]
    pub blob_id: Option<String>,
    #[serde(default)]
    pub bot_wallet: Option<String>,
    #[serde(default)]
    pub token_id: Option<TokenId>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PublishSiteResponse {
    pub url: String,
}

/// Request body for POST /bots.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBotRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub token_id: Option<TokenId>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBotResponse {
    pub status: &'static str,
    pub blob_id: BlobId,
    pub wallet: WalletAddress,
    pub url: String,
    pub tx_hash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeRequest {
    #[serde(default)]
    pub token_id: Option<TokenId>,
}

#[derive(Debug, Serialize)]
pub struct InitializeResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub address: WalletAddress,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ActiveClient {
    pub address: WalletAddress,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveClientsResponse {
    pub active_clients: Vec<ActiveClient>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub token_id: TokenId,
    pub address: WalletAddress,
}

/// Request body for POST /xmtp/messages.
#[derive(Debug, Deserialize)]
pub struct RelayMessage {
    pub to: String,
    pub from: String,
    pub content: MessageContent,
}

#[derive(Debug, Serialize)]
pub struct AdapterHealth {
    pub name: String,
    #[serde(rename = "type")]
    pub adapter_type: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub active_clients: usize,
    pub adapters: Vec<AdapterHealth>,
}

/// GET /
pub async fn root() -> &'static str {
    BANNER
}

/// POST /create-bot
///
/// Generates the avatar, stores it and derives the persona wallet.
pub async fn create_bot(
    State(state): State<AppState>,
    payload: Result<Json<CreateBotRequest>, JsonRejection>,
) -> ApiResult<Json<CreateBotResponse>> {
    let Json(body) = payload?;
    let prompt = required(body.prompt, "prompt")?;
    let token_id = required(body.token_id, "tokenId")?;

    let avatar = state.pipeline.create_avatar(&prompt, token_id).await?;
    Ok(Json(CreateBotResponse {
        status: "success",
        blob_id: avatar.blob_id,
        wallet: avatar.wallet,
        raw_response: STANDARD.encode(&avatar.raw_bytes),
    }))
}

/// POST /publish-site
pub async fn publish_site(
    State(state): State<AppState>,
    payload: Result<Json<PublishSiteRequest>, JsonRejection>,
) -> ApiResult<Json<PublishSiteResponse>> {
    let Json(body) = payload?;
    let blob_id = BlobId(required(body.blob_id, "blobId")?);
    let wallet = WalletAddress::parse(&required(body.bot_wallet, "botWallet")?)?;
    let token_id = required(body.token_id, "tokenId")?;
    let name = body
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("Persona #{token_id}"));

    let site = state
        .pipeline
        .publish_site(&blob_id, &wallet, token_id, &name)
        .await?;
    Ok(Json(PublishSiteResponse { url: site.url }))
}

/// POST /bots
///
/// Full creation run including the registry write.
pub async fn post_bots(
    State(state): State<AppState>,
    payload: Result<Json<NewBotRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<NewBotResponse>)> {
    let Json(body) = payload?;
    let request = CreationRequest {
        prompt: required(body.prompt, "prompt")?,
        name: required(body.name, "name")?,
        token_id: required(body.token_id, "tokenId")?,
    };

    let created = state.pipeline.run(&request).await?;
    Ok((
        StatusCode::CREATED,
        Json(NewBotResponse {
            status: "success",
            blob_id: created.blob_id,
            wallet: created.wallet,
            url: created.site.url,
            tx_hash: created.tx_hash.0,
        }),
    ))
}

/// GET /bots/{tokenId}
pub async fn get_bot(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<Bot>> {
    let Path(token_id) = path?;
    Ok(Json(state.pipeline.bot(TokenId(token_id)).await?))
}

/// GET /address/{tokenId}
pub async fn get_address(
    State(state): State<AppState>,
    path: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<AddressResponse>> {
    let Path(token_id) = path?;
    let token_id = TokenId(token_id);
    let address = state.pipeline.wallet_for(token_id)?;
    Ok(Json(AddressResponse { token_id, address }))
}

/// GET /blob/{blobId}
pub async fn get_blob(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let Path(blob_id) = path?;
    let bytes = state.pipeline.read_blob(&BlobId(blob_id)).await?;
    Ok(([(header::CONTENT_TYPE, sniff_image_type(&bytes))], bytes).into_response())
}

/// POST /xmtp/initialize
pub async fn xmtp_initialize(
    State(state): State<AppState>,
    payload: Result<Json<InitializeRequest>, JsonRejection>,
) -> ApiResult<Json<InitializeResponse>> {
    let Json(body) = payload?;
    let token_id = required(body.token_id, "tokenId")?;
    let address = state.clients.register(token_id)?;
    Ok(Json(InitializeResponse {
        status: "success",
        message: "XMTP client initialized",
        address,
    }))
}

/// DELETE /xmtp/cleanup/{address}
pub async fn xmtp_cleanup(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<StatusResponse>> {
    let Path(address) = path?;
    let token_id = state.clients.remove_by_address(&address)?;
    Ok(Json(StatusResponse {
        status: "success",
        message: format!("XMTP client for token {token_id} cleaned up"),
    }))
}

/// GET /xmtp/active-clients
pub async fn xmtp_active_clients(State(state): State<AppState>) -> Json<ActiveClientsResponse> {
    Json(ActiveClientsResponse {
        active_clients: state
            .clients
            .active_addresses()
            .into_iter()
            .map(|address| ActiveClient { address })
            .collect(),
    })
}

/// POST /xmtp/messages
///
/// Inbound delivery from the chat relay.
pub async fn xmtp_messages(
    State(state): State<AppState>,
    payload: Result<Json<RelayMessage>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(body) = payload?;
    let msg = InboundMessage {
        to: WalletAddress::parse(&body.to)?,
        from: body.from,
        content: body.content,
    };
    state.clients.deliver(msg).await?;
    Ok(StatusCode::ACCEPTED)
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut adapters = Vec::with_capacity(state.adapters.len());
    let mut any_unhealthy = false;
    let mut any_degraded = false;

    for adapter in state.adapters.iter() {
        let (status, detail) = match adapter.health_check().await {
            Ok(HealthStatus::Healthy) => ("healthy", None),
            Ok(HealthStatus::Degraded(reason)) => {
                any_degraded = true;
                ("degraded", Some(reason))
            }
            Ok(HealthStatus::Unhealthy(reason)) => {
                any_unhealthy = true;
                ("unhealthy", Some(reason))
            }
            Err(e) => {
                any_unhealthy = true;
                ("unhealthy", Some(e.to_string()))
            }
        };
        adapters.push(AdapterHealth {
            name: adapter.name().to_string(),
            adapter_type: adapter.adapter_type().to_string(),
            status,
            detail,
        });
    }

    let status = if any_unhealthy {
        "unhealthy"
    } else if any_degraded {
        "degraded"
    } else {
        "ok"
    };
    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        active_clients: state.clients.len(),
        adapters,
    })
}

fn sniff_image_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(b"\xff\xd8\xff") {
        "image/jpeg"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}
