// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-addressed blob store trait.

use async_trait::async_trait;

use crate::error::SoulfanError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{BlobId, BlobUpload};

/// Adapter for a content-addressed blob store.
#[async_trait]
pub trait BlobStore: PluginAdapter {
    /// Uploads raw bytes and returns the resulting blob id.
    async fn store(&self, bytes: Vec<u8>) -> Result<BlobUpload, SoulfanError>;

    /// Reads the bytes stored under `blob_id`.
    async fn read(&self, blob_id: &BlobId) -> Result<Vec<u8>, SoulfanError>;

    /// Public URL serving the blob's bytes.
    fn blob_url(&self, blob_id: &BlobId) -> String;
}
