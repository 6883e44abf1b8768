// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory blob store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use soulfan_core::{AdapterType, BlobId, BlobStore, BlobUpload, SoulfanError};

use crate::mock_adapter;

#[derive(Default)]
struct Store {
    by_id: HashMap<String, Vec<u8>>,
    uploads: usize,
}

/// A content-addressed in-memory blob store.
///
/// Identical bytes uploaded twice come back as `AlreadyCertified` with the
/// first id, mirroring the real store's deduplication.
pub struct MockBlobStore {
    store: Arc<Mutex<Store>>,
    fail_with: Option<String>,
}

impl MockBlobStore {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(Store::default())),
            fail_with: None,
        }
    }

    /// A store that rejects every upload with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Number of `store` calls, including deduplicated ones.
    pub async fn upload_count(&self) -> usize {
        self.store.lock().await.uploads
    }

    /// Bytes held under `blob_id`, if any.
    pub async fn get(&self, blob_id: &str) -> Option<Vec<u8>> {
        self.store.lock().await.by_id.get(blob_id).cloned()
    }

    /// Seed a blob directly.
    pub async fn insert(&self, blob_id: &str, bytes: Vec<u8>) {
        self.store
            .lock()
            .await
            .by_id
            .insert(blob_id.to_string(), bytes);
    }
}

impl Default for MockBlobStore {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockBlobStore, "mock-blob-store", AdapterType::BlobStore);

#[async_trait]
impl BlobStore for MockBlobStore {
    async fn store(&self, bytes: Vec<u8>) -> Result<BlobUpload, SoulfanError> {
        let mut store = self.store.lock().await;
        store.uploads += 1;
        if let Some(message) = &self.fail_with {
            return Err(SoulfanError::BlobStore {
                message: message.clone(),
                source: None,
            });
        }
        if let Some(existing) = store
            .by_id
            .iter()
            .find_map(|(id, stored)| (*stored == bytes).then(|| id.clone()))
        {
            return Ok(BlobUpload::AlreadyCertified(BlobId(existing)));
        }
        let id = format!("mock-blob-{}", store.by_id.len() + 1);
        store.by_id.insert(id.clone(), bytes);
        Ok(BlobUpload::NewlyCreated(BlobId(id)))
    }

    async fn read(&self, blob_id: &BlobId) -> Result<Vec<u8>, SoulfanError> {
        self.store
            .lock()
            .await
            .by_id
            .get(&blob_id.0)
            .cloned()
            .ok_or_else(|| SoulfanError::NotFound(format!("blob {blob_id}")))
    }

    fn blob_url(&self, blob_id: &BlobId) -> String {
        format!("https://aggregator.mock/v1/blobs/{blob_id}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_bytes_are_deduplicated() {
        let store = MockBlobStore::new();
        let first = store.store(vec![1, 2]).await.unwrap();
        let second = store.store(vec![1, 2]).await.unwrap();
        assert!(matches!(first, BlobUpload::NewlyCreated(_)));
        assert_eq!(second, BlobUpload::AlreadyCertified(first.blob_id().clone()));
        assert_eq!(store.upload_count().await, 2);
    }

    #[tokio::test]
    async fn read_returns_stored_bytes() {
        let store = MockBlobStore::new();
        let id = store.store(vec![9]).await.unwrap().into_blob_id();
        assert_eq!(store.read(&id).await.unwrap(), vec![9]);
        assert!(store.read(&BlobId("nope".into())).await.is_err());
    }
}
