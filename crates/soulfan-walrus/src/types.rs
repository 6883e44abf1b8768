// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Publisher response shapes.
//!
//! Only the fields the client reads are modeled; the publisher returns much
//! more (storage object, encoding, cost).

use serde::Deserialize;

/// Body of a successful `PUT /v1/blobs`. Exactly one field is present.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResponse {
    #[serde(default)]
    pub newly_created: Option<NewlyCreated>,
    #[serde(default)]
    pub already_certified: Option<AlreadyCertified>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewlyCreated {
    pub blob_object: BlobObject,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobObject {
    pub blob_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyCertified {
    pub blob_id: String,
}
