// SPDX-FileCopyrightText: 2026 Soulfan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Soulfan service.

use thiserror::Error;

/// The primary error type used across all Soulfan adapters and the creation pipeline.
#[derive(Debug, Error)]
pub enum SoulfanError {
    /// Configuration errors (invalid TOML, missing secrets, bad addresses).
    #[error("configuration error: {0}")]
    Config(String),

    /// Generative model errors (image or text prediction failed, bad output).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Blob store errors (upload rejected, unexpected response shape).
    #[error("blob store error: {message}")]
    BlobStore {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The blob store reported the content as already certified and the
    /// deployment is configured to treat that as a failure.
    #[error("blob {blob_id} is already certified")]
    AlreadyCertified { blob_id: String },

    /// Site publishing failed.
    #[error("publish error: {0}")]
    Publish(#[from] PublishError),

    /// Registry contract errors (call reverted, RPC failure).
    #[error("registry error: {message}")]
    Registry {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Persona wallet derivation errors.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// Chat transport errors (relay unreachable, inbox closed).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Caller supplied invalid input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failures at the site-builder boundary.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Writing or cleaning the scratch directory failed.
    #[error("scratch directory i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The site-builder process could not be started.
    #[error("failed to spawn site builder: {0}")]
    Spawn(String),

    /// The site-builder exited unsuccessfully.
    #[error("site builder exited with code {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    /// The site-builder output contained no published URL.
    #[error("invalid URL: no walrus site found in site builder output")]
    InvalidUrl { stdout: String },
}
