//! Blob repository trait and error type.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Small string key/value pairs attached to each blob.
pub type Metadata = HashMap<String, String>;

/// Errors from the blob backend.
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("blob backend: {0}")]
    Backend(String),
}

/// Opaque key→bytes storage with per-blob metadata.
///
/// There is no transactional guarantee between these operations and the gate
/// service; the coordinator's protocol ordering provides cross-resource
/// consistency.
#[async_trait]
pub trait BlobRepository: Send + Sync {
    /// Writes a blob, overwriting any existing blob at `key`, and attaches
    /// `metadata` alongside it.
    async fn put(&self, key: &str, value: Bytes, metadata: Metadata) -> Result<(), BlobError>;

    /// Reads a blob body.
    async fn get(&self, key: &str) -> Result<Bytes, BlobError>;

    /// Deletes a blob. Idempotent: deleting an absent key is `Ok`.
    async fn delete(&self, key: &str) -> Result<(), BlobError>;

    /// One finite pass over every key in the namespace, with metadata but
    /// without body fetches. Used only by the sweeper.
    async fn list_all(&self) -> Result<Vec<(String, Metadata)>, BlobError>;
}
