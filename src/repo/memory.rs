//! In-memory blob repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::blob::{BlobError, BlobRepository, Metadata};

/// A stored blob: body plus attached metadata.
#[derive(Debug, Clone)]
struct StoredBlob {
    body: Bytes,
    metadata: Metadata,
}

/// In-memory blob repository backed by a shared HashMap.
///
/// The container name only scopes log context; a single instance holds a
/// single container.
#[derive(Clone)]
pub struct MemoryBlobRepository {
    container: String,
    blobs: Arc<RwLock<HashMap<String, StoredBlob>>>,
}

impl MemoryBlobRepository {
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            blobs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Container identifier this repository serves.
    pub fn container(&self) -> &str {
        &self.container
    }
}

#[async_trait]
impl BlobRepository for MemoryBlobRepository {
    async fn put(&self, key: &str, value: Bytes, metadata: Metadata) -> Result<(), BlobError> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(
            key.to_string(),
            StoredBlob {
                body: value,
                metadata,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Bytes, BlobError> {
        let blobs = self.blobs.read().await;
        blobs
            .get(key)
            .map(|b| b.body.clone())
            .ok_or_else(|| BlobError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), BlobError> {
        let mut blobs = self.blobs.write().await;
        blobs.remove(key);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<(String, Metadata)>, BlobError> {
        let blobs = self.blobs.read().await;
        Ok(blobs
            .iter()
            .map(|(key, blob)| (key.clone(), blob.metadata.clone()))
            .collect())
    }
}
