//! Local filesystem artifact store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use fileconv_core::error::{AppError, ErrorKind};
use fileconv_core::result::AppResult;
use fileconv_core::traits::storage::{
    ArtifactMeta, ArtifactStore, ByteStream, is_flat_name, mime_from_name,
};

/// Artifact store backed by one flat directory.
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    /// Directory holding every artifact.
    root: PathBuf,
}

impl LocalArtifactStore {
    /// Create a store rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Unclassified,
                format!("Failed to create output directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Directory holding every artifact.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Resolve an artifact name for reading. Names outside the flat
    /// namespace can never have been stored, so they read as missing.
    fn resolve_existing(&self, name: &str) -> AppResult<PathBuf> {
        if !is_flat_name(name) {
            return Err(AppError::artifact_not_found(format!("File not found: {name}")));
        }
        Ok(self.root.join(name))
    }
}

fn not_found_or(name: &str, action: &str, e: std::io::Error) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::artifact_not_found(format!("File not found: {name}"))
    } else {
        AppError::with_source(
            ErrorKind::Unclassified,
            format!("Failed to {action} artifact: {name}"),
            e,
        )
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, name: &str, data: Bytes) -> AppResult<()> {
        if !is_flat_name(name) {
            return Err(AppError::malformed_input(format!(
                "Invalid artifact name: {name}"
            )));
        }
        let full_path = self.root.join(name);

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Unclassified,
                format!("Failed to write artifact: {name}"),
                e,
            )
        })?;

        debug!(name, bytes = data.len(), "Wrote artifact");
        Ok(())
    }

    async fn get(&self, name: &str) -> AppResult<Bytes> {
        let full_path = self.resolve_existing(name)?;
        let data = fs::read(&full_path)
            .await
            .map_err(|e| not_found_or(name, "read", e))?;
        Ok(Bytes::from(data))
    }

    async fn open(&self, name: &str) -> AppResult<ByteStream> {
        let full_path = self.resolve_existing(name)?;
        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| not_found_or(name, "open", e))?;

        Ok(Box::pin(ReaderStream::new(file)))
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        if !is_flat_name(name) {
            return Ok(false);
        }
        Ok(fs::try_exists(self.root.join(name)).await.unwrap_or(false))
    }

    async fn metadata(&self, name: &str) -> AppResult<ArtifactMeta> {
        let full_path = self.resolve_existing(name)?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| not_found_or(name, "stat", e))?;

        if !meta.is_file() {
            return Err(AppError::artifact_not_found(format!("File not found: {name}")));
        }

        let last_modified = meta
            .modified()
            .ok()
            .map(chrono::DateTime::<chrono::Utc>::from);

        Ok(ArtifactMeta {
            name: name.to_string(),
            size_bytes: meta.len(),
            mime_type: mime_from_name(name),
            last_modified,
        })
    }
}
