//! Artifact store trait for persisting converted outputs.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// Metadata about a stored artifact.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ArtifactMeta {
    /// Generated file name the artifact is stored under.
    pub name: String,
    /// Size in bytes as reported by the backing store.
    pub size_bytes: u64,
    /// MIME type derived from the name's extension (if known).
    pub mime_type: Option<String>,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// A byte stream type used for reading artifact contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Persistence for converted artifacts.
///
/// The namespace is flat: a name is a single path component and never
/// contains separators. Implementations must be safe under concurrent calls
/// with distinct names; concurrent `put` to the same name is undefined.
#[async_trait]
pub trait ArtifactStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the store is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Create or overwrite the artifact stored under `name`.
    async fn put(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Read an artifact into memory. Fails with `ArtifactNotFound` when absent.
    async fn get(&self, name: &str) -> AppResult<Bytes>;

    /// Open an artifact as a byte stream. Fails with `ArtifactNotFound` when absent.
    async fn open(&self, name: &str) -> AppResult<ByteStream>;

    /// Check whether an artifact exists under `name`.
    async fn exists(&self, name: &str) -> AppResult<bool>;

    /// Get metadata about a stored artifact.
    async fn metadata(&self, name: &str) -> AppResult<ArtifactMeta>;
}

/// Whether `name` is usable as a key in a flat artifact namespace.
pub fn is_flat_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains("..")
        && !name.contains(['/', '\\', '\0'])
}

/// Guess a MIME type from an artifact name's extension.
pub fn mime_from_name(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let mime = match ext.to_ascii_lowercase().as_str() {
        "json" => "application/json",
        "csv" => "text/csv",
        "xml" => "application/xml",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime.to_string())
}
