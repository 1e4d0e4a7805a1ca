//! Artifact storage configuration.

use serde::{Deserialize, Serialize};

/// Where converted artifacts live and how large uploads may be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Flat directory holding every converted artifact.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Maximum upload size in bytes (default 10 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

impl StorageConfig {
    /// Human-readable upload cap, e.g. `"10MB"`.
    pub fn max_upload_label(&self) -> String {
        let mb = self.max_upload_size_bytes / (1024 * 1024);
        if mb > 0 && self.max_upload_size_bytes % (1024 * 1024) == 0 {
            format!("{mb}MB")
        } else {
            format!("{} bytes", self.max_upload_size_bytes)
        }
    }
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MB
}
