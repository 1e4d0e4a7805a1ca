//! Conversion pipeline configuration.

use serde::{Deserialize, Serialize};

/// Settings for the conversion orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Prefix prepended to a generated file name to form its download path.
    #[serde(default = "default_download_path_prefix")]
    pub download_path_prefix: String,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            download_path_prefix: default_download_path_prefix(),
        }
    }
}

fn default_download_path_prefix() -> String {
    "/api/convert/download/".to_string()
}
