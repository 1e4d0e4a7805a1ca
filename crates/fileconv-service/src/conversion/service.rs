//! Conversion orchestrator: validate, dispatch, persist, report.

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use tracing::{error, info, warn};

use fileconv_converter::TransformRegistry;
use fileconv_core::config::ConversionConfig;
use fileconv_core::error::{AppError, ErrorKind};
use fileconv_core::result::AppResult;
use fileconv_core::traits::storage::{ArtifactMeta, ArtifactStore, ByteStream};
use fileconv_core::types::{ConversionKind, ConversionOutcome};

use super::naming;

/// Runs conversions end to end and serves the stored artifacts.
#[derive(Clone)]
pub struct ConversionService {
    /// Where artifacts are persisted.
    store: Arc<dyn ArtifactStore>,
    /// Kind → transform lookup.
    registry: Arc<TransformRegistry>,
    /// Conversion settings.
    config: ConversionConfig,
}

impl std::fmt::Debug for ConversionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionService")
            .field("store", &self.store.provider_type())
            .field("kinds", &self.registry.kinds())
            .finish()
    }
}

impl ConversionService {
    /// Creates a service over the standard registry.
    pub fn new(store: Arc<dyn ArtifactStore>, config: ConversionConfig) -> Self {
        Self::with_registry(store, Arc::new(TransformRegistry::standard().clone()), config)
    }

    /// Creates a service over a custom registry.
    pub fn with_registry(
        store: Arc<dyn ArtifactStore>,
        registry: Arc<TransformRegistry>,
        config: ConversionConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    /// The underlying artifact store.
    pub fn store(&self) -> &Arc<dyn ArtifactStore> {
        &self.store
    }

    /// Kinds this service can run, with their labels.
    pub fn supported_kinds(&self) -> Vec<(ConversionKind, &'static str)> {
        self.registry
            .kinds()
            .into_iter()
            .map(|kind| (kind, kind.label()))
            .collect()
    }

    /// Download path for a generated artifact name.
    pub fn download_path(&self, generated_file_name: &str) -> String {
        format!("{}{}", self.config.download_path_prefix, generated_file_name)
    }

    /// Convert `data` and store the result.
    ///
    /// Never fails: every rejection is reported as a
    /// [`ConversionOutcome::Failure`], and a failed conversion stores nothing.
    pub async fn convert(
        &self,
        data: Bytes,
        original_file_name: &str,
        kind: ConversionKind,
    ) -> ConversionOutcome {
        let started = Instant::now();
        let input_bytes = data.len();

        match self.try_convert(data, original_file_name, kind).await {
            Ok(outcome) => {
                if let ConversionOutcome::Success {
                    generated_file_name,
                    byte_size,
                    ..
                } = &outcome
                {
                    info!(
                        kind = %kind,
                        original = original_file_name,
                        generated = %generated_file_name,
                        input_bytes,
                        output_bytes = *byte_size,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Conversion succeeded"
                    );
                }
                outcome
            }
            Err(err) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                if err.kind.is_client_error() {
                    warn!(
                        kind = %kind,
                        original = original_file_name,
                        error_kind = %err.kind,
                        reason = %err.message,
                        elapsed_ms,
                        "Conversion failed"
                    );
                } else {
                    error!(
                        kind = %kind,
                        original = original_file_name,
                        error_kind = %err.kind,
                        error = %err,
                        elapsed_ms,
                        "Conversion failed"
                    );
                }
                ConversionOutcome::failure(original_file_name, kind, &err)
            }
        }
    }

    async fn try_convert(
        &self,
        data: Bytes,
        original_file_name: &str,
        kind: ConversionKind,
    ) -> AppResult<ConversionOutcome> {
        if data.is_empty() {
            return Err(AppError::empty_input("File is empty"));
        }

        let transform = self.registry.resolve(kind)?;
        let generated_file_name = naming::generated_name(original_file_name, kind.output_extension())?;

        let output = tokio::task::spawn_blocking(move || transform.apply(&data))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Unclassified, "Conversion task panicked", e))??;

        self.store
            .put(&generated_file_name, Bytes::from(output))
            .await?;
        let meta = self.store.metadata(&generated_file_name).await?;

        Ok(ConversionOutcome::Success {
            original_file_name: original_file_name.to_string(),
            download_path: self.download_path(&generated_file_name),
            generated_file_name,
            kind,
            byte_size: meta.size_bytes,
        })
    }

    /// Read a stored artifact into memory.
    pub async fn fetch(&self, generated_file_name: &str) -> AppResult<Bytes> {
        self.store.get(generated_file_name).await
    }

    /// Open a stored artifact for streaming, together with its metadata.
    pub async fn open(&self, generated_file_name: &str) -> AppResult<(ByteStream, ArtifactMeta)> {
        let meta = self.store.metadata(generated_file_name).await?;
        let stream = self.store.open(generated_file_name).await?;
        Ok((stream, meta))
    }
}
