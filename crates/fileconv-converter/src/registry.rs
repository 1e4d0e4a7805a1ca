//! Registry mapping each [`ConversionKind`] to its transform.

use std::collections::HashMap;
use std::sync::LazyLock;

use fileconv_core::types::ConversionKind;
use tracing::debug;

use crate::error::{ConversionError, ConversionResult};
use crate::transforms::{self, TransformFn};

static STANDARD: LazyLock<TransformRegistry> = LazyLock::new(|| {
    ConversionKind::ALL
        .into_iter()
        .fold(TransformRegistry::builder(), |builder, kind| {
            builder.register(kind, transforms::for_kind(kind))
        })
        .build()
});

/// A transform bound to the kind it implements.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    kind: ConversionKind,
    run: TransformFn,
}

impl Transform {
    /// The kind this transform implements.
    pub fn kind(&self) -> ConversionKind {
        self.kind
    }

    /// Run the transform over `input`.
    pub fn apply(&self, input: &[u8]) -> ConversionResult<Vec<u8>> {
        (self.run)(input)
    }
}

/// Immutable lookup from kind to transform. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    transforms: HashMap<ConversionKind, Transform>,
}

/// Builder for a [`TransformRegistry`].
#[derive(Debug, Default)]
pub struct TransformRegistryBuilder {
    transforms: HashMap<ConversionKind, Transform>,
}

impl TransformRegistryBuilder {
    /// Register `run` for `kind`, replacing any earlier entry.
    pub fn register(mut self, kind: ConversionKind, run: TransformFn) -> Self {
        self.transforms.insert(kind, Transform { kind, run });
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> TransformRegistry {
        debug!(count = self.transforms.len(), "Built transform registry");
        TransformRegistry {
            transforms: self.transforms,
        }
    }
}

impl TransformRegistry {
    /// Start an empty registry.
    pub fn builder() -> TransformRegistryBuilder {
        TransformRegistryBuilder::default()
    }

    /// The registry with a transform for every kind, built once per process.
    pub fn standard() -> &'static TransformRegistry {
        &STANDARD
    }

    /// Look up the transform for `kind`.
    pub fn resolve(&self, kind: ConversionKind) -> ConversionResult<Transform> {
        self.transforms
            .get(&kind)
            .copied()
            .ok_or(ConversionError::UnsupportedKind { kind })
    }

    /// Whether `kind` has a transform.
    pub fn supports(&self, kind: ConversionKind) -> bool {
        self.transforms.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn kinds(&self) -> Vec<ConversionKind> {
        ConversionKind::ALL
            .into_iter()
            .filter(|kind| self.supports(*kind))
            .collect()
    }
}
