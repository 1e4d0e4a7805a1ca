//! # FileConv Converter
//!
//! Pure byte-to-byte transforms between CSV, JSON, XML, XLSX and PDF, and
//! the registry that selects one per [`ConversionKind`].
//!
//! Transforms are synchronous and CPU-bound. Callers on an async runtime
//! should run them on a blocking thread.
//!
//! [`ConversionKind`]: fileconv_core::types::ConversionKind

pub mod error;
pub mod formats;
pub mod models;
pub mod registry;
pub mod transforms;

pub use error::{ConversionError, ConversionResult};
pub use models::{Table, TabularRecord};
pub use registry::{Transform, TransformRegistry, TransformRegistryBuilder};
pub use transforms::TransformFn;
