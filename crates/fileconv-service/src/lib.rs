//! # fileconv-service
//!
//! Application layer for FileConv. The [`ConversionService`] validates an
//! upload, dispatches it to the transform registered for its kind, stores
//! the output under a generated name and reports a `ConversionOutcome`.
//!
//! Dependencies are injected at construction time via `Arc` references.

pub mod conversion;

pub use conversion::ConversionService;
