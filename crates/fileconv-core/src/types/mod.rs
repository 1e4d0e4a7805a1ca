//! Shared domain types.

pub mod conversion;

pub use conversion::{ConversionKind, ConversionOutcome};
