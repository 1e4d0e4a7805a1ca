//! Conversion orchestration and artifact naming.

pub mod naming;
pub mod service;

pub use service::ConversionService;
