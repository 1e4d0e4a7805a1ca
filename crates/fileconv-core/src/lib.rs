//! # fileconv-core
//!
//! Core crate for FileConv. Contains the conversion kind enumeration and
//! outcome types, the artifact store trait, configuration schemas, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other FileConv crates.

pub mod config;
pub mod error;
pub mod http_error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
pub use types::conversion::{ConversionKind, ConversionOutcome};
