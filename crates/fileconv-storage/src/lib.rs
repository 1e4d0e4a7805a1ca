//! # fileconv-storage
//!
//! Artifact store implementations for FileConv. Converted outputs are kept
//! in a single flat directory on the local filesystem.

pub mod providers;

pub use providers::local::LocalArtifactStore;
