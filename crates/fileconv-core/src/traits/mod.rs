//! Core traits defined in `fileconv-core` and implemented by other crates.

pub mod storage;

pub use storage::ArtifactStore;
