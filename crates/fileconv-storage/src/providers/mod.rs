//! Artifact store providers.

#[cfg(feature = "local")]
pub mod local;
