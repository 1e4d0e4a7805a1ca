//! Per-format readers and writers. Transforms compose these.

pub mod csv;
pub mod json;
pub mod pdf;
pub mod xlsx;
pub mod xml;
