//! HTTP-level integration tests for the FileConv API.

mod convert_test;
mod helpers;
