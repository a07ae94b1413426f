//! Command implementations.
//!
//! Commands that need more than a single engine call live here so the CLI
//! layer stays a thin argument-to-call mapping.

pub mod init;
