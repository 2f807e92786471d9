//! fleet-core
//!
//! Core library for bulk-managing indexed Nuclio function units.
//!
//! This crate defines the validated index range and per-tool configuration
//! types, the typed function descriptor document and its YAML rendering,
//! descriptor generation over a range, and the deployment driver with its
//! external-tool adapter.
//!
//! The goal is to keep all substantive logic here so it is fully testable
//! and reusable from multiple frontends (CLI, scripts, etc.).

pub mod config;
pub mod descriptor;
pub mod generate;
pub mod deploy;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
