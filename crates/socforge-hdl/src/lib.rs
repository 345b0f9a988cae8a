//! HDL source acquisition and synthesis-toolchain driving.
//!
//! Externally authored cores ship as trees of HDL files hosted upstream.
//! This crate makes sure those files exist in a local working directory
//! (fetching each missing file exactly once) and drives the GHDL/Yosys
//! toolchain to convert them into a Verilog netlist the SoC builder can
//! consume.
//!
//! # Architecture
//!
//! - [`SourceManifest`] — Ordered list of required file names plus their
//!   upstream base URL
//! - [`SourceAcquirer`] — Idempotent ensure-present loop over a manifest
//! - [`ToolchainPipeline`] — Script rendering and external yosys invocation
//!
//! Everything is synchronous and blocking; callers that need timeouts wrap
//! these operations themselves.

pub mod acquire;
pub mod error;
pub mod manifest;
pub mod synth;

// Re-exports for convenience.
pub use acquire::{HttpFetcher, SourceAcquirer, SourceFetcher};
pub use error::{HdlError, Result};
pub use manifest::SourceManifest;
pub use synth::{SynthesisJob, ToolchainPipeline};
