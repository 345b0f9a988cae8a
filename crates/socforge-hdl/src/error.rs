//! HDL pipeline error types.

use std::path::PathBuf;

/// Errors that can occur while acquiring sources or driving the toolchain.
#[derive(Debug, thiserror::Error)]
pub enum HdlError {
    /// The wire transfer itself failed (connection, HTTP status, write).
    #[error("transport error fetching {url}: {detail}")]
    Transport { url: String, detail: String },

    /// A manifest entry could not be brought into the local directory.
    #[error("failed to acquire '{name}': {cause}")]
    AcquisitionFailed { name: String, cause: String },

    /// A synthesis job referenced a source file that is not on disk.
    #[error("synthesis source not found: {path}")]
    MissingSource { path: PathBuf },

    /// The external conversion tool could not be started at all.
    #[error("unable to launch '{tool}': {cause}")]
    ToolchainMissing { tool: String, cause: String },

    /// The external conversion tool ran and reported failure.
    #[error("conversion to Verilog failed ({detail}); check your GHDL/Yosys plugin installation")]
    ConversionFailed { detail: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for HDL pipeline operations.
pub type Result<T> = std::result::Result<T, HdlError>;
