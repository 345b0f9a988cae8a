//! CPU integration error types.

use socforge_hdl::HdlError;

/// Errors that can occur while integrating a CPU core into an SoC.
#[derive(Debug, thiserror::Error)]
pub enum CpuError {
    /// The requested variant is not in the variant table. This is a
    /// configuration error; there is no silent default.
    #[error("unknown CPU variant: '{id}'")]
    UnknownVariant { id: String },

    /// `finalize()` was called before `set_reset_address()`.
    #[error("reset address not set; call set_reset_address() before finalize()")]
    MissingResetAddress,

    /// Source acquisition or toolchain conversion failed.
    #[error(transparent)]
    Hdl(#[from] HdlError),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for CPU integration operations.
pub type Result<T> = std::result::Result<T, CpuError>;
