//! CPU core integration descriptors for the socforge SoC builder.
//!
//! A descriptor binds an externally authored processor core into the
//! surrounding hardware-composition framework: it selects a variant (a named
//! flag set), obtains a consumable netlist (fetching and converting the
//! upstream HDL sources, or accepting a prebuilt one), exposes the core's
//! bus endpoints for wiring, and finally emits the instantiation record the
//! framework builds the system from.
//!
//! # Architecture
//!
//! - [`VariantTable`] — Variant id to compiler-flag lookup
//! - [`CpuMetadata`] — Static, data-only core description
//! - [`SocInterface`] — The framework, seen at its interface boundary
//! - [`Neorv32`] — Descriptor for the NEORV32 RISC-V core
//! - [`InstantiationRecord`] — The immutable finalize output

pub mod bus;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod metadata;
pub mod variant;

// Re-exports for convenience.
pub use bus::{BusEndpoint, BusRole, RecordingSoc, SocInterface};
pub use config::{IntegrationConfig, SourcePolicy};
pub use descriptor::{InstantiationRecord, Neorv32, ParamValue, RESET_PC_PARAM};
pub use error::{CpuError, Result};
pub use metadata::{CpuMetadata, Endianness, IoRegion};
pub use variant::{VariantEntry, VariantTable};
