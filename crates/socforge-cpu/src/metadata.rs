//! Static, data-only descriptions of the cores this crate can integrate.
//!
//! Nothing here has behavior; a plain structure with named fields is enough
//! to tell the compiler toolchain and the linker what they are targeting.

use serde::{Deserialize, Serialize};

/// Byte ordering of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Endianness {
    Little,
    Big,
}

/// A memory-mapped IO region the core expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoRegion {
    /// Base address of the region.
    pub origin: u64,
    /// Size of the region in bytes.
    pub length: u64,
}

/// Immutable description of an integrated CPU core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CpuMetadata {
    /// Architecture family (e.g., "riscv").
    pub family: String,
    /// Machine-readable core name.
    pub name: String,
    /// Human-readable core name.
    pub human_name: String,
    /// Data bus width in bits.
    pub data_width: u32,
    /// Byte ordering.
    pub endianness: Endianness,
    /// GCC target triple for software built against this core.
    pub gcc_triple: String,
    /// Linker output format.
    pub linker_output_format: String,
    /// The no-operation instruction mnemonic.
    pub nop: String,
    /// Memory-mapped IO regions.
    pub io_regions: Vec<IoRegion>,
}

impl CpuMetadata {
    /// Description of the NEORV32 RISC-V core.
    pub fn neorv32() -> Self {
        CpuMetadata {
            family: "riscv".into(),
            name: "neorv32".into(),
            human_name: "NEORV32".into(),
            data_width: 32,
            endianness: Endianness::Little,
            gcc_triple: "riscv64-unknown-elf".into(),
            linker_output_format: "elf32-littleriscv".into(),
            nop: "nop".into(),
            io_regions: vec![IoRegion {
                origin: 0x8000_0000,
                length: 0x8000_0000,
            }],
        }
    }
}
