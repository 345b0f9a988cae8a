//! The NEORV32 CPU descriptor.
//!
//! Construction resolves the variant, asks the framework for the two bus
//! endpoints, and, depending on the configured source policy, acquires the
//! upstream VHDL sources and converts them to a Verilog netlist that is
//! handed to the framework. Afterwards the caller assigns the reset vector
//! and calls [`Neorv32::finalize`] to obtain the instantiation record. A
//! descriptor either resolves completely or is never observable: any failure
//! during construction propagates and nothing partially built escapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use socforge_hdl::{
    SourceAcquirer, SourceFetcher, SourceManifest, SynthesisJob, ToolchainPipeline,
};

use crate::bus::{BusEndpoint, BusRole, SocInterface};
use crate::config::{IntegrationConfig, SourcePolicy};
use crate::error::{CpuError, Result};
use crate::metadata::CpuMetadata;
use crate::variant::{VariantEntry, VariantTable};

/// Instantiation parameter key for the reset vector.
pub const RESET_PC_PARAM: &str = "RESET_PC";

/// A value of a named instantiation parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParamValue {
    /// An unsigned integer parameter (addresses, widths).
    Unsigned(u64),
    /// A free-form text parameter.
    Text(String),
}

/// The immutable output of a finalized descriptor.
///
/// The parameter keys (notably [`RESET_PC_PARAM`]) and the bus endpoint
/// identities are a stable contract the surrounding framework wires by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstantiationRecord {
    /// HDL entity to instantiate.
    pub entity: String,
    /// Compiler flags software built for this CPU instance must use.
    pub gcc_flags: Vec<String>,
    /// Named instantiation parameters.
    pub params: BTreeMap<String, ParamValue>,
    /// Instruction bus endpoint.
    pub ibus: BusEndpoint,
    /// Data bus endpoint.
    pub dbus: BusEndpoint,
}

impl InstantiationRecord {
    /// Look up a parameter by name.
    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }
}

/// Descriptor for an externally authored NEORV32 core bound into an SoC.
#[derive(Debug)]
pub struct Neorv32 {
    variant: VariantEntry,
    metadata: CpuMetadata,
    reset_address: Option<u64>,
    params: BTreeMap<String, ParamValue>,
    ibus: BusEndpoint,
    dbus: BusEndpoint,
}

impl Neorv32 {
    /// Entity elaborated as the design root.
    pub const TOP_ENTITY: &'static str = "neorv32_cpu";

    /// File name of the converted netlist under the build directory.
    pub const NETLIST_FILE: &'static str = "neorv32.v";

    /// Upstream tree the VHDL sources are fetched from.
    pub const RTL_BASE_URL: &'static str =
        "https://raw.githubusercontent.com/stnolting/neorv32/main/rtl/core";

    /// The variants this core can be configured as.
    pub fn variants() -> VariantTable {
        let mut table = VariantTable::new();
        table.insert(VariantEntry::new(
            "standard",
            &["-march=rv32i", "-mabi=ilp32"],
        ));
        table
    }

    /// The VHDL sources of the core, in elaboration order.
    pub fn sources() -> SourceManifest {
        let mut m = SourceManifest::new(Self::RTL_BASE_URL);
        m.push("neorv32_package.vhd"); // shared package, everything below uses it
        m.push("neorv32_cpu.vhd"); // top entity
        m.push("neorv32_cpu_alu.vhd");
        m.push("neorv32_cpu_cp_bitmanip.vhd");
        m.push("neorv32_cpu_cp_cfu.vhd");
        m.push("neorv32_cpu_cp_fpu.vhd");
        m.push("neorv32_cpu_cp_muldiv.vhd");
        m.push("neorv32_cpu_cp_shifter.vhd");
        m.push("neorv32_cpu_bus.vhd");
        m.push("neorv32_cpu_control.vhd");
        m.push("neorv32_cpu_decompressor.vhd");
        m.push("neorv32_cpu_regfile.vhd");
        m
    }

    /// Create a descriptor, fetching over HTTP and converting with the
    /// default toolchain as the policy demands.
    pub fn create(
        variant_id: &str,
        soc: &mut dyn SocInterface,
        config: &IntegrationConfig,
    ) -> Result<Self> {
        Self::create_with(
            variant_id,
            soc,
            config,
            &SourceAcquirer::http(),
            &ToolchainPipeline::default(),
        )
    }

    /// Create a descriptor with an explicit transport and toolchain.
    pub fn create_with<F: SourceFetcher>(
        variant_id: &str,
        soc: &mut dyn SocInterface,
        config: &IntegrationConfig,
        acquirer: &SourceAcquirer<F>,
        pipeline: &ToolchainPipeline,
    ) -> Result<Self> {
        let variant = Self::variants().lookup(variant_id)?.clone();

        let ibus = soc.create_bus("ibus", BusRole::Instruction);
        let dbus = soc.create_bus("dbus", BusRole::Data);

        let manifest = Self::sources();
        match &config.policy {
            SourcePolicy::Synthesize => {
                acquirer.ensure(&manifest, &config.sources_dir)?;
                let job = SynthesisJob::new(
                    manifest.local_paths(&config.sources_dir),
                    Self::TOP_ENTITY,
                    config.build_dir.join(Self::NETLIST_FILE),
                )?;
                let netlist = pipeline.convert(&job)?;
                soc.add_source(&netlist);
            }
            SourcePolicy::AcquireOnly => {
                acquirer.ensure(&manifest, &config.sources_dir)?;
            }
            SourcePolicy::Prebuilt { netlist } => {
                tracing::debug!("using prebuilt netlist {}", netlist.display());
                soc.add_source(netlist);
            }
        }

        Ok(Neorv32 {
            variant,
            metadata: CpuMetadata::neorv32(),
            reset_address: None,
            params: BTreeMap::new(),
            ibus,
            dbus,
        })
    }

    /// The variant this descriptor was created as.
    pub fn variant(&self) -> &VariantEntry {
        &self.variant
    }

    /// Static description of the core.
    pub fn metadata(&self) -> &CpuMetadata {
        &self.metadata
    }

    /// Instruction bus endpoint.
    pub fn ibus(&self) -> &BusEndpoint {
        &self.ibus
    }

    /// Data bus endpoint.
    pub fn dbus(&self) -> &BusEndpoint {
        &self.dbus
    }

    /// The reset vector, if one has been assigned yet.
    pub fn reset_address(&self) -> Option<u64> {
        self.reset_address
    }

    /// Compiler flags for software built against this instance: the
    /// variant's flags plus the core's identifying define.
    pub fn gcc_flags(&self) -> Vec<String> {
        let mut flags = self.variant.flags.clone();
        flags.push("-D__neorv32__".to_string());
        flags
    }

    /// Assign the reset vector.
    ///
    /// Records the address as the `RESET_PC` instantiation parameter. A
    /// second call overwrites the first silently; the last value before
    /// [`Neorv32::finalize`] wins.
    pub fn set_reset_address(&mut self, addr: u64) {
        self.reset_address = Some(addr);
        self.params
            .insert(RESET_PC_PARAM.to_string(), ParamValue::Unsigned(addr));
    }

    /// Emit the instantiation record, consuming the descriptor.
    ///
    /// Fails with [`CpuError::MissingResetAddress`] unless
    /// [`Neorv32::set_reset_address`] was called first. Taking `self` by
    /// value makes finalization terminal: no mutation is possible once the
    /// record exists.
    pub fn finalize(self) -> Result<InstantiationRecord> {
        if self.reset_address.is_none() {
            return Err(CpuError::MissingResetAddress);
        }
        let gcc_flags = self.gcc_flags();
        Ok(InstantiationRecord {
            entity: Self::TOP_ENTITY.to_string(),
            gcc_flags,
            params: self.params,
            ibus: self.ibus,
            dbus: self.dbus,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::RecordingSoc;
    use std::cell::Cell;
    use std::path::Path;

    struct CountingFetcher {
        calls: Cell<usize>,
    }

    impl CountingFetcher {
        fn new() -> Self {
            CountingFetcher {
                calls: Cell::new(0),
            }
        }
    }

    impl SourceFetcher for CountingFetcher {
        fn fetch(&self, _url: &str, dest: &Path) -> socforge_hdl::Result<()> {
            self.calls.set(self.calls.get() + 1);
            std::fs::write(dest, b"-- stub vhdl")?;
            Ok(())
        }
    }

    fn acquire_only_config(dir: &Path) -> IntegrationConfig {
        IntegrationConfig {
            sources_dir: dir.join("rtl"),
            build_dir: dir.join("build"),
            policy: SourcePolicy::AcquireOnly,
        }
    }

    fn acquire_only_cpu(dir: &Path, soc: &mut RecordingSoc) -> Neorv32 {
        Neorv32::create_with(
            "standard",
            soc,
            &acquire_only_config(dir),
            &SourceAcquirer::new(CountingFetcher::new()),
            &ToolchainPipeline::default(),
        )
        .unwrap()
    }

    #[test]
    fn unknown_variant_aborts_construction() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let err = Neorv32::create_with(
            "nonexistent",
            &mut soc,
            &acquire_only_config(dir.path()),
            &SourceAcquirer::new(CountingFetcher::new()),
            &ToolchainPipeline::default(),
        )
        .unwrap_err();
        assert!(matches!(err, CpuError::UnknownVariant { .. }));
    }

    #[test]
    fn construction_acquires_all_sources_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let fetcher = CountingFetcher::new();
        let acquirer = SourceAcquirer::new(&fetcher);
        let config = acquire_only_config(dir.path());

        let cpu = Neorv32::create_with(
            "standard",
            &mut soc,
            &config,
            &acquirer,
            &ToolchainPipeline::default(),
        )
        .unwrap();

        assert_eq!(cpu.variant().id, "standard");
        assert_eq!(fetcher.calls.get(), Neorv32::sources().len());
        for name in Neorv32::sources().files() {
            assert!(dir.path().join("rtl").join(name).is_file());
        }
        // Acquire-only: nothing handed to the framework yet.
        assert!(soc.sources.is_empty());

        // A second descriptor over the same directory refetches nothing.
        let mut soc2 = RecordingSoc::new();
        Neorv32::create_with(
            "standard",
            &mut soc2,
            &config,
            &acquirer,
            &ToolchainPipeline::default(),
        )
        .unwrap();
        assert_eq!(fetcher.calls.get(), Neorv32::sources().len());
    }

    #[test]
    fn construction_creates_instruction_and_data_buses() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let cpu = acquire_only_cpu(dir.path(), &mut soc);

        assert_eq!(cpu.ibus().role, BusRole::Instruction);
        assert_eq!(cpu.dbus().role, BusRole::Data);
        assert_eq!(soc.buses.len(), 2);
        assert_eq!(soc.buses[0].id, cpu.ibus().id);
        assert_eq!(soc.buses[1].id, cpu.dbus().id);
    }

    #[test]
    fn prebuilt_policy_hands_netlist_straight_to_soc() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let fetcher = CountingFetcher::new();
        let config = IntegrationConfig {
            sources_dir: dir.path().join("rtl"),
            build_dir: dir.path().join("build"),
            policy: SourcePolicy::Prebuilt {
                netlist: dir.path().join("vendor").join("neorv32.v"),
            },
        };

        Neorv32::create_with(
            "standard",
            &mut soc,
            &config,
            &SourceAcquirer::new(&fetcher),
            &ToolchainPipeline::default(),
        )
        .unwrap();

        assert_eq!(soc.sources, vec![dir.path().join("vendor").join("neorv32.v")]);
        assert_eq!(fetcher.calls.get(), 0);
    }

    #[test]
    fn finalize_before_reset_address_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let cpu = acquire_only_cpu(dir.path(), &mut soc);

        let err = cpu.finalize().unwrap_err();
        assert!(matches!(err, CpuError::MissingResetAddress));
    }

    #[test]
    fn finalize_emits_record_with_reset_parameter() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let mut cpu = acquire_only_cpu(dir.path(), &mut soc);

        cpu.set_reset_address(0x8000_0000);
        let record = cpu.finalize().unwrap();

        assert_eq!(record.entity, "neorv32_cpu");
        assert_eq!(
            record.param(RESET_PC_PARAM),
            Some(&ParamValue::Unsigned(0x8000_0000))
        );
        assert_eq!(record.ibus.role, BusRole::Instruction);
        assert_eq!(record.dbus.role, BusRole::Data);
    }

    #[test]
    fn second_reset_address_overwrites_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let mut cpu = acquire_only_cpu(dir.path(), &mut soc);

        cpu.set_reset_address(0x1000_0000);
        cpu.set_reset_address(0x8000_0000);
        assert_eq!(cpu.reset_address(), Some(0x8000_0000));

        let record = cpu.finalize().unwrap();
        assert_eq!(
            record.param(RESET_PC_PARAM),
            Some(&ParamValue::Unsigned(0x8000_0000))
        );
    }

    #[test]
    fn gcc_flags_append_core_define_last() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let cpu = acquire_only_cpu(dir.path(), &mut soc);

        let flags = cpu.gcc_flags();
        assert_eq!(
            flags,
            vec!["-march=rv32i", "-mabi=ilp32", "-D__neorv32__"]
        );
    }

    #[test]
    fn record_serializes_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut soc = RecordingSoc::new();
        let mut cpu = acquire_only_cpu(dir.path(), &mut soc);
        cpu.set_reset_address(0x8000_0000);

        let record = cpu.finalize().unwrap();
        let json = serde_json::to_string(&record).unwrap();
        let back: InstantiationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
        assert!(json.contains("RESET_PC"));
    }

    #[test]
    fn source_manifest_starts_with_package_and_top() {
        let m = Neorv32::sources();
        assert_eq!(m.files()[0], "neorv32_package.vhd");
        assert_eq!(m.files()[1], "neorv32_cpu.vhd");
        assert_eq!(m.len(), 12);
        assert!(m
            .remote_url("neorv32_cpu.vhd")
            .starts_with("https://raw.githubusercontent.com/stnolting/neorv32"));
    }
}
