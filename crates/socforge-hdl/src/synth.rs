//! Synthesis-toolchain driving: VHDL in, Verilog netlist out.
//!
//! The conversion goes through an external yosys process with the GHDL
//! plugin loaded. We render a synthesis script, persist it next to the
//! requested output artifact, and invoke `yosys -q -m ghdl <script>`. The
//! contract with the tool is exit-status-only: zero means the artifact is at
//! the requested path, non-zero means failure. Stdout/stderr are logged,
//! never parsed.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{HdlError, Result};

/// One VHDL-to-Verilog conversion: which sources, which entity, where to.
///
/// Jobs are constructed fresh per conversion and not reused; every source
/// must already exist on disk when the job is built.
#[derive(Debug, Clone)]
pub struct SynthesisJob {
    /// Resolved local source paths, in elaboration order.
    pub sources: Vec<PathBuf>,
    /// Name of the entity to elaborate as the design root.
    pub top_entity: String,
    /// Destination of the converted Verilog netlist.
    pub output_path: PathBuf,
}

impl SynthesisJob {
    /// Build a job, verifying that every source path exists on disk.
    pub fn new(
        sources: Vec<PathBuf>,
        top_entity: impl Into<String>,
        output_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        for source in &sources {
            if !source.is_file() {
                return Err(HdlError::MissingSource {
                    path: source.clone(),
                });
            }
        }
        Ok(SynthesisJob {
            sources,
            top_entity: top_entity.into(),
            output_path: output_path.into(),
        })
    }

    /// Render the yosys synthesis script for this job.
    ///
    /// The script elaborates the sources as VHDL-2008 through GHDL, strips
    /// formal assertion constructs (the Verilog output has no equivalent for
    /// them), and writes the netlist to the job's output path.
    pub fn render_script(&self) -> String {
        let mut lines = Vec::new();
        lines.push("ghdl --ieee=synopsys -fexplicit -frelaxed-rules --std=08 \\".to_string());
        for source in &self.sources {
            lines.push(format!("{} \\", source.display()));
        }
        lines.push(format!("-e {}", self.top_entity));
        lines.push("chformal -assert -remove".to_string());
        lines.push(format!("write_verilog {}", self.output_path.display()));
        lines.join("\n")
    }

    /// Path the synthesis script is persisted to, next to the artifact.
    pub fn script_path(&self) -> PathBuf {
        self.output_path.with_extension("ys")
    }
}

/// Drives the external yosys/GHDL conversion process.
#[derive(Debug, Clone)]
pub struct ToolchainPipeline {
    /// Path or name of the yosys executable.
    yosys: PathBuf,
}

impl Default for ToolchainPipeline {
    fn default() -> Self {
        ToolchainPipeline {
            yosys: PathBuf::from("yosys"),
        }
    }
}

impl ToolchainPipeline {
    /// Use a specific yosys executable instead of resolving via PATH.
    pub fn with_yosys(yosys: impl Into<PathBuf>) -> Self {
        ToolchainPipeline {
            yosys: yosys.into(),
        }
    }

    /// Run the conversion and return the path of the produced artifact.
    ///
    /// Writes the synthesis script (overwriting any previous one), spawns
    /// the tool, and inspects the exit status. A failed spawn or a non-zero
    /// exit is fatal and never retried; a broken toolchain install will not
    /// heal itself. On success the returned path is the caller's to hand to
    /// the surrounding framework, nothing is registered implicitly.
    pub fn convert(&self, job: &SynthesisJob) -> Result<PathBuf> {
        if let Some(parent) = job.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let script_path = job.script_path();
        std::fs::write(&script_path, job.render_script())?;

        tracing::info!(
            "converting {} sources to {} via {}",
            job.sources.len(),
            job.output_path.display(),
            self.yosys.display()
        );

        let output = Command::new(&self.yosys)
            .arg("-q")
            .arg("-m")
            .arg("ghdl")
            .arg(&script_path)
            .output()
            .map_err(|e| HdlError::ToolchainMissing {
                tool: self.yosys.display().to_string(),
                cause: e.to_string(),
            })?;

        if !output.stdout.is_empty() {
            tracing::debug!("yosys stdout: {}", String::from_utf8_lossy(&output.stdout));
        }
        if !output.stderr.is_empty() {
            tracing::warn!("yosys stderr: {}", String::from_utf8_lossy(&output.stderr));
        }

        if !output.status.success() {
            return Err(HdlError::ConversionFailed {
                detail: format!("yosys {}", output.status),
            });
        }

        Ok(job.output_path.clone())
    }
}
