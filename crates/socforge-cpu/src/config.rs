//! Integration configuration: directories and source policy.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How the descriptor obtains a consumable netlist at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum SourcePolicy {
    /// Fetch the HDL sources and convert them through the toolchain.
    Synthesize,
    /// Fetch the HDL sources only; the caller drives conversion itself.
    AcquireOnly,
    /// Skip acquisition and conversion; use an existing netlist.
    Prebuilt { netlist: PathBuf },
}

impl Default for SourcePolicy {
    fn default() -> Self {
        SourcePolicy::Synthesize
    }
}

/// Configuration for integrating a CPU core into an SoC.
///
/// All fields have defaults; a plain `IntegrationConfig::default()` fetches
/// into `rtl/` and synthesizes into `build/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationConfig {
    /// Directory the HDL sources are acquired into.
    #[serde(default = "default_sources_dir")]
    pub sources_dir: PathBuf,
    /// Directory the converted netlist (and its synthesis script) land in.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
    /// How to obtain the consumable netlist.
    #[serde(default)]
    pub policy: SourcePolicy,
}

fn default_sources_dir() -> PathBuf {
    PathBuf::from("rtl")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        IntegrationConfig {
            sources_dir: default_sources_dir(),
            build_dir: default_build_dir(),
            policy: SourcePolicy::default(),
        }
    }
}

impl IntegrationConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = IntegrationConfig::default();
        assert_eq!(config.sources_dir, PathBuf::from("rtl"));
        assert_eq!(config.build_dir, PathBuf::from("build"));
        assert_eq!(config.policy, SourcePolicy::Synthesize);
    }

    #[test]
    fn parse_empty_toml_uses_defaults() {
        let config = IntegrationConfig::from_toml_str("").unwrap();
        assert_eq!(config, IntegrationConfig::default());
    }

    #[test]
    fn parse_full_toml() {
        let config = IntegrationConfig::from_toml_str(
            r#"
sources_dir = "cores/rtl"
build_dir = "out"

[policy]
mode = "acquire-only"
"#,
        )
        .unwrap();
        assert_eq!(config.sources_dir, PathBuf::from("cores/rtl"));
        assert_eq!(config.build_dir, PathBuf::from("out"));
        assert_eq!(config.policy, SourcePolicy::AcquireOnly);
    }

    #[test]
    fn parse_prebuilt_policy() {
        let config = IntegrationConfig::from_toml_str(
            r#"
[policy]
mode = "prebuilt"
netlist = "vendor/core.v"
"#,
        )
        .unwrap();
        assert_eq!(
            config.policy,
            SourcePolicy::Prebuilt {
                netlist: PathBuf::from("vendor/core.v")
            }
        );
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(IntegrationConfig::from_toml_str("sources_dir = [[[").is_err());
    }
}
