//! Source manifest: which HDL files a core needs and where they live upstream.
//!
//! The manifest lists file names in elaboration order — later files may
//! instantiate entities declared in earlier ones, and the synthesis script
//! must reference them in exactly this order. Acquisition itself fetches each
//! file independently; the ordering matters only to the toolchain step.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An ordered list of required HDL source files plus their upstream origin.
///
/// The remote URL for a file is `<base_url>/<name>`; every file in a manifest
/// shares the same upstream tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceManifest {
    /// Base URL of the upstream source tree (no trailing slash required).
    base_url: String,
    /// File names in elaboration order, unique within the manifest.
    files: Vec<String>,
}

impl SourceManifest {
    /// Create an empty manifest rooted at the given upstream base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        SourceManifest {
            base_url: base_url.into(),
            files: Vec::new(),
        }
    }

    /// Parse a manifest from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Append a file name, preserving insertion order.
    ///
    /// Returns `false` and leaves the manifest unchanged if the name is
    /// already present; file names are unique within a manifest.
    pub fn push(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.files.iter().any(|f| *f == name) {
            return false;
        }
        self.files.push(name);
        true
    }

    /// The upstream base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// File names in elaboration order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Number of files in the manifest.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the manifest lists no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The upstream URL for a single file.
    pub fn remote_url(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url.trim_end_matches('/'))
    }

    /// The local path of a single file under `local_dir`.
    pub fn local_path(&self, local_dir: &Path, name: &str) -> PathBuf {
        local_dir.join(name)
    }

    /// Local paths of all files under `local_dir`, in elaboration order.
    pub fn local_paths(&self, local_dir: &Path) -> Vec<PathBuf> {
        self.files.iter().map(|f| local_dir.join(f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_preserves_order() {
        let mut m = SourceManifest::new("https://example.org/rtl");
        assert!(m.push("pkg.vhd"));
        assert!(m.push("top.vhd"));
        assert!(m.push("alu.vhd"));
        assert_eq!(m.files(), &["pkg.vhd", "top.vhd", "alu.vhd"]);
    }

    #[test]
    fn duplicate_push_is_ignored() {
        let mut m = SourceManifest::new("https://example.org/rtl");
        assert!(m.push("pkg.vhd"));
        assert!(!m.push("pkg.vhd"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn remote_url_joins_base_and_name() {
        let m = SourceManifest::new("https://example.org/rtl");
        assert_eq!(m.remote_url("pkg.vhd"), "https://example.org/rtl/pkg.vhd");

        // A trailing slash on the base must not double up.
        let m = SourceManifest::new("https://example.org/rtl/");
        assert_eq!(m.remote_url("pkg.vhd"), "https://example.org/rtl/pkg.vhd");
    }

    #[test]
    fn local_paths_in_manifest_order() {
        let mut m = SourceManifest::new("https://example.org/rtl");
        m.push("a.vhd");
        m.push("b.vhd");
        let paths = m.local_paths(Path::new("/work/rtl"));
        assert_eq!(
            paths,
            vec![PathBuf::from("/work/rtl/a.vhd"), PathBuf::from("/work/rtl/b.vhd")]
        );
    }

    #[test]
    fn parse_from_toml() {
        let m = SourceManifest::from_toml_str(
            r#"
base_url = "https://example.org/rtl"
files = ["pkg.vhd", "top.vhd"]
"#,
        )
        .unwrap();
        assert_eq!(m.base_url(), "https://example.org/rtl");
        assert_eq!(m.files(), &["pkg.vhd", "top.vhd"]);
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(SourceManifest::from_toml_str("not toml [[[").is_err());
    }
}
