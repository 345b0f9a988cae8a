//! Bus endpoints and the SoC framework boundary.
//!
//! A CPU descriptor exposes named connection points (instruction bus, data
//! bus) that the surrounding framework wires into the larger system. The
//! framework itself is seen here only through the [`SocInterface`] trait:
//! it hands out bus endpoints and receives converted HDL sources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the core a bus endpoint serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusRole {
    /// Instruction fetch bus.
    Instruction,
    /// Data load/store bus.
    Data,
}

/// A named bus connection handle.
///
/// Endpoints are created by the framework at descriptor construction and
/// never reassigned; the `id` is the stable identity the framework wires by.
/// Handles are cheap to clone: the descriptor keeps one for bookkeeping
/// while the framework owns the wiring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusEndpoint {
    /// Stable identity of this endpoint.
    pub id: Uuid,
    /// Endpoint name (e.g., "ibus", "dbus").
    pub name: String,
    /// Which side of the core this endpoint serves.
    pub role: BusRole,
}

impl BusEndpoint {
    /// Create an endpoint with a fresh identity.
    pub fn new(name: impl Into<String>, role: BusRole) -> Self {
        BusEndpoint {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
        }
    }
}

/// The hardware-composition framework, seen at its interface boundary.
///
/// Everything the descriptor needs from the surrounding system: bus endpoint
/// creation at construction time, and the explicit hand-off of converted HDL
/// sources into the framework's own source set.
pub trait SocInterface {
    /// Create a bus endpoint for the component under construction.
    fn create_bus(&mut self, name: &str, role: BusRole) -> BusEndpoint;

    /// Add a converted HDL source to the framework's source set.
    fn add_source(&mut self, path: &Path);
}

/// An in-memory [`SocInterface`] for development and testing.
///
/// Records every bus it created and every source it was handed.
#[derive(Debug, Default)]
pub struct RecordingSoc {
    /// Buses created, in creation order.
    pub buses: Vec<BusEndpoint>,
    /// Sources added, in hand-off order.
    pub sources: Vec<PathBuf>,
}

impl RecordingSoc {
    /// Create an empty recorder.
    pub fn new() -> Self {
        RecordingSoc::default()
    }
}

impl SocInterface for RecordingSoc {
    fn create_bus(&mut self, name: &str, role: BusRole) -> BusEndpoint {
        let endpoint = BusEndpoint::new(name, role);
        self.buses.push(endpoint.clone());
        endpoint
    }

    fn add_source(&mut self, path: &Path) {
        self.sources.push(path.to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_have_unique_identities() {
        let a = BusEndpoint::new("ibus", BusRole::Instruction);
        let b = BusEndpoint::new("ibus", BusRole::Instruction);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn clones_share_identity() {
        let a = BusEndpoint::new("dbus", BusRole::Data);
        let b = a.clone();
        assert_eq!(a.id, b.id);
        assert_eq!(a, b);
    }

    #[test]
    fn recording_soc_tracks_buses_and_sources() {
        let mut soc = RecordingSoc::new();
        let ibus = soc.create_bus("ibus", BusRole::Instruction);
        let dbus = soc.create_bus("dbus", BusRole::Data);
        soc.add_source(Path::new("build/core.v"));

        assert_eq!(soc.buses.len(), 2);
        assert_eq!(soc.buses[0], ibus);
        assert_eq!(soc.buses[1], dbus);
        assert_eq!(soc.sources, vec![PathBuf::from("build/core.v")]);
    }
}
