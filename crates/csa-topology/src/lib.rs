//! csa-topology: control system architecture topology model.
//!
//! Provides:
//! - Schema types for zones, controllers, devices, networks and links
//! - A [`Topology`] aggregate that is validated on construction and on load
//! - Id lookups, zone membership and link queries
//! - Add-operations that keep referential integrity
//! - Advisory lint for draft review
//!
//! # Example
//!
//! ```
//! use csa_topology::{Controller, ControllerType, Metadata, Topology, TopologyDef, Zone};
//!
//! let def = TopologyDef {
//!     schema_version: "1.0".into(),
//!     metadata: Metadata::new("Demo"),
//!     zones: vec![Zone::new("level_1", "Control Level", 1)],
//!     controllers: vec![Controller {
//!         zone: "level_1".into(),
//!         ..Controller::new("PLC-001", ControllerType::Plc)
//!     }],
//!     devices: vec![],
//!     networks: vec![],
//!     links: vec![],
//! };
//! let topology = Topology::new(def).unwrap();
//! assert_eq!(topology.nodes_in_zone("level_1"), ["PLC-001"]);
//! ```

mod index;
pub mod lint;
pub mod schema;
pub mod topology;
pub mod validate;

pub use lint::{LintReport, TopologyCounts, lint};
pub use schema::*;
pub use topology::Topology;
pub use validate::ValidationError;

pub type TopologyResult<T> = Result<T, TopologyError>;

#[derive(thiserror::Error, Debug)]
pub enum TopologyError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse and validate a topology document from YAML text.
pub fn from_yaml_str(content: &str) -> TopologyResult<Topology> {
    let def: TopologyDef = serde_yaml::from_str(content)?;
    Ok(Topology::new(def)?)
}

pub fn to_yaml_string(topology: &Topology) -> TopologyResult<String> {
    Ok(serde_yaml::to_string(topology)?)
}

pub fn load_yaml(path: &std::path::Path) -> TopologyResult<Topology> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, topology: &Topology) -> TopologyResult<()> {
    let content = to_yaml_string(topology)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> TopologyResult<Topology> {
    let content = std::fs::read_to_string(path)?;
    let def: TopologyDef = serde_json::from_str(&content)?;
    Ok(Topology::new(def)?)
}

pub fn save_json(path: &std::path::Path, topology: &Topology) -> TopologyResult<()> {
    let content = serde_json::to_string_pretty(topology)?;
    std::fs::write(path, content)?;
    Ok(())
}
