//! Error types for bootstrap runs.

use std::path::PathBuf;

use csa_templates::TemplateError;
use csa_topology::{TopologyError, ValidationError};

/// Errors that abort a bootstrap run.
///
/// Input-quality problems never appear here; they are recovered as warnings
/// on the outcome.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Strict mode only. Lenient runs substitute the centralized template.
    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// The synthesized graph broke referential integrity.
    #[error("Generated topology is invalid: {0}")]
    Topology(#[from] ValidationError),

    #[error("Topology file error: {0}")]
    TopologyFile(#[from] TopologyError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type BootstrapResult<T> = Result<T, BootstrapError>;
