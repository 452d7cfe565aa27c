//! File-based entry points used by front ends.

use std::path::Path;

use csa_templates::OverridePatch;
use csa_topology::{LintReport, Topology, lint};

use crate::error::{BootstrapError, BootstrapResult};
use crate::request::{BootstrapOutcome, BootstrapRequest};
use crate::synth::bootstrap;

/// Read a text input file.
pub fn read_input(path: &Path) -> BootstrapResult<String> {
    std::fs::read_to_string(path).map_err(|e| BootstrapError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Load an override patch from a YAML or JSON file (chosen by extension).
pub fn load_overrides(path: &Path) -> BootstrapResult<OverridePatch> {
    let content = read_input(path)?;
    let patch: OverridePatch = if is_json(path) {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(patch)
}

/// Build a request from an equipment list file and an instrument database file.
pub fn request_from_files(
    equipment_path: &Path,
    instruments_path: &Path,
    project_name: &str,
) -> BootstrapResult<BootstrapRequest> {
    let equipment = read_input(equipment_path)?;
    let instruments = read_input(instruments_path)?;
    Ok(BootstrapRequest::new(equipment, instruments, project_name))
}

/// Run a bootstrap and write the draft topology YAML to `output`.
pub fn bootstrap_to_file(
    request: &BootstrapRequest,
    output: &Path,
) -> BootstrapResult<BootstrapOutcome> {
    let outcome = bootstrap(request)?;
    std::fs::write(output, &outcome.topology_yaml).map_err(|e| BootstrapError::FileWrite {
        path: output.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %output.display(), "topology written");
    Ok(outcome)
}

/// Load a topology file (YAML, or JSON by extension), validate it and lint it.
pub fn validate_topology_file(path: &Path) -> BootstrapResult<(Topology, LintReport)> {
    let topology = if is_json(path) {
        csa_topology::load_json(path)?
    } else {
        csa_topology::load_yaml(path)?
    };
    let report = lint(&topology);
    Ok((topology, report))
}
