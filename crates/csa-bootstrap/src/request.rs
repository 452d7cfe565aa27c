//! Bootstrap run inputs and outputs.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use csa_core::CsaError;
use csa_templates::{CENTRALIZED, OverridePatch};
use csa_topology::{Network, Topology};
use serde::{Deserialize, Serialize};

use crate::io_summary::IoSummary;

/// How an unknown template name is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Unknown template aborts the run.
    Strict,
    /// Unknown template warns and falls back to `centralized`.
    #[default]
    Lenient,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::Strict => "strict",
            SelectionMode::Lenient => "lenient",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = CsaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SelectionMode::Strict),
            "lenient" => Ok(SelectionMode::Lenient),
            _ => Err(CsaError::UnknownName {
                what: "selection mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Everything a bootstrap run reads. Two equal requests produce equal outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapRequest {
    /// Equipment list as QMD or YAML text.
    pub equipment_list: String,
    /// Instrument database as YAML text.
    pub instrument_database: String,
    pub project_name: String,
    pub template: String,
    /// Recorded on the outcome for reproducibility.
    pub template_version: String,
    pub mode: SelectionMode,
    pub overrides: OverridePatch,
}

impl BootstrapRequest {
    pub fn new(
        equipment_list: impl Into<String>,
        instrument_database: impl Into<String>,
        project_name: impl Into<String>,
    ) -> Self {
        Self {
            equipment_list: equipment_list.into(),
            instrument_database: instrument_database.into(),
            project_name: project_name.into(),
            template: CENTRALIZED.to_string(),
            template_version: "1.0".to_string(),
            mode: SelectionMode::default(),
            overrides: OverridePatch::default(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_template_version(mut self, version: impl Into<String>) -> Self {
        self.template_version = version.into();
        self
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_overrides(mut self, overrides: OverridePatch) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Result of a bootstrap run: a validated draft plus review notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapOutcome {
    #[serde(skip)]
    pub topology: Topology,
    pub topology_yaml: String,
    /// Items for the human reviewer.
    pub suggestions: Vec<String>,
    /// Input problems recovered during the run.
    pub warnings: Vec<String>,
    pub io_summary: IoSummary,
    /// Equipment tag to owning controller id.
    pub equipment_mapping: BTreeMap<String, String>,
    pub networks: Vec<Network>,
    pub template_used: String,
    pub template_version: String,
    /// SHA-256 over the request and the template actually used.
    pub fingerprint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults() {
        let request = BootstrapRequest::new("", "", "Plant");
        assert_eq!(request.template, CENTRALIZED);
        assert_eq!(request.template_version, "1.0");
        assert_eq!(request.mode, SelectionMode::Lenient);
        assert!(request.overrides.is_empty());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("STRICT".parse::<SelectionMode>().unwrap(), SelectionMode::Strict);
        assert_eq!(" lenient".parse::<SelectionMode>().unwrap(), SelectionMode::Lenient);
        assert!("loose".parse::<SelectionMode>().is_err());
    }
}
