//! Template override bundle and caller patches.

use std::collections::BTreeMap;

use csa_core::AreaCode;
use csa_topology::{ControllerType, ProtocolType, RedundancyType};
use serde::{Deserialize, Serialize};

use crate::catalog::DefaultOverrides;
use crate::error::{TemplateError, TemplateResult};

pub const MAX_SPARE_IO_PCT: u32 = 100;

/// Fully populated override values in effect for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateOverrides {
    pub spare_io_pct: u32,
    /// Panels per area. Advisory only.
    pub panel_counts: BTreeMap<AreaCode, u32>,
    pub protocol_preferences: Vec<ProtocolType>,
    /// Redundancy hints per controller type.
    pub redundancy: BTreeMap<ControllerType, RedundancyType>,
    pub plc_per_area: bool,
    pub central_safety_plc: bool,
    pub vfd_at_mcc: bool,
}

impl From<&DefaultOverrides> for TemplateOverrides {
    fn from(defaults: &DefaultOverrides) -> Self {
        Self {
            spare_io_pct: defaults.spare_io_pct,
            panel_counts: BTreeMap::new(),
            protocol_preferences: defaults.protocol_preferences.to_vec(),
            redundancy: BTreeMap::new(),
            plc_per_area: defaults.plc_per_area,
            central_safety_plc: defaults.central_safety_plc,
            vfd_at_mcc: defaults.vfd_at_mcc,
        }
    }
}

/// Caller-supplied override values. Absent fields keep the template default.
///
/// Deserializes from the same YAML/JSON shape as the override bundle:
///
/// ```yaml
/// spare_io_pct: 30
/// plc_per_area: true
/// protocol_preferences: [Profinet]
/// redundancy:
///   PLC: Hot_Standby
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverridePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spare_io_pct: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_counts: Option<BTreeMap<AreaCode, u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol_preferences: Option<Vec<ProtocolType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redundancy: Option<BTreeMap<ControllerType, RedundancyType>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plc_per_area: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub central_safety_plc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vfd_at_mcc: Option<bool>,
}

impl OverridePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> TemplateResult<()> {
        if let Some(spare) = self.spare_io_pct {
            if spare > MAX_SPARE_IO_PCT {
                return Err(TemplateError::InvalidOverride {
                    field: "spare_io_pct",
                    value: spare.to_string(),
                    reason: format!("must be between 0 and {MAX_SPARE_IO_PCT}"),
                });
            }
        }
        if let Some(panels) = &self.panel_counts {
            if let Some((area, _)) = panels.iter().find(|(_, count)| **count == 0) {
                return Err(TemplateError::InvalidOverride {
                    field: "panel_counts",
                    value: area.to_string(),
                    reason: "panel count must be at least 1".to_string(),
                });
            }
        }
        if let Some(prefs) = &self.protocol_preferences {
            if prefs.is_empty() {
                return Err(TemplateError::InvalidOverride {
                    field: "protocol_preferences",
                    value: "[]".to_string(),
                    reason: "at least one protocol is required".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Field-level merge: every field present in the patch replaces the base value.
    pub fn apply_to(&self, base: TemplateOverrides) -> TemplateResult<TemplateOverrides> {
        self.validate()?;
        let mut merged = base;
        if let Some(spare) = self.spare_io_pct {
            merged.spare_io_pct = spare;
        }
        if let Some(panels) = &self.panel_counts {
            merged.panel_counts.clone_from(panels);
        }
        if let Some(prefs) = &self.protocol_preferences {
            merged.protocol_preferences.clone_from(prefs);
        }
        if let Some(redundancy) = &self.redundancy {
            merged.redundancy.clone_from(redundancy);
        }
        if let Some(flag) = self.plc_per_area {
            merged.plc_per_area = flag;
        }
        if let Some(flag) = self.central_safety_plc {
            merged.central_safety_plc = flag;
        }
        if let Some(flag) = self.vfd_at_mcc {
            merged.vfd_at_mcc = flag;
        }
        Ok(merged)
    }
}
