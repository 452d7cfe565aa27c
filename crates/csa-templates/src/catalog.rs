//! The fixed catalog of architecture templates.
//!
//! Each template bundles the structural choices for one common automation
//! layout. The catalog is compile-time data and is never mutated; callers
//! customize a template by resolving it against an
//! [`OverridePatch`](crate::OverridePatch).

use csa_topology::{ProtocolType, RedundancyType};
use serde::Serialize;

use crate::error::TemplateResult;
use crate::overrides::{OverridePatch, TemplateOverrides};
use crate::resolved::ResolvedTemplate;

pub const CENTRALIZED: &str = "centralized";
pub const CENTRAL_MCC_DISTRIBUTED_IO: &str = "central_mcc_distributed_io";
pub const FULLY_DISTRIBUTED: &str = "fully_distributed";
pub const HYBRID_SAFETY: &str = "hybrid_safety";
pub const VENDOR_PACKAGE_INTEGRATION: &str = "vendor_package_integration";

/// How process controllers are allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerAllocation {
    /// One controller for the whole plant.
    Central,
    /// One controller per process area.
    PerArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VfdLocation {
    Mcc,
    RemotePanel,
}

/// Where field IO terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IoPlacement {
    Central,
    /// Remote IO panels out in the process areas.
    Distributed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyPolicy {
    None,
    Central,
    PerArea,
}

/// How vendor-owned package controllers join the plant network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorIntegration {
    None,
    OpcUa,
    Hardwired,
}

/// Override values a template ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DefaultOverrides {
    pub spare_io_pct: u32,
    pub protocol_preferences: &'static [ProtocolType],
    pub plc_per_area: bool,
    pub central_safety_plc: bool,
    pub vfd_at_mcc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchitectureTemplate {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub use_case: &'static str,
    pub plc_allocation: ControllerAllocation,
    pub vfd_location: VfdLocation,
    pub io_location: IoPlacement,
    pub safety_plc: SafetyPolicy,
    pub vendor_integration: VendorIntegration,
    /// Plant size thresholds the template is meant for.
    pub max_distance_m: u32,
    pub max_io_count: u32,
    pub max_vfd_count: u32,
    pub primary_protocol: ProtocolType,
    pub fieldbus_protocol: Option<ProtocolType>,
    pub redundancy: RedundancyType,
    pub default_overrides: DefaultOverrides,
}

impl ArchitectureTemplate {
    /// The template's own override values, as an owned bundle.
    pub fn defaults(&self) -> TemplateOverrides {
        TemplateOverrides::from(&self.default_overrides)
    }

    /// Layer caller overrides onto this template's defaults.
    ///
    /// Produces a new configuration; the catalog entry is untouched.
    pub fn resolve(&'static self, patch: &OverridePatch) -> TemplateResult<ResolvedTemplate> {
        let overrides = patch.apply_to(self.defaults())?;
        Ok(ResolvedTemplate::new(self, overrides))
    }
}

static TEMPLATES: [ArchitectureTemplate; 5] = [
    ArchitectureTemplate {
        name: CENTRALIZED,
        version: "1.0",
        description: "Central MCC + Central PLC - all VFDs and IO in central location",
        use_case: "Small plants (<5 MLD), compact footprint, short cable runs",
        plc_allocation: ControllerAllocation::Central,
        vfd_location: VfdLocation::Mcc,
        io_location: IoPlacement::Central,
        safety_plc: SafetyPolicy::None,
        vendor_integration: VendorIntegration::None,
        max_distance_m: 100,
        max_io_count: 200,
        max_vfd_count: 20,
        primary_protocol: ProtocolType::EthernetIp,
        fieldbus_protocol: None,
        redundancy: RedundancyType::None,
        default_overrides: DefaultOverrides {
            spare_io_pct: 20,
            protocol_preferences: &[ProtocolType::EthernetIp, ProtocolType::Profinet],
            plc_per_area: false,
            central_safety_plc: false,
            vfd_at_mcc: true,
        },
    },
    ArchitectureTemplate {
        name: CENTRAL_MCC_DISTRIBUTED_IO,
        version: "1.0",
        description: "Central MCC + Distributed IO - VFDs in MCC, Remote IO panels at process areas",
        use_case: "Medium plants (5-20 MLD), moderate distances",
        plc_allocation: ControllerAllocation::Central,
        vfd_location: VfdLocation::Mcc,
        io_location: IoPlacement::Distributed,
        safety_plc: SafetyPolicy::None,
        vendor_integration: VendorIntegration::None,
        max_distance_m: 500,
        max_io_count: 1000,
        max_vfd_count: 50,
        primary_protocol: ProtocolType::EthernetIp,
        fieldbus_protocol: None,
        redundancy: RedundancyType::HotStandby,
        default_overrides: DefaultOverrides {
            spare_io_pct: 20,
            protocol_preferences: &[ProtocolType::EthernetIp, ProtocolType::Profinet],
            plc_per_area: false,
            central_safety_plc: false,
            vfd_at_mcc: true,
        },
    },
    ArchitectureTemplate {
        name: FULLY_DISTRIBUTED,
        version: "1.0",
        description: "Remote panels per area with VFDs, starters, and IO",
        use_case: "Large plants (>20 MLD), long distances, modular expansion",
        plc_allocation: ControllerAllocation::PerArea,
        vfd_location: VfdLocation::RemotePanel,
        io_location: IoPlacement::Distributed,
        safety_plc: SafetyPolicy::None,
        vendor_integration: VendorIntegration::None,
        max_distance_m: 1000,
        max_io_count: 5000,
        max_vfd_count: 200,
        primary_protocol: ProtocolType::Profinet,
        fieldbus_protocol: None,
        redundancy: RedundancyType::HotStandby,
        default_overrides: DefaultOverrides {
            spare_io_pct: 25,
            protocol_preferences: &[ProtocolType::Profinet, ProtocolType::EthernetIp],
            plc_per_area: true,
            central_safety_plc: false,
            vfd_at_mcc: false,
        },
    },
    ArchitectureTemplate {
        name: HYBRID_SAFETY,
        version: "1.0",
        description: "Central Safety PLC + Distributed process control",
        use_case: "Plants with SIL requirements, ESD/SIS functions",
        plc_allocation: ControllerAllocation::PerArea,
        vfd_location: VfdLocation::RemotePanel,
        io_location: IoPlacement::Distributed,
        safety_plc: SafetyPolicy::Central,
        vendor_integration: VendorIntegration::None,
        max_distance_m: 1000,
        max_io_count: 5000,
        max_vfd_count: 200,
        primary_protocol: ProtocolType::Profinet,
        fieldbus_protocol: None,
        redundancy: RedundancyType::DualRedundant,
        default_overrides: DefaultOverrides {
            spare_io_pct: 25,
            protocol_preferences: &[ProtocolType::Profinet],
            plc_per_area: true,
            central_safety_plc: true,
            vfd_at_mcc: false,
        },
    },
    ArchitectureTemplate {
        name: VENDOR_PACKAGE_INTEGRATION,
        version: "1.0",
        description: "OEM packages with vendor PLCs integrated via OPC-UA",
        use_case: "Plants with multiple vendor packages (MBR, RO, DAF)",
        plc_allocation: ControllerAllocation::PerArea,
        vfd_location: VfdLocation::RemotePanel,
        io_location: IoPlacement::Distributed,
        safety_plc: SafetyPolicy::None,
        vendor_integration: VendorIntegration::OpcUa,
        max_distance_m: 1000,
        max_io_count: 3000,
        max_vfd_count: 100,
        primary_protocol: ProtocolType::EthernetIp,
        fieldbus_protocol: None,
        redundancy: RedundancyType::HotStandby,
        default_overrides: DefaultOverrides {
            spare_io_pct: 20,
            protocol_preferences: &[ProtocolType::EthernetIp, ProtocolType::OpcUa],
            plc_per_area: true,
            central_safety_plc: false,
            vfd_at_mcc: false,
        },
    },
];

/// All templates in catalog order.
pub fn list_templates() -> &'static [ArchitectureTemplate] {
    &TEMPLATES
}

pub fn get_template(name: &str) -> Option<&'static ArchitectureTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn template_names_are_unique() {
        let mut seen = HashSet::new();
        for template in list_templates() {
            assert!(seen.insert(template.name), "duplicate template: {}", template.name);
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn centralized_is_central_everything() {
        let template = get_template(CENTRALIZED).expect("centralized should be in catalog");
        assert_eq!(template.plc_allocation, ControllerAllocation::Central);
        assert_eq!(template.vfd_location, VfdLocation::Mcc);
        assert_eq!(template.io_location, IoPlacement::Central);
    }

    #[test]
    fn fully_distributed_is_per_area() {
        let template = get_template(FULLY_DISTRIBUTED).unwrap();
        assert_eq!(template.plc_allocation, ControllerAllocation::PerArea);
        assert_eq!(template.vfd_location, VfdLocation::RemotePanel);
        assert_eq!(template.io_location, IoPlacement::Distributed);
    }

    #[test]
    fn hybrid_safety_has_central_sis() {
        let template = get_template(HYBRID_SAFETY).unwrap();
        assert_eq!(template.safety_plc, SafetyPolicy::Central);
        assert_eq!(template.redundancy, RedundancyType::DualRedundant);
    }

    #[test]
    fn unknown_name_is_absent() {
        assert!(get_template("nonexistent_template").is_none());
        assert!(get_template("Centralized").is_none());
    }

    #[test]
    fn default_flags_agree_with_structure() {
        for template in list_templates() {
            let defaults = &template.default_overrides;
            assert_eq!(
                defaults.plc_per_area,
                template.plc_allocation == ControllerAllocation::PerArea,
                "{}",
                template.name
            );
            assert_eq!(
                defaults.central_safety_plc,
                template.safety_plc == SafetyPolicy::Central,
                "{}",
                template.name
            );
            assert_eq!(
                defaults.protocol_preferences.first(),
                Some(&template.primary_protocol),
                "{}",
                template.name
            );
        }
    }
}
