//! A template with caller overrides applied.

use csa_topology::{ControllerType, ProtocolType, RedundancyType};
use serde::Serialize;

use crate::catalog::{
    ArchitectureTemplate, ControllerAllocation, IoPlacement, SafetyPolicy, VendorIntegration,
    VfdLocation,
};
use crate::overrides::TemplateOverrides;

/// Effective configuration for one bootstrap run.
///
/// Structural fields come from the catalog entry; the override flags can
/// switch controller allocation, safety placement and VFD location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTemplate {
    pub template: &'static ArchitectureTemplate,
    pub overrides: TemplateOverrides,
}

impl ResolvedTemplate {
    pub fn new(template: &'static ArchitectureTemplate, overrides: TemplateOverrides) -> Self {
        Self {
            template,
            overrides,
        }
    }

    pub fn name(&self) -> &'static str {
        self.template.name
    }

    pub fn version(&self) -> &'static str {
        self.template.version
    }

    pub fn allocation(&self) -> ControllerAllocation {
        if self.overrides.plc_per_area {
            ControllerAllocation::PerArea
        } else {
            ControllerAllocation::Central
        }
    }

    /// `central_safety_plc` forces a central safety controller. Clearing it
    /// removes the one a central-safety template would add.
    pub fn safety_policy(&self) -> SafetyPolicy {
        match (self.overrides.central_safety_plc, self.template.safety_plc) {
            (true, _) => SafetyPolicy::Central,
            (false, SafetyPolicy::Central) => SafetyPolicy::None,
            (false, policy) => policy,
        }
    }

    pub fn io_placement(&self) -> IoPlacement {
        self.template.io_location
    }

    pub fn vfd_location(&self) -> VfdLocation {
        if self.overrides.vfd_at_mcc {
            VfdLocation::Mcc
        } else {
            VfdLocation::RemotePanel
        }
    }

    pub fn vendor_integration(&self) -> VendorIntegration {
        self.template.vendor_integration
    }

    /// First preferred protocol, else the template's primary protocol.
    pub fn primary_protocol(&self) -> ProtocolType {
        self.overrides
            .protocol_preferences
            .first()
            .copied()
            .unwrap_or(self.template.primary_protocol)
    }

    pub fn redundancy_for(&self, kind: ControllerType) -> RedundancyType {
        self.overrides
            .redundancy
            .get(&kind)
            .copied()
            .unwrap_or(self.template.redundancy)
    }

    pub fn spare_io_pct(&self) -> u32 {
        self.overrides.spare_io_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CENTRALIZED, HYBRID_SAFETY, get_template};
    use crate::overrides::OverridePatch;

    #[test]
    fn defaults_reproduce_template_structure() {
        let resolved = get_template(CENTRALIZED)
            .unwrap()
            .resolve(&OverridePatch::default())
            .unwrap();
        assert_eq!(resolved.allocation(), ControllerAllocation::Central);
        assert_eq!(resolved.safety_policy(), SafetyPolicy::None);
        assert_eq!(resolved.vfd_location(), VfdLocation::Mcc);
        assert_eq!(resolved.primary_protocol(), ProtocolType::EthernetIp);
        assert_eq!(resolved.redundancy_for(ControllerType::Plc), RedundancyType::None);
        assert_eq!(resolved.spare_io_pct(), 20);
    }

    #[test]
    fn flags_switch_allocation_and_safety() {
        let patch = OverridePatch {
            plc_per_area: Some(true),
            central_safety_plc: Some(true),
            ..Default::default()
        };
        let resolved = get_template(CENTRALIZED).unwrap().resolve(&patch).unwrap();
        assert_eq!(resolved.allocation(), ControllerAllocation::PerArea);
        assert_eq!(resolved.safety_policy(), SafetyPolicy::Central);

        let patch = OverridePatch {
            central_safety_plc: Some(false),
            ..Default::default()
        };
        let resolved = get_template(HYBRID_SAFETY).unwrap().resolve(&patch).unwrap();
        assert_eq!(resolved.safety_policy(), SafetyPolicy::None);
    }

    #[test]
    fn redundancy_hint_applies_to_named_type_only() {
        let patch = OverridePatch {
            redundancy: Some([(ControllerType::Plc, RedundancyType::WarmStandby)].into()),
            ..Default::default()
        };
        let resolved = get_template(CENTRALIZED).unwrap().resolve(&patch).unwrap();
        assert_eq!(resolved.redundancy_for(ControllerType::Plc), RedundancyType::WarmStandby);
        assert_eq!(resolved.redundancy_for(ControllerType::Pac), RedundancyType::None);
    }

    #[test]
    fn protocol_preference_sets_primary_protocol() {
        let patch = OverridePatch {
            protocol_preferences: Some(vec![ProtocolType::ModbusTcp]),
            ..Default::default()
        };
        let resolved = get_template(CENTRALIZED).unwrap().resolve(&patch).unwrap();
        assert_eq!(resolved.primary_protocol(), ProtocolType::ModbusTcp);
    }
}
