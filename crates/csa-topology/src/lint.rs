//! Advisory checks on an already valid topology.
//!
//! Lint findings never make a topology invalid; they flag drafts that will
//! render poorly or are probably incomplete.

use serde::Serialize;

use crate::topology::Topology;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TopologyCounts {
    pub controllers: usize,
    pub devices: usize,
    pub links: usize,
    pub zones: usize,
    pub networks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LintReport {
    pub warnings: Vec<String>,
    pub counts: TopologyCounts,
}

impl LintReport {
    /// Strict callers treat any warning as a failure.
    pub fn passes(&self, strict: bool) -> bool {
        !strict || self.warnings.is_empty()
    }

    /// One-line summary such as `2 controller(s), 3 device(s), 4 link(s), 3 zone(s)`.
    pub fn summary(&self) -> String {
        format!(
            "{} controller(s), {} device(s), {} link(s), {} zone(s)",
            self.counts.controllers, self.counts.devices, self.counts.links, self.counts.zones
        )
    }
}

pub fn lint(topology: &Topology) -> LintReport {
    let mut warnings = Vec::new();

    if topology.controllers().is_empty() && topology.devices().is_empty() {
        warnings.push("Topology has no controllers or devices".to_string());
    }
    if topology.zones().is_empty() {
        warnings.push("No Purdue zones defined - components will render flat".to_string());
    }
    if topology.links().is_empty() {
        warnings.push("No network links defined".to_string());
    }

    for controller in topology.controllers() {
        if controller.zone.is_empty() {
            warnings.push(format!("Controller '{}' has no zone assigned", controller.id));
        }
    }
    for device in topology.devices() {
        if device.zone.is_empty() {
            warnings.push(format!("Device '{}' has no zone assigned", device.id));
        }
    }
    for device in topology.devices() {
        if device.kind.expects_parent_controller() && device.parent_controller.is_empty() {
            warnings.push(format!(
                "Device '{}' ({}) has no parent_controller",
                device.id, device.kind
            ));
        }
    }

    LintReport {
        warnings,
        counts: TopologyCounts {
            controllers: topology.controllers().len(),
            devices: topology.devices().len(),
            links: topology.links().len(),
            zones: topology.zones().len(),
            networks: topology.networks().len(),
        },
    }
}
