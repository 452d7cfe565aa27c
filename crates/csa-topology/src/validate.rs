//! Topology validation logic.
//!
//! Every check reports the offending id and where the reference came from.
//! Validation stops at the first violation.

use crate::index::TopologyIndex;
use crate::schema::{Controller, Device, Link, MAX_PURDUE_LEVEL, Network, SCHEMA_VERSION, Zone};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported schema version: {version} (supported: {})", SCHEMA_VERSION)]
    UnsupportedVersion { version: String },
}

/// Accept any `1.x` schema version.
pub(crate) fn check_schema_version(version: &str) -> Result<(), ValidationError> {
    let major = version.split('.').next().unwrap_or_default();
    if major.trim() == "1" {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedVersion {
            version: version.to_string(),
        })
    }
}

/// Validate every collection in dependency order and build the id index.
pub(crate) fn build_index(
    zones: &[Zone],
    controllers: &[Controller],
    devices: &[Device],
    networks: &[Network],
    links: &[Link],
) -> Result<TopologyIndex, ValidationError> {
    let mut index = TopologyIndex::default();

    for (idx, zone) in zones.iter().enumerate() {
        require_id(&zone.id, "zone")?;
        if zone.purdue_level > MAX_PURDUE_LEVEL {
            return Err(ValidationError::InvalidValue {
                field: format!("zone '{}' purdue_level", zone.id),
                value: zone.purdue_level.to_string(),
                reason: format!("must be between 0 and {MAX_PURDUE_LEVEL}"),
            });
        }
        if !index.insert_zone(&zone.id, idx) {
            return Err(duplicate(&zone.id, "zones"));
        }
    }

    for (idx, network) in networks.iter().enumerate() {
        require_id(&network.id, "network")?;
        if !index.insert_network(&network.id, idx) {
            return Err(duplicate(&network.id, "networks"));
        }
    }

    for (idx, controller) in controllers.iter().enumerate() {
        check_controller(&index, controller)?;
        index.insert_controller(&controller.id, idx);
    }

    for (idx, device) in devices.iter().enumerate() {
        check_device(&index, device)?;
        index.insert_device(&device.id, idx);
    }

    for link in links {
        check_link(&index, link)?;
    }

    Ok(index)
}

/// Controller id must be new and its zone, if set, must exist.
pub(crate) fn check_controller(
    index: &TopologyIndex,
    controller: &Controller,
) -> Result<(), ValidationError> {
    require_id(&controller.id, "controller")?;
    if index.controller(&controller.id).is_some() {
        return Err(duplicate(&controller.id, "controllers"));
    }
    check_zone_ref(index, &controller.zone, "controller", &controller.id)
}

/// Device id must be new; zone and parent controller, if set, must exist.
pub(crate) fn check_device(index: &TopologyIndex, device: &Device) -> Result<(), ValidationError> {
    require_id(&device.id, "device")?;
    if index.device(&device.id).is_some() {
        return Err(duplicate(&device.id, "devices"));
    }
    check_zone_ref(index, &device.zone, "device", &device.id)?;
    if !device.parent_controller.is_empty()
        && index.controller(&device.parent_controller).is_none()
    {
        return Err(ValidationError::MissingReference {
            id: device.parent_controller.clone(),
            context: format!("device '{}' parent_controller", device.id),
        });
    }
    Ok(())
}

/// Both endpoints must be known nodes; the network, if set, must exist.
pub(crate) fn check_link(index: &TopologyIndex, link: &Link) -> Result<(), ValidationError> {
    let label = format!("{} -> {}", link.source, link.target);
    for (endpoint, role) in [(&link.source, "source"), (&link.target, "target")] {
        if !index.contains_node(endpoint) {
            return Err(ValidationError::MissingReference {
                id: endpoint.clone(),
                context: format!("link '{label}' {role} (controllers or devices)"),
            });
        }
    }
    if !link.network.is_empty() && index.network(&link.network).is_none() {
        return Err(ValidationError::MissingReference {
            id: link.network.clone(),
            context: format!("link '{label}' network"),
        });
    }
    Ok(())
}

fn check_zone_ref(
    index: &TopologyIndex,
    zone: &str,
    kind: &str,
    owner: &str,
) -> Result<(), ValidationError> {
    if zone.is_empty() || index.zone(zone).is_some() {
        return Ok(());
    }
    Err(ValidationError::MissingReference {
        id: zone.to_string(),
        context: format!("{kind} '{owner}' zone"),
    })
}

fn require_id(id: &str, kind: &str) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("{kind} id"),
            value: id.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn duplicate(id: &str, context: &str) -> ValidationError {
    ValidationError::DuplicateId {
        id: id.to_string(),
        context: context.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ControllerType, DeviceType, ProtocolType};

    fn zones() -> Vec<Zone> {
        vec![Zone::new("level_1", "Control Level", 1)]
    }

    #[test]
    fn validate_empty_topology() {
        assert!(build_index(&[], &[], &[], &[], &[]).is_ok());
    }

    #[test]
    fn schema_versions() {
        assert!(check_schema_version("1.0").is_ok());
        assert!(check_schema_version("1.3").is_ok());
        assert!(matches!(
            check_schema_version("2.0"),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn purdue_level_above_four_is_rejected() {
        let zones = vec![Zone::new("cloud", "", 5)];
        let err = build_index(&zones, &[], &[], &[], &[]).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn controller_zone_must_exist() {
        let controller = Controller {
            zone: "level_9".into(),
            ..Controller::new("PLC-001", ControllerType::Plc)
        };
        let err = build_index(&zones(), &[controller], &[], &[], &[]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingReference {
                id: "level_9".into(),
                context: "controller 'PLC-001' zone".into(),
            }
        );
    }

    #[test]
    fn duplicate_device_ids() {
        let devices = vec![
            Device::new("VFD-1", DeviceType::Vfd),
            Device::new("VFD-1", DeviceType::Vfd),
        ];
        let err = build_index(&[], &[], &devices, &[], &[]).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateId { ref id, .. } if id == "VFD-1"));
    }

    #[test]
    fn device_parent_must_be_a_controller() {
        let device = Device {
            parent_controller: "PLC-404".into(),
            ..Device::new("RIO-200", DeviceType::RemoteIo)
        };
        let err = build_index(&[], &[], &[device], &[], &[]).unwrap_err();
        assert!(err.to_string().contains("PLC-404"));
    }

    #[test]
    fn link_endpoints_span_both_node_kinds() {
        let controllers = vec![Controller::new("PLC-001", ControllerType::Plc)];
        let devices = vec![Device::new("SW-001", DeviceType::ManagedSwitch)];
        let links = vec![Link::new("PLC-001", "SW-001", ProtocolType::EthernetIp)];
        assert!(build_index(&[], &controllers, &devices, &[], &links).is_ok());

        let dangling = vec![Link::new("PLC-001", "SCADA-001", ProtocolType::EthernetIp)];
        let err = build_index(&[], &controllers, &devices, &[], &dangling).unwrap_err();
        assert!(err.to_string().contains("SCADA-001"));
    }

    #[test]
    fn link_network_must_exist() {
        let controllers = vec![Controller::new("PLC-001", ControllerType::Plc)];
        let devices = vec![Device::new("SW-001", DeviceType::ManagedSwitch)];
        let links =
            vec![Link::new("PLC-001", "SW-001", ProtocolType::EthernetIp).on_network("ctl")];
        let err = build_index(&[], &controllers, &devices, &[], &links).unwrap_err();
        assert!(matches!(err, ValidationError::MissingReference { ref id, .. } if id == "ctl"));
    }
}
