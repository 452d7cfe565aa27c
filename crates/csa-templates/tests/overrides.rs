use csa_templates::*;
use csa_topology::{ControllerType, ProtocolType, RedundancyType};

#[test]
fn resolving_never_mutates_the_catalog() {
    let before: Vec<ArchitectureTemplate> = list_templates().to_vec();

    let patch = OverridePatch {
        spare_io_pct: Some(40),
        plc_per_area: Some(false),
        central_safety_plc: Some(true),
        vfd_at_mcc: Some(false),
        ..Default::default()
    };
    for template in list_templates() {
        let resolved = template.resolve(&patch).unwrap();
        assert_eq!(resolved.spare_io_pct(), 40);
        assert_eq!(resolved.safety_policy(), SafetyPolicy::Central);
    }

    assert_eq!(list_templates(), before.as_slice());
    let fresh = get_template(HYBRID_SAFETY).unwrap().defaults();
    assert_eq!(fresh.spare_io_pct, 25);
    assert!(fresh.plc_per_area);
}

#[test]
fn patch_loads_from_yaml() {
    let yaml = r#"
spare_io_pct: 30
plc_per_area: true
protocol_preferences: [Profinet, OPC_UA]
redundancy:
  PLC: Hot_Standby
panel_counts:
  "200": 2
"#;
    let patch: OverridePatch = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(patch.spare_io_pct, Some(30));
    assert_eq!(
        patch.protocol_preferences,
        Some(vec![ProtocolType::Profinet, ProtocolType::OpcUa])
    );

    let resolved = require_template(CENTRALIZED).unwrap().resolve(&patch).unwrap();
    assert_eq!(resolved.allocation(), ControllerAllocation::PerArea);
    assert_eq!(
        resolved.redundancy_for(ControllerType::Plc),
        RedundancyType::HotStandby
    );
    assert_eq!(resolved.overrides.panel_counts.get("200"), Some(&2));
}

#[test]
fn patch_rejects_unknown_fields_and_protocols() {
    assert!(serde_yaml::from_str::<OverridePatch>("spare_pct: 10").is_err());
    assert!(serde_yaml::from_str::<OverridePatch>("protocol_preferences: [Carrier_Pigeon]").is_err());
}

#[test]
fn patch_loads_from_json() {
    let patch: OverridePatch =
        serde_json::from_str(r#"{"vfd_at_mcc": false, "redundancy": {"Safety_PLC": "Triple_Modular"}}"#)
            .unwrap();
    let resolved = require_template(CENTRALIZED).unwrap().resolve(&patch).unwrap();
    assert_eq!(resolved.vfd_location(), VfdLocation::RemotePanel);
    assert_eq!(
        resolved.redundancy_for(ControllerType::SafetyPlc),
        RedundancyType::TripleModular
    );
}

#[test]
fn unknown_template_is_an_error() {
    let err = require_template("star_topology").unwrap_err();
    assert_eq!(
        err,
        TemplateError::UnknownTemplate {
            name: "star_topology".into()
        }
    );
}

#[test]
fn catalog_serializes_for_listing() {
    let json = serde_json::to_value(get_template(VENDOR_PACKAGE_INTEGRATION).unwrap()).unwrap();
    assert_eq!(json["vendor_integration"], "opc_ua");
    assert_eq!(json["plc_allocation"], "per_area");
    assert_eq!(json["primary_protocol"], "Ethernet_IP");
    assert_eq!(json["fieldbus_protocol"], serde_json::Value::Null);
}
