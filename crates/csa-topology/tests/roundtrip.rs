use csa_topology::*;

const PLANT_YAML: &str = r#"
schema_version: "1.0"
metadata:
  project_name: Test WWTP
  site: North Works
zones:
  - id: level_0
    name: Field Level
    purdue_level: 0
  - id: level_1
    purdue_level: 1
controllers:
  - id: PLC-001
    type: PLC
    redundancy: Hot_Standby
    zone: level_1
    equipment_tags: ["200-P-001"]
    ip_address: 192.168.1.10
devices:
  - id: VFD-200-P-001
    type: VFD
    parent_controller: PLC-001
    zone: level_0
networks:
  - id: control_net
    protocol: Ethernet_IP
    subnet: 192.168.1.0/24
links:
  - source: PLC-001
    target: VFD-200-P-001
    protocol: Ethernet_IP
    network: control_net
    waypoints:
      - { x: 10.0, y: 20.0 }
"#;

#[test]
fn load_yaml_text_fills_defaults() {
    let topo = from_yaml_str(PLANT_YAML).unwrap();

    assert_eq!(topo.metadata().project_name, "Test WWTP");
    assert_eq!(topo.metadata().revision, "A");
    assert_eq!(topo.zone("level_1").unwrap().name, "level_1");
    assert_eq!(topo.network("control_net").unwrap().name, "control_net");
    assert_eq!(
        topo.controller("PLC-001").unwrap().redundancy,
        RedundancyType::HotStandby
    );
    assert_eq!(topo.links()[0].waypoints.len(), 1);
}

#[test]
fn roundtrip_yaml_file() {
    let topo = from_yaml_str(PLANT_YAML).unwrap();

    let path = std::env::temp_dir().join("csa_topology_roundtrip.yaml");
    save_yaml(&path, &topo).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(topo, loaded);
}

#[test]
fn roundtrip_json_file() {
    let topo = from_yaml_str(PLANT_YAML).unwrap();

    let path = std::env::temp_dir().join("csa_topology_roundtrip.json");
    save_json(&path, &topo).unwrap();
    let loaded = load_json(&path).unwrap();

    assert_eq!(topo, loaded);
}

#[test]
fn deserializing_a_dangling_reference_fails() {
    let broken = PLANT_YAML.replace("parent_controller: PLC-001", "parent_controller: PLC-999");
    let err = from_yaml_str(&broken).unwrap_err();
    assert!(matches!(
        err,
        TopologyError::Validation(ValidationError::MissingReference { .. })
            | TopologyError::Yaml(_)
    ));
    assert!(err.to_string().contains("PLC-999"));
}

#[test]
fn serde_deserialize_runs_validation_directly() {
    let broken = PLANT_YAML.replace("network: control_net", "network: device_net");
    let result: Result<Topology, _> = serde_yaml::from_str(&broken);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("device_net"));
}

#[test]
fn unknown_enum_values_are_rejected() {
    let broken = PLANT_YAML.replace("type: VFD", "type: Teleporter");
    assert!(matches!(
        from_yaml_str(&broken),
        Err(TopologyError::Yaml(_))
    ));
}

#[test]
fn unsupported_schema_version() {
    let broken = PLANT_YAML.replace("schema_version: \"1.0\"", "schema_version: \"2.0\"");
    let err = from_yaml_str(&broken).unwrap_err();
    assert!(matches!(
        err,
        TopologyError::Validation(ValidationError::UnsupportedVersion { .. })
    ));
}
