//! Topology schema definitions.
//!
//! Entity records mirror the CSA topology document format. Optional text
//! fields use the empty string for "unset", so a reference such as
//! `zone: ""` means "no zone" rather than a dangling id.

use core::fmt;
use core::str::FromStr;

use csa_core::CsaError;
use serde::{Deserialize, Serialize};

/// Current topology document schema version.
pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ControllerType {
    #[serde(rename = "PLC")]
    Plc,
    #[serde(rename = "DCS")]
    Dcs,
    #[serde(rename = "PAC")]
    Pac,
    #[serde(rename = "Safety_PLC")]
    SafetyPlc,
    #[serde(rename = "Soft_PLC")]
    SoftPlc,
    #[serde(rename = "Edge_Controller")]
    EdgeController,
    #[serde(rename = "Motion_Controller")]
    MotionController,
    #[serde(rename = "Redundant_PLC")]
    RedundantPlc,
    #[serde(rename = "RTU")]
    Rtu,
    #[serde(rename = "SIS")]
    Sis,
}

impl ControllerType {
    pub const ALL: [ControllerType; 10] = [
        ControllerType::Plc,
        ControllerType::Dcs,
        ControllerType::Pac,
        ControllerType::SafetyPlc,
        ControllerType::SoftPlc,
        ControllerType::EdgeController,
        ControllerType::MotionController,
        ControllerType::RedundantPlc,
        ControllerType::Rtu,
        ControllerType::Sis,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ControllerType::Plc => "PLC",
            ControllerType::Dcs => "DCS",
            ControllerType::Pac => "PAC",
            ControllerType::SafetyPlc => "Safety_PLC",
            ControllerType::SoftPlc => "Soft_PLC",
            ControllerType::EdgeController => "Edge_Controller",
            ControllerType::MotionController => "Motion_Controller",
            ControllerType::RedundantPlc => "Redundant_PLC",
            ControllerType::Rtu => "RTU",
            ControllerType::Sis => "SIS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DeviceType {
    #[serde(rename = "RemoteIO")]
    RemoteIo,
    #[serde(rename = "HMI")]
    Hmi,
    #[serde(rename = "SCADA")]
    Scada,
    Historian,
    #[serde(rename = "OPC_UA_Server")]
    OpcUaServer,
    Gateway,
    #[serde(rename = "VFD")]
    Vfd,
    #[serde(rename = "Soft_Starter")]
    SoftStarter,
    #[serde(rename = "MCC")]
    Mcc,
    #[serde(rename = "Industrial_PC")]
    IndustrialPc,
    Switch,
    #[serde(rename = "Managed_Switch")]
    ManagedSwitch,
    Router,
    Firewall,
    #[serde(rename = "Wireless_AP")]
    WirelessAp,
    #[serde(rename = "Media_Converter")]
    MediaConverter,
    #[serde(rename = "Network_TAP")]
    NetworkTap,
    #[serde(rename = "Motor_Starter")]
    MotorStarter,
    #[serde(rename = "Engineering_WS")]
    EngineeringWs,
    #[serde(rename = "Panel_PC")]
    PanelPc,
    #[serde(rename = "Data_Logger")]
    DataLogger,
    #[serde(rename = "Junction_Box")]
    JunctionBox,
    #[serde(rename = "Marshalling_Cabinet")]
    MarshallingCabinet,
    #[serde(rename = "Local_Panel")]
    LocalPanel,
    #[serde(rename = "Remote_Panel")]
    RemotePanel,
    #[serde(rename = "Instrument_Rack")]
    InstrumentRack,
}

impl DeviceType {
    pub const ALL: [DeviceType; 26] = [
        DeviceType::RemoteIo,
        DeviceType::Hmi,
        DeviceType::Scada,
        DeviceType::Historian,
        DeviceType::OpcUaServer,
        DeviceType::Gateway,
        DeviceType::Vfd,
        DeviceType::SoftStarter,
        DeviceType::Mcc,
        DeviceType::IndustrialPc,
        DeviceType::Switch,
        DeviceType::ManagedSwitch,
        DeviceType::Router,
        DeviceType::Firewall,
        DeviceType::WirelessAp,
        DeviceType::MediaConverter,
        DeviceType::NetworkTap,
        DeviceType::MotorStarter,
        DeviceType::EngineeringWs,
        DeviceType::PanelPc,
        DeviceType::DataLogger,
        DeviceType::JunctionBox,
        DeviceType::MarshallingCabinet,
        DeviceType::LocalPanel,
        DeviceType::RemotePanel,
        DeviceType::InstrumentRack,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::RemoteIo => "RemoteIO",
            DeviceType::Hmi => "HMI",
            DeviceType::Scada => "SCADA",
            DeviceType::Historian => "Historian",
            DeviceType::OpcUaServer => "OPC_UA_Server",
            DeviceType::Gateway => "Gateway",
            DeviceType::Vfd => "VFD",
            DeviceType::SoftStarter => "Soft_Starter",
            DeviceType::Mcc => "MCC",
            DeviceType::IndustrialPc => "Industrial_PC",
            DeviceType::Switch => "Switch",
            DeviceType::ManagedSwitch => "Managed_Switch",
            DeviceType::Router => "Router",
            DeviceType::Firewall => "Firewall",
            DeviceType::WirelessAp => "Wireless_AP",
            DeviceType::MediaConverter => "Media_Converter",
            DeviceType::NetworkTap => "Network_TAP",
            DeviceType::MotorStarter => "Motor_Starter",
            DeviceType::EngineeringWs => "Engineering_WS",
            DeviceType::PanelPc => "Panel_PC",
            DeviceType::DataLogger => "Data_Logger",
            DeviceType::JunctionBox => "Junction_Box",
            DeviceType::MarshallingCabinet => "Marshalling_Cabinet",
            DeviceType::LocalPanel => "Local_Panel",
            DeviceType::RemotePanel => "Remote_Panel",
            DeviceType::InstrumentRack => "Instrument_Rack",
        }
    }

    /// Field devices that are expected to report to a parent controller.
    pub fn expects_parent_controller(self) -> bool {
        matches!(
            self,
            DeviceType::RemoteIo
                | DeviceType::Vfd
                | DeviceType::SoftStarter
                | DeviceType::MotorStarter
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProtocolType {
    #[serde(rename = "Ethernet_IP")]
    EthernetIp,
    Profinet,
    #[serde(rename = "Modbus_TCP")]
    ModbusTcp,
    #[serde(rename = "Modbus_RTU")]
    ModbusRtu,
    Profibus,
    DeviceNet,
    ControlNet,
    #[serde(rename = "HART")]
    Hart,
    #[serde(rename = "Foundation_Fieldbus")]
    FoundationFieldbus,
    #[serde(rename = "OPC_UA")]
    OpcUa,
    #[serde(rename = "MQTT")]
    Mqtt,
    #[serde(rename = "BACnet")]
    Bacnet,
}

impl ProtocolType {
    pub const ALL: [ProtocolType; 12] = [
        ProtocolType::EthernetIp,
        ProtocolType::Profinet,
        ProtocolType::ModbusTcp,
        ProtocolType::ModbusRtu,
        ProtocolType::Profibus,
        ProtocolType::DeviceNet,
        ProtocolType::ControlNet,
        ProtocolType::Hart,
        ProtocolType::FoundationFieldbus,
        ProtocolType::OpcUa,
        ProtocolType::Mqtt,
        ProtocolType::Bacnet,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolType::EthernetIp => "Ethernet_IP",
            ProtocolType::Profinet => "Profinet",
            ProtocolType::ModbusTcp => "Modbus_TCP",
            ProtocolType::ModbusRtu => "Modbus_RTU",
            ProtocolType::Profibus => "Profibus",
            ProtocolType::DeviceNet => "DeviceNet",
            ProtocolType::ControlNet => "ControlNet",
            ProtocolType::Hart => "HART",
            ProtocolType::FoundationFieldbus => "Foundation_Fieldbus",
            ProtocolType::OpcUa => "OPC_UA",
            ProtocolType::Mqtt => "MQTT",
            ProtocolType::Bacnet => "BACnet",
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RedundancyType {
    #[default]
    None,
    #[serde(rename = "Hot_Standby")]
    HotStandby,
    #[serde(rename = "Warm_Standby")]
    WarmStandby,
    #[serde(rename = "Cold_Standby")]
    ColdStandby,
    #[serde(rename = "Dual_Redundant")]
    DualRedundant,
    #[serde(rename = "Triple_Modular")]
    TripleModular,
}

impl RedundancyType {
    pub const ALL: [RedundancyType; 6] = [
        RedundancyType::None,
        RedundancyType::HotStandby,
        RedundancyType::WarmStandby,
        RedundancyType::ColdStandby,
        RedundancyType::DualRedundant,
        RedundancyType::TripleModular,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RedundancyType::None => "None",
            RedundancyType::HotStandby => "Hot_Standby",
            RedundancyType::WarmStandby => "Warm_Standby",
            RedundancyType::ColdStandby => "Cold_Standby",
            RedundancyType::DualRedundant => "Dual_Redundant",
            RedundancyType::TripleModular => "Triple_Modular",
        }
    }
}

/// Display and parse the wire names shared with the document format.
/// Parsing is case-insensitive.
macro_rules! wire_name_impls {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CsaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| CsaError::UnknownName {
                        what: $what,
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_name_impls!(ControllerType, "controller type");
wire_name_impls!(DeviceType, "device type");
wire_name_impls!(ProtocolType, "protocol");
wire_name_impls!(RedundancyType, "redundancy type");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metadata {
    pub project_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub site: String,
    #[serde(default = "default_revision")]
    pub revision: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub date: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Metadata {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            site: String::new(),
            revision: default_revision(),
            date: String::new(),
            author: String::new(),
            client: String::new(),
            description: String::new(),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

fn default_revision() -> String {
    "A".to_string()
}

/// A Purdue-model zone (level 0 field through level 4 enterprise).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    /// Empty names are replaced by the id when a topology is built.
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_purdue_level")]
    pub purdue_level: u8,
}

impl Zone {
    pub fn new(id: impl Into<String>, name: impl Into<String>, purdue_level: u8) -> Self {
        let id = id.into();
        let mut name = name.into();
        if name.is_empty() {
            name.clone_from(&id);
        }
        Self {
            id,
            name,
            purdue_level,
        }
    }
}

fn default_purdue_level() -> u8 {
    1
}

/// Highest Purdue level a zone may carry.
pub const MAX_PURDUE_LEVEL: u8 = 4;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Port {
    pub id: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_port_direction")]
    pub direction: String,
    #[serde(rename = "type", alias = "port_type", default = "default_port_type")]
    pub port_type: String,
}

fn default_port_direction() -> String {
    "N".to_string()
}

fn default_port_type() -> String {
    "ethernet".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Controller {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ControllerType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(default)]
    pub redundancy: RedundancyType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equipment_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub position_x: f64,
    #[serde(default)]
    pub position_y: f64,
    #[serde(default = "default_controller_width")]
    pub width: f64,
    #[serde(default = "default_controller_height")]
    pub height: f64,
}

impl Controller {
    pub fn new(id: impl Into<String>, kind: ControllerType) -> Self {
        Self {
            id: id.into(),
            kind,
            manufacturer: String::new(),
            model: String::new(),
            redundancy: RedundancyType::None,
            zone: String::new(),
            equipment_tags: Vec::new(),
            ip_address: String::new(),
            description: String::new(),
            ports: Vec::new(),
            position_x: 0.0,
            position_y: 0.0,
            width: default_controller_width(),
            height: default_controller_height(),
        }
    }
}

fn default_controller_width() -> f64 {
    60.0
}

fn default_controller_height() -> f64 {
    40.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DeviceType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_controller: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<Port>,
    #[serde(default)]
    pub position_x: f64,
    #[serde(default)]
    pub position_y: f64,
    #[serde(default = "default_device_width")]
    pub width: f64,
    #[serde(default = "default_device_height")]
    pub height: f64,
}

impl Device {
    pub fn new(id: impl Into<String>, kind: DeviceType) -> Self {
        Self {
            id: id.into(),
            kind,
            model: String::new(),
            parent_controller: String::new(),
            zone: String::new(),
            ip_address: String::new(),
            description: String::new(),
            ports: Vec::new(),
            position_x: 0.0,
            position_y: 0.0,
            width: default_device_width(),
            height: default_device_height(),
        }
    }
}

fn default_device_width() -> f64 {
    40.0
}

fn default_device_height() -> f64 {
    30.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Network {
    pub id: String,
    /// Empty names are replaced by the id when a topology is built.
    #[serde(default)]
    pub name: String,
    pub protocol: ProtocolType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subnet: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub protocol: ProtocolType,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cable_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_port: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_port: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub waypoints: Vec<Waypoint>,
}

impl Link {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        protocol: ProtocolType,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            protocol,
            network: String::new(),
            cable_type: String::new(),
            source_port: String::new(),
            target_port: String::new(),
            description: String::new(),
            waypoints: Vec::new(),
        }
    }

    /// Builder-style network reference.
    pub fn on_network(mut self, network: impl Into<String>) -> Self {
        self.network = network.into();
        self
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Unvalidated topology document, as read from YAML/JSON.
///
/// Converting into [`crate::Topology`] runs full validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopologyDef {
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub controllers: Vec<Controller>,
    #[serde(default)]
    pub devices: Vec<Device>,
    #[serde(default)]
    pub networks: Vec<Network>,
    #[serde(default)]
    pub links: Vec<Link>,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}
