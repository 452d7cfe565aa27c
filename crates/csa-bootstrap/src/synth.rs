//! Topology synthesis from equipment and instrument inputs.
//!
//! A run resolves the template, parses the inputs and then builds the graph
//! in a fixed order: zones, networks, process controllers, safety
//! controllers, per-area field devices, vendor packages, the control switch
//! and SCADA. The assembled graph is validated before anything is returned.

use std::collections::{BTreeMap, HashSet};

use csa_core::{AreaCode, format_module_counts, resolve_area, size_modules};
use csa_templates::{
    CENTRALIZED, ControllerAllocation, IoPlacement, ResolvedTemplate, SafetyPolicy,
    VendorIntegration, VfdLocation, get_template, require_template,
};
use csa_topology::{
    Controller, ControllerType, Device, DeviceType, Link, Metadata, Network, ProtocolType,
    RedundancyType, SCHEMA_VERSION, Topology, TopologyDef, Zone,
};

use crate::addressing::{
    AddressPool, CONTROL_NET_ID, CONTROL_SUBNET, DEVICE_NET_ID, DEVICE_SUBNET, SCADA_ADDRESS,
    SWITCH_ADDRESS,
};
use crate::error::{BootstrapError, BootstrapResult};
use crate::fingerprint::compute_fingerprint;
use crate::inputs::{EquipmentEntry, Feeder, parse_equipment_list, parse_instrument_database};
use crate::io_summary::{IoSummary, summarize_io};
use crate::request::{BootstrapOutcome, BootstrapRequest, SelectionMode};

pub const FIELD_ZONE: &str = "level_0";
pub const CONTROL_ZONE: &str = "level_1";
pub const SUPERVISORY_ZONE: &str = "level_2";

pub const CENTRAL_PLC_ID: &str = "PLC-001";
pub const CENTRAL_SIS_ID: &str = "SIS-001";
pub const SWITCH_ID: &str = "SW-001";
pub const SCADA_ID: &str = "SCADA-001";

/// Areas above this many IO points get a suggestion to split remote IO.
pub const LARGE_AREA_IO_POINTS: u32 = 500;

/// Equipment after partitioning, with unusable entries removed.
#[derive(Debug, Default)]
struct EquipmentPlan<'a> {
    by_area: BTreeMap<AreaCode, Vec<&'a EquipmentEntry>>,
    vendor: Vec<&'a EquipmentEntry>,
}

/// Build a draft topology for `request`.
///
/// Input problems become warnings on the outcome. An unknown template is
/// fatal only in strict mode.
pub fn bootstrap(request: &BootstrapRequest) -> BootstrapResult<BootstrapOutcome> {
    tracing::info!(
        project = %request.project_name,
        template = %request.template,
        mode = %request.mode,
        "bootstrap started"
    );

    let mut warnings = Vec::new();

    let template = match get_template(&request.template) {
        Some(template) => template,
        None if request.mode == SelectionMode::Strict => {
            return Err(BootstrapError::UnknownTemplate {
                name: request.template.clone(),
            });
        }
        None => {
            tracing::warn!(template = %request.template, "unknown template, using {CENTRALIZED}");
            warnings.push(format!(
                "Unknown template '{}', using '{CENTRALIZED}'",
                request.template
            ));
            require_template(CENTRALIZED)?
        }
    };
    let resolved = template.resolve(&request.overrides)?;

    let equipment = parse_equipment_list(&request.equipment_list);
    warnings.extend(equipment.warnings);
    if equipment.value.is_empty() {
        warnings.push("No equipment found in equipment list".to_string());
    }
    let instruments = parse_instrument_database(&request.instrument_database);
    warnings.extend(instruments.warnings);
    if instruments.value.is_empty() {
        warnings.push("No instruments found in instrument database".to_string());
    }

    let io_summary = summarize_io(&instruments.value);
    let plan = partition_equipment(&equipment.value, &mut warnings);

    let mut synth = Synthesizer::new(resolved, warnings);
    synth.add_controllers(&plan);
    synth.add_safety_controllers(&plan);
    synth.add_field_devices(&plan, &io_summary);
    synth.add_vendor_packages(&plan);
    synth.add_control_switch();
    synth.add_scada();
    synth.review_notes(&plan, &io_summary, equipment.value.is_empty());
    synth.address_warnings();

    let template_used = synth.resolved.name();
    let networks = synth.networks();
    let def = TopologyDef {
        schema_version: SCHEMA_VERSION.to_string(),
        metadata: Metadata {
            description: format!("Generated from {template_used} template"),
            ..Metadata::new(request.project_name.clone())
        },
        zones: purdue_zones(),
        controllers: synth.controllers,
        devices: synth.devices,
        networks: networks.clone(),
        links: synth.links,
    };
    let topology = Topology::new(def)?;
    let topology_yaml = serde_yaml::to_string(&topology)?;

    tracing::info!(
        controllers = topology.controllers().len(),
        devices = topology.devices().len(),
        links = topology.links().len(),
        suggestions = synth.suggestions.len(),
        warnings = synth.warnings.len(),
        "bootstrap complete"
    );

    Ok(BootstrapOutcome {
        topology,
        topology_yaml,
        suggestions: synth.suggestions,
        warnings: synth.warnings,
        io_summary,
        equipment_mapping: synth.equipment_mapping,
        networks,
        template_used: template_used.to_string(),
        template_version: request.template_version.clone(),
        fingerprint: compute_fingerprint(request, template_used),
    })
}

/// Split equipment into vendor packages and per-area plant equipment.
///
/// Entries without a tag and repeats of an earlier tag are dropped with a
/// warning.
fn partition_equipment<'a>(
    entries: &'a [EquipmentEntry],
    warnings: &mut Vec<String>,
) -> EquipmentPlan<'a> {
    let mut plan = EquipmentPlan::default();
    let mut seen = HashSet::new();

    for (i, entry) in entries.iter().enumerate() {
        let tag = entry.tag();
        if tag.is_empty() {
            tracing::warn!(index = i, "equipment entry without tag");
            warnings.push(format!("Equipment entry {i} has no tag; skipped"));
            continue;
        }
        if !seen.insert(tag) {
            tracing::warn!(tag, "duplicate equipment tag");
            warnings.push(format!("Duplicate equipment tag '{tag}'; later entry skipped"));
            continue;
        }
        if entry.is_vendor() {
            plan.vendor.push(entry);
        } else {
            plan.by_area.entry(resolve_area(tag)).or_default().push(entry);
        }
    }
    plan
}

fn purdue_zones() -> Vec<Zone> {
    vec![
        Zone::new(FIELD_ZONE, "Field Level", 0),
        Zone::new(CONTROL_ZONE, "Control Level", 1),
        Zone::new(SUPERVISORY_ZONE, "Supervisory Level", 2),
    ]
}

struct Synthesizer {
    resolved: ResolvedTemplate,
    protocol: ProtocolType,
    controllers: Vec<Controller>,
    devices: Vec<Device>,
    links: Vec<Link>,
    equipment_mapping: BTreeMap<String, String>,
    suggestions: Vec<String>,
    warnings: Vec<String>,
    controller_pool: AddressPool,
    device_pool: AddressPool,
}

impl Synthesizer {
    fn new(resolved: ResolvedTemplate, warnings: Vec<String>) -> Self {
        let protocol = resolved.primary_protocol();
        Self {
            resolved,
            protocol,
            controllers: Vec::new(),
            devices: Vec::new(),
            links: Vec::new(),
            equipment_mapping: BTreeMap::new(),
            suggestions: Vec::new(),
            warnings,
            controller_pool: AddressPool::controllers(),
            device_pool: AddressPool::field_devices(),
        }
    }

    fn networks(&self) -> Vec<Network> {
        vec![
            Network {
                id: CONTROL_NET_ID.to_string(),
                name: "Control Network".to_string(),
                protocol: self.protocol,
                zone: CONTROL_ZONE.to_string(),
                subnet: CONTROL_SUBNET.to_string(),
                description: String::new(),
            },
            Network {
                id: DEVICE_NET_ID.to_string(),
                name: "Device Network".to_string(),
                protocol: self.protocol,
                zone: FIELD_ZONE.to_string(),
                subnet: DEVICE_SUBNET.to_string(),
                description: String::new(),
            },
        ]
    }

    fn parent_controller(&self, area: &AreaCode) -> String {
        match self.resolved.allocation() {
            ControllerAllocation::Central => CENTRAL_PLC_ID.to_string(),
            ControllerAllocation::PerArea => format!("PLC-{area}"),
        }
    }

    fn process_controller(
        &mut self,
        id: String,
        description: String,
        tags: Vec<String>,
    ) {
        for tag in &tags {
            self.equipment_mapping.insert(tag.clone(), id.clone());
        }
        self.controllers.push(Controller {
            redundancy: self.resolved.redundancy_for(ControllerType::Plc),
            zone: CONTROL_ZONE.to_string(),
            equipment_tags: tags,
            ip_address: next_address(&mut self.controller_pool),
            description,
            ..Controller::new(id, ControllerType::Plc)
        });
    }

    fn add_controllers(&mut self, plan: &EquipmentPlan<'_>) {
        match self.resolved.allocation() {
            ControllerAllocation::Central => {
                let tags = plan
                    .by_area
                    .values()
                    .flatten()
                    .map(|e| e.tag().to_string())
                    .collect();
                self.process_controller(
                    CENTRAL_PLC_ID.to_string(),
                    "Main Process PLC".to_string(),
                    tags,
                );
            }
            ControllerAllocation::PerArea => {
                for (area, entries) in &plan.by_area {
                    let tags = entries.iter().map(|e| e.tag().to_string()).collect();
                    self.process_controller(
                        self.parent_controller(area),
                        format!("Area {area} PLC"),
                        tags,
                    );
                }
            }
        }
    }

    fn safety_controller(&mut self, id: String, description: String) {
        self.controllers.push(Controller {
            redundancy: RedundancyType::DualRedundant,
            zone: CONTROL_ZONE.to_string(),
            ip_address: next_address(&mut self.controller_pool),
            description,
            ..Controller::new(id, ControllerType::SafetyPlc)
        });
    }

    fn add_safety_controllers(&mut self, plan: &EquipmentPlan<'_>) {
        match self.resolved.safety_policy() {
            SafetyPolicy::None => {}
            SafetyPolicy::Central => {
                self.safety_controller(
                    CENTRAL_SIS_ID.to_string(),
                    "Safety Instrumented System".to_string(),
                );
            }
            SafetyPolicy::PerArea => {
                for area in plan.by_area.keys() {
                    self.safety_controller(
                        format!("SIS-{area}"),
                        format!("Area {area} Safety PLC"),
                    );
                }
            }
        }
    }

    fn add_field_devices(
        &mut self,
        plan: &EquipmentPlan<'_>,
        io_summary: &IoSummary,
    ) {
        let distributed = self.resolved.io_placement() == IoPlacement::Distributed;

        for (area, entries) in &plan.by_area {
            let parent = self.parent_controller(area);
            let area_io = io_summary.get(area).copied().unwrap_or_default();

            let mut feed_source = parent.clone();
            if distributed && !area_io.is_empty() {
                let rio_id = format!("RIO-{area}");
                self.devices.push(Device {
                    parent_controller: parent.clone(),
                    zone: FIELD_ZONE.to_string(),
                    ip_address: next_address(&mut self.device_pool),
                    description: format!("Area {area} Remote IO"),
                    ..Device::new(rio_id.clone(), DeviceType::RemoteIo)
                });
                self.links.push(
                    Link::new(parent.clone(), rio_id.clone(), self.protocol)
                        .on_network(DEVICE_NET_ID),
                );

                let modules = size_modules(&area_io, self.resolved.spare_io_pct());
                self.suggestions.push(format!(
                    "Area {area} RIO modules: {} (based on {area_io})",
                    format_module_counts(&modules)
                ));
                tracing::debug!(%area, rio = %rio_id, points = area_io.total(), "remote IO placed");
                feed_source = rio_id;
            }

            for entry in entries {
                let Some(feeder) = entry.feeder() else {
                    continue;
                };
                let tag = entry.tag();
                let (id, kind, description) = match feeder {
                    Feeder::Vfd => {
                        let location = match self.resolved.vfd_location() {
                            VfdLocation::Mcc => "MCC".to_string(),
                            VfdLocation::RemotePanel => format!("area {area} panel"),
                        };
                        (
                            format!("VFD-{tag}"),
                            DeviceType::Vfd,
                            format!("VFD for {tag} ({location})"),
                        )
                    }
                    Feeder::SoftStarter => (
                        format!("SS-{tag}"),
                        DeviceType::SoftStarter,
                        format!("Soft Starter for {tag}"),
                    ),
                };
                self.devices.push(Device {
                    parent_controller: parent.clone(),
                    zone: FIELD_ZONE.to_string(),
                    ip_address: next_address(&mut self.device_pool),
                    description,
                    ..Device::new(id.clone(), kind)
                });
                self.links.push(
                    Link::new(feed_source.clone(), id, self.protocol).on_network(DEVICE_NET_ID),
                );
            }
        }
    }

    fn add_vendor_packages(&mut self, plan: &EquipmentPlan<'_>) {
        // Captured before any vendor controller exists.
        let host = self.controllers.first().map(|c| c.id.clone());
        let opc_ua = self.resolved.vendor_integration() == VendorIntegration::OpcUa;

        for entry in &plan.vendor {
            let tag = entry.tag();
            let pkg_id = format!("PKG-{tag}");
            self.controllers.push(Controller {
                zone: CONTROL_ZONE.to_string(),
                ip_address: next_address(&mut self.controller_pool),
                description: format!("Vendor PLC - {tag}"),
                ..Controller::new(pkg_id.clone(), ControllerType::Plc)
            });
            self.suggestions.push(format!(
                "Vendor package '{tag}': Create OPC-UA gateway and hardwired interlocks"
            ));

            if !opc_ua {
                continue;
            }
            match &host {
                Some(host) => {
                    let mut link = Link::new(host.clone(), pkg_id, ProtocolType::OpcUa);
                    link.description = "Vendor package integration".to_string();
                    self.links.push(link);
                }
                None => {
                    tracing::warn!(package = %pkg_id, "no plant controller for OPC-UA link");
                    self.warnings.push(format!(
                        "No plant controller to link vendor package '{pkg_id}' over OPC-UA"
                    ));
                }
            }
        }
    }

    fn add_control_switch(&mut self) {
        self.devices.push(Device {
            zone: CONTROL_ZONE.to_string(),
            ip_address: SWITCH_ADDRESS.to_string(),
            description: "Control Network Switch".to_string(),
            ..Device::new(SWITCH_ID, DeviceType::ManagedSwitch)
        });
        let uplinks: Vec<Link> = self
            .controllers
            .iter()
            .map(|c| Link::new(c.id.clone(), SWITCH_ID, self.protocol).on_network(CONTROL_NET_ID))
            .collect();
        self.links.extend(uplinks);
    }

    fn add_scada(&mut self) {
        self.devices.push(Device {
            zone: SUPERVISORY_ZONE.to_string(),
            ip_address: SCADA_ADDRESS.to_string(),
            description: "SCADA Server".to_string(),
            ..Device::new(SCADA_ID, DeviceType::Scada)
        });
        self.links.push(Link::new(SWITCH_ID, SCADA_ID, self.protocol));
    }

    fn review_notes(
        &mut self,
        plan: &EquipmentPlan<'_>,
        io_summary: &IoSummary,
        no_equipment: bool,
    ) {
        if no_equipment {
            self.suggestions
                .push("No equipment parsed - verify equipment list format".to_string());
        }
        if io_summary.is_empty() {
            self.suggestions
                .push("No IO signals parsed - verify instrument database format".to_string());
        }

        for (area, counts) in io_summary {
            let total = counts.total();
            if total > LARGE_AREA_IO_POINTS {
                self.suggestions.push(format!(
                    "Area {area} has {total} IO points - consider additional RIO panels"
                ));
            }
        }

        for (area, panels) in &self.resolved.overrides.panel_counts {
            if !plan.by_area.contains_key(area) {
                self.suggestions.push(format!(
                    "Panel count override for area {area} ({panels} panel(s)) matches no equipment"
                ));
            }
        }
    }

    fn address_warnings(&mut self) {
        for pool in [&self.controller_pool, &self.device_pool] {
            if let Some(warning) = pool.exhaustion_warning() {
                tracing::warn!(misses = pool.misses(), "{warning}");
                self.warnings.push(warning);
            }
        }
    }
}

/// Next address from `pool`, empty once the pool is spent.
fn next_address(pool: &mut AddressPool) -> String {
    pool.allocate().map(|ip| ip.to_string()).unwrap_or_default()
}
