//! The validated topology aggregate.

use serde::{Deserialize, Serialize};

use crate::index::TopologyIndex;
use crate::schema::{Controller, Device, Link, Metadata, Network, TopologyDef, Zone};
use crate::validate::{self, ValidationError};

/// A control system topology whose references are known to be closed.
///
/// The only ways to obtain one are [`Topology::new`], `TryFrom<TopologyDef>`
/// and deserialization, all of which run full validation. After that the
/// graph only grows through the `add_*` operations, each of which checks the
/// new entity against the current graph before touching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TopologyDef")]
pub struct Topology {
    schema_version: String,
    metadata: Metadata,
    zones: Vec<Zone>,
    controllers: Vec<Controller>,
    devices: Vec<Device>,
    networks: Vec<Network>,
    links: Vec<Link>,
    #[serde(skip)]
    index: TopologyIndex,
}

impl Topology {
    /// Validate a raw definition and freeze it into a topology.
    pub fn new(mut def: TopologyDef) -> Result<Self, ValidationError> {
        validate::check_schema_version(&def.schema_version)?;
        if def.metadata.project_name.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "metadata.project_name".to_string(),
                value: def.metadata.project_name.clone(),
                reason: "project name is required".to_string(),
            });
        }

        for zone in &mut def.zones {
            if zone.name.is_empty() {
                zone.name.clone_from(&zone.id);
            }
        }
        for network in &mut def.networks {
            if network.name.is_empty() {
                network.name.clone_from(&network.id);
            }
        }

        let index = validate::build_index(
            &def.zones,
            &def.controllers,
            &def.devices,
            &def.networks,
            &def.links,
        )?;

        tracing::debug!(
            project = %def.metadata.project_name,
            controllers = def.controllers.len(),
            devices = def.devices.len(),
            links = def.links.len(),
            "topology validated"
        );

        Ok(Self {
            schema_version: def.schema_version,
            metadata: def.metadata,
            zones: def.zones,
            controllers: def.controllers,
            devices: def.devices,
            networks: def.networks,
            links: def.links,
            index,
        })
    }

    /// Unwrap back into the raw definition.
    pub fn into_def(self) -> TopologyDef {
        TopologyDef {
            schema_version: self.schema_version,
            metadata: self.metadata,
            zones: self.zones,
            controllers: self.controllers,
            devices: self.devices,
            networks: self.networks,
            links: self.links,
        }
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn networks(&self) -> &[Network] {
        &self.networks
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.index.zone(id).map(|i| &self.zones[i])
    }

    pub fn controller(&self, id: &str) -> Option<&Controller> {
        self.index.controller(id).map(|i| &self.controllers[i])
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.index.device(id).map(|i| &self.devices[i])
    }

    pub fn network(&self, id: &str) -> Option<&Network> {
        self.index.network(id).map(|i| &self.networks[i])
    }

    /// Ids of controllers then devices placed in `zone_id`, in insertion order.
    pub fn nodes_in_zone(&self, zone_id: &str) -> Vec<&str> {
        let controllers = self
            .controllers
            .iter()
            .filter(|c| c.zone == zone_id)
            .map(|c| c.id.as_str());
        let devices = self
            .devices
            .iter()
            .filter(|d| d.zone == zone_id)
            .map(|d| d.id.as_str());
        controllers.chain(devices).collect()
    }

    /// Links with `node_id` as source or target.
    pub fn links_for_node(&self, node_id: &str) -> Vec<&Link> {
        self.links.iter().filter(|l| l.touches(node_id)).collect()
    }

    /// Add a controller. Rejected without change on a duplicate id or unknown zone.
    pub fn add_controller(&mut self, controller: Controller) -> Result<(), ValidationError> {
        validate::check_controller(&self.index, &controller)?;
        self.index
            .insert_controller(&controller.id, self.controllers.len());
        self.controllers.push(controller);
        Ok(())
    }

    /// Add a device. Rejected without change on a duplicate id, unknown zone
    /// or unknown parent controller.
    pub fn add_device(&mut self, device: Device) -> Result<(), ValidationError> {
        validate::check_device(&self.index, &device)?;
        self.index.insert_device(&device.id, self.devices.len());
        self.devices.push(device);
        Ok(())
    }

    /// Add a link. Rejected without change on an unknown endpoint or network.
    pub fn add_link(&mut self, link: Link) -> Result<(), ValidationError> {
        validate::check_link(&self.index, &link)?;
        self.links.push(link);
        Ok(())
    }
}

impl TryFrom<TopologyDef> for Topology {
    type Error = ValidationError;

    fn try_from(def: TopologyDef) -> Result<Self, Self::Error> {
        Topology::new(def)
    }
}

impl From<Topology> for TopologyDef {
    fn from(topology: Topology) -> Self {
        topology.into_def()
    }
}
