//! Id lookup tables for a validated topology.
//!
//! Maps entity ids to their position in the owning vector, giving O(1)
//! lookups and reference checks. Rebuilt on construction and updated by
//! add-operations, never serialized.

use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TopologyIndex {
    zones: HashMap<String, usize>,
    controllers: HashMap<String, usize>,
    devices: HashMap<String, usize>,
    networks: HashMap<String, usize>,
}

impl TopologyIndex {
    pub(crate) fn zone(&self, id: &str) -> Option<usize> {
        self.zones.get(id).copied()
    }

    pub(crate) fn controller(&self, id: &str) -> Option<usize> {
        self.controllers.get(id).copied()
    }

    pub(crate) fn device(&self, id: &str) -> Option<usize> {
        self.devices.get(id).copied()
    }

    pub(crate) fn network(&self, id: &str) -> Option<usize> {
        self.networks.get(id).copied()
    }

    /// Controllers and devices share one node id space for link endpoints.
    pub(crate) fn contains_node(&self, id: &str) -> bool {
        self.controllers.contains_key(id) || self.devices.contains_key(id)
    }

    pub(crate) fn insert_zone(&mut self, id: &str, idx: usize) -> bool {
        insert_unique(&mut self.zones, id, idx)
    }

    pub(crate) fn insert_controller(&mut self, id: &str, idx: usize) -> bool {
        insert_unique(&mut self.controllers, id, idx)
    }

    pub(crate) fn insert_device(&mut self, id: &str, idx: usize) -> bool {
        insert_unique(&mut self.devices, id, idx)
    }

    pub(crate) fn insert_network(&mut self, id: &str, idx: usize) -> bool {
        insert_unique(&mut self.networks, id, idx)
    }
}

/// Insert `id -> idx`; false (and no change) when the id is already present.
fn insert_unique(map: &mut HashMap<String, usize>, id: &str, idx: usize) -> bool {
    if map.contains_key(id) {
        return false;
    }
    map.insert(id.to_string(), idx);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_insert_is_refused() {
        let mut index = TopologyIndex::default();
        assert!(index.insert_controller("PLC-001", 0));
        assert!(!index.insert_controller("PLC-001", 1));
        assert_eq!(index.controller("PLC-001"), Some(0));
    }

    #[test]
    fn node_space_spans_controllers_and_devices() {
        let mut index = TopologyIndex::default();
        index.insert_controller("PLC-001", 0);
        index.insert_device("SW-001", 0);
        assert!(index.contains_node("PLC-001"));
        assert!(index.contains_node("SW-001"));
        assert!(!index.contains_node("SCADA-001"));
    }
}
