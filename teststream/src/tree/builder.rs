//! Joins parsed inventory, port table and connection mapping into a
//! [`ResourceDescription`].

use std::collections::HashMap;

use log::debug;

use super::{
    BladeNode, CHASSIS_MODEL_NAME, CHASSIS_SERIAL_NUMBER, ChassisNode, PORT_MODEL_NAME, PortNode,
    ResourceDescription,
};
use crate::config::PortMode;
use crate::error::ParseError;
use crate::model::{
    ConnectionMapping, PhysicalAddress, PortRecord, PortTable, SubPort, SwitchInfo, associate_model,
    classify,
};

/// Position of a port node: (chassis, blade, port) indices into the tree.
type NodeIndex = (usize, usize, usize);

/// Sub-port slot of the feeding port that carries the mapping in physical
/// mode. Sub-ports are emitted TX first, so slot 1 is RX.
const PHYSICAL_MAPPING_SLOT: usize = 1;

/// Builds the resource tree for one autoload.
#[derive(Debug, Clone)]
pub struct ResourceTreeBuilder {
    address: String,
    port_mode: PortMode,
}

impl ResourceTreeBuilder {
    /// `address` is the device address the caller knows the switch by.
    pub fn new(address: impl Into<String>, port_mode: PortMode) -> Self {
        Self {
            address: address.into(),
            port_mode,
        }
    }

    /// Assemble the tree.
    ///
    /// Fails only when a blade label is not a registered model. Ports on
    /// unknown blades and mapping endpoints missing from the port table
    /// are skipped.
    pub fn build(
        &self,
        info: &SwitchInfo,
        os_version: &str,
        ports: &PortTable,
        mapping: &ConnectionMapping,
    ) -> Result<ResourceDescription, ParseError> {
        let mut tree = ResourceDescription {
            chassis: self.build_chassis(info, os_version)?,
        };
        let nodes = self.attach_ports(&mut tree, ports);
        self.attach_mappings(&mut tree, &nodes, mapping);
        Ok(tree)
    }

    fn build_chassis(
        &self,
        info: &SwitchInfo,
        os_version: &str,
    ) -> Result<Vec<ChassisNode>, ParseError> {
        debug!("building blades");
        info.chassis
            .iter()
            .map(|chassis| {
                let blades = chassis
                    .blades
                    .iter()
                    .map(|blade| {
                        Ok(BladeNode {
                            id: blade.id,
                            address: format!("{}/{}", self.address, blade.id),
                            model_name: associate_model(&blade.label)?,
                            serial_number: blade
                                .details
                                .as_ref()
                                .map(|d| d.serial_number.clone()),
                            ports: Vec::new(),
                        })
                    })
                    .collect::<Result<Vec<_>, ParseError>>()?;

                Ok(ChassisNode {
                    id: chassis.id,
                    address: self.address.clone(),
                    resource_model: CHASSIS_MODEL_NAME,
                    model_name: info.model_name.clone(),
                    serial_number: CHASSIS_SERIAL_NUMBER.to_string(),
                    ip_address: info.ip_address.clone(),
                    os_version: os_version.to_string(),
                    blades,
                })
            })
            .collect()
    }

    /// Add port nodes under their blades and index them by physical address.
    fn attach_ports(
        &self,
        tree: &mut ResourceDescription,
        ports: &PortTable,
    ) -> HashMap<PhysicalAddress, Vec<NodeIndex>> {
        debug!("building ports");
        let mut nodes: HashMap<PhysicalAddress, Vec<NodeIndex>> = HashMap::new();

        for (address, record) in ports {
            let Some((ci, bi)) = find_blade(tree, address) else {
                debug!("port {} has no blade in the inventory", address);
                continue;
            };
            let blade = &mut tree.chassis[ci].blades[bi];

            let ids: Vec<String> = match self.port_mode {
                PortMode::Logical => vec![address.port.to_string()],
                PortMode::Physical => SubPort::ALL
                    .iter()
                    .map(|sub| format!("{}-{}", address.port, sub))
                    .collect(),
            };

            for id in ids {
                let node = self.port_node(&blade.address, id, record);
                nodes
                    .entry(*address)
                    .or_default()
                    .push((ci, bi, blade.ports.len()));
                blade.ports.push(node);
            }
        }

        nodes
    }

    fn port_node(&self, blade_address: &str, id: String, record: &PortRecord) -> PortNode {
        let class = classify(record.protocol_id);
        PortNode {
            address: format!("{}/{}", blade_address, id),
            id,
            resource_model: PORT_MODEL_NAME,
            name: record.name.clone(),
            protocol: class.protocol,
            protocol_type: class.protocol_type,
            speed: class.speed,
            protocol_value: record.protocol_id,
            mapping: None,
        }
    }

    /// Point each feeding node at the node it feeds.
    ///
    /// The reference always names the peer's first node; a source feeding
    /// several destinations keeps the last one.
    fn attach_mappings(
        &self,
        tree: &mut ResourceDescription,
        nodes: &HashMap<PhysicalAddress, Vec<NodeIndex>>,
        mapping: &ConnectionMapping,
    ) {
        debug!("building mappings");
        let slot = match self.port_mode {
            PortMode::Logical => 0,
            PortMode::Physical => PHYSICAL_MAPPING_SLOT,
        };

        for (src, dsts) in mapping.iter() {
            let Some(&(ci, bi, pi)) = nodes.get(src).and_then(|n| n.get(slot)) else {
                debug!("mapping source {} is not in the port table", src);
                continue;
            };

            for dst in dsts {
                let Some(&(dci, dbi, dpi)) = nodes.get(dst).and_then(|n| n.first()) else {
                    debug!("mapping destination {} is not in the port table", dst);
                    continue;
                };
                let peer = tree.chassis[dci].blades[dbi].ports[dpi].address.clone();
                tree.chassis[ci].blades[bi].ports[pi].mapping = Some(peer);
            }
        }
    }
}

fn find_blade(tree: &ResourceDescription, address: &PhysicalAddress) -> Option<(usize, usize)> {
    tree.chassis
        .iter()
        .enumerate()
        .filter(|(_, chassis)| chassis.id == address.chassis)
        .find_map(|(ci, chassis)| {
            chassis
                .blades
                .iter()
                .position(|blade| blade.id == address.blade)
                .map(|bi| (ci, bi))
        })
}
