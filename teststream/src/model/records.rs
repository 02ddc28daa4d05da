//! Inventory records parsed from device output.
//!
//! Records are built fresh for every autoload and discarded once the
//! resource tree has been assembled.

use indexmap::IndexMap;

use super::address::PhysicalAddress;

/// Hardware details printed under a blade line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BladeDetails {
    pub vendor: Option<String>,
    pub model: String,
    pub uboot_rev: String,
    pub serial_number: String,
}

/// A blade (PIM) installed in a chassis slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BladeRecord {
    pub id: u32,
    /// Raw vendor label, e.g. `O-Blade`.
    pub label: String,
    pub details: Option<BladeDetails>,
}

/// A chassis controller and the blades it reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChassisRecord {
    pub id: u32,
    pub blades: Vec<BladeRecord>,
}

/// Identity and inventory from `show information switch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchInfo {
    pub model_name: String,
    pub ip_address: String,
    pub chassis: Vec<ChassisRecord>,
}

/// A physical port from `show port rawinfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRecord {
    pub address: PhysicalAddress,
    pub name: String,
    pub protocol_id: u32,
}

/// Ports keyed by physical address, in device order.
pub type PortTable = IndexMap<PhysicalAddress, PortRecord>;
