//! Physical resource tree handed to the orchestration caller.
//!
//! ```text
//! chassis (device address)
//! └── blade  <address>/<blade>
//!     └── port  <address>/<blade>/<port>        logical mode
//!     └── port  <address>/<blade>/<port>-TX     physical mode
//!     └── port  <address>/<blade>/<port>-RX
//! ```

mod builder;

pub use builder::ResourceTreeBuilder;

use serde::Serialize;

/// Resource model of every chassis.
pub const CHASSIS_MODEL_NAME: &str = "Netscout Teststream Chassis";

/// Resource model of every port and sub-port.
pub const PORT_MODEL_NAME: &str = "Netscout Generic L1 Port";

/// Serial number reported for a chassis; the switch does not expose one.
pub const CHASSIS_SERIAL_NUMBER: &str = "NA";

/// Result of an autoload: one entry per chassis.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceDescription {
    pub chassis: Vec<ChassisNode>,
}

impl ResourceDescription {
    /// Iterate over every port node in the tree.
    pub fn ports(&self) -> impl Iterator<Item = &PortNode> {
        self.chassis
            .iter()
            .flat_map(|c| c.blades.iter())
            .flat_map(|b| b.ports.iter())
    }

    /// Find a port by its full resource address.
    pub fn port(&self, address: &str) -> Option<&PortNode> {
        self.ports().find(|p| p.address == address)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChassisNode {
    pub id: u32,
    pub address: String,
    pub resource_model: &'static str,
    /// Switch model as reported by the device, e.g. `OS-192`.
    pub model_name: String,
    pub serial_number: String,
    pub ip_address: String,
    pub os_version: String,
    pub blades: Vec<BladeNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BladeNode {
    pub id: u32,
    pub address: String,
    /// Registered blade model, e.g. `O-Blade`.
    pub model_name: &'static str,
    pub serial_number: Option<String>,
    pub ports: Vec<PortNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortNode {
    /// Port id within its blade: `7` or `7-TX`.
    pub id: String,
    pub address: String,
    pub resource_model: &'static str,
    /// Display name reported by the device.
    pub name: String,
    pub protocol: u32,
    pub protocol_type: u32,
    pub speed: u32,
    /// Raw device protocol code.
    pub protocol_value: u32,
    /// Resource address of the port feeding this one.
    pub mapping: Option<String>,
}
