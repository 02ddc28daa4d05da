//! Domain model for the switch inventory and connection state.

pub mod address;
pub mod blade;
pub mod connection;
pub mod protocol;
pub mod records;

pub use address::{CHASSIS_ID, LoginAddress, PhysicalAddress, PortAddress, SubPort};
pub use blade::associate_model;
pub use connection::{ConnectionInfo, ConnectionKind, ConnectionMapping};
pub use protocol::{ProtocolClass, classify};
pub use records::{
    BladeDetails, BladeRecord, ChassisRecord, PortRecord, PortTable, SwitchInfo,
};
