//! # teststream
//!
//! Async CLI driver for NetScout TestStream fiber cross-connect switches.
//!
//! The driver logs into the switch CLI over SSH or Telnet, reads its
//! chassis/blade/port inventory and current connections, and creates or
//! removes port-to-port connections.
//!
//! ## Features
//!
//! - Async SSH (russh) and Telnet sessions with prompt detection
//! - Parsers for the switch's fixed-width tables and comma-separated port dumps
//! - Resource tree assembly in logical or physical (TX/RX sub-port) mode
//! - Firmware-dependent command dialects
//! - Offline replay of recorded sessions through [`ReplayDriver`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use teststream::{DriverCommands, DriverConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), teststream::Error> {
//!     let config = DriverConfig::default();
//!     let mut commands =
//!         DriverCommands::connect("192.168.42.240?teststream=OS-192", "admin", "secret", &config)
//!             .await?;
//!
//!     let tree = commands.get_resource_description("192.168.42.240").await?;
//!     for port in tree.ports() {
//!         println!("{} {:?}", port.address, port.mapping);
//!     }
//!
//!     commands.map_bidi("192.168.42.240/1/21", "192.168.42.240/1/22").await?;
//!     commands.logout().await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod channel;
pub mod command;
pub mod commands;
pub mod config;
pub mod driver;
pub mod error;
pub mod model;
pub mod parse;
pub mod transport;
pub mod tree;

// Re-export main types for convenience
pub use commands::{DriverCommands, SessionContext};
pub use config::{DriverConfig, PortMode};
pub use driver::{CliDriver, Driver, DriverBuilder, ReplayDriver, Response};
pub use error::{Error, Result};
pub use model::{ConnectionMapping, LoginAddress, PhysicalAddress, PortAddress, SubPort};
pub use transport::{HostKeyVerification, Protocol, SessionConfig};
pub use tree::{BladeNode, ChassisNode, PortNode, ResourceDescription};
