//! Parsers for TestStream command output.
//!
//! All parsers are pure functions over text; they never talk to the
//! device. Structural problems surface as [`ParseError`](crate::error::ParseError),
//! while benign "nothing here" idioms produce empty results.

pub mod connections;
pub mod port_table;
pub mod switch_info;
pub mod system;
pub mod table;

pub use connections::{CONNECTION_COLUMNS, parse_connection_rows, parse_connections};
pub use port_table::parse_port_table;
pub use switch_info::{parse_blade_details, parse_switch_info};
pub use system::{SoftwareVersion, parse_available_switches, parse_software_version};
pub use table::{Row, parse_table};
