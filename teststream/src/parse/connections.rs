//! Parsers for connection listings (`show connection switch <name>` and
//! `show conn prtnum <addr>`).

use log::warn;

use super::table::{Row, parse_table};
use crate::error::ParseError;
use crate::model::{ConnectionInfo, ConnectionKind, ConnectionMapping, PhysicalAddress};

/// Column schema shared by both connection listings.
pub const CONNECTION_COLUMNS: [&str; 9] = [
    "src_addr",
    "src_name",
    "src_rx",
    "connection_type",
    "dst_addr",
    "dst_name",
    "dst_rx",
    "speed",
    "protocol",
];

const NOT_FOUND: &str = "connection not found";

/// Build the connection mapping from a full connection listing.
///
/// Rows with an unknown connection type are logged and skipped; an
/// unreadable address fails the whole listing.
pub fn parse_connections(text: &str) -> Result<ConnectionMapping, ParseError> {
    let mut mapping = ConnectionMapping::new();

    for info in parse_connection_rows(text)? {
        let Ok(kind) = info.kind.parse::<ConnectionKind>() else {
            warn!(
                "can't set mapping for unhandled connection type '{}' ({} -> {})",
                info.kind, info.src, info.dst
            );
            continue;
        };
        mapping.connect(info.src, info.dst, kind);
    }

    Ok(mapping)
}

/// Parse a connection listing into raw rows, keeping the device's type label.
pub fn parse_connection_rows(text: &str) -> Result<Vec<ConnectionInfo>, ParseError> {
    if text.to_lowercase().contains(NOT_FOUND) {
        return Ok(Vec::new());
    }

    parse_table(text, &CONNECTION_COLUMNS)?
        .iter()
        .map(connection_info)
        .collect()
}

fn connection_info(row: &Row) -> Result<ConnectionInfo, ParseError> {
    Ok(ConnectionInfo {
        src: endpoint(row, "src_addr")?,
        dst: endpoint(row, "dst_addr")?,
        kind: row.get("connection_type").unwrap_or_default().to_string(),
    })
}

fn endpoint(row: &Row, column: &str) -> Result<PhysicalAddress, ParseError> {
    row.get(column).unwrap_or_default().parse()
}
