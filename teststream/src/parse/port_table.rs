//! Parser for `show port rawinfo * swi <name>`.
//!
//! Each port is one comma-separated line:
//!
//! ```text
//! address,protocol,port_mode,connected,conn_dir,tx_subport,rx_subport,alarm,'name'
//! 01.01.01,90,0,1,0,1,1,0,'Uplink A'
//! ```

use log::trace;

use crate::error::ParseError;
use crate::model::{PhysicalAddress, PortRecord, PortTable};

const FIELD_COUNT: usize = 9;

/// Port-mode flag the device uses for entries that are not physical ports.
pub const NON_PHYSICAL_PORT_MODE: u32 = 16;

/// Parse raw port lines into a table keyed by physical address.
///
/// Entries flagged [`NON_PHYSICAL_PORT_MODE`] are left out.
pub fn parse_port_table(text: &str) -> Result<PortTable, ParseError> {
    let mut ports = PortTable::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let fields: Vec<&str> = line.splitn(FIELD_COUNT, ',').map(str::trim).collect();
        let [address, protocol, port_mode, _connected, _direction, _tx, _rx, _alarm, name] =
            fields.as_slice()
        else {
            return Err(field_count_error(line, fields.len()));
        };

        let name = unquote(line, name)?;

        if parse_number("port_mode", port_mode)? == NON_PHYSICAL_PORT_MODE {
            trace!("skipping non-physical port {}", address);
            continue;
        }

        let address: PhysicalAddress = address.parse()?;
        ports.insert(
            address,
            PortRecord {
                address,
                name: name.to_string(),
                protocol_id: parse_number("protocol", protocol)?,
            },
        );
    }

    Ok(ports)
}

/// Strip the quotes around the display name.
///
/// Anything after the closing quote, or commas in an unquoted name, means
/// the line carried extra fields.
fn unquote<'a>(line: &str, field: &'a str) -> Result<&'a str, ParseError> {
    let inner = match field.strip_prefix('\'') {
        Some(rest) => rest.strip_suffix('\''),
        None => Some(field).filter(|f| !f.contains(',')),
    };

    inner.ok_or_else(|| {
        if field.contains(',') {
            field_count_error(line, FIELD_COUNT - 1 + field.split(',').count())
        } else {
            ParseError::InvalidValue {
                field: "name".to_string(),
                value: field.to_string(),
            }
        }
    })
}

fn parse_number(field: &str, value: &str) -> Result<u32, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn field_count_error(line: &str, found: usize) -> ParseError {
    ParseError::FieldCount {
        line: line.to_string(),
        expected: FIELD_COUNT,
        found,
    }
}
