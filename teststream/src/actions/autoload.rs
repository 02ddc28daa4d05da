//! Inventory queries used to build the resource tree.

use log::debug;

use crate::command::template::{SHOW_CONNECTIONS, SHOW_PORTS_RAW, SHOW_SWITCH_INFO};
use crate::driver::Driver;
use crate::error::Result;
use crate::model::{ConnectionMapping, PortTable, SwitchInfo};
use crate::parse::{parse_connections, parse_port_table, parse_switch_info};

/// Model, management address and chassis/blade layout of `switch_name`.
pub async fn switch_info<D: Driver>(driver: &mut D, switch_name: &str) -> Result<SwitchInfo> {
    let output = SHOW_SWITCH_INFO
        .execute(driver, &[("switch_name", switch_name)])
        .await?;
    let info = parse_switch_info(&output)?;
    debug!(
        "switch {} model {} with {} chassis",
        switch_name,
        info.model_name,
        info.chassis.len()
    );
    Ok(info)
}

/// Physical ports of `switch_name` keyed by address.
pub async fn port_table<D: Driver>(driver: &mut D, switch_name: &str) -> Result<PortTable> {
    let output = SHOW_PORTS_RAW
        .execute(driver, &[("switch_name", switch_name)])
        .await?;
    let ports = parse_port_table(&output)?;
    debug!("{} physical ports", ports.len());
    Ok(ports)
}

/// Current connections of `switch_name`.
pub async fn mapping_table<D: Driver>(driver: &mut D, switch_name: &str) -> Result<ConnectionMapping> {
    let output = SHOW_CONNECTIONS
        .execute(driver, &[("switch_name", switch_name)])
        .await?;
    Ok(parse_connections(&output)?)
}
