//! Session-level queries: served switches and firmware version.

use log::debug;

use crate::command::template::{SHOW_STATUS, SHOW_SWITCHES};
use crate::driver::Driver;
use crate::error::Result;
use crate::parse::{SoftwareVersion, parse_available_switches, parse_software_version};

/// Names of the switches served by the device.
pub async fn available_switches<D: Driver>(driver: &mut D) -> Result<Vec<String>> {
    let output = SHOW_SWITCHES.execute(driver, &[]).await?;
    let switches = parse_available_switches(&output)?;
    debug!("available switches: {}", switches.join(", "));
    Ok(switches)
}

/// Firmware version from `show status`.
pub async fn software_version<D: Driver>(driver: &mut D) -> Result<SoftwareVersion> {
    let output = SHOW_STATUS.execute(driver, &[]).await?;
    Ok(parse_software_version(&output)?)
}
