//! Connect and disconnect operations.
//!
//! Every operation selects the switch first; the device keeps the
//! selection per session and a previous command may have changed it.

use log::{debug, warn};

use crate::command::template::{SELECT_SWITCH, SHOW_CONNECTION};
use crate::command::{Dialect, Operation};
use crate::driver::Driver;
use crate::error::Result;
use crate::model::{ConnectionInfo, PhysicalAddress};
use crate::parse::parse_connection_rows;

pub async fn select_switch<D: Driver>(driver: &mut D, switch_name: &str) -> Result<String> {
    SELECT_SWITCH
        .execute(driver, &[("switch_name", switch_name)])
        .await
}

async fn run<D: Driver>(
    driver: &mut D,
    switch_name: &str,
    dialect: Dialect,
    operation: Operation,
    src: PhysicalAddress,
    dst: PhysicalAddress,
) -> Result<String> {
    select_switch(driver, switch_name).await?;

    let src = src.to_string();
    let dst = dst.to_string();
    dialect
        .template(operation)
        .execute(driver, &[("src_port", src.as_str()), ("dst_port", dst.as_str())])
        .await
}

pub async fn connect_simplex<D: Driver>(
    driver: &mut D,
    switch_name: &str,
    dialect: Dialect,
    src: PhysicalAddress,
    dst: PhysicalAddress,
) -> Result<String> {
    run(driver, switch_name, dialect, Operation::ConnectSimplex, src, dst).await
}

pub async fn connect_duplex<D: Driver>(
    driver: &mut D,
    switch_name: &str,
    dialect: Dialect,
    src: PhysicalAddress,
    dst: PhysicalAddress,
) -> Result<String> {
    run(driver, switch_name, dialect, Operation::ConnectDuplex, src, dst).await
}

pub async fn disconnect_simplex<D: Driver>(
    driver: &mut D,
    switch_name: &str,
    dialect: Dialect,
    src: PhysicalAddress,
    dst: PhysicalAddress,
) -> Result<String> {
    run(driver, switch_name, dialect, Operation::DisconnectSimplex, src, dst).await
}

pub async fn disconnect_duplex<D: Driver>(
    driver: &mut D,
    switch_name: &str,
    dialect: Dialect,
    src: PhysicalAddress,
    dst: PhysicalAddress,
) -> Result<String> {
    run(driver, switch_name, dialect, Operation::DisconnectDuplex, src, dst).await
}

/// Remove the multicast leg ending on `dst`.
pub async fn disconnect_multicast<D: Driver>(
    driver: &mut D,
    switch_name: &str,
    dialect: Dialect,
    src: PhysicalAddress,
    dst: PhysicalAddress,
) -> Result<String> {
    run(driver, switch_name, dialect, Operation::DisconnectMulticast, src, dst).await
}

/// Connections involving `port`.
pub async fn connection_info<D: Driver>(
    driver: &mut D,
    switch_name: &str,
    port: PhysicalAddress,
) -> Result<Vec<ConnectionInfo>> {
    select_switch(driver, switch_name).await?;

    let port = port.to_string();
    let output = SHOW_CONNECTION.execute(driver, &[("port", port.as_str())]).await?;
    let connections = parse_connection_rows(&output)?;

    if connections.is_empty() {
        warn!("no connection info for {}", port);
    } else {
        debug!("{} connection(s) on {}", connections.len(), port);
    }
    Ok(connections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::ReplayDriver;

    fn address(blade: u32, port: u32) -> PhysicalAddress {
        PhysicalAddress::new(1, blade, port)
    }

    #[tokio::test]
    async fn test_connect_selects_switch_first() {
        let mut driver = ReplayDriver::new();
        driver.open().await.unwrap();

        connect_duplex(&mut driver, "OS-192", Dialect::Legacy, address(1, 5), address(2, 7))
            .await
            .unwrap();
        assert_eq!(
            driver.sent(),
            [
                "select switch OS-192",
                "connect duplex prtnum 01.01.05 to 01.02.07 force"
            ]
        );
    }

    #[tokio::test]
    async fn test_modern_disconnect_simplex() {
        let mut driver = ReplayDriver::new();
        driver.open().await.unwrap();

        disconnect_simplex(&mut driver, "OS-192", Dialect::Modern, address(1, 5), address(2, 7))
            .await
            .unwrap();
        assert_eq!(driver.sent()[1], "DISCONNECT -s -F PRTNUM 01.01.05 PRTNUM 01.02.07");
    }

    #[tokio::test]
    async fn test_disconnect_multicast_uses_destination() {
        let mut driver = ReplayDriver::new();
        driver.open().await.unwrap();

        disconnect_multicast(&mut driver, "OS-192", Dialect::Modern, address(1, 5), address(2, 7))
            .await
            .unwrap();
        assert_eq!(driver.sent()[1], "disconnect multicast destination 01.02.07 force");
    }

    #[tokio::test]
    async fn test_select_switch_failure_stops_operation() {
        let mut driver = ReplayDriver::new()
            .with_response("select switch OS-9", "Error: switch not found");
        driver.open().await.unwrap();

        let err = connect_simplex(&mut driver, "OS-9", Dialect::Modern, address(1, 1), address(1, 2))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("select switch OS-9"));
        assert_eq!(driver.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_connection_info_not_found() {
        let mut driver = ReplayDriver::new()
            .with_response("show conn prtnum 01.01.05", "Connection not found\n");
        driver.open().await.unwrap();

        let connections = connection_info(&mut driver, "OS-192", address(1, 5))
            .await
            .unwrap();
        assert!(connections.is_empty());
    }
}
