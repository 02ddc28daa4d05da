//! Mapping and unmapping command sequences against recorded switch output.

use teststream::error::DriverError;
use teststream::{DriverCommands, Error, PortMode, ReplayDriver};

const LOGIN: &str = "192.168.42.240?teststream=OS-192";
const SELECT: &str = "select switch OS-192";

const CONNECTIONS_HEADER: &str = "\
GEO addr  Name (>20 ..)            Rx Pwr(dBm)  Conn Type  GEO addr  Name (>20 ..)            Rx Pwr(dBm)  Speed    Protocol
--------  -----------------------  -----------  ---------  --------  -----------------------  -----------  -------  --------
";

fn listing(rows: &[(&str, &str, &str)]) -> String {
    let mut text = CONNECTIONS_HEADER.to_string();
    for (src, kind, dst) in rows {
        text.push_str(&format!(
            "{:<8}  {:<23}  {:<11}  {:<9}  {:<8}  {:<23}  {:<11}  {:<7}  {}\n",
            src, "Port", "-2.800889", kind, dst, "Port", "Not Present", "10000", "Ethernet"
        ));
    }
    text
}

fn switch(version: &str) -> ReplayDriver {
    ReplayDriver::new()
        .with_response("show switches", "Available switches:\nOS-192\n")
        .with_response("show status", format!("Software Version {}\n", version))
}

async fn login(driver: ReplayDriver, mode: PortMode) -> DriverCommands<ReplayDriver> {
    let mut commands = DriverCommands::new(driver, mode);
    commands.login(LOGIN).await.unwrap();
    commands.driver_mut().clear_sent();
    commands
}

/// Sent commands other than switch selection and version queries.
fn device_commands(commands: &DriverCommands<ReplayDriver>) -> Vec<String> {
    commands
        .driver()
        .sent()
        .iter()
        .filter(|command| command.as_str() != SELECT && command.as_str() != "show status")
        .cloned()
        .collect()
}

#[tokio::test]
async fn test_map_bidi_legacy() {
    let mut commands = login(switch("02.05.01.15"), PortMode::Logical).await;
    commands
        .map_bidi("192.168.42.240/1/21", "192.168.42.240/2/22")
        .await
        .unwrap();

    assert_eq!(
        commands.driver().sent(),
        [
            "show status",
            SELECT,
            "connect duplex prtnum 01.01.21 to 01.02.22 force"
        ]
    );
}

#[tokio::test]
async fn test_map_bidi_modern() {
    let mut commands = login(switch("3.0.1"), PortMode::Logical).await;
    commands
        .map_bidi("192.168.42.240/1/21", "192.168.42.240/1/22")
        .await
        .unwrap();

    assert_eq!(
        device_commands(&commands),
        ["CONNECT -d -F PRTNUM 01.01.21 PRTNUM 01.01.22"]
    );
}

#[tokio::test]
async fn test_map_uni_physical() {
    let mut commands = login(switch("3.0.1"), PortMode::Physical).await;
    commands
        .map_uni(
            "192.168.42.240/1/1-TX",
            &["192.168.42.240/1/2-RX", "192.168.42.240/1/3-rx"],
        )
        .await
        .unwrap();

    assert_eq!(
        device_commands(&commands),
        [
            "CONNECT -s -F PRTNUM 01.01.01 PRTNUM 01.01.02",
            "CONNECT -s -F PRTNUM 01.01.01 PRTNUM 01.01.03",
        ]
    );
}

#[tokio::test]
async fn test_map_uni_rejects_rx_source() {
    let mut commands = login(switch("3.0.1"), PortMode::Physical).await;
    let err = commands
        .map_uni("192.168.42.240/1/1-RX", &["192.168.42.240/1/2-RX"])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Receiver sub-port can't be used as a source"));
    assert!(commands.driver().sent().is_empty());
}

#[tokio::test]
async fn test_map_uni_rejects_tx_destination() {
    let mut commands = login(switch("3.0.1"), PortMode::Physical).await;
    let err = commands
        .map_uni(
            "192.168.42.240/1/1-TX",
            &["192.168.42.240/1/2-RX", "192.168.42.240/1/3-TX"],
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Transmitter sub-port can't be used as a destination"));
    assert!(commands.driver().sent().is_empty());
}

#[tokio::test]
async fn test_map_uni_aggregates_failures() {
    let driver = switch("02.05.01.15")
        .with_response(
            "connect simplex prtnum 01.01.01 to 01.01.02 force",
            "Subport not found",
        )
        .with_response(
            "connect simplex prtnum 01.01.01 to 01.01.04 force",
            "Ports are not compatible",
        );
    let mut commands = login(driver, PortMode::Logical).await;

    let err = commands
        .map_uni(
            "192.168.42.240/1/1",
            &[
                "192.168.42.240/1/2",
                "192.168.42.240/1/3",
                "192.168.42.240/1/4",
            ],
        )
        .await
        .unwrap_err();

    match err {
        Error::Driver(DriverError::BatchFailed { failures }) => {
            assert_eq!(
                failures,
                vec![
                    "Subport was not found".to_string(),
                    r"Ports\Subports not compatible".to_string(),
                ]
            );
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(device_commands(&commands).len(), 3);
}

#[tokio::test]
async fn test_map_tap_is_map_uni() {
    let mut commands = login(switch("3.0.1"), PortMode::Logical).await;
    commands
        .map_tap("192.168.42.240/1/1", &["192.168.42.240/1/2"])
        .await
        .unwrap();

    assert_eq!(
        device_commands(&commands),
        ["CONNECT -s -F PRTNUM 01.01.01 PRTNUM 01.01.02"]
    );
}

#[tokio::test]
async fn test_map_clear_dispatches_by_kind() {
    let driver = switch("02.05.01.15").with_response(
        "show conn prtnum 01.01.01",
        listing(&[
            ("01.01.01", "Duplex", "01.01.02"),
            ("01.01.01", "Simplex", "01.01.03"),
            ("01.01.01", "Mcast", "01.01.04"),
            ("01.01.01", "Unknown", "01.01.05"),
        ]),
    );
    let mut commands = login(driver, PortMode::Logical).await;

    commands.map_clear(&["192.168.42.240/1/1"]).await.unwrap();

    assert_eq!(
        device_commands(&commands),
        [
            "show conn prtnum 01.01.01",
            "disconnect duplex prtnum 01.01.02 force",
            "disconnect simplex 01.01.03 force",
            "disconnect multicast destination 01.01.04 force",
            "disconnect simplex 01.01.05 force",
        ]
    );
}

#[tokio::test]
async fn test_map_clear_unconnected_port() {
    let driver = switch("3.0.1").with_response("show conn prtnum 01.01.07", "Connection not found\n");
    let mut commands = login(driver, PortMode::Logical).await;

    commands.map_clear(&["192.168.42.240/1/7"]).await.unwrap();
    assert_eq!(device_commands(&commands), ["show conn prtnum 01.01.07"]);
}

#[tokio::test]
async fn test_map_clear_unsupported_kind_is_reported() {
    let driver = switch("3.0.1")
        .with_response(
            "show conn prtnum 01.01.01",
            listing(&[("01.01.01", "Bridged", "01.01.02")]),
        )
        .with_response(
            "show conn prtnum 01.01.05",
            listing(&[("01.01.05", "Simplex", "01.01.06")]),
        );
    let mut commands = login(driver, PortMode::Logical).await;

    let err = commands
        .map_clear(&["192.168.42.240/1/1", "192.168.42.240/1/5"])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Connection type Bridged is not supported"));
    assert!(
        device_commands(&commands)
            .contains(&"DISCONNECT -s -F PRTNUM 01.01.05 PRTNUM 01.01.06".to_string())
    );
}

#[tokio::test]
async fn test_map_clear_to_filters_destination() {
    let driver = switch("3.0.1").with_response(
        "show conn prtnum 01.01.01",
        listing(&[
            ("01.01.01", "Mcast", "01.01.02"),
            ("01.01.01", "Mcast", "01.01.03"),
        ]),
    );
    let mut commands = login(driver, PortMode::Logical).await;

    commands
        .map_clear_to("192.168.42.240/1/1", &["192.168.42.240/1/3"])
        .await
        .unwrap();

    assert_eq!(
        device_commands(&commands),
        [
            "show conn prtnum 01.01.01",
            "disconnect multicast destination 01.01.03 force",
        ]
    );
}

#[tokio::test]
async fn test_disconnect_simplex_error_map() {
    let driver = switch("02.05.01.15")
        .with_response(
            "show conn prtnum 01.01.01",
            listing(&[("01.01.01", "Simplex", "01.01.02")]),
        )
        .with_response("disconnect simplex 01.01.02 force", "Connection is not simplex");
    let mut commands = login(driver, PortMode::Logical).await;

    let err = commands.map_clear(&["192.168.42.240/1/1"]).await.unwrap_err();
    match err {
        Error::Driver(DriverError::BatchFailed { failures }) => {
            assert_eq!(failures, vec!["Connection is not simplex".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}
