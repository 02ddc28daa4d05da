//! End-to-end autoload against recorded switch output.

use teststream::{Driver, DriverCommands, PortMode, ReplayDriver};

const DEVICE: &str = "192.168.42.240";
const LOGIN: &str = "192.168.42.240?teststream=OS-192";

const SHOW_SWITCHES: &str = "\
Available switches:
OS-192
";

const SHOW_STATUS: &str = "\
System Status
Software Version 02.05.01.15
Uptime 12 days
";

const SWITCH_INFO: &str = "\
************************ PHYSICAL INFORMATION ************************
Switch Name:        OS-192
Switch Model:       OS-192
IP Address:         10.88.37.103
************************* SWITCH COMPONENTS **************************
Chassis controller 1:
   pim: 1 O-Blade      NetScout,O-Blade,2.01,OB0001
";

const PORTS_RAW: &str = "\
01.01.01,90,0,1,0,1,1,0,'Uplink A'
01.01.02,90,0,1,0,1,1,0,'Uplink B'
01.01.03,90,16,0,0,0,0,0,'Internal'
";

const CONNECTIONS_HEADER: &str = "\
GEO addr  Name (>20 ..)            Rx Pwr(dBm)  Conn Type  GEO addr  Name (>20 ..)            Rx Pwr(dBm)  Speed    Protocol
--------  -----------------------  -----------  ---------  --------  -----------------------  -----------  -------  --------
";

fn connection_row(src: &str, kind: &str, dst: &str) -> String {
    format!(
        "{:<8}  {:<23}  {:<11}  {:<9}  {:<8}  {:<23}  {:<11}  {:<7}  {}\n",
        src, "Uplink", "Not Present", kind, dst, "Uplink", "Not Present", "10000", "Ethernet"
    )
}

fn recorded_switch() -> ReplayDriver {
    recorded_switch_with(("01.01.01", "Duplex", "01.01.02"))
}

fn recorded_switch_with((src, kind, dst): (&str, &str, &str)) -> ReplayDriver {
    let connections = format!("{}{}", CONNECTIONS_HEADER, connection_row(src, kind, dst));

    ReplayDriver::new()
        .with_response("show switches", SHOW_SWITCHES)
        .with_response("show status", SHOW_STATUS)
        .with_response("show information switch OS-192", SWITCH_INFO)
        .with_response("show port rawinfo * swi OS-192", PORTS_RAW)
        .with_response("show connection switch OS-192", connections)
}

#[tokio::test]
async fn test_autoload_logical() {
    let mut commands = DriverCommands::new(recorded_switch(), PortMode::Logical);
    commands.login(LOGIN).await.unwrap();

    let tree = commands.get_resource_description(DEVICE).await.unwrap();

    assert_eq!(tree.chassis.len(), 1);
    let chassis = &tree.chassis[0];
    assert_eq!(chassis.id, 1);
    assert_eq!(chassis.model_name, "OS-192");
    assert_eq!(chassis.ip_address, "10.88.37.103");
    assert_eq!(chassis.os_version, "02.05.01.15");
    assert_eq!(chassis.serial_number, "NA");

    assert_eq!(chassis.blades.len(), 1);
    let blade = &chassis.blades[0];
    assert_eq!(blade.model_name, "O-Blade");
    assert_eq!(blade.serial_number.as_deref(), Some("OB0001"));

    let addresses: Vec<&str> = tree.ports().map(|p| p.address.as_str()).collect();
    assert_eq!(addresses, vec!["192.168.42.240/1/1", "192.168.42.240/1/2"]);
    assert!(tree.port("192.168.42.240/1/3").is_none());

    let first = tree.port("192.168.42.240/1/1").unwrap();
    let second = tree.port("192.168.42.240/1/2").unwrap();
    assert_eq!(first.mapping.as_deref(), Some("192.168.42.240/1/2"));
    assert_eq!(second.mapping.as_deref(), Some("192.168.42.240/1/1"));
    assert_eq!(first.name, "Uplink A");
    assert_eq!((first.protocol, first.protocol_type, first.speed), (69, 2, 5));
}

#[tokio::test]
async fn test_autoload_physical() {
    let mut commands = DriverCommands::new(recorded_switch(), PortMode::Physical);
    commands.login(LOGIN).await.unwrap();

    let tree = commands.get_resource_description(DEVICE).await.unwrap();

    let ids: Vec<&str> = tree.ports().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1-TX", "1-RX", "2-TX", "2-RX"]);

    let mapping = |address: &str| tree.port(address).unwrap().mapping.clone();
    assert_eq!(mapping("192.168.42.240/1/2-RX").as_deref(), Some("192.168.42.240/1/1-TX"));
    assert_eq!(mapping("192.168.42.240/1/1-RX").as_deref(), Some("192.168.42.240/1/2-TX"));
    assert_eq!(mapping("192.168.42.240/1/1-TX"), None);
    assert_eq!(mapping("192.168.42.240/1/2-TX"), None);
}

#[tokio::test]
async fn test_autoload_simplex_maps_source() {
    let driver = recorded_switch_with(("01.01.02", "Simplex", "01.01.01"));
    let mut commands = DriverCommands::new(driver, PortMode::Logical);
    commands.login(LOGIN).await.unwrap();

    let tree = commands.get_resource_description(DEVICE).await.unwrap();

    let mapping = |address: &str| tree.port(address).unwrap().mapping.clone();
    assert_eq!(mapping("192.168.42.240/1/2").as_deref(), Some("192.168.42.240/1/1"));
    assert_eq!(mapping("192.168.42.240/1/1"), None);
}

#[tokio::test]
async fn test_autoload_command_sequence() {
    let mut commands = DriverCommands::new(recorded_switch(), PortMode::Logical);
    commands.login(LOGIN).await.unwrap();
    commands.get_resource_description(DEVICE).await.unwrap();

    assert_eq!(
        commands.driver().sent(),
        [
            "show switches",
            "show information switch OS-192",
            "show status",
            "show port rawinfo * swi OS-192",
            "show connection switch OS-192",
        ]
    );
}

#[tokio::test]
async fn test_autoload_without_connections() {
    let driver = recorded_switch().with_response("show connection switch OS-192", "Connection not found\n");
    let mut commands = DriverCommands::new(driver, PortMode::Logical);
    commands.login(LOGIN).await.unwrap();

    let tree = commands.get_resource_description(DEVICE).await.unwrap();
    assert_eq!(tree.ports().count(), 2);
    assert!(tree.ports().all(|p| p.mapping.is_none()));
}

#[tokio::test]
async fn test_autoload_reports_device_error() {
    let driver = recorded_switch().with_response(
        "show information switch OS-192",
        "License expired! Contact your vendor.\n",
    );
    let mut commands = DriverCommands::new(driver, PortMode::Logical);
    commands.login(LOGIN).await.unwrap();

    let err = commands.get_resource_description(DEVICE).await.unwrap_err();
    assert!(err.to_string().contains("License expired. Please renew the license."));
}

#[tokio::test]
async fn test_logout_closes_driver() {
    let mut commands = DriverCommands::new(recorded_switch(), PortMode::Logical);
    commands.login(LOGIN).await.unwrap();
    commands.logout().await.unwrap();

    assert!(!commands.driver().is_open());
    assert!(commands.session().is_none());
}
