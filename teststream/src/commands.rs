//! Driver operations exposed to the orchestration host.
//!
//! [`DriverCommands`] sequences the device actions for each top-level
//! request: login, autoload, and port mapping. All operations on one
//! instance share a single CLI session and run strictly one at a time.

use log::{debug, info};

use crate::actions::{autoload, mapping, system};
use crate::command::Dialect;
use crate::config::{DriverConfig, PortMode};
use crate::driver::{CliDriver, Driver, DriverBuilder};
use crate::error::{DriverError, Error, Result};
use crate::model::{ConnectionKind, LoginAddress, PhysicalAddress, PortAddress, SubPort};
use crate::parse::SoftwareVersion;
use crate::tree::{ResourceDescription, ResourceTreeBuilder};

/// State tied to the switch selected at login.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub switch_name: String,

    /// Fetched on first use and kept until the next login.
    software_version: Option<SoftwareVersion>,
}

impl SessionContext {
    fn new(switch_name: impl Into<String>) -> Self {
        Self {
            switch_name: switch_name.into(),
            software_version: None,
        }
    }

    pub fn software_version(&self) -> Option<&SoftwareVersion> {
        self.software_version.as_ref()
    }
}

/// Top-level operations against one TestStream switch.
pub struct DriverCommands<D: Driver> {
    driver: D,
    port_mode: PortMode,
    context: Option<SessionContext>,
}

impl DriverCommands<CliDriver> {
    /// Connect to the switch named in `address` and log in.
    ///
    /// A port in `address` wins over `config.port`, which wins over the
    /// protocol default.
    pub async fn connect(
        address: &str,
        username: &str,
        password: &str,
        config: &DriverConfig,
    ) -> Result<Self> {
        let login: LoginAddress = address.parse()?;

        let mut builder = DriverBuilder::new(login.host.as_str())
            .username(username)
            .password(password)
            .protocol(config.protocol)
            .timeout(config.timeout());
        if let Some(port) = login.port.or(config.port) {
            builder = builder.port(port);
        }

        let mut commands = Self::new(builder.build()?, config.port_mode);
        commands.login(address).await?;
        Ok(commands)
    }
}

impl<D: Driver> DriverCommands<D> {
    pub fn new(driver: D, port_mode: PortMode) -> Self {
        Self {
            driver,
            port_mode,
            context: None,
        }
    }

    pub fn port_mode(&self) -> PortMode {
        self.port_mode
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// The logged-in session, if any.
    pub fn session(&self) -> Option<&SessionContext> {
        self.context.as_ref()
    }

    fn switch_name(&self) -> Result<String> {
        self.context
            .as_ref()
            .map(|context| context.switch_name.clone())
            .ok_or_else(|| DriverError::NotLoggedIn.into())
    }

    /// Log in to the switch named by `<host>[:<port>]?teststream=<switch>`.
    ///
    /// Opens the driver if needed and checks that the switch is served by
    /// the device. Any previous session state is discarded.
    pub async fn login(&mut self, address: &str) -> Result<()> {
        let login: LoginAddress = address.parse()?;
        debug!("defined switch: {}", login.switch_name);

        self.context = None;
        if !self.driver.is_open() {
            self.driver.open().await?;
        }

        let switches = system::available_switches(&mut self.driver).await?;
        let wanted = login.switch_name.to_lowercase();
        if !switches.iter().any(|name| name.to_lowercase() == wanted) {
            return Err(DriverError::SwitchNotAvailable {
                name: login.switch_name,
            }
            .into());
        }

        info!("logged in to switch {} on {}", login.switch_name, login.host);
        self.context = Some(SessionContext::new(login.switch_name));
        Ok(())
    }

    /// Close the session.
    pub async fn logout(&mut self) -> Result<()> {
        self.context = None;
        self.driver.close().await
    }

    /// Software version of the logged-in switch, fetched once per login.
    pub async fn software_version(&mut self) -> Result<SoftwareVersion> {
        let context = self.context.as_mut().ok_or(DriverError::NotLoggedIn)?;
        if let Some(version) = &context.software_version {
            return Ok(version.clone());
        }

        let version = system::software_version(&mut self.driver).await?;
        debug!("software version {}", version);
        context.software_version = Some(version.clone());
        Ok(version)
    }

    async fn dialect(&mut self) -> Result<Dialect> {
        let version = self.software_version().await?;
        Ok(Dialect::for_version(&version))
    }

    /// Autoload: build the chassis/blade/port tree with current mappings.
    pub async fn get_resource_description(&mut self, address: &str) -> Result<ResourceDescription> {
        let switch_name = self.switch_name()?;

        let info = autoload::switch_info(&mut self.driver, &switch_name).await?;
        let version = self.software_version().await?;
        let ports = autoload::port_table(&mut self.driver, &switch_name).await?;
        let mapping = autoload::mapping_table(&mut self.driver, &switch_name).await?;

        let tree = ResourceTreeBuilder::new(address, self.port_mode).build(
            &info,
            &version.raw,
            &ports,
            &mapping,
        )?;
        Ok(tree)
    }

    /// Bidirectional connection between two ports. Logical mode only.
    pub async fn map_bidi(&mut self, src_port: &str, dst_port: &str) -> Result<()> {
        if !self.port_mode.is_logical() {
            return Err(DriverError::PortMode {
                message: format!(
                    "Bidirectional port mapping could be done only in LOGICAL port_mode \
                     current mode: {}",
                    self.port_mode
                ),
            }
            .into());
        }

        let switch_name = self.switch_name()?;
        let src = src_port.parse::<PortAddress>()?.physical();
        let dst = dst_port.parse::<PortAddress>()?.physical();
        let dialect = self.dialect().await?;

        mapping::connect_duplex(&mut self.driver, &switch_name, dialect, src, dst).await?;
        Ok(())
    }

    /// Unidirectional connection from `src_port` to each of `dst_ports`.
    ///
    /// Every destination is attempted; failures are reported together.
    pub async fn map_uni(&mut self, src_port: &str, dst_ports: &[&str]) -> Result<()> {
        let switch_name = self.switch_name()?;
        let src = self.source(src_port)?;
        let destinations = self.destinations(dst_ports)?;
        let dialect = self.dialect().await?;

        let mut failures = Vec::new();
        for dst in destinations {
            let result = match dst {
                Ok(dst) => {
                    mapping::connect_simplex(&mut self.driver, &switch_name, dialect, src, dst)
                        .await
                        .map(|_| ())
                }
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                failures.push(failure_message(e));
            }
        }
        batch_result(failures)
    }

    /// Tap connection; identical to [`map_uni`](Self::map_uni) on this device.
    pub async fn map_tap(&mut self, src_port: &str, dst_ports: &[&str]) -> Result<()> {
        self.map_uni(src_port, dst_ports).await
    }

    /// Remove every connection on each of `ports`.
    pub async fn map_clear(&mut self, ports: &[&str]) -> Result<()> {
        self.switch_name()?;

        let mut failures = Vec::new();
        for port in ports {
            let result = match port.parse::<PortAddress>() {
                Ok(port) => self.disconnect(port.physical(), None).await,
                Err(e) => Err(e.into()),
            };
            if let Err(e) = result {
                failures.push(failure_message(e));
            }
        }
        batch_result(failures)
    }

    /// Remove the connections from `src_port` ending on each of `dst_ports`.
    pub async fn map_clear_to(&mut self, src_port: &str, dst_ports: &[&str]) -> Result<()> {
        self.switch_name()?;
        let src = self.source(src_port)?;
        let destinations = self.destinations(dst_ports)?;

        let mut failures = Vec::new();
        for dst in destinations {
            let result = match dst {
                Ok(dst) => self.disconnect(src, Some(dst)).await,
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                failures.push(failure_message(e));
            }
        }
        batch_result(failures)
    }

    /// State ids are not tracked by this device.
    pub fn get_state_id(&self) -> i64 {
        -1
    }

    pub fn set_state_id(&mut self, state_id: &str) {
        debug!("ignoring state id {}", state_id);
    }

    pub fn set_speed_manual(
        &mut self,
        _src_port: &str,
        _dst_port: &str,
        _speed: &str,
        _duplex: &str,
    ) -> Result<()> {
        Err(DriverError::Unsupported {
            operation: "set_speed_manual".to_string(),
        }
        .into())
    }

    /// Parse a source port, which must be a `-TX` sub-port in physical mode.
    fn source(&self, port: &str) -> Result<PhysicalAddress> {
        let address: PortAddress = port.parse()?;
        if !self.port_mode.is_logical() && address.subport != Some(SubPort::Tx) {
            return Err(DriverError::PortMode {
                message: "Receiver sub-port can't be used as a source".to_string(),
            }
            .into());
        }
        Ok(address.physical())
    }

    /// Parse destinations. In physical mode every destination must be a
    /// valid `-RX` sub-port before anything is sent to the device; in
    /// logical mode a bad address only fails its own item.
    fn destinations(&self, ports: &[&str]) -> Result<Vec<Result<PhysicalAddress>>> {
        let parsed: Vec<std::result::Result<PortAddress, DriverError>> =
            ports.iter().map(|port| port.parse()).collect();

        if self.port_mode.is_logical() {
            return Ok(parsed
                .into_iter()
                .map(|port| port.map(|p| p.physical()).map_err(Error::from))
                .collect());
        }

        parsed
            .into_iter()
            .map(|port| {
                let port = port?;
                if port.subport != Some(SubPort::Rx) {
                    return Err(DriverError::PortMode {
                        message: "Transmitter sub-port can't be used as a destination".to_string(),
                    }
                    .into());
                }
                Ok(Ok(port.physical()))
            })
            .collect()
    }

    /// Disconnect the connections on `port`, optionally only those ending
    /// on `dst`.
    async fn disconnect(&mut self, port: PhysicalAddress, dst: Option<PhysicalAddress>) -> Result<()> {
        let switch_name = self.switch_name()?;
        let connections = mapping::connection_info(&mut self.driver, &switch_name, port).await?;
        if connections.is_empty() {
            debug!("port {} is not connected", port);
            return Ok(());
        }

        let dialect = self.dialect().await?;
        for connection in connections {
            if dst.is_some_and(|dst| dst != connection.dst) {
                continue;
            }

            let kind = connection.kind.parse::<ConnectionKind>().map_err(|_| {
                DriverError::UnsupportedConnectionType {
                    kind: connection.kind.clone(),
                }
            })?;
            let (from, to) = (connection.src, connection.dst);
            let driver = &mut self.driver;
            match kind {
                ConnectionKind::Simplex | ConnectionKind::Unknown => {
                    mapping::disconnect_simplex(driver, &switch_name, dialect, from, to).await?
                }
                ConnectionKind::Duplex => {
                    mapping::disconnect_duplex(driver, &switch_name, dialect, from, to).await?
                }
                ConnectionKind::Multicast => {
                    mapping::disconnect_multicast(driver, &switch_name, dialect, from, to).await?
                }
            };
        }
        Ok(())
    }
}

/// Message reported for one failed batch item.
fn failure_message(error: Error) -> String {
    match error {
        Error::Driver(DriverError::CommandFailed { message, .. }) => message,
        Error::Driver(DriverError::InvalidAddress { address, message }) => {
            format!("{}: {}", address, message)
        }
        other => other.to_string(),
    }
}

fn batch_result(failures: Vec<String>) -> Result<()> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(DriverError::BatchFailed { failures }.into())
    }
}
