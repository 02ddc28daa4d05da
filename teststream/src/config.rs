//! Driver configuration.
//!
//! [`DriverConfig`] is the deserializable form of the settings an
//! orchestration host hands to the driver. Programmatic callers can use
//! [`DriverBuilder`](crate::DriverBuilder) directly instead.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::DriverError;
use crate::transport::Protocol;

/// How ports are exposed in the resource tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PortMode {
    /// One bidirectional resource per physical port.
    #[default]
    #[serde(rename = "LOGICAL", alias = "logical", alias = "Logical")]
    Logical,

    /// Separate `-TX` and `-RX` resources per physical port.
    #[serde(rename = "PHYSICAL", alias = "physical", alias = "Physical")]
    Physical,
}

impl PortMode {
    pub fn is_logical(&self) -> bool {
        matches!(self, PortMode::Logical)
    }
}

impl fmt::Display for PortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortMode::Logical => f.write_str("LOGICAL"),
            PortMode::Physical => f.write_str("PHYSICAL"),
        }
    }
}

impl FromStr for PortMode {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logical" => Ok(PortMode::Logical),
            "physical" => Ok(PortMode::Physical),
            other => Err(DriverError::InvalidConfig {
                message: format!("unknown port mode '{}'", other),
            }),
        }
    }
}

/// Settings for a driver instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub port_mode: PortMode,

    /// Session protocol used to reach the switch.
    pub protocol: Protocol,

    /// Per-command timeout, in seconds.
    pub timeout_secs: u64,

    /// Overrides the protocol's default port. A port in the login address
    /// takes precedence over both.
    pub port: Option<u16>,
}

impl DriverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            port_mode: PortMode::Logical,
            protocol: Protocol::Ssh,
            timeout_secs: 30,
            port: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_mode_parse() {
        assert_eq!("LOGICAL".parse::<PortMode>().unwrap(), PortMode::Logical);
        assert_eq!("physical".parse::<PortMode>().unwrap(), PortMode::Physical);
        assert_eq!(" Physical ".parse::<PortMode>().unwrap(), PortMode::Physical);
        assert!("hybrid".parse::<PortMode>().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config: DriverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.port_mode, PortMode::Logical);
        assert_eq!(config.protocol, Protocol::Ssh);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.port, None);
    }

    #[test]
    fn test_config_from_json() {
        let config: DriverConfig = serde_json::from_str(
            r#"{"port_mode": "PHYSICAL", "protocol": "telnet", "timeout_secs": 10, "port": 2323}"#,
        )
        .unwrap();
        assert_eq!(config.port_mode, PortMode::Physical);
        assert_eq!(config.protocol, Protocol::Telnet);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.port, Some(2323));
    }

    #[test]
    fn test_config_lowercase_mode() {
        let config: DriverConfig = serde_json::from_str(r#"{"port_mode": "logical"}"#).unwrap();
        assert!(config.port_mode.is_logical());
    }
}
