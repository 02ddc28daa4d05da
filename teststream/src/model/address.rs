//! Physical and resource addressing.
//!
//! The switch names ports by a `chassis.blade.port` triple (`01.02.03`).
//! The orchestration side addresses the same ports as
//! `<host>/<blade>/<port>[-TX|-RX]` and logs in with
//! `<host>[:<port>]?teststream=<switch_name>`.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{DriverError, ParseError};

/// The only chassis a TestStream switch exposes.
pub const CHASSIS_ID: u32 = 1;

/// Separator between a port id and its sub-port suffix.
pub const SUFFIX_SEPARATOR: char = '-';

static LOGIN_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<host>[^:?]*):?(?P<port>[0-9]*)\?teststream=(?P<switch>.+)$")
        .expect("login address pattern")
});

/// Physical port address as printed by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PhysicalAddress {
    pub chassis: u32,
    pub blade: u32,
    pub port: u32,
}

impl PhysicalAddress {
    pub fn new(chassis: u32, blade: u32, port: u32) -> Self {
        Self {
            chassis,
            blade,
            port,
        }
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:02}", self.chassis, self.blade, self.port)
    }
}

impl FromStr for PhysicalAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidAddress {
            value: s.to_string(),
        };

        let mut parts = s.trim().split('.');
        let mut next = || -> Result<u32, ParseError> {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .filter(|n| *n > 0)
                .ok_or_else(invalid)
        };
        let address = Self::new(next()?, next()?, next()?);

        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(address)
    }
}

/// Direction of a sub-port in physical port mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubPort {
    Tx,
    Rx,
}

impl SubPort {
    /// Sub-ports in the order they are emitted for each physical port.
    pub const ALL: [SubPort; 2] = [SubPort::Tx, SubPort::Rx];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubPort::Tx => "TX",
            SubPort::Rx => "RX",
        }
    }
}

impl fmt::Display for SubPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubPort {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TX" => Ok(SubPort::Tx),
            "RX" => Ok(SubPort::Rx),
            _ => Err(()),
        }
    }
}

/// A port as addressed by the orchestration caller: `<host>/<blade>/<port>[-TX|-RX]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortAddress {
    pub host: String,
    pub blade: u32,
    pub port: u32,
    pub subport: Option<SubPort>,
}

impl PortAddress {
    /// Device address of this port (always on chassis 1).
    pub fn physical(&self) -> PhysicalAddress {
        PhysicalAddress::new(CHASSIS_ID, self.blade, self.port)
    }
}

impl FromStr for PortAddress {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| DriverError::InvalidAddress {
            address: s.to_string(),
            message: message.to_string(),
        };

        let parts: Vec<&str> = s.trim().split('/').collect();
        let [host, blade, port] = parts.as_slice() else {
            return Err(invalid("expected <host>/<blade>/<port>"));
        };

        let (port, subport) = match port.split_once(SUFFIX_SEPARATOR) {
            Some((port, suffix)) => {
                let subport = suffix
                    .parse::<SubPort>()
                    .map_err(|_| invalid("sub-port suffix must be TX or RX"))?;
                (port, Some(subport))
            }
            None => (*port, None),
        };

        Ok(Self {
            host: host.to_string(),
            blade: blade.parse().map_err(|_| invalid("blade is not a number"))?,
            port: port.parse().map_err(|_| invalid("port is not a number"))?,
            subport,
        })
    }
}

/// Login address: `<host>[:<port>]?teststream=<switch_name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginAddress {
    pub host: String,
    pub port: Option<u16>,
    pub switch_name: String,
}

impl FromStr for LoginAddress {
    type Err = DriverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = LOGIN_ADDRESS
            .captures(s.trim())
            .ok_or_else(|| DriverError::InvalidAddress {
                address: s.to_string(),
                message: "Switch name was not found. Make sure resource address is in format \
                          host[:port]?teststream=switch_name"
                    .to_string(),
            })?;

        Ok(Self {
            host: caps["host"].to_string(),
            port: caps["port"].parse().ok(),
            switch_name: caps["switch"].to_string(),
        })
    }
}
