//! Firmware command dialects.
//!
//! Firmware 3.x and later accepts the upper-case `CONNECT`/`DISCONNECT`
//! flag syntax; older firmware only the long lower-case form.

use super::template::{self, CommandTemplate};
use crate::parse::SoftwareVersion;

/// Operations whose command text depends on the dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ConnectSimplex,
    ConnectDuplex,
    DisconnectSimplex,
    DisconnectDuplex,
    DisconnectMulticast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    Legacy,
    #[default]
    Modern,
}

impl Dialect {
    /// First major version speaking the modern dialect.
    pub const MODERN_MAJOR_VERSION: u32 = 3;

    pub fn for_version(version: &SoftwareVersion) -> Self {
        if version.major >= Self::MODERN_MAJOR_VERSION {
            Dialect::Modern
        } else {
            Dialect::Legacy
        }
    }

    pub fn template(self, operation: Operation) -> CommandTemplate {
        match (operation, self) {
            (Operation::ConnectSimplex, Dialect::Legacy) => template::CONNECT_SIMPLEX_LEGACY,
            (Operation::ConnectSimplex, Dialect::Modern) => template::CONNECT_SIMPLEX_MODERN,
            (Operation::ConnectDuplex, Dialect::Legacy) => template::CONNECT_DUPLEX_LEGACY,
            (Operation::ConnectDuplex, Dialect::Modern) => template::CONNECT_DUPLEX_MODERN,
            (Operation::DisconnectSimplex, Dialect::Legacy) => template::DISCONNECT_SIMPLEX_LEGACY,
            (Operation::DisconnectSimplex, Dialect::Modern) => template::DISCONNECT_SIMPLEX_MODERN,
            (Operation::DisconnectDuplex, Dialect::Legacy) => template::DISCONNECT_DUPLEX_LEGACY,
            (Operation::DisconnectDuplex, Dialect::Modern) => template::DISCONNECT_DUPLEX_MODERN,
            (Operation::DisconnectMulticast, _) => template::DISCONNECT_MULTICAST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_software_version;

    #[test]
    fn test_legacy_firmware() {
        let version = parse_software_version("Version 02.05.01.15\n").unwrap();
        let dialect = Dialect::for_version(&version);
        assert_eq!(dialect, Dialect::Legacy);
        assert_eq!(
            dialect.template(Operation::ConnectDuplex).template(),
            "connect duplex prtnum {src_port} to {dst_port} force"
        );
    }

    #[test]
    fn test_modern_firmware() {
        let version = parse_software_version("Version 3.0.1\n").unwrap();
        let dialect = Dialect::for_version(&version);
        assert_eq!(dialect, Dialect::Modern);
        assert_eq!(
            dialect.template(Operation::ConnectSimplex).template(),
            "CONNECT -s -F PRTNUM {src_port} PRTNUM {dst_port}"
        );
    }

    #[test]
    fn test_multicast_is_dialect_independent() {
        assert_eq!(
            Dialect::Legacy.template(Operation::DisconnectMulticast),
            Dialect::Modern.template(Operation::DisconnectMulticast)
        );
    }
}
