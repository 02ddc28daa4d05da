//! Port protocol classification.
//!
//! The switch reports a numeric protocol code per port. Orchestration
//! attributes want a (protocol, protocol type, speed) triple instead.

use std::collections::HashMap;
use std::sync::LazyLock;

use log::warn;
use serde::Serialize;

/// Attribute values derived from a device protocol code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProtocolClass {
    pub protocol: u32,
    pub protocol_type: u32,
    pub speed: u32,
}

impl ProtocolClass {
    const fn new(protocol: u32, protocol_type: u32, speed: u32) -> Self {
        Self {
            protocol,
            protocol_type,
            speed,
        }
    }

    /// Generic optical port with unspecified speed.
    pub const GENERIC_OPTICAL: ProtocolClass = ProtocolClass::new(2, 0, 1);
}

static PROTOCOL_TABLE: LazyLock<HashMap<u32, ProtocolClass>> = LazyLock::new(|| {
    HashMap::from([
        // SONET
        (78, ProtocolClass::new(10, 3, 21)), // OC-48/STM-16
        (92, ProtocolClass::new(12, 3, 22)), // OC-192/STM-64
        // Fibre Channel
        (80, ProtocolClass::new(38, 1, 11)), // 1G
        (81, ProtocolClass::new(39, 1, 12)), // 2G
        (87, ProtocolClass::new(40, 1, 13)), // 4G
        (93, ProtocolClass::new(41, 1, 14)), // 8G
        // Ethernet
        (79, ProtocolClass::new(30, 2, 4)),    // 1G
        (86, ProtocolClass::new(30, 2, 6)),    // 1G copper
        (90, ProtocolClass::new(69, 2, 5)),    // 10G
        (99, ProtocolClass::new(70, 2, 42)),   // 25G
        (97, ProtocolClass::new(71, 2, 43)),   // 40G
        (100, ProtocolClass::new(72, 2, 44)),  // 50G
        (98, ProtocolClass::new(73, 2, 45)),   // 100G
        (96, ProtocolClass::GENERIC_OPTICAL), // Optical
        // CPRI
        (102, ProtocolClass::new(82, 10, 54)), // CPRI9 12165.12 Mbps
        (103, ProtocolClass::new(81, 10, 53)), // CPRI8 10137.6 Mbps
        (104, ProtocolClass::new(80, 10, 52)), // CPRI7 9830.4 Mbps
        (105, ProtocolClass::new(79, 10, 51)), // CPRI6 6144.0 Mbps
        (106, ProtocolClass::new(78, 10, 50)), // CPRI5 4915.2 Mbps
        (107, ProtocolClass::new(77, 10, 49)), // CPRI4 3072.0 Mbps
        (108, ProtocolClass::new(76, 10, 48)), // CPRI3 2457.6 Mbps
        (109, ProtocolClass::new(75, 10, 47)), // CPRI2 1228.8 Mbps
        (110, ProtocolClass::new(74, 10, 46)), // CPRI1 614.4 Mbps
    ])
});

/// Classify a device protocol code, falling back to generic optical.
pub fn classify(code: u32) -> ProtocolClass {
    match PROTOCOL_TABLE.get(&code) {
        Some(class) => *class,
        None => {
            warn!("protocol code {} not in lookup table, using generic optical", code);
            ProtocolClass::GENERIC_OPTICAL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(classify(90), ProtocolClass::new(69, 2, 5));
        assert_eq!(classify(92), ProtocolClass::new(12, 3, 22));
        assert_eq!(classify(110), ProtocolClass::new(74, 10, 46));
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let class = classify(4242);
        assert_eq!(
            (class.protocol, class.protocol_type, class.speed),
            (2, 0, 1)
        );
        assert_eq!(classify(0), ProtocolClass::GENERIC_OPTICAL);
    }
}
