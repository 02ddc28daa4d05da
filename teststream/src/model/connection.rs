//! Connection topology between physical ports.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use super::address::PhysicalAddress;

/// How a connection carries light between its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
    /// Source feeds destination only.
    Simplex,
    /// Both ends feed each other.
    Duplex,
    /// One source feeding several destinations.
    Multicast,
    /// Reported by the device without a topology; handled like simplex.
    Unknown,
}

impl ConnectionKind {
    /// Whether the destination also feeds the source.
    pub fn is_symmetric(&self) -> bool {
        matches!(self, ConnectionKind::Duplex)
    }
}

impl FromStr for ConnectionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simplex" => Ok(ConnectionKind::Simplex),
            "duplex" => Ok(ConnectionKind::Duplex),
            "mcast" => Ok(ConnectionKind::Multicast),
            "unknown" => Ok(ConnectionKind::Unknown),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionKind::Simplex => "simplex",
            ConnectionKind::Duplex => "duplex",
            ConnectionKind::Multicast => "mcast",
            ConnectionKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// One row of a connection listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub src: PhysicalAddress,
    pub dst: PhysicalAddress,
    /// Raw connection type as printed by the device.
    pub kind: String,
}

/// Snapshot of live connections: each address maps to the peers it feeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionMapping {
    peers: IndexMap<PhysicalAddress, Vec<PhysicalAddress>>,
}

impl ConnectionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connection, adding the reverse edge for symmetric kinds.
    pub fn connect(&mut self, src: PhysicalAddress, dst: PhysicalAddress, kind: ConnectionKind) {
        self.peers.entry(src).or_default().push(dst);
        if kind.is_symmetric() {
            self.peers.entry(dst).or_default().push(src);
        }
    }

    /// Peers fed by `address`, in listing order.
    pub fn peers(&self, address: &PhysicalAddress) -> &[PhysicalAddress] {
        self.peers.get(address).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PhysicalAddress, &[PhysicalAddress])> {
        self.peers.iter().map(|(src, dsts)| (src, dsts.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}
