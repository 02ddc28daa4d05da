//! Session connection configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;

/// Protocol used to reach the switch CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Ssh,
    Telnet,
}

impl Protocol {
    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Ssh => 22,
            Protocol::Telnet => 23,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Ssh => f.write_str("ssh"),
            Protocol::Telnet => f.write_str("telnet"),
        }
    }
}

/// Host key verification mode, analogous to OpenSSH's `StrictHostKeyChecking`.
#[derive(Debug, Clone, Default)]
pub enum HostKeyVerification {
    /// Reject unknown and changed keys.
    Strict,

    /// Accept and learn unknown keys, reject changed keys.
    #[default]
    AcceptNew,

    /// Accept all keys without checking. For lab use only.
    Disabled,
}

/// Everything needed to open one CLI session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    pub port: u16,

    pub username: String,

    /// Used for SSH authentication and for the `logon` command.
    pub password: SecretString,

    pub protocol: Protocol,

    /// Connect timeout and per-command timeout.
    pub timeout: Duration,

    /// Terminal width for the PTY.
    pub terminal_width: u32,

    /// Terminal height for the PTY.
    pub terminal_height: u32,

    pub host_key_verification: HostKeyVerification,

    /// Path to known_hosts file; the user's default when `None`.
    pub known_hosts_path: Option<PathBuf>,
}

impl SessionConfig {
    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
