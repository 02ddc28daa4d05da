//! Byte-level session transports.
//!
//! The switch CLI is reachable over SSH (russh) or Telnet. Both expose the
//! same three operations: send bytes, read the next chunk, close.

pub mod config;
mod ssh;
mod telnet;

pub use config::{HostKeyVerification, Protocol, SessionConfig};
pub use ssh::SshTransport;
pub use telnet::{TelnetFilter, TelnetTransport};

use crate::error::Result;

/// A connected session transport.
pub enum Transport {
    Ssh(SshTransport),
    Telnet(TelnetTransport),
}

impl Transport {
    /// Connect using the protocol selected in `config`.
    pub async fn connect(config: &SessionConfig) -> Result<Self> {
        match config.protocol {
            Protocol::Ssh => Ok(Transport::Ssh(SshTransport::connect(config).await?)),
            Protocol::Telnet => Ok(Transport::Telnet(TelnetTransport::connect(config).await?)),
        }
    }

    pub fn protocol(&self) -> Protocol {
        match self {
            Transport::Ssh(_) => Protocol::Ssh,
            Transport::Telnet(_) => Protocol::Telnet,
        }
    }

    /// Line terminator the remote side expects.
    pub fn line_ending(&self) -> &'static str {
        match self {
            Transport::Ssh(_) => "\n",
            Transport::Telnet(_) => "\r\n",
        }
    }

    pub async fn send(&mut self, data: &[u8]) -> Result<()> {
        match self {
            Transport::Ssh(ssh) => ssh.send(data).await,
            Transport::Telnet(telnet) => telnet.send(data).await,
        }
    }

    pub async fn read_chunk(&mut self) -> Result<Vec<u8>> {
        match self {
            Transport::Ssh(ssh) => ssh.read_chunk().await,
            Transport::Telnet(telnet) => telnet.read_chunk().await,
        }
    }

    pub async fn close(self) -> Result<()> {
        match self {
            Transport::Ssh(ssh) => ssh.close().await,
            Transport::Telnet(telnet) => telnet.close().await,
        }
    }
}
