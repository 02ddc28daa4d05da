//! Drivers execute commands on the switch CLI.
//!
//! [`CliDriver`] talks to a real switch over SSH or Telnet.
//! [`ReplayDriver`] answers from recorded output and is what the tests and
//! offline tooling use. Everything above this layer is generic over
//! [`Driver`].

mod builder;
mod generic;
mod replay;
mod response;

pub use builder::DriverBuilder;
pub use generic::CliDriver;
pub use replay::{ReplayDriver, recording_file_name};
pub use response::Response;

use std::future::Future;

use crate::error::Result;

/// Trait for device drivers.
pub trait Driver: Send {
    /// Open the session, including any CLI-level logon.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Close the session. Closing a closed driver is a no-op.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Send a command and wait for the prompt.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Check if the driver is connected.
    fn is_open(&self) -> bool;
}
