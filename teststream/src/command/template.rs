//! Command templates.
//!
//! A template is a command string with `{name}` placeholders plus the error
//! map its output is checked against.

use log::debug;

use super::errors::ErrorSet;
use crate::driver::Driver;
use crate::error::{DriverError, Result};

/// A parameterized CLI command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTemplate {
    template: &'static str,
    errors: ErrorSet,
}

impl CommandTemplate {
    pub const fn new(template: &'static str, errors: ErrorSet) -> Self {
        Self { template, errors }
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Substitute `{name}` placeholders. Unknown names are left untouched.
    pub fn render(&self, params: &[(&str, &str)]) -> String {
        params
            .iter()
            .fold(self.template.to_string(), |command, (name, value)| {
                command.replace(&format!("{{{}}}", name), value)
            })
    }

    /// Map the first matching error rule to [`DriverError::CommandFailed`].
    pub fn check(&self, command: &str, output: &str) -> std::result::Result<(), DriverError> {
        match self.errors.map().check(output) {
            Some(message) => Err(DriverError::CommandFailed {
                command: command.to_string(),
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Render, send, and check the output of this command.
    pub async fn execute<D: Driver>(&self, driver: &mut D, params: &[(&str, &str)]) -> Result<String> {
        let command = self.render(params);
        debug!("executing '{}'", command);

        let response = driver.send_command(&command).await?;
        self.check(&command, &response.result)?;

        Ok(response.result)
    }
}

pub const LOGON: CommandTemplate = CommandTemplate::new("logon {user} {password}", ErrorSet::Logon);
pub const LOGOFF: CommandTemplate = CommandTemplate::new("logoff", ErrorSet::Generic);

pub const SHOW_SWITCHES: CommandTemplate = CommandTemplate::new("show switches", ErrorSet::Generic);
pub const SHOW_STATUS: CommandTemplate = CommandTemplate::new("show status", ErrorSet::Generic);

pub const SHOW_SWITCH_INFO: CommandTemplate =
    CommandTemplate::new("show information switch {switch_name}", ErrorSet::Generic);
pub const SHOW_PORTS_RAW: CommandTemplate =
    CommandTemplate::new("show port rawinfo * swi {switch_name}", ErrorSet::Generic);
pub const SHOW_CONNECTIONS: CommandTemplate =
    CommandTemplate::new("show connection switch {switch_name}", ErrorSet::Generic);
pub const SHOW_CONNECTION: CommandTemplate =
    CommandTemplate::new("show conn prtnum {port}", ErrorSet::Generic);

pub const SELECT_SWITCH: CommandTemplate =
    CommandTemplate::new("select switch {switch_name}", ErrorSet::Mapping);

pub const CONNECT_SIMPLEX_LEGACY: CommandTemplate = CommandTemplate::new(
    "connect simplex prtnum {src_port} to {dst_port} force",
    ErrorSet::Mapping,
);
pub const CONNECT_SIMPLEX_MODERN: CommandTemplate = CommandTemplate::new(
    "CONNECT -s -F PRTNUM {src_port} PRTNUM {dst_port}",
    ErrorSet::Mapping,
);
pub const CONNECT_DUPLEX_LEGACY: CommandTemplate = CommandTemplate::new(
    "connect duplex prtnum {src_port} to {dst_port} force",
    ErrorSet::Mapping,
);
pub const CONNECT_DUPLEX_MODERN: CommandTemplate = CommandTemplate::new(
    "CONNECT -d -F PRTNUM {src_port} PRTNUM {dst_port}",
    ErrorSet::Mapping,
);

pub const DISCONNECT_SIMPLEX_LEGACY: CommandTemplate = CommandTemplate::new(
    "disconnect simplex {dst_port} force",
    ErrorSet::DisconnectSimplex,
);
pub const DISCONNECT_SIMPLEX_MODERN: CommandTemplate = CommandTemplate::new(
    "DISCONNECT -s -F PRTNUM {src_port} PRTNUM {dst_port}",
    ErrorSet::DisconnectSimplex,
);
pub const DISCONNECT_DUPLEX_LEGACY: CommandTemplate = CommandTemplate::new(
    "disconnect duplex prtnum {dst_port} force",
    ErrorSet::Generic,
);
pub const DISCONNECT_DUPLEX_MODERN: CommandTemplate = CommandTemplate::new(
    "DISCONNECT -d -F PRTNUM {src_port} PRTNUM {dst_port}",
    ErrorSet::Generic,
);
pub const DISCONNECT_MULTICAST: CommandTemplate = CommandTemplate::new(
    "disconnect multicast destination {dst_port} force",
    ErrorSet::Generic,
);
