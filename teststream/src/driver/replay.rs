//! Driver answering commands from recorded switch output.
//!
//! Recordings live either in memory or in a directory with one file per
//! command, named by [`recording_file_name`]. Commands without a recording
//! produce empty output, the same as a switch that prints nothing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;

use super::response::Response;
use super::Driver;
use crate::error::{DriverError, Result, TransportError};

/// File name holding the recorded output of `command`.
///
/// `*` becomes `asterisk`, whitespace becomes `_`, double quotes are
/// dropped and `.txt` is appended.
pub fn recording_file_name(command: &str) -> String {
    let mut name = String::with_capacity(command.len() + 4);
    for c in command.chars() {
        match c {
            '*' => name.push_str("asterisk"),
            '"' => {}
            c if c.is_whitespace() => name.push('_'),
            c => name.push(c),
        }
    }
    name.push_str(".txt");
    name
}

/// Offline [`Driver`] used for tests and for replaying captured sessions.
#[derive(Debug, Default)]
pub struct ReplayDriver {
    responses: HashMap<String, String>,
    dir: Option<PathBuf>,
    sent: Vec<String>,
    open: bool,
}

impl ReplayDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load recordings lazily from `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Answer `command` with `output`. In-memory answers win over files.
    pub fn with_response(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.responses.insert(command.into(), output.into());
        self
    }

    pub fn add_response(&mut self, command: impl Into<String>, output: impl Into<String>) {
        self.responses.insert(command.into(), output.into());
    }

    /// Every command sent so far, in order.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    pub fn clear_sent(&mut self) {
        self.sent.clear();
    }

    async fn recorded(&self, command: &str) -> Result<Option<String>> {
        if let Some(output) = self.responses.get(command) {
            return Ok(Some(output.clone()));
        }

        let Some(dir) = self.dir.as_deref() else {
            return Ok(None);
        };
        read_recording(dir, command).await
    }
}

async fn read_recording(dir: &Path, command: &str) -> Result<Option<String>> {
    let path = dir.join(recording_file_name(command));
    match tokio::fs::read_to_string(&path).await {
        Ok(output) => Ok(Some(output)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(TransportError::Io(e).into()),
    }
}

impl Driver for ReplayDriver {
    async fn open(&mut self) -> Result<()> {
        if self.open {
            return Err(DriverError::AlreadyConnected.into());
        }
        self.open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        if !self.open {
            return Err(DriverError::NotConnected.into());
        }

        self.sent.push(command.to_string());
        let output = match self.recorded(command).await? {
            Some(output) => output,
            None => {
                debug!("no recording for '{}'", command);
                String::new()
            }
        };

        Ok(Response::new(command, output.clone(), output, "", Duration::ZERO))
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_recording_file_name() {
        assert_eq!(
            recording_file_name("show port rawinfo * swi OS-192"),
            "show_port_rawinfo_asterisk_swi_OS-192.txt"
        );
        assert_eq!(recording_file_name("select \"a b\""), "select_a_b.txt");
    }

    #[tokio::test]
    async fn test_in_memory_response() {
        let mut driver = ReplayDriver::new().with_response("show switches", "Available switches:\nOS-192\n");
        driver.open().await.unwrap();

        let response = driver.send_command("show switches").await.unwrap();
        assert!(response.contains("OS-192"));
        assert_eq!(driver.sent(), ["show switches"]);
    }

    #[tokio::test]
    async fn test_unknown_command_is_empty() {
        let mut driver = ReplayDriver::new();
        driver.open().await.unwrap();

        let response = driver.send_command("logoff").await.unwrap();
        assert!(response.result.is_empty());
    }

    #[tokio::test]
    async fn test_requires_open() {
        let mut driver = ReplayDriver::new();
        let err = driver.send_command("show status").await.unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::NotConnected)));
    }

    #[tokio::test]
    async fn test_reads_recording_from_dir() {
        let dir = std::env::temp_dir().join(format!("teststream-replay-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("show_status.txt"), "Version 02.05.01.15\n")
            .await
            .unwrap();

        let mut driver = ReplayDriver::from_dir(&dir);
        driver.open().await.unwrap();
        let response = driver.send_command("show status").await.unwrap();
        assert_eq!(response.result, "Version 02.05.01.15\n");

        let missing = driver.send_command("show switches").await.unwrap();
        assert!(missing.result.is_empty());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
