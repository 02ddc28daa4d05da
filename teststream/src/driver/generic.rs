//! CLI driver for a live switch session.

use std::time::{Duration, Instant};

use log::{debug, warn};
use regex::bytes::Regex;
use secrecy::ExposeSecret;

use super::response::Response;
use super::Driver;
use crate::channel::{
    ACCEPT_ANSWER, ACCEPT_DECLINE, CliChannel, DEFAULT_PROMPT, LOGIN_PROMPT, compile_prompt_pattern,
};
use crate::command::errors::LOGON_ERRORS;
use crate::command::template::{LOGOFF, LOGON};
use crate::error::{ChannelError, DriverError, Result};
use crate::transport::{Protocol, SessionConfig, Transport};

/// How many agreement banners are answered before giving up on the logon.
const MAX_BANNER_ANSWERS: usize = 3;

/// Driver for the TestStream CLI over SSH or Telnet.
///
/// Opening the driver connects the transport, performs the CLI logon
/// (Telnet sends `logon <user> <password>`, SSH authenticates at the
/// protocol level), accepts the usage agreement if shown, and waits for the
/// `=>` prompt.
pub struct CliDriver {
    config: SessionConfig,

    /// Open channel (None when disconnected).
    channel: Option<CliChannel>,

    prompt: Regex,
}

impl CliDriver {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            channel: None,
            prompt: DEFAULT_PROMPT.clone(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn prompt_pattern(&self) -> &Regex {
        &self.prompt
    }

    /// Replace the command prompt pattern; it is anchored to the end of output.
    pub fn set_prompt_pattern(&mut self, pattern: &str) -> Result<()> {
        self.prompt = compile_prompt_pattern(pattern).map_err(ChannelError::InvalidPattern)?;
        Ok(())
    }

    /// Set the per-command timeout.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.config.timeout = timeout;
        if let Some(channel) = self.channel.as_mut() {
            channel.set_timeout(timeout);
        }
    }

    /// Wait for the first prompt, answering agreement banners on the way.
    async fn logon(&mut self) -> Result<()> {
        let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;

        if channel.protocol() == Protocol::Telnet {
            let command = LOGON.render(&[
                ("user", self.config.username.as_str()),
                ("password", self.config.password.expose_secret()),
            ]);
            channel.send_line(&command).await?;
        }

        let mut answered = 0;
        loop {
            let data = channel.read_until_pattern(&LOGIN_PROMPT).await?;
            let output = String::from_utf8_lossy(&data);

            if let Some(message) = LOGON_ERRORS.check(&output) {
                return Err(DriverError::CommandFailed {
                    command: "logon".to_string(),
                    message: message.to_string(),
                }
                .into());
            }

            if self.prompt.is_match(&data) {
                break;
            }

            if ACCEPT_DECLINE.is_match(&data) && answered < MAX_BANNER_ANSWERS {
                debug!("accepting usage agreement");
                channel.send_line(ACCEPT_ANSWER).await?;
                answered += 1;
                continue;
            }

            return Err(DriverError::CommandFailed {
                command: "logon".to_string(),
                message: "Usage agreement was not accepted".to_string(),
            }
            .into());
        }

        debug!("logged on to {} as {}", self.config.socket_addr(), self.config.username);
        Ok(())
    }
}

/// Split raw command output into the result and the trailing prompt.
///
/// Carriage returns are dropped, the echoed command line is removed, and the
/// last line is taken as the prompt.
pub(crate) fn normalize_output(raw: &str, command: &str) -> (String, String) {
    let cleaned = raw.replace('\r', "");
    let mut lines: Vec<&str> = cleaned.split('\n').collect();

    let prompt = lines.pop().unwrap_or_default().trim().to_string();

    let command = command.trim();
    if !command.is_empty() {
        if let Some(pos) = lines.iter().position(|line| line.trim_end().ends_with(command)) {
            lines.drain(..=pos);
        }
    }

    (lines.join("\n"), prompt)
}

impl Driver for CliDriver {
    async fn open(&mut self) -> Result<()> {
        if self.channel.is_some() {
            return Err(DriverError::AlreadyConnected.into());
        }

        let transport = Transport::connect(&self.config).await?;
        self.channel = Some(CliChannel::new(transport, self.config.timeout));

        if let Err(e) = self.logon().await {
            if let Some(channel) = self.channel.take() {
                let _ = channel.close().await;
            }
            return Err(e);
        }

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut channel) = self.channel.take() {
            if channel.protocol() == Protocol::Telnet {
                if let Err(e) = channel.send_line(LOGOFF.template()).await {
                    warn!("logoff failed: {}", e);
                }
            }
            channel.close().await?;
        }
        Ok(())
    }

    async fn send_command(&mut self, command: &str) -> Result<Response> {
        let channel = self.channel.as_mut().ok_or(DriverError::NotConnected)?;

        let start = Instant::now();
        channel.clear_buffer();
        channel.send_line(command).await?;

        let data = channel.read_until_pattern(&self.prompt).await?;
        let elapsed = start.elapsed();

        let raw_result = String::from_utf8_lossy(&data).to_string();
        let (result, prompt) = normalize_output(&raw_result, command);
        debug!("'{}' completed in {:?}", command, elapsed);

        Ok(Response::new(command, result, raw_result, prompt, elapsed))
    }

    fn is_open(&self) -> bool {
        self.channel.is_some()
    }
}
