//! Channel layer: line-oriented I/O over a transport with prompt detection.
//!
//! Output is accumulated in a [`PatternBuffer`] until a pattern shows up in
//! its tail or the per-read deadline passes.

mod buffer;
mod patterns;

pub use buffer::PatternBuffer;
pub use patterns::{
    ACCEPT_ANSWER, ACCEPT_DECLINE, DEFAULT_PROMPT, LOGIN_PROMPT, compile_prompt_pattern,
};

use std::time::Duration;

use log::trace;
use regex::bytes::Regex;
use tokio::time::Instant;

use crate::error::{ChannelError, Result};
use crate::transport::{Protocol, Transport};

/// Default number of trailing bytes searched for a pattern.
pub const DEFAULT_SEARCH_DEPTH: usize = 1000;

/// Interactive CLI channel over an open transport.
pub struct CliChannel {
    transport: Transport,
    buffer: PatternBuffer,
    timeout: Duration,
}

impl CliChannel {
    pub fn new(transport: Transport, timeout: Duration) -> Self {
        Self {
            transport,
            buffer: PatternBuffer::new(DEFAULT_SEARCH_DEPTH),
            timeout,
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.transport.protocol()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Send `line` followed by the transport's line terminator.
    pub async fn send_line(&mut self, line: &str) -> Result<()> {
        let mut data = Vec::with_capacity(line.len() + 2);
        data.extend_from_slice(line.as_bytes());
        data.extend_from_slice(self.transport.line_ending().as_bytes());
        self.transport.send(&data).await
    }

    /// Read until `pattern` matches the tail of the buffered output.
    ///
    /// Returns everything read up to and including the match and leaves
    /// the buffer empty.
    pub async fn read_until_pattern(&mut self, pattern: &Regex) -> Result<Vec<u8>> {
        let deadline = Instant::now() + self.timeout;

        while !self.buffer.tail_contains(pattern) {
            let chunk = tokio::time::timeout_at(deadline, self.transport.read_chunk())
                .await
                .map_err(|_| ChannelError::PatternTimeout(self.timeout))??;
            trace!("received: {:?}", String::from_utf8_lossy(&chunk));
            self.buffer.extend(&chunk);
        }

        Ok(self.buffer.take())
    }

    /// Discard anything buffered but not yet consumed.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    pub async fn close(self) -> Result<()> {
        self.transport.close().await
    }
}
