//! Telnet transport.
//!
//! The switch only needs a plain NVT session, so every option the server
//! offers or requests is refused (RFC 854: `WILL` is answered with `DONT`,
//! `DO` with `WONT`). Sub-negotiations are discarded.

use log::trace;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;

use super::config::SessionConfig;
use crate::error::{Result, TransportError};

const IAC: u8 = 255;
const DONT: u8 = 254;
const DO: u8 = 253;
const WONT: u8 = 252;
const WILL: u8 = 251;
const SB: u8 = 250;
const SE: u8 = 240;

const READ_BUFFER_SIZE: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FilterState {
    Data,
    Iac,
    /// Got `IAC <WILL|WONT|DO|DONT>`, waiting for the option byte.
    Negotiate(u8),
    SubNegotiation,
    SubNegotiationIac,
}

/// Strips Telnet commands from a byte stream and produces refusals.
///
/// State is kept across calls, so sequences split between reads are handled.
#[derive(Debug, Clone)]
pub struct TelnetFilter {
    state: FilterState,
}

impl Default for TelnetFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TelnetFilter {
    pub fn new() -> Self {
        Self {
            state: FilterState::Data,
        }
    }

    /// Split `input` into terminal data and the bytes to send back.
    pub fn filter(&mut self, input: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut data = Vec::with_capacity(input.len());
        let mut replies = Vec::new();

        for &byte in input {
            self.state = match self.state {
                FilterState::Data if byte == IAC => FilterState::Iac,
                FilterState::Data => {
                    data.push(byte);
                    FilterState::Data
                }
                FilterState::Iac => match byte {
                    IAC => {
                        data.push(IAC);
                        FilterState::Data
                    }
                    WILL | WONT | DO | DONT => FilterState::Negotiate(byte),
                    SB => FilterState::SubNegotiation,
                    // NOP, GA and friends carry nothing for us.
                    _ => FilterState::Data,
                },
                FilterState::Negotiate(command) => {
                    match command {
                        WILL => replies.extend_from_slice(&[IAC, DONT, byte]),
                        DO => replies.extend_from_slice(&[IAC, WONT, byte]),
                        _ => {}
                    }
                    trace!("telnet option {} {} refused", command, byte);
                    FilterState::Data
                }
                FilterState::SubNegotiation if byte == IAC => FilterState::SubNegotiationIac,
                FilterState::SubNegotiation => FilterState::SubNegotiation,
                FilterState::SubNegotiationIac if byte == SE => FilterState::Data,
                FilterState::SubNegotiationIac => FilterState::SubNegotiation,
            };
        }

        (data, replies)
    }
}

/// Escape data bytes that collide with `IAC`.
fn escape(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    for &byte in data {
        out.push(byte);
        if byte == IAC {
            out.push(IAC);
        }
    }
    out
}

/// Telnet session over any byte stream (TCP in production).
pub struct TelnetTransport<S = TcpStream> {
    stream: S,
    filter: TelnetFilter,
}

impl TelnetTransport<TcpStream> {
    pub async fn connect(config: &SessionConfig) -> Result<Self> {
        let stream = tokio::time::timeout(
            config.timeout,
            TcpStream::connect((config.host.as_str(), config.port)),
        )
        .await
        .map_err(|_| TransportError::Timeout(config.timeout))?
        .map_err(|source| TransportError::ConnectionFailed {
            host: config.host.clone(),
            port: config.port,
            source,
        })?;

        Ok(Self::new(stream))
    }
}

impl<S> TelnetTransport<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            filter: TelnetFilter::new(),
        }
    }

    pub async fn send(&mut self, data: &[u8]) -> Result<()> {
        self.stream
            .write_all(&escape(data))
            .await
            .map_err(TransportError::Io)?;
        self.stream.flush().await.map_err(TransportError::Io)?;
        Ok(())
    }

    /// Wait for the next chunk of terminal data, answering negotiations
    /// on the way.
    pub async fn read_chunk(&mut self) -> Result<Vec<u8>> {
        let mut buf = [0u8; READ_BUFFER_SIZE];
        loop {
            let n = self.stream.read(&mut buf).await.map_err(TransportError::Io)?;
            if n == 0 {
                return Err(TransportError::Disconnected.into());
            }

            let (data, replies) = self.filter.filter(&buf[..n]);
            if !replies.is_empty() {
                self.stream
                    .write_all(&replies)
                    .await
                    .map_err(TransportError::Io)?;
            }
            if !data.is_empty() {
                return Ok(data);
            }
        }
    }

    pub async fn close(mut self) -> Result<()> {
        self.stream.shutdown().await.map_err(TransportError::Io)?;
        Ok(())
    }
}
