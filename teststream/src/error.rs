//! Error types for teststream.

use std::io;
use thiserror::Error;

/// Main error type for teststream operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH/Telnet transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel operation errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Driver-level errors (device-reported failures, bad requests)
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Device output did not have the expected structure
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Transport layer errors (connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Host key is not in known_hosts and verification is strict
    #[error("Host key for {host}:{port} is unknown")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key differs from the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connection was closed unexpectedly
    #[error("Connection disconnected")]
    Disconnected,

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Channel layer errors (pattern matching).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Pattern matching timed out
    #[error("Pattern not found within {0:?}")]
    PatternTimeout(std::time::Duration),

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Driver layer errors (command execution, request validation).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not connected
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Driver already connected
    #[error("Driver already connected")]
    AlreadyConnected,

    /// No switch selected - call login() first
    #[error("Not logged in - call login() first")]
    NotLoggedIn,

    /// The device answered with a known error message
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// A resource address supplied by the caller is malformed
    #[error("Invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    /// The requested switch is not served by the device
    #[error("Switch {name} is not available")]
    SwitchNotAvailable { name: String },

    /// The request is not valid in the configured port mode
    #[error("{message}")]
    PortMode { message: String },

    /// The device reported a connection type the driver cannot remove
    #[error("Connection type {kind} is not supported by the driver")]
    UnsupportedConnectionType { kind: String },

    /// Operation is not implemented by this device
    #[error("Operation '{operation}' is not supported")]
    Unsupported { operation: String },

    /// Some items of a batch operation failed
    #[error("{}", .failures.join(", "))]
    BatchFailed { failures: Vec<String> },

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Errors raised when device output does not match the expected grammar.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Header border runs do not line up with the expected columns
    #[error("Table has {found} border columns, expected {expected}")]
    TableFormat { expected: usize, found: usize },

    /// A required section marker is absent
    #[error("Section '{section}' not found in device output")]
    MissingSection { section: String },

    /// A required field is absent
    #[error("Field '{field}' not found in device output")]
    MissingField { field: String },

    /// A delimited line has the wrong number of fields
    #[error("Expected {expected} fields, found {found} in line '{line}'")]
    FieldCount {
        line: String,
        expected: usize,
        found: usize,
    },

    /// A field could not be converted to its expected type
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    /// A physical address is not in `cc.bb.pp` form
    #[error("Invalid physical address '{value}'")]
    InvalidAddress { value: String },

    /// Blade type label does not match any registered model
    #[error("Blade model {model} is not registered")]
    UnknownBladeModel { model: String },
}

/// Result type alias using teststream's Error.
pub type Result<T> = std::result::Result<T, Error>;
