//! Pattern buffer with tail search.
//!
//! Output is cleaned of terminal escape sequences as it arrives, and only
//! the last `search_depth` bytes are searched for the prompt. Large
//! listings (a full connection table) never get rescanned from the start.

use std::fmt;

use bytes::BytesMut;
use log::trace;
use regex::bytes::Regex;
use vte::{Parser, Perform};

/// Collects printable text and line control characters, dropping escapes.
struct Printable<'a> {
    out: &'a mut BytesMut,
}

impl Perform for Printable<'_> {
    fn print(&mut self, c: char) {
        let mut utf8 = [0u8; 4];
        self.out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }

    fn execute(&mut self, byte: u8) {
        if matches!(byte, b'\n' | b'\r' | b'\t') {
            self.out.extend_from_slice(&[byte]);
        }
    }
}

/// Buffer for accumulating session output and searching it for patterns.
pub struct PatternBuffer {
    buffer: BytesMut,

    /// How many bytes from the end to search for patterns.
    search_depth: usize,

    /// Escape parser state survives across chunks.
    parser: Parser,
}

impl PatternBuffer {
    pub fn new(search_depth: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            search_depth,
            parser: Parser::new(),
        }
    }

    /// Append raw output, stripping ANSI escape sequences.
    pub fn extend(&mut self, data: &[u8]) {
        let before = self.buffer.len();
        let mut printable = Printable {
            out: &mut self.buffer,
        };
        self.parser.advance(&mut printable, data);
        trace!("buffered {} of {} bytes", self.buffer.len() - before, data.len());
    }

    /// Search only the last `search_depth` bytes for `pattern`.
    pub fn search_tail(&self, pattern: &Regex) -> Option<regex::bytes::Match<'_>> {
        let start = self.buffer.len().saturating_sub(self.search_depth);
        pattern.find(&self.buffer[start..])
    }

    /// Check if the tail contains a pattern match.
    pub fn tail_contains(&self, pattern: &Regex) -> bool {
        self.search_tail(pattern).is_some()
    }

    /// Take the buffer contents and reset.
    pub fn take(&mut self) -> Vec<u8> {
        self.buffer.split().to_vec()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn as_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.buffer)
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn search_depth(&self) -> usize {
        self.search_depth
    }
}

impl fmt::Debug for PatternBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternBuffer")
            .field("len", &self.buffer.len())
            .field("search_depth", &self.search_depth)
            .finish()
    }
}

impl Default for PatternBuffer {
    fn default() -> Self {
        Self::new(1000)
    }
}
