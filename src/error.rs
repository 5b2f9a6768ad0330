//! Error types for pcapdns.
//!
//! - [`enum@Error`] - Main error enum that wraps all error types
//! - [`PcapError`] - Errors from reading the capture container
//! - [`DnsError`] - Errors from decoding a DNS message
//! - [`OutOfBounds`] - Cursor-level bounds failure
//!
//! Only container header failures and I/O errors are fatal to an analysis.
//! Everything else ends the frame stream early or skips a single frame.

use thiserror::Error;

/// Main error type for pcapdns operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Error reading or parsing the capture file
    #[error("PCAP error: {0}")]
    Pcap(#[from] PcapError),

    /// Error decoding a DNS message
    #[error("DNS error: {0}")]
    Dns(#[from] DnsError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to capture container reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PcapError {
    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Magic number matches neither legacy PCAP nor PCAPNG
    #[error("Unsupported capture format (magic 0x{magic:08x})")]
    UnsupportedFormat { magic: u32 },

    /// A header, record or block claims more bytes than remain
    #[error("Truncated capture at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedCapture {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A PCAPNG block is structurally invalid
    #[error("Invalid block at offset {offset}: {reason}")]
    InvalidBlock { offset: usize, reason: String },
}

/// Errors related to DNS message decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// The message ends before a required field
    #[error("malformed DNS message: {reason}")]
    MalformedMessage { reason: String },

    /// The question name is invalid (bad pointer, loop, reserved label type)
    #[error("malformed DNS name: {reason}")]
    MalformedName { reason: String },
}

/// A read would run past the end of the underlying buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("read of {needed} bytes at offset {offset} exceeds buffer length {len}")]
pub struct OutOfBounds {
    pub offset: usize,
    pub needed: usize,
    pub len: usize,
}

impl From<OutOfBounds> for PcapError {
    fn from(err: OutOfBounds) -> Self {
        PcapError::TruncatedCapture {
            offset: err.offset,
            needed: err.needed,
            available: err.len.saturating_sub(err.offset),
        }
    }
}

impl From<OutOfBounds> for DnsError {
    fn from(err: OutOfBounds) -> Self {
        DnsError::MalformedMessage {
            reason: err.to_string(),
        }
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
