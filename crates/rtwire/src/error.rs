//! Error types for codec operations.

use std::net::IpAddr;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while decoding or encoding wire data.
///
/// Malformed input from the kernel (or any other untrusted source)
/// always surfaces as an `Err`; the codec never panics on wire data.
/// Receive loops are expected to log the error and skip the buffer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Buffer ended before a fixed-size record or a declared length.
    #[error("message truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the record required.
        expected: usize,
        /// Bytes actually available.
        actual: usize,
    },

    /// Invalid message structure.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// Invalid attribute structure.
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// An embedded address disagrees with the message's address family.
    ///
    /// Covers both a natural-family mismatch (a 4-byte value under
    /// AF_INET6 and vice versa) and an IPv4-mapped IPv6 value inside an
    /// AF_INET6 message, which the kernel never emits for a healthy
    /// interface.
    #[error("address family mismatch: family {family}, address {address}")]
    FamilyMismatch {
        /// The family the sub-header declared.
        family: u8,
        /// The address that contradicted it.
        address: IpAddr,
    },
}

impl Error {
    /// Check if this is a truncation error.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }

    /// Check if this is a family cross-check failure.
    pub fn is_family_mismatch(&self) -> bool {
        matches!(self, Self::FamilyMismatch { .. })
    }
}
