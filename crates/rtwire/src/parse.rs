//! Parser primitives shared by every message codec.
//!
//! The live kernel interface speaks native byte order while captured
//! test vectors pin little-endian, so byte order is an explicit
//! [`Endianness`] parameter on every multi-byte read and write rather
//! than a compile-time choice.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use winnow::binary;
use winnow::error::ContextError;
use winnow::prelude::*;

use crate::error::{Error, Result};

/// Byte order selector, re-exported from winnow.
///
/// Use `Native` against a live kernel and `Little` for deterministic
/// fixtures.
pub use winnow::binary::Endianness;

/// Result type for winnow parsers.
pub type PResult<T> = core::result::Result<T, winnow::error::ErrMode<ContextError>>;

// ============================================================================
// Primitive readers and writers
// ============================================================================

/// Parse a u8.
pub fn parse_u8(input: &mut &[u8]) -> PResult<u8> {
    binary::u8.parse_next(input)
}

/// Parse a u16 in the given byte order.
pub fn parse_u16(input: &mut &[u8], endian: Endianness) -> PResult<u16> {
    binary::u16(endian).parse_next(input)
}

/// Parse a u32 in the given byte order.
pub fn parse_u32(input: &mut &[u8], endian: Endianness) -> PResult<u32> {
    binary::u32(endian).parse_next(input)
}

/// Parse an i32 in the given byte order.
pub fn parse_i32(input: &mut &[u8], endian: Endianness) -> PResult<i32> {
    binary::i32(endian).parse_next(input)
}

/// Decode a u16 already sliced to width.
pub fn read_u16(bytes: [u8; 2], endian: Endianness) -> u16 {
    match endian {
        Endianness::Big => u16::from_be_bytes(bytes),
        Endianness::Little => u16::from_le_bytes(bytes),
        _ => u16::from_ne_bytes(bytes),
    }
}

/// Decode a u32 already sliced to width.
pub fn read_u32(bytes: [u8; 4], endian: Endianness) -> u32 {
    match endian {
        Endianness::Big => u32::from_be_bytes(bytes),
        Endianness::Little => u32::from_le_bytes(bytes),
        _ => u32::from_ne_bytes(bytes),
    }
}

/// Write a u16 in the given byte order.
pub fn put_u16(buf: &mut Vec<u8>, value: u16, endian: Endianness) {
    match endian {
        Endianness::Big => buf.extend_from_slice(&value.to_be_bytes()),
        Endianness::Little => buf.extend_from_slice(&value.to_le_bytes()),
        _ => buf.extend_from_slice(&value.to_ne_bytes()),
    }
}

/// Write a u32 in the given byte order.
pub fn put_u32(buf: &mut Vec<u8>, value: u32, endian: Endianness) {
    match endian {
        Endianness::Big => buf.extend_from_slice(&value.to_be_bytes()),
        Endianness::Little => buf.extend_from_slice(&value.to_le_bytes()),
        _ => buf.extend_from_slice(&value.to_ne_bytes()),
    }
}

/// Write an i32 in the given byte order.
pub fn put_i32(buf: &mut Vec<u8>, value: i32, endian: Endianness) {
    put_u32(buf, value as u32, endian);
}

// ============================================================================
// Address helpers
// ============================================================================

/// Interpret raw attribute bytes as an IP address by length.
///
/// Exactly 4 bytes is IPv4, exactly 16 is IPv6; any other length yields
/// nothing.
pub fn ip_from_bytes(data: &[u8]) -> Option<IpAddr> {
    match data.len() {
        4 => {
            let octets: [u8; 4] = data.try_into().ok()?;
            Some(IpAddr::V4(Ipv4Addr::from(octets)))
        }
        16 => {
            let octets: [u8; 16] = data.try_into().ok()?;
            Some(IpAddr::V6(Ipv6Addr::from(octets)))
        }
        _ => None,
    }
}

/// Decode an address attribute and cross-check it against the header
/// family.
///
/// A value whose natural family disagrees with `family`, or an
/// IPv4-mapped IPv6 value (`::ffff:a.b.c.d`) under AF_INET6, indicates
/// either a malformed kernel message or an ambiguity the caller must
/// never silently accept, and fails the enclosing message.
pub fn checked_ip_for_family(data: &[u8], family: u8) -> Result<IpAddr> {
    let addr = ip_from_bytes(data).ok_or(Error::Truncated {
        expected: if family == libc::AF_INET as u8 { 4 } else { 16 },
        actual: data.len(),
    })?;
    match addr {
        IpAddr::V4(_) if family == libc::AF_INET as u8 => Ok(addr),
        IpAddr::V6(v6) if family == libc::AF_INET6 as u8 => {
            if v6.to_ipv4_mapped().is_some() {
                Err(Error::FamilyMismatch {
                    family,
                    address: addr,
                })
            } else {
                Ok(addr)
            }
        }
        _ => Err(Error::FamilyMismatch {
            family,
            address: addr,
        }),
    }
}

/// Raw wire bytes of an address: 4 for IPv4, 16 for IPv6.
pub fn ip_octets(addr: &IpAddr) -> Vec<u8> {
    match addr {
        IpAddr::V4(v4) => v4.octets().to_vec(),
        IpAddr::V6(v6) => v6.octets().to_vec(),
    }
}

// ============================================================================
// Text helpers
// ============================================================================

/// Decode attribute bytes as UTF-8 text, stripping one trailing NUL.
///
/// The wire form of string attributes is NUL-terminated; exactly one
/// terminator is removed before decoding so embedded text survives
/// unchanged. Invalid UTF-8 yields nothing.
pub fn stripped_string(data: &[u8]) -> Option<&str> {
    let end = if data.last() == Some(&0) {
        data.len() - 1
    } else {
        data.len()
    };
    std::str::from_utf8(&data[..end]).ok()
}

/// Format a 6-byte hardware address as colon-separated hex.
pub fn format_mac(mac: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        mac[0], mac[1], mac[2], mac[3], mac[4], mac[5]
    )
}

/// Name an address family for rendering.
pub fn family_name(family: u8) -> &'static str {
    match family as i32 {
        libc::AF_INET => "inet",
        libc::AF_INET6 => "inet6",
        libc::AF_UNSPEC => "unspec",
        _ => "unknown",
    }
}
