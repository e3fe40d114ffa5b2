//! Address message types.

use crate::error::{Error, Result};
use crate::parse::{self, Endianness};

/// Interface address message (struct ifaddrmsg).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IfAddrMsg {
    /// Address family (AF_INET, AF_INET6).
    pub ifa_family: u8,
    /// Prefix length.
    pub ifa_prefixlen: u8,
    /// Address flags (IFA_F_*), 8-bit wire field; superseded by the
    /// 32-bit IFA_FLAGS attribute when present.
    pub ifa_flags: u8,
    /// Address scope.
    pub ifa_scope: u8,
    /// Interface index.
    pub ifa_index: u32,
}

impl IfAddrMsg {
    /// Size of this structure on the wire.
    pub const SIZE: usize = 8;

    /// Create a new address message header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the address family.
    pub fn with_family(mut self, family: u8) -> Self {
        self.ifa_family = family;
        self
    }

    /// Set the prefix length.
    pub fn with_prefixlen(mut self, prefixlen: u8) -> Self {
        self.ifa_prefixlen = prefixlen;
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: u8) -> Self {
        self.ifa_scope = scope;
        self
    }

    /// Set the interface index.
    pub fn with_index(mut self, index: u32) -> Self {
        self.ifa_index = index;
        self
    }

    /// Parse the fixed 8-byte record.
    pub fn parse(input: &mut &[u8], endian: Endianness) -> Result<Self> {
        let data = *input;
        if data.len() < Self::SIZE {
            return Err(Error::Truncated {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }
        let msg = Self {
            ifa_family: data[0],
            ifa_prefixlen: data[1],
            ifa_flags: data[2],
            ifa_scope: data[3],
            ifa_index: parse::read_u32(data[4..8].try_into().unwrap(), endian),
        };
        *input = &data[Self::SIZE..];
        Ok(msg)
    }

    /// Write the fixed 8-byte record.
    pub fn write_to(&self, buf: &mut Vec<u8>, endian: Endianness) {
        buf.push(self.ifa_family);
        buf.push(self.ifa_prefixlen);
        buf.push(self.ifa_flags);
        buf.push(self.ifa_scope);
        parse::put_u32(buf, self.ifa_index, endian);
    }
}

/// Address flags (IFA_F_*).
pub mod ifa_flags {
    pub const SECONDARY: u32 = 0x01;
    pub const NODAD: u32 = 0x02;
    pub const OPTIMISTIC: u32 = 0x04;
    pub const DADFAILED: u32 = 0x08;
    pub const HOMEADDRESS: u32 = 0x10;
    pub const DEPRECATED: u32 = 0x20;
    pub const TENTATIVE: u32 = 0x40;
    pub const PERMANENT: u32 = 0x80;
    pub const MANAGETEMPADDR: u32 = 0x100;
    pub const NOPREFIXROUTE: u32 = 0x200;
}

/// Address and route scope values (rt_scope_t).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Scope {
    Universe = 0,
    Site = 200,
    Link = 253,
    Host = 254,
    Nowhere = 255,
}

impl From<u8> for Scope {
    fn from(val: u8) -> Self {
        match val {
            200 => Self::Site,
            253 => Self::Link,
            254 => Self::Host,
            255 => Self::Nowhere,
            _ => Self::Universe,
        }
    }
}

impl Scope {
    /// Get the name of this scope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Universe => "global",
            Self::Site => "site",
            Self::Link => "link",
            Self::Host => "host",
            Self::Nowhere => "nowhere",
        }
    }
}

/// Address cache info (struct ifa_cacheinfo).
///
/// Lifetimes are seconds, timestamps hundredths of a second since boot.
/// The field spelling follows the kernel header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IfaCacheinfo {
    /// Preferred lifetime.
    pub ifa_prefered: u32,
    /// Valid lifetime.
    pub ifa_valid: u32,
    /// Creation timestamp.
    pub cstamp: u32,
    /// Last update timestamp.
    pub tstamp: u32,
}

impl IfaCacheinfo {
    /// Size of this structure on the wire.
    pub const SIZE: usize = 16;

    /// Parse from an attribute payload; needs at least 16 bytes.
    pub fn from_bytes(data: &[u8], endian: Endianness) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            ifa_prefered: parse::read_u32(data[0..4].try_into().unwrap(), endian),
            ifa_valid: parse::read_u32(data[4..8].try_into().unwrap(), endian),
            cstamp: parse::read_u32(data[8..12].try_into().unwrap(), endian),
            tstamp: parse::read_u32(data[12..16].try_into().unwrap(), endian),
        })
    }

    /// Write the 16-byte record.
    pub fn write_to(&self, buf: &mut Vec<u8>, endian: Endianness) {
        parse::put_u32(buf, self.ifa_prefered, endian);
        parse::put_u32(buf, self.ifa_valid, endian);
        parse::put_u32(buf, self.cstamp, endian);
        parse::put_u32(buf, self.tstamp, endian);
    }
}
