//! Route message types.

use crate::error::{Error, Result};
use crate::parse::{self, Endianness};

/// Route message (struct rtmsg).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RtMsg {
    /// Address family.
    pub rtm_family: u8,
    /// Destination prefix length.
    pub rtm_dst_len: u8,
    /// Source prefix length.
    pub rtm_src_len: u8,
    /// TOS filter.
    pub rtm_tos: u8,
    /// Routing table ID, 8-bit wire field; superseded by the 32-bit
    /// RTA_TABLE attribute when present.
    pub rtm_table: u8,
    /// Routing protocol (RTPROT_*).
    pub rtm_protocol: u8,
    /// Route scope (RT_SCOPE_*).
    pub rtm_scope: u8,
    /// Route type (RTN_*).
    pub rtm_type: u8,
    /// Route flags.
    pub rtm_flags: u32,
}

impl RtMsg {
    /// Size of this structure on the wire.
    pub const SIZE: usize = 12;

    /// Create a new route message header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the address family.
    pub fn with_family(mut self, family: u8) -> Self {
        self.rtm_family = family;
        self
    }

    /// Set the destination prefix length.
    pub fn with_dst_len(mut self, len: u8) -> Self {
        self.rtm_dst_len = len;
        self
    }

    /// Set the routing table.
    pub fn with_table(mut self, table: u8) -> Self {
        self.rtm_table = table;
        self
    }

    /// Set the protocol.
    pub fn with_protocol(mut self, protocol: u8) -> Self {
        self.rtm_protocol = protocol;
        self
    }

    /// Set the scope.
    pub fn with_scope(mut self, scope: u8) -> Self {
        self.rtm_scope = scope;
        self
    }

    /// Set the route type.
    pub fn with_type(mut self, rtype: u8) -> Self {
        self.rtm_type = rtype;
        self
    }

    /// Parse the fixed 12-byte record.
    pub fn parse(input: &mut &[u8], endian: Endianness) -> Result<Self> {
        let data = *input;
        if data.len() < Self::SIZE {
            return Err(Error::Truncated {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }
        let msg = Self {
            rtm_family: data[0],
            rtm_dst_len: data[1],
            rtm_src_len: data[2],
            rtm_tos: data[3],
            rtm_table: data[4],
            rtm_protocol: data[5],
            rtm_scope: data[6],
            rtm_type: data[7],
            rtm_flags: parse::read_u32(data[8..12].try_into().unwrap(), endian),
        };
        *input = &data[Self::SIZE..];
        Ok(msg)
    }

    /// Write the fixed 12-byte record.
    pub fn write_to(&self, buf: &mut Vec<u8>, endian: Endianness) {
        buf.push(self.rtm_family);
        buf.push(self.rtm_dst_len);
        buf.push(self.rtm_src_len);
        buf.push(self.rtm_tos);
        buf.push(self.rtm_table);
        buf.push(self.rtm_protocol);
        buf.push(self.rtm_scope);
        buf.push(self.rtm_type);
        parse::put_u32(buf, self.rtm_flags, endian);
    }
}

/// Route types (RTN_*).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RouteType {
    Unspec = 0,
    Unicast = 1,
    Local = 2,
    Broadcast = 3,
    Anycast = 4,
    Multicast = 5,
    Blackhole = 6,
    Unreachable = 7,
    Prohibit = 8,
    Throw = 9,
    Nat = 10,
}

impl From<u8> for RouteType {
    fn from(val: u8) -> Self {
        match val {
            1 => Self::Unicast,
            2 => Self::Local,
            3 => Self::Broadcast,
            4 => Self::Anycast,
            5 => Self::Multicast,
            6 => Self::Blackhole,
            7 => Self::Unreachable,
            8 => Self::Prohibit,
            9 => Self::Throw,
            10 => Self::Nat,
            _ => Self::Unspec,
        }
    }
}

impl RouteType {
    /// Get the name of this route type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unspec => "unspec",
            Self::Unicast => "unicast",
            Self::Local => "local",
            Self::Broadcast => "broadcast",
            Self::Anycast => "anycast",
            Self::Multicast => "multicast",
            Self::Blackhole => "blackhole",
            Self::Unreachable => "unreachable",
            Self::Prohibit => "prohibit",
            Self::Throw => "throw",
            Self::Nat => "nat",
        }
    }
}

/// Route protocols (RTPROT_*) — who installed the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RouteProtocol {
    Unspec = 0,
    Redirect = 1,
    Kernel = 2,
    Boot = 3,
    Static = 4,
    Ra = 9,
    Dhcp = 16,
}

impl From<u8> for RouteProtocol {
    fn from(val: u8) -> Self {
        match val {
            1 => Self::Redirect,
            2 => Self::Kernel,
            3 => Self::Boot,
            4 => Self::Static,
            9 => Self::Ra,
            16 => Self::Dhcp,
            _ => Self::Unspec,
        }
    }
}

impl RouteProtocol {
    /// Get the name of this protocol.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unspec => "unspec",
            Self::Redirect => "redirect",
            Self::Kernel => "kernel",
            Self::Boot => "boot",
            Self::Static => "static",
            Self::Ra => "ra",
            Self::Dhcp => "dhcp",
        }
    }
}

/// Route cache info (struct rta_cacheinfo).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RtaCacheinfo {
    pub rta_clntref: u32,
    pub rta_lastuse: u32,
    pub rta_expires: u32,
    pub rta_error: u32,
    pub rta_used: u32,
    pub rta_id: u32,
    pub rta_ts: u32,
    pub rta_tsage: u32,
}

impl RtaCacheinfo {
    /// Size of this structure on the wire.
    pub const SIZE: usize = 32;

    /// Parse from an attribute payload; needs at least 32 bytes.
    pub fn from_bytes(data: &[u8], endian: Endianness) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            rta_clntref: parse::read_u32(data[0..4].try_into().unwrap(), endian),
            rta_lastuse: parse::read_u32(data[4..8].try_into().unwrap(), endian),
            rta_expires: parse::read_u32(data[8..12].try_into().unwrap(), endian),
            rta_error: parse::read_u32(data[12..16].try_into().unwrap(), endian),
            rta_used: parse::read_u32(data[16..20].try_into().unwrap(), endian),
            rta_id: parse::read_u32(data[20..24].try_into().unwrap(), endian),
            rta_ts: parse::read_u32(data[24..28].try_into().unwrap(), endian),
            rta_tsage: parse::read_u32(data[28..32].try_into().unwrap(), endian),
        })
    }

    /// Write the 32-byte record.
    pub fn write_to(&self, buf: &mut Vec<u8>, endian: Endianness) {
        parse::put_u32(buf, self.rta_clntref, endian);
        parse::put_u32(buf, self.rta_lastuse, endian);
        parse::put_u32(buf, self.rta_expires, endian);
        parse::put_u32(buf, self.rta_error, endian);
        parse::put_u32(buf, self.rta_used, endian);
        parse::put_u32(buf, self.rta_id, endian);
        parse::put_u32(buf, self.rta_ts, endian);
        parse::put_u32(buf, self.rta_tsage, endian);
    }
}
