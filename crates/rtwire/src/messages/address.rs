//! Strongly-typed address message.

use std::fmt;
use std::net::IpAddr;

use crate::attr::{self, NLA_TYPE_MASK, parse_attr};
use crate::builder::MessageBuilder;
use crate::error::{Error, Result};
use crate::message::{NlMsgHdr, NlMsgType};
use crate::parse::{self, Endianness};
use crate::types::addr::{IfAddrMsg, IfaCacheinfo, Scope, ifa_flags};

/// Attribute IDs for IFA_* constants.
mod attr_ids {
    pub const IFA_ADDRESS: u16 = 1;
    pub const IFA_LOCAL: u16 = 2;
    pub const IFA_LABEL: u16 = 3;
    pub const IFA_BROADCAST: u16 = 4;
    pub const IFA_CACHEINFO: u16 = 6;
    pub const IFA_FLAGS: u16 = 8;
}

/// Strongly-typed address message with all attributes parsed.
///
/// The decoder is strict: a structurally truncated attribute, an
/// address value that is not 4 or 16 bytes, or an address whose family
/// disagrees with the ifaddrmsg family fails the whole message. A
/// missing address attribute is fine — [`ip_address`](Self::ip_address)
/// simply returns nothing rather than a fabricated zero address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressMessage {
    /// Netlink header as received; length is recomputed on pack.
    pub(crate) nl_header: NlMsgHdr,
    /// Fixed-size ifaddrmsg header.
    pub(crate) header: IfAddrMsg,
    /// Address (IFA_ADDRESS).
    pub(crate) address: Option<IpAddr>,
    /// Local address (IFA_LOCAL).
    pub(crate) local: Option<IpAddr>,
    /// Interface label (IFA_LABEL).
    pub(crate) label: Option<String>,
    /// Broadcast address (IFA_BROADCAST).
    pub(crate) broadcast: Option<IpAddr>,
    /// Cache info (IFA_CACHEINFO).
    pub(crate) cache_info: Option<IfaCacheinfo>,
    /// Extended 32-bit flags (IFA_FLAGS); authoritative over the
    /// header's 8-bit flags when present.
    pub(crate) flags: Option<u32>,
}

impl AddressMessage {
    /// Create a new empty address message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the netlink header.
    pub fn nl_header(&self) -> &NlMsgHdr {
        &self.nl_header
    }

    /// Get the fixed ifaddrmsg header.
    pub fn header(&self) -> &IfAddrMsg {
        &self.header
    }

    /// Get the address family.
    pub fn family(&self) -> u8 {
        self.header.ifa_family
    }

    /// Check if this is an IPv4 address.
    pub fn is_ipv4(&self) -> bool {
        self.header.ifa_family == libc::AF_INET as u8
    }

    /// Check if this is an IPv6 address.
    pub fn is_ipv6(&self) -> bool {
        self.header.ifa_family == libc::AF_INET6 as u8
    }

    /// Get the prefix length.
    pub fn prefix_len(&self) -> u8 {
        self.header.ifa_prefixlen
    }

    /// Get the interface index.
    pub fn ifindex(&self) -> u32 {
        self.header.ifa_index
    }

    /// Get the scope.
    pub fn scope(&self) -> Scope {
        Scope::from(self.header.ifa_scope)
    }

    /// Get the interface address, if the kernel sent one.
    pub fn ip_address(&self) -> Option<&IpAddr> {
        self.address.as_ref()
    }

    /// Get the local address.
    pub fn local(&self) -> Option<&IpAddr> {
        self.local.as_ref()
    }

    /// Get the interface label.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Get the broadcast address.
    pub fn broadcast(&self) -> Option<&IpAddr> {
        self.broadcast.as_ref()
    }

    /// Get the cache info.
    pub fn cache_info(&self) -> Option<&IfaCacheinfo> {
        self.cache_info.as_ref()
    }

    /// Effective flags: the 32-bit IFA_FLAGS attribute when present,
    /// the 8-bit header field otherwise.
    pub fn flags(&self) -> u32 {
        self.flags.unwrap_or(self.header.ifa_flags as u32)
    }

    /// Check if this is a secondary/temporary address.
    pub fn is_secondary(&self) -> bool {
        self.flags() & ifa_flags::SECONDARY != 0
    }

    /// Check if this is a permanent address.
    pub fn is_permanent(&self) -> bool {
        self.flags() & ifa_flags::PERMANENT != 0
    }

    /// Check if this address is deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.flags() & ifa_flags::DEPRECATED != 0
    }

    /// Check if this address is tentative.
    pub fn is_tentative(&self) -> bool {
        self.flags() & ifa_flags::TENTATIVE != 0
    }

    /// Parse the payload of an RTM_NEWADDR/RTM_DELADDR message.
    pub(crate) fn parse(
        nl_header: NlMsgHdr,
        payload: &[u8],
        endian: Endianness,
    ) -> Result<Self> {
        let mut input = payload;
        let header = IfAddrMsg::parse(&mut input, endian)?;

        let mut msg = AddressMessage {
            nl_header,
            header,
            ..Default::default()
        };

        while !input.is_empty() {
            let (kind, value) = parse_attr(&mut input, endian)?;
            match kind & NLA_TYPE_MASK {
                attr_ids::IFA_ADDRESS => {
                    msg.address = Some(parse::checked_ip_for_family(value, header.ifa_family)?);
                }
                attr_ids::IFA_LOCAL => {
                    msg.local = Some(parse::checked_ip_for_family(value, header.ifa_family)?);
                }
                attr_ids::IFA_LABEL => {
                    if let Some(label) = attr::get::string(value) {
                        msg.label = Some(label.to_string());
                    }
                }
                attr_ids::IFA_BROADCAST => {
                    msg.broadcast = Some(parse::checked_ip_for_family(value, header.ifa_family)?);
                }
                attr_ids::IFA_CACHEINFO => {
                    msg.cache_info = Some(IfaCacheinfo::from_bytes(value, endian).ok_or(
                        Error::Truncated {
                            expected: IfaCacheinfo::SIZE,
                            actual: value.len(),
                        },
                    )?);
                }
                attr_ids::IFA_FLAGS => {
                    msg.flags = attr::get::u32(value, endian);
                }
                _ => {} // Ignore unknown attributes
            }
        }

        Ok(msg)
    }

    /// Serialize the complete message, header length recomputed.
    ///
    /// Attributes are written in ascending type order, matching kernel
    /// emission order, so well-formed captures round-trip exactly.
    pub fn to_bytes(&self, endian: Endianness) -> Vec<u8> {
        let mut builder = MessageBuilder::with_header(self.nl_header, endian);

        let mut sub = Vec::with_capacity(IfAddrMsg::SIZE);
        self.header.write_to(&mut sub, endian);
        builder.append_bytes(&sub);

        if let Some(ref addr) = self.address {
            builder.append_attr(attr_ids::IFA_ADDRESS, &parse::ip_octets(addr));
        }
        if let Some(ref addr) = self.local {
            builder.append_attr(attr_ids::IFA_LOCAL, &parse::ip_octets(addr));
        }
        if let Some(ref label) = self.label {
            builder.append_attr_str(attr_ids::IFA_LABEL, label);
        }
        if let Some(ref addr) = self.broadcast {
            builder.append_attr(attr_ids::IFA_BROADCAST, &parse::ip_octets(addr));
        }
        if let Some(ref info) = self.cache_info {
            let mut data = Vec::with_capacity(IfaCacheinfo::SIZE);
            info.write_to(&mut data, endian);
            builder.append_attr(attr_ids::IFA_CACHEINFO, &data);
        }
        if let Some(flags) = self.flags {
            builder.append_attr_u32(attr_ids::IFA_FLAGS, flags);
        }

        builder.finish()
    }
}

impl fmt::Display for AddressMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", parse::family_name(self.family()))?;
        match self.address {
            Some(ref addr) => write!(f, " {}/{}", addr, self.prefix_len())?,
            None => write!(f, " ?/{}", self.prefix_len())?,
        }
        write!(f, " dev {} scope {}", self.ifindex(), self.scope().name())?;
        if self.is_permanent() {
            write!(f, " permanent")?;
        }
        if self.is_secondary() {
            write!(f, " secondary")?;
        }
        if self.is_deprecated() {
            write!(f, " deprecated")?;
        }
        if self.is_tentative() {
            write!(f, " tentative")?;
        }
        if let Some(ref label) = self.label {
            write!(f, " {}", label)?;
        }
        Ok(())
    }
}

/// Builder for constructing AddressMessage.
#[derive(Debug, Clone)]
pub struct AddressMessageBuilder {
    msg: AddressMessage,
}

impl AddressMessageBuilder {
    /// Create a new builder for an RTM_NEWADDR message.
    pub fn new() -> Self {
        Self {
            msg: AddressMessage {
                nl_header: NlMsgHdr::new(NlMsgType::RTM_NEWADDR, 0),
                ..Default::default()
            },
        }
    }

    /// Set the netlink header (type, flags, sequence, port ID).
    pub fn nl_header(mut self, header: NlMsgHdr) -> Self {
        self.msg.nl_header = header;
        self
    }

    /// Set the interface index.
    pub fn ifindex(mut self, index: u32) -> Self {
        self.msg.header.ifa_index = index;
        self
    }

    /// Set the prefix length.
    pub fn prefix_len(mut self, len: u8) -> Self {
        self.msg.header.ifa_prefixlen = len;
        self
    }

    /// Set the scope.
    pub fn scope(mut self, scope: u8) -> Self {
        self.msg.header.ifa_scope = scope;
        self
    }

    /// Set the address; the family is derived from it.
    pub fn address(mut self, addr: IpAddr) -> Self {
        self.msg.header.ifa_family = match addr {
            IpAddr::V4(_) => libc::AF_INET as u8,
            IpAddr::V6(_) => libc::AF_INET6 as u8,
        };
        self.msg.address = Some(addr);
        self
    }

    /// Set the local address.
    pub fn local(mut self, addr: IpAddr) -> Self {
        self.msg.local = Some(addr);
        self
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.msg.label = Some(label.into());
        self
    }

    /// Set the 32-bit flags attribute.
    pub fn flags(mut self, flags: u32) -> Self {
        self.msg.flags = Some(flags);
        self
    }

    /// Set the cache info.
    pub fn cache_info(mut self, info: IfaCacheinfo) -> Self {
        self.msg.cache_info = Some(info);
        self
    }

    /// Build the message.
    pub fn build(self) -> AddressMessage {
        self.msg
    }
}

impl Default for AddressMessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
