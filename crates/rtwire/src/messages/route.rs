//! Strongly-typed route message.

use std::fmt;
use std::net::IpAddr;

use crate::attr::{self, NLA_TYPE_MASK, parse_attr};
use crate::builder::MessageBuilder;
use crate::error::{Error, Result};
use crate::message::{NlMsgHdr, NlMsgType};
use crate::parse::{self, Endianness};
use crate::types::addr::Scope;
use crate::types::route::{RouteProtocol, RouteType, RtMsg, RtaCacheinfo};

/// Attribute IDs for RTA_* constants.
mod attr_ids {
    pub const RTA_DST: u16 = 1;
    pub const RTA_OIF: u16 = 4;
    pub const RTA_GATEWAY: u16 = 5;
    pub const RTA_PRIORITY: u16 = 6;
    pub const RTA_PREFSRC: u16 = 7;
    pub const RTA_CACHEINFO: u16 = 12;
    pub const RTA_TABLE: u16 = 15;
    pub const RTA_PREF: u16 = 20;
}

/// Strongly-typed route message with all attributes parsed.
///
/// The decoder is strict, like the address decoder: a structurally
/// truncated attribute, a wrong-width value, or an embedded address
/// whose family disagrees with the rtmsg family (including IPv4-mapped
/// IPv6 forms) fails the whole message. The cross-check applies
/// independently to the destination, the gateway and the preferred
/// source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteMessage {
    /// Netlink header as received; length is recomputed on pack.
    pub(crate) nl_header: NlMsgHdr,
    /// Fixed-size rtmsg header.
    pub(crate) header: RtMsg,
    /// Destination prefix address (RTA_DST).
    pub(crate) destination: Option<IpAddr>,
    /// Output interface index (RTA_OIF).
    pub(crate) oif: Option<u32>,
    /// Gateway address (RTA_GATEWAY).
    pub(crate) gateway: Option<IpAddr>,
    /// Priority/metric (RTA_PRIORITY).
    pub(crate) priority: Option<u32>,
    /// Preferred source address (RTA_PREFSRC).
    pub(crate) prefsrc: Option<IpAddr>,
    /// Cache info (RTA_CACHEINFO).
    pub(crate) cache_info: Option<RtaCacheinfo>,
    /// 32-bit routing table ID (RTA_TABLE); authoritative over the
    /// header's 8-bit table field when present.
    pub(crate) table: Option<u32>,
    /// Route preference (RTA_PREF).
    pub(crate) pref: Option<u8>,
}

impl RouteMessage {
    /// Create a new empty route message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the netlink header.
    pub fn nl_header(&self) -> &NlMsgHdr {
        &self.nl_header
    }

    /// Get the fixed rtmsg header.
    pub fn header(&self) -> &RtMsg {
        &self.header
    }

    /// Get the address family.
    pub fn family(&self) -> u8 {
        self.header.rtm_family
    }

    /// Check if this is an IPv4 route.
    pub fn is_ipv4(&self) -> bool {
        self.header.rtm_family == libc::AF_INET as u8
    }

    /// Check if this is an IPv6 route.
    pub fn is_ipv6(&self) -> bool {
        self.header.rtm_family == libc::AF_INET6 as u8
    }

    /// Get the destination prefix length.
    pub fn dst_len(&self) -> u8 {
        self.header.rtm_dst_len
    }

    /// Get the source prefix length.
    pub fn src_len(&self) -> u8 {
        self.header.rtm_src_len
    }

    /// Get the TOS filter.
    pub fn tos(&self) -> u8 {
        self.header.rtm_tos
    }

    /// Get the route type.
    pub fn route_type(&self) -> RouteType {
        RouteType::from(self.header.rtm_type)
    }

    /// Get the route protocol (who installed it).
    pub fn protocol(&self) -> RouteProtocol {
        RouteProtocol::from(self.header.rtm_protocol)
    }

    /// Get the route scope.
    pub fn scope(&self) -> Scope {
        Scope::from(self.header.rtm_scope)
    }

    /// Effective routing table: the 32-bit RTA_TABLE attribute when
    /// present, the 8-bit header field otherwise.
    pub fn table_id(&self) -> u32 {
        self.table.unwrap_or(self.header.rtm_table as u32)
    }

    /// Get the destination address.
    pub fn destination(&self) -> Option<&IpAddr> {
        self.destination.as_ref()
    }

    /// Destination prefix: the address paired with the header's
    /// declared prefix length.
    pub fn destination_prefix(&self) -> Option<(IpAddr, u8)> {
        self.destination.map(|addr| (addr, self.header.rtm_dst_len))
    }

    /// Get the gateway address.
    pub fn gateway(&self) -> Option<&IpAddr> {
        self.gateway.as_ref()
    }

    /// Get the output interface index.
    pub fn oif(&self) -> Option<u32> {
        self.oif
    }

    /// Get the priority/metric.
    pub fn priority(&self) -> Option<u32> {
        self.priority
    }

    /// Get the preferred source address.
    pub fn prefsrc(&self) -> Option<&IpAddr> {
        self.prefsrc.as_ref()
    }

    /// Get the cache info.
    pub fn cache_info(&self) -> Option<&RtaCacheinfo> {
        self.cache_info.as_ref()
    }

    /// Get the route preference.
    pub fn pref(&self) -> Option<u8> {
        self.pref
    }

    /// Check if this is a default route (0.0.0.0/0 or ::/0).
    pub fn is_default(&self) -> bool {
        self.header.rtm_dst_len == 0 && self.destination.is_none()
    }

    /// Check if this route has a gateway.
    pub fn has_gateway(&self) -> bool {
        self.gateway.is_some()
    }

    /// Parse the payload of an RTM_NEWROUTE/RTM_DELROUTE message.
    pub(crate) fn parse(
        nl_header: NlMsgHdr,
        payload: &[u8],
        endian: Endianness,
    ) -> Result<Self> {
        let mut input = payload;
        let header = RtMsg::parse(&mut input, endian)?;

        let mut msg = RouteMessage {
            nl_header,
            header,
            ..Default::default()
        };

        while !input.is_empty() {
            let (kind, value) = parse_attr(&mut input, endian)?;
            match kind & NLA_TYPE_MASK {
                attr_ids::RTA_DST => {
                    msg.destination =
                        Some(parse::checked_ip_for_family(value, header.rtm_family)?);
                }
                attr_ids::RTA_OIF => {
                    msg.oif = Some(require_u32(value, endian, "RTA_OIF")?);
                }
                attr_ids::RTA_GATEWAY => {
                    msg.gateway = Some(parse::checked_ip_for_family(value, header.rtm_family)?);
                }
                attr_ids::RTA_PRIORITY => {
                    msg.priority = Some(require_u32(value, endian, "RTA_PRIORITY")?);
                }
                attr_ids::RTA_PREFSRC => {
                    msg.prefsrc = Some(parse::checked_ip_for_family(value, header.rtm_family)?);
                }
                attr_ids::RTA_CACHEINFO => {
                    msg.cache_info = Some(RtaCacheinfo::from_bytes(value, endian).ok_or(
                        Error::Truncated {
                            expected: RtaCacheinfo::SIZE,
                            actual: value.len(),
                        },
                    )?);
                }
                attr_ids::RTA_TABLE => {
                    msg.table = Some(require_u32(value, endian, "RTA_TABLE")?);
                }
                attr_ids::RTA_PREF => {
                    msg.pref = Some(attr::get::u8(value).ok_or_else(|| {
                        Error::InvalidAttribute(format!(
                            "RTA_PREF expects 1 byte, got {}",
                            value.len()
                        ))
                    })?);
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

        let mut sub = Vec::with_capacity(RtMsg::SIZE);
        self.header.write_to(&mut sub, endian);
        builder.append_bytes(&sub);

        if let Some(ref addr) = self.destination {
            builder.append_attr(attr_ids::RTA_DST, &parse::ip_octets(addr));
        }
        if let Some(oif) = self.oif {
            builder.append_attr_u32(attr_ids::RTA_OIF, oif);
        }
        if let Some(ref addr) = self.gateway {
            builder.append_attr(attr_ids::RTA_GATEWAY, &parse::ip_octets(addr));
        }
        if let Some(priority) = self.priority {
            builder.append_attr_u32(attr_ids::RTA_PRIORITY, priority);
        }
        if let Some(ref addr) = self.prefsrc {
            builder.append_attr(attr_ids::RTA_PREFSRC, &parse::ip_octets(addr));
        }
        if let Some(ref info) = self.cache_info {
            let mut data = Vec::with_capacity(RtaCacheinfo::SIZE);
            info.write_to(&mut data, endian);
            builder.append_attr(attr_ids::RTA_CACHEINFO, &data);
        }
        if let Some(table) = self.table {
            builder.append_attr_u32(attr_ids::RTA_TABLE, table);
        }
        if let Some(pref) = self.pref {
            builder.append_attr_u8(attr_ids::RTA_PREF, pref);
        }

        builder.finish()
    }
}

/// Strict u32 read: the route decoder treats a wrong-width integer as a
/// hard failure, not a skippable attribute.
fn require_u32(value: &[u8], endian: Endianness, what: &str) -> Result<u32> {
    attr::get::u32(value, endian).ok_or_else(|| {
        Error::InvalidAttribute(format!("{} expects 4 bytes, got {}", what, value.len()))
    })
}

impl fmt::Display for RouteMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.destination {
            Some(ref dst) => write!(f, "{}/{}", dst, self.dst_len())?,
            None if self.dst_len() == 0 => write!(f, "default")?,
            None => write!(f, "?/{}", self.dst_len())?,
        }
        if let Some(ref gw) = self.gateway {
            write!(f, " via {}", gw)?;
        }
        if let Some(oif) = self.oif {
            write!(f, " dev {}", oif)?;
        }
        write!(
            f,
            " proto {} scope {} type {}",
            self.protocol().name(),
            self.scope().name(),
            self.route_type().name()
        )?;
        if let Some(metric) = self.priority {
            write!(f, " metric {}", metric)?;
        }
        if let Some(ref src) = self.prefsrc {
            write!(f, " src {}", src)?;
        }
        Ok(())
    }
}

/// Builder for constructing RouteMessage.
#[derive(Debug, Clone)]
pub struct RouteMessageBuilder {
    msg: RouteMessage,
}

impl RouteMessageBuilder {
    /// Create a new builder for an RTM_NEWROUTE message.
    pub fn new() -> Self {
        Self {
            msg: RouteMessage {
                nl_header: NlMsgHdr::new(NlMsgType::RTM_NEWROUTE, 0),
                ..Default::default()
            },
        }
    }

    /// Set the netlink header (type, flags, sequence, port ID).
    pub fn nl_header(mut self, header: NlMsgHdr) -> Self {
        self.msg.nl_header = header;
        self
    }

    /// Set the address family.
    pub fn family(mut self, family: u8) -> Self {
        self.msg.header.rtm_family = family;
        self
    }

    /// Set the destination prefix; the family is derived from the
    /// address.
    pub fn destination(mut self, addr: IpAddr, prefix_len: u8) -> Self {
        self.msg.header.rtm_family = match addr {
            IpAddr::V4(_) => libc::AF_INET as u8,
            IpAddr::V6(_) => libc::AF_INET6 as u8,
        };
        self.msg.header.rtm_dst_len = prefix_len;
        self.msg.destination = Some(addr);
        self
    }

    /// Set the gateway address.
    pub fn gateway(mut self, addr: IpAddr) -> Self {
        self.msg.gateway = Some(addr);
        self
    }

    /// Set the output interface index.
    pub fn oif(mut self, oif: u32) -> Self {
        self.msg.oif = Some(oif);
        self
    }

    /// Set the priority/metric.
    pub fn priority(mut self, priority: u32) -> Self {
        self.msg.priority = Some(priority);
        self
    }

    /// Set the 8-bit header table ID.
    pub fn table(mut self, table: u8) -> Self {
        self.msg.header.rtm_table = table;
        self
    }

    /// Set the 32-bit table override attribute.
    pub fn table_attr(mut self, table: u32) -> Self {
        self.msg.table = Some(table);
        self
    }

    /// Set the protocol.
    pub fn protocol(mut self, protocol: u8) -> Self {
        self.msg.header.rtm_protocol = protocol;
        self
    }

    /// Set the scope.
    pub fn scope(mut self, scope: u8) -> Self {
        self.msg.header.rtm_scope = scope;
        self
    }

    /// Set the route type.
    pub fn route_type(mut self, rtype: u8) -> Self {
        self.msg.header.rtm_type = rtype;
        self
    }

    /// Set the route preference.
    pub fn pref(mut self, pref: u8) -> Self {
        self.msg.pref = Some(pref);
        self
    }

    /// Build the message.
    pub fn build(self) -> RouteMessage {
        self.msg
    }
}

impl Default for RouteMessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
