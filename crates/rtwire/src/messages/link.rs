//! Strongly-typed link message.

use std::fmt;

use tracing::debug;

use crate::attr::{self, NLA_TYPE_MASK, parse_attr};
use crate::builder::MessageBuilder;
use crate::error::Result;
use crate::message::{NlMsgHdr, NlMsgType};
use crate::parse::{self, Endianness};
use crate::types::link::{IfInfoMsg, OperState};

/// Attribute IDs for IFLA_* constants.
mod attr_ids {
    pub const IFLA_ADDRESS: u16 = 1;
    pub const IFLA_BROADCAST: u16 = 2;
    pub const IFLA_IFNAME: u16 = 3;
    pub const IFLA_MTU: u16 = 4;
    pub const IFLA_TXQLEN: u16 = 13;
    pub const IFLA_OPERSTATE: u16 = 16;
}

/// Strongly-typed link message with all attributes parsed.
///
/// Unlike the address and route decoders, this one is deliberately
/// permissive: a malformed attribute leaves its field unset (a
/// structurally truncated one ends the attribute walk) and the rest of
/// the message is kept. Interface dumps routinely carry attributes this
/// crate does not model, and a partial link record is still useful to
/// callers tracking interface state. The asymmetry with the strict
/// decoders is intentional, not an oversight.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkMessage {
    /// Netlink header as received; length is recomputed on pack.
    pub(crate) nl_header: NlMsgHdr,
    /// Fixed-size ifinfomsg header.
    pub(crate) header: IfInfoMsg,
    /// Hardware address (IFLA_ADDRESS), kept only when exactly 6 bytes.
    pub(crate) hardware_address: Option<[u8; 6]>,
    /// Broadcast address (IFLA_BROADCAST), kept only when exactly 6 bytes.
    pub(crate) broadcast_address: Option<[u8; 6]>,
    /// Interface name (IFLA_IFNAME), UTF-8 with the wire NUL stripped.
    pub(crate) name: Option<String>,
    /// MTU (IFLA_MTU).
    pub(crate) mtu: Option<u32>,
    /// Transmit queue length (IFLA_TXQLEN).
    pub(crate) txqlen: Option<u32>,
    /// Operational state (IFLA_OPERSTATE).
    pub(crate) operstate: Option<OperState>,
}

impl LinkMessage {
    /// Create a new empty link message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the netlink header.
    pub fn nl_header(&self) -> &NlMsgHdr {
        &self.nl_header
    }

    /// Get the fixed ifinfomsg header.
    pub fn header(&self) -> &IfInfoMsg {
        &self.header
    }

    /// Get the address family.
    pub fn family(&self) -> u16 {
        self.header.ifi_family
    }

    /// Get the device type (ARPHRD_*).
    pub fn device_type(&self) -> u16 {
        self.header.ifi_type
    }

    /// Get the interface index.
    pub fn ifindex(&self) -> u32 {
        self.header.ifi_index as u32
    }

    /// Get the interface flags.
    pub fn flags(&self) -> u32 {
        self.header.ifi_flags
    }

    /// Get the change mask.
    pub fn change_mask(&self) -> u32 {
        self.header.ifi_change
    }

    /// Get the interface name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Get the interface name, or a default placeholder.
    pub fn name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(default)
    }

    /// Get the hardware address.
    pub fn hardware_address(&self) -> Option<&[u8; 6]> {
        self.hardware_address.as_ref()
    }

    /// Get the broadcast address.
    pub fn broadcast_address(&self) -> Option<&[u8; 6]> {
        self.broadcast_address.as_ref()
    }

    /// Get the MTU.
    pub fn mtu(&self) -> Option<u32> {
        self.mtu
    }

    /// Get the transmit queue length.
    pub fn txqlen(&self) -> Option<u32> {
        self.txqlen
    }

    /// Get the operational state.
    pub fn operstate(&self) -> Option<OperState> {
        self.operstate
    }

    /// Format the hardware address as a MAC string.
    pub fn mac_address(&self) -> Option<String> {
        self.hardware_address.as_ref().map(parse::format_mac)
    }

    /// Check if the interface is up.
    pub fn is_up(&self) -> bool {
        self.header.ifi_flags & 0x1 != 0 // IFF_UP
    }

    /// Check if the interface is running (lower layer up).
    pub fn is_running(&self) -> bool {
        self.header.ifi_flags & 0x40 != 0 // IFF_RUNNING
    }

    /// Check if the interface is a loopback.
    pub fn is_loopback(&self) -> bool {
        self.header.ifi_flags & 0x8 != 0 // IFF_LOOPBACK
    }

    /// Parse the payload of an RTM_NEWLINK/RTM_DELLINK message.
    pub(crate) fn parse(
        nl_header: NlMsgHdr,
        payload: &[u8],
        endian: Endianness,
    ) -> Result<Self> {
        let mut input = payload;
        let header = IfInfoMsg::parse(&mut input, endian)?;

        let mut msg = LinkMessage {
            nl_header,
            header,
            ..Default::default()
        };

        while !input.is_empty() {
            let (kind, value) = match parse_attr(&mut input, endian) {
                Ok(attr) => attr,
                Err(_) => {
                    debug!(
                        ifindex = msg.ifindex(),
                        "malformed link attribute, keeping partial message"
                    );
                    break;
                }
            };
            match kind & NLA_TYPE_MASK {
                attr_ids::IFLA_ADDRESS => {
                    if let Some(mac) = attr::get::mac(value) {
                        msg.hardware_address = Some(mac);
                    }
                }
                attr_ids::IFLA_BROADCAST => {
                    if let Some(mac) = attr::get::mac(value) {
                        msg.broadcast_address = Some(mac);
                    }
                }
                attr_ids::IFLA_IFNAME => {
                    if let Some(name) = attr::get::string(value) {
                        msg.name = Some(name.to_string());
                    }
                }
                attr_ids::IFLA_MTU => {
                    if let Some(mtu) = attr::get::u32(value, endian) {
                        msg.mtu = Some(mtu);
                    }
                }
                attr_ids::IFLA_TXQLEN => {
                    if let Some(txqlen) = attr::get::u32(value, endian) {
                        msg.txqlen = Some(txqlen);
                    }
                }
                attr_ids::IFLA_OPERSTATE => {
                    if let Some(state) = attr::get::u8(value) {
                        msg.operstate = Some(OperState::from(state));
                    }
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

        let mut sub = Vec::with_capacity(IfInfoMsg::SIZE);
        self.header.write_to(&mut sub, endian);
        builder.append_bytes(&sub);

        if let Some(ref mac) = self.hardware_address {
            builder.append_attr(attr_ids::IFLA_ADDRESS, mac);
        }
        if let Some(ref mac) = self.broadcast_address {
            builder.append_attr(attr_ids::IFLA_BROADCAST, mac);
        }
        if let Some(ref name) = self.name {
            builder.append_attr_str(attr_ids::IFLA_IFNAME, name);
        }
        if let Some(mtu) = self.mtu {
            builder.append_attr_u32(attr_ids::IFLA_MTU, mtu);
        }
        if let Some(txqlen) = self.txqlen {
            builder.append_attr_u32(attr_ids::IFLA_TXQLEN, txqlen);
        }
        if let Some(state) = self.operstate {
            builder.append_attr_u8(attr_ids::IFLA_OPERSTATE, state as u8);
        }

        builder.finish()
    }
}

impl fmt::Display for LinkMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}:", self.ifindex(), self.name_or("?"))?;
        if let Some(mtu) = self.mtu {
            write!(f, " mtu {}", mtu)?;
        }
        if let Some(state) = self.operstate {
            write!(f, " state {}", state.name())?;
        }
        if let Some(mac) = self.mac_address() {
            write!(f, " link/ether {}", mac)?;
        }
        Ok(())
    }
}

/// Builder for constructing LinkMessage.
#[derive(Debug, Clone)]
pub struct LinkMessageBuilder {
    msg: LinkMessage,
}

impl LinkMessageBuilder {
    /// Create a new builder for an RTM_NEWLINK message.
    pub fn new() -> Self {
        Self {
            msg: LinkMessage {
                nl_header: NlMsgHdr::new(NlMsgType::RTM_NEWLINK, 0),
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
    pub fn ifindex(mut self, index: i32) -> Self {
        self.msg.header.ifi_index = index;
        self
    }

    /// Set the device type.
    pub fn device_type(mut self, ifi_type: u16) -> Self {
        self.msg.header.ifi_type = ifi_type;
        self
    }

    /// Set the interface flags.
    pub fn flags(mut self, flags: u32) -> Self {
        self.msg.header.ifi_flags = flags;
        self
    }

    /// Set the change mask.
    pub fn change(mut self, change: u32) -> Self {
        self.msg.header.ifi_change = change;
        self
    }

    /// Set the interface name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.msg.name = Some(name.into());
        self
    }

    /// Set the MTU.
    pub fn mtu(mut self, mtu: u32) -> Self {
        self.msg.mtu = Some(mtu);
        self
    }

    /// Set the hardware address.
    pub fn hardware_address(mut self, mac: [u8; 6]) -> Self {
        self.msg.hardware_address = Some(mac);
        self
    }

    /// Set the TX queue length.
    pub fn txqlen(mut self, txqlen: u32) -> Self {
        self.msg.txqlen = Some(txqlen);
        self
    }

    /// Build the message.
    pub fn build(self) -> LinkMessage {
        self.msg
    }
}

impl Default for LinkMessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}
