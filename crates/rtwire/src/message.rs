//! Netlink message header and well-known constants.

use crate::error::{Error, Result};
use crate::parse::{self, Endianness, PResult};

/// Netlink message header alignment.
pub const NLMSG_ALIGNTO: usize = 4;

/// Align a length to NLMSG_ALIGNTO boundary.
#[inline]
pub const fn nlmsg_align(len: usize) -> usize {
    (len + NLMSG_ALIGNTO - 1) & !(NLMSG_ALIGNTO - 1)
}

/// Size of the netlink message header.
pub const NLMSG_HDRLEN: usize = 16;

/// Netlink message header (mirrors struct nlmsghdr).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NlMsgHdr {
    /// Length of message including header.
    pub nlmsg_len: u32,
    /// Message type.
    pub nlmsg_type: u16,
    /// Additional flags.
    pub nlmsg_flags: u16,
    /// Sequence number.
    pub nlmsg_seq: u32,
    /// Sending process port ID.
    pub nlmsg_pid: u32,
}

impl NlMsgHdr {
    /// Create a new message header.
    ///
    /// The length starts at the header size; encoders recompute it from
    /// the payload actually written.
    pub fn new(msg_type: u16, flags: u16) -> Self {
        Self {
            nlmsg_len: NLMSG_HDRLEN as u32,
            nlmsg_type: msg_type,
            nlmsg_flags: flags,
            nlmsg_seq: 0,
            nlmsg_pid: 0,
        }
    }

    /// Set the sequence number.
    pub fn with_seq(mut self, seq: u32) -> Self {
        self.nlmsg_seq = seq;
        self
    }

    /// Set the port ID.
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.nlmsg_pid = pid;
        self
    }

    /// Get the payload length (total length minus header).
    pub fn payload_len(&self) -> usize {
        (self.nlmsg_len as usize).saturating_sub(NLMSG_HDRLEN)
    }

    /// Check if this is an error message.
    pub fn is_error(&self) -> bool {
        self.nlmsg_type == NlMsgType::ERROR
    }

    /// Check if this is a done message.
    pub fn is_done(&self) -> bool {
        self.nlmsg_type == NlMsgType::DONE
    }

    /// Check if this message has the multi flag.
    pub fn is_multi(&self) -> bool {
        self.nlmsg_flags & NLM_F_MULTI != 0
    }

    fn parse_fields(input: &mut &[u8], endian: Endianness) -> PResult<Self> {
        let nlmsg_len = parse::parse_u32(input, endian)?;
        let nlmsg_type = parse::parse_u16(input, endian)?;
        let nlmsg_flags = parse::parse_u16(input, endian)?;
        let nlmsg_seq = parse::parse_u32(input, endian)?;
        let nlmsg_pid = parse::parse_u32(input, endian)?;
        Ok(Self {
            nlmsg_len,
            nlmsg_type,
            nlmsg_flags,
            nlmsg_seq,
            nlmsg_pid,
        })
    }

    /// Parse the 16 header bytes in the given byte order.
    ///
    /// The cursor is only advanced on success; a buffer shorter than the
    /// header consumes nothing.
    pub fn parse(input: &mut &[u8], endian: Endianness) -> Result<Self> {
        let actual = input.len();
        let mut cur = *input;
        match Self::parse_fields(&mut cur, endian) {
            Ok(header) => {
                *input = cur;
                Ok(header)
            }
            Err(_) => Err(Error::Truncated {
                expected: NLMSG_HDRLEN,
                actual,
            }),
        }
    }

    /// Write the 16 header bytes in the given byte order.
    pub fn write_to(&self, buf: &mut Vec<u8>, endian: Endianness) {
        parse::put_u32(buf, self.nlmsg_len, endian);
        parse::put_u16(buf, self.nlmsg_type, endian);
        parse::put_u16(buf, self.nlmsg_flags, endian);
        parse::put_u32(buf, self.nlmsg_seq, endian);
        parse::put_u32(buf, self.nlmsg_pid, endian);
    }
}

/// Standard netlink message types.
pub struct NlMsgType;

impl NlMsgType {
    /// No operation, message must be discarded.
    pub const NOOP: u16 = 1;
    /// Error message or ACK.
    pub const ERROR: u16 = 2;
    /// End of multipart message.
    pub const DONE: u16 = 3;
    /// Data lost, request resend.
    pub const OVERRUN: u16 = 4;

    // Link messages
    pub const RTM_NEWLINK: u16 = 16;
    pub const RTM_DELLINK: u16 = 17;
    pub const RTM_GETLINK: u16 = 18;

    // Address messages
    pub const RTM_NEWADDR: u16 = 20;
    pub const RTM_DELADDR: u16 = 21;
    pub const RTM_GETADDR: u16 = 22;

    // Route messages
    pub const RTM_NEWROUTE: u16 = 24;
    pub const RTM_DELROUTE: u16 = 25;
    pub const RTM_GETROUTE: u16 = 26;
}

/// Netlink message flags.
pub const NLM_F_REQUEST: u16 = 0x01;
pub const NLM_F_MULTI: u16 = 0x02;
pub const NLM_F_ACK: u16 = 0x04;
pub const NLM_F_ECHO: u16 = 0x08;

// Modifiers to GET request
pub const NLM_F_ROOT: u16 = 0x100;
pub const NLM_F_MATCH: u16 = 0x200;
pub const NLM_F_ATOMIC: u16 = 0x400;
pub const NLM_F_DUMP: u16 = NLM_F_ROOT | NLM_F_MATCH;

// Modifiers to NEW request
pub const NLM_F_REPLACE: u16 = 0x100;
pub const NLM_F_EXCL: u16 = 0x200;
pub const NLM_F_CREATE: u16 = 0x400;
pub const NLM_F_APPEND: u16 = 0x800;

/// Netlink protocol families.
///
/// The dispatcher takes the family the receive buffer came from; only
/// `Route` carries typed message decoding, every other family's
/// messages come back as opaque headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Routing/device hook (links, addresses, routes).
    Route,
    /// Generic netlink.
    Generic,
    /// Netfilter.
    Netfilter,
    /// Kernel connector.
    Connector,
    /// Kobject uevent.
    KobjectUevent,
}

impl Protocol {
    /// The raw NETLINK_* protocol number.
    pub fn as_raw(self) -> i32 {
        match self {
            Protocol::Route => libc::NETLINK_ROUTE,
            Protocol::Generic => libc::NETLINK_GENERIC,
            Protocol::Netfilter => libc::NETLINK_NETFILTER,
            Protocol::Connector => libc::NETLINK_CONNECTOR,
            Protocol::KobjectUevent => libc::NETLINK_KOBJECT_UEVENT,
        }
    }
}
