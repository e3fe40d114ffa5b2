//! Strongly-typed rtnetlink messages and the type dispatcher.
//!
//! # Example
//!
//! ```ignore
//! use rtwire::{Endianness, Protocol, RtnlMessage};
//!
//! let mut cursor = &buf[..];
//! while !cursor.is_empty() {
//!     match RtnlMessage::parse(&mut cursor, Protocol::Route, Endianness::Native)? {
//!         RtnlMessage::Address(addr) => println!("{addr}"),
//!         RtnlMessage::Done(_) => break,
//!         other => println!("{:?}", other.header()),
//!     }
//! }
//! ```

mod address;
mod link;
mod route;

pub use address::{AddressMessage, AddressMessageBuilder};
pub use link::{LinkMessage, LinkMessageBuilder};
pub use route::{RouteMessage, RouteMessageBuilder};

use tracing::trace;

use crate::error::{Error, Result};
use crate::message::{NLMSG_HDRLEN, NlMsgHdr, NlMsgType, Protocol};
use crate::parse::Endianness;

/// A parsed rtnetlink message.
///
/// Closed union over every payload this crate decodes; callers match
/// exhaustively instead of downcasting. `Done` is the terminal marker
/// of a multi-part dump; `Other` wraps message types the codec does not
/// model, which is not an error — the header is kept so receive loops
/// can still correlate sequence numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum RtnlMessage {
    /// RTM_NEWADDR / RTM_DELADDR.
    Address(AddressMessage),
    /// RTM_NEWLINK / RTM_DELLINK.
    Link(LinkMessage),
    /// RTM_NEWROUTE / RTM_DELROUTE.
    Route(RouteMessage),
    /// NLMSG_DONE: end of a multi-part dump.
    Done(NlMsgHdr),
    /// Any other message type; only the header is retained.
    Other(NlMsgHdr),
}

impl RtnlMessage {
    /// Parse one message from the front of `input`.
    ///
    /// When fewer than 16 bytes remain the call fails without consuming
    /// anything. On success the cursor sits exactly at the header's
    /// declared length (bounded by what the buffer holds), whatever the
    /// payload decoder consumed, so a buffer carrying several packed
    /// messages parses by calling this in a loop — no explicit slicing
    /// required. On failure the cursor position is unspecified and the
    /// caller must not keep reading from this buffer.
    pub fn parse(input: &mut &[u8], protocol: Protocol, endian: Endianness) -> Result<Self> {
        let full = *input;
        if full.len() < NLMSG_HDRLEN {
            return Err(Error::Truncated {
                expected: NLMSG_HDRLEN,
                actual: full.len(),
            });
        }

        let mut cur = full;
        let header = NlMsgHdr::parse(&mut cur, endian)?;
        let declared = header.nlmsg_len as usize;
        if declared < NLMSG_HDRLEN {
            return Err(Error::InvalidMessage(format!(
                "declared length {} below header size",
                declared
            )));
        }

        // The declared length is untrusted; bound every read to what
        // the buffer actually holds.
        let end = declared.min(full.len());
        let payload = &full[NLMSG_HDRLEN..end];
        *input = &full[end..];

        if header.nlmsg_type == NlMsgType::DONE {
            return Ok(RtnlMessage::Done(header));
        }
        if protocol != Protocol::Route {
            return Ok(RtnlMessage::Other(header));
        }

        match header.nlmsg_type {
            NlMsgType::RTM_NEWADDR | NlMsgType::RTM_DELADDR => Ok(RtnlMessage::Address(
                AddressMessage::parse(header, payload, endian)?,
            )),
            NlMsgType::RTM_NEWLINK | NlMsgType::RTM_DELLINK => Ok(RtnlMessage::Link(
                LinkMessage::parse(header, payload, endian)?,
            )),
            NlMsgType::RTM_NEWROUTE | NlMsgType::RTM_DELROUTE => Ok(RtnlMessage::Route(
                RouteMessage::parse(header, payload, endian)?,
            )),
            other => {
                trace!(msg_type = other, "unrecognized rtnetlink message type");
                Ok(RtnlMessage::Other(header))
            }
        }
    }

    /// The netlink header common to every variant.
    pub fn header(&self) -> &NlMsgHdr {
        match self {
            RtnlMessage::Address(m) => m.nl_header(),
            RtnlMessage::Link(m) => m.nl_header(),
            RtnlMessage::Route(m) => m.nl_header(),
            RtnlMessage::Done(h) | RtnlMessage::Other(h) => h,
        }
    }

    /// Check if this is the terminal marker of a multi-part dump.
    pub fn is_done(&self) -> bool {
        matches!(self, RtnlMessage::Done(_))
    }
}

/// Iterator over the messages packed into one receive buffer.
///
/// Yields until the buffer is exhausted or a message fails to parse;
/// an error is yielded once and iteration stops, since the cursor is
/// unreliable past a malformed message.
pub struct RtnlMessageIter<'a> {
    data: &'a [u8],
    protocol: Protocol,
    endian: Endianness,
    failed: bool,
}

impl<'a> RtnlMessageIter<'a> {
    /// Iterate over `data` as a packed sequence of messages.
    pub fn new(data: &'a [u8], protocol: Protocol, endian: Endianness) -> Self {
        Self {
            data,
            protocol,
            endian,
            failed: false,
        }
    }
}

impl Iterator for RtnlMessageIter<'_> {
    type Item = Result<RtnlMessage>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.data.is_empty() {
            return None;
        }
        match RtnlMessage::parse(&mut self.data, self.protocol, self.endian) {
            Ok(msg) => Some(Ok(msg)),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
