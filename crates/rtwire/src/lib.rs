//! Wire-format codec for Linux rtnetlink (`NETLINK_ROUTE`) messages.
//!
//! This crate decodes and encodes the byte buffers a userspace network
//! stack exchanges with the kernel over a netlink socket: interface
//! addresses, links, routes, multi-part dump markers, and the RDNSS
//! neighbor-discovery option carried by ICMPv6 Router Advertisements.
//! It owns no file descriptor — the socket lifecycle (open, bind, send,
//! the blocking receive loop that drains `NLM_F_MULTI` sequences until
//! `NLMSG_DONE`) belongs entirely to the caller; the codec only
//! consumes and produces byte buffers.
//!
//! Parsing is bounds-checked end to end and never panics on malformed
//! kernel data; failures come back as [`Error`] values for the caller
//! to log and skip. Byte order is an explicit parameter on every
//! operation because the live kernel interface is native-endian while
//! captured test vectors pin little-endian.
//!
//! # Quick start
//!
//! ```
//! use rtwire::{Endianness, Protocol, RtnlMessage};
//!
//! # fn drain(buf: &[u8]) -> rtwire::Result<()> {
//! let mut cursor = buf;
//! while !cursor.is_empty() {
//!     match RtnlMessage::parse(&mut cursor, Protocol::Route, Endianness::Native)? {
//!         RtnlMessage::Address(addr) => println!("{addr}"),
//!         RtnlMessage::Link(link) => println!("{link}"),
//!         RtnlMessage::Route(route) => println!("{route}"),
//!         RtnlMessage::Done(_) => break,
//!         RtnlMessage::Other(_) => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Encoding is the mirror image: build a typed message, then
//! `to_bytes` writes the sub-header and attributes and prepends a
//! header whose length field is computed from what was actually
//! written.

pub mod attr;
pub mod builder;
mod error;
#[cfg(test)]
mod fixtures;
pub mod message;
pub mod messages;
pub mod ndopt;
pub mod parse;
pub mod types;

pub use builder::MessageBuilder;
pub use error::{Error, Result};
pub use message::{NLMSG_HDRLEN, NlMsgHdr, NlMsgType, Protocol};
pub use messages::{
    AddressMessage, AddressMessageBuilder, LinkMessage, LinkMessageBuilder, RouteMessage,
    RouteMessageBuilder, RtnlMessage, RtnlMessageIter,
};
pub use ndopt::RdnssOption;
pub use parse::Endianness;
