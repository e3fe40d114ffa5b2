//! Fixed-layout sub-headers embedded after the netlink header.
//!
//! Each struct is encoded and decoded field by field so that a
//! reordered or resized field is a compile-time break, not a silent
//! wire corruption.

pub mod addr;
pub mod link;
pub mod route;

pub use addr::{IfAddrMsg, IfaCacheinfo, Scope, ifa_flags};
pub use link::{IfInfoMsg, OperState};
pub use route::{RouteProtocol, RouteType, RtMsg, RtaCacheinfo};
