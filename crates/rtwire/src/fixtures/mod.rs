//! Netlink message fixtures for testing.
//!
//! Pre-captured little-endian messages, complete with their 16-byte
//! netlink headers, so parsing and byte-exact round-trips can be tested
//! without network access. The fixtures are functions returning Vec<u8>
//! to keep the parser honest about alignment.

/// RTM_NEWADDR for fe80::2c41:5cff:fe09:6665/64 on interface 30.
pub fn addr_newaddr_v6() -> Vec<u8> {
    vec![
        // nlmsghdr: len=72, type=RTM_NEWADDR (20), flags=0, seq=0, pid=0
        0x48, 0x00, 0x00, 0x00, //
        0x14, 0x00, //
        0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        // ifaddrmsg: family=AF_INET6, prefixlen=64, flags=0x80, scope=0xfd, index=30
        0x0a, 0x40, 0x80, 0xfd, //
        0x1e, 0x00, 0x00, 0x00, //
        // IFA_ADDRESS = fe80::2c41:5cff:fe09:6665
        0x14, 0x00, // len = 20
        0x01, 0x00, // type = IFA_ADDRESS (1)
        0xfe, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x2c, 0x41, 0x5c, 0xff, 0xfe, 0x09, 0x66, 0x65, //
        // IFA_CACHEINFO: preferred=3600, valid=7200, cstamp=28714, tstamp=28741
        0x14, 0x00, // len = 20
        0x06, 0x00, // type = IFA_CACHEINFO (6)
        0x10, 0x0e, 0x00, 0x00, //
        0x20, 0x1c, 0x00, 0x00, //
        0x2a, 0x70, 0x00, 0x00, //
        0x45, 0x70, 0x00, 0x00, //
        // IFA_FLAGS = 0x80 (IFA_F_PERMANENT)
        0x08, 0x00, // len = 8
        0x08, 0x00, // type = IFA_FLAGS (8)
        0x80, 0x00, 0x00, 0x00,
    ]
}

/// RTM_NEWROUTE for the IPv4 default route via 192.168.1.1.
pub fn route_default_v4() -> Vec<u8> {
    vec![
        // nlmsghdr: len=52, type=RTM_NEWROUTE (24), flags=0, seq=0, pid=0
        0x34, 0x00, 0x00, 0x00, //
        0x18, 0x00, //
        0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        // rtmsg: family=AF_INET, dst_len=0, src_len=0, tos=0,
        // table=RT_TABLE_MAIN (254), protocol=RTPROT_STATIC (4),
        // scope=RT_SCOPE_UNIVERSE, type=RTN_UNICAST
        0x02, 0x00, 0x00, 0x00, //
        0xfe, 0x04, 0x00, 0x01, //
        0x00, 0x00, 0x00, 0x00, // flags = 0
        // RTA_OIF = 2
        0x08, 0x00, // len = 8
        0x04, 0x00, // type = RTA_OIF (4)
        0x02, 0x00, 0x00, 0x00, //
        // RTA_GATEWAY = 192.168.1.1
        0x08, 0x00, // len = 8
        0x05, 0x00, // type = RTA_GATEWAY (5)
        0xc0, 0xa8, 0x01, 0x01, //
        // RTA_PRIORITY = 100
        0x08, 0x00, // len = 8
        0x06, 0x00, // type = RTA_PRIORITY (6)
        0x64, 0x00, 0x00, 0x00,
    ]
}

/// RTM_NEWLINK with a multi-byte UTF-8 interface name.
pub fn link_newlink_utf8() -> Vec<u8> {
    vec![
        // nlmsghdr: len=80, type=RTM_NEWLINK (16), flags=0, seq=0, pid=0
        0x50, 0x00, 0x00, 0x00, //
        0x10, 0x00, //
        0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        // ifinfomsg: family=0 (padded), type=1 (ARPHRD_ETHER), index=3,
        // flags=0x1003 (UP|BROADCAST|MULTICAST), change=0
        0x00, 0x00, //
        0x01, 0x00, //
        0x03, 0x00, 0x00, 0x00, //
        0x03, 0x10, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        // IFLA_ADDRESS = aa:bb:cc:dd:ee:ff
        0x0a, 0x00, // len = 10
        0x01, 0x00, // type = IFLA_ADDRESS (1)
        0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff, 0x00, 0x00, // MAC + padding
        // IFLA_BROADCAST = ff:ff:ff:ff:ff:ff
        0x0a, 0x00, // len = 10
        0x02, 0x00, // type = IFLA_BROADCAST (2)
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, // MAC + padding
        // IFLA_IFNAME = "тест0" (nine UTF-8 bytes)
        0x0e, 0x00, // len = 14
        0x03, 0x00, // type = IFLA_IFNAME (3)
        0xd1, 0x82, 0xd0, 0xb5, 0xd1, 0x81, 0xd1, 0x82, 0x30, // "тест0"
        0x00, 0x00, 0x00, // NUL + padding
        // IFLA_MTU = 1500
        0x08, 0x00, // len = 8
        0x04, 0x00, // type = IFLA_MTU (4)
        0xdc, 0x05, 0x00, 0x00,
    ]
}

/// RTM_NEWROUTE whose gateway is an IPv4-mapped IPv6 literal while the
/// rtmsg family is AF_INET6 — must be rejected as a whole.
pub fn route_v6_mapped_gateway() -> Vec<u8> {
    vec![
        // nlmsghdr: len=48, type=RTM_NEWROUTE (24)
        0x30, 0x00, 0x00, 0x00, //
        0x18, 0x00, //
        0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0x00, 0x00, //
        // rtmsg: family=AF_INET6, table=254, protocol=RTPROT_RA (9), type=unicast
        0x0a, 0x00, 0x00, 0x00, //
        0xfe, 0x09, 0x00, 0x01, //
        0x00, 0x00, 0x00, 0x00, //
        // RTA_GATEWAY = ::ffff:192.0.2.1
        0x14, 0x00, // len = 20
        0x05, 0x00, // type = RTA_GATEWAY (5)
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x00, 0x00, 0xff, 0xff, 0xc0, 0x00, 0x02, 0x01,
    ]
}

/// Same shape with the mapped literal in RTA_DST instead.
pub fn route_v6_mapped_dst() -> Vec<u8> {
    let mut data = route_v6_mapped_gateway();
    data[30] = 0x01; // attribute type: RTA_GATEWAY -> RTA_DST
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{NlMsgType, Protocol};
    use crate::messages::{RtnlMessage, RtnlMessageIter};
    use crate::parse::Endianness;

    const LE: Endianness = Endianness::Little;

    fn parse_one(data: &[u8]) -> RtnlMessage {
        let mut input = data;
        let msg = RtnlMessage::parse(&mut input, Protocol::Route, LE).expect("parse failed");
        assert!(input.is_empty(), "message left {} bytes behind", input.len());
        msg
    }

    #[test]
    fn test_parse_addr_newaddr_v6() {
        let RtnlMessage::Address(addr) = parse_one(&addr_newaddr_v6()) else {
            panic!("expected an address message");
        };

        assert_eq!(addr.nl_header().nlmsg_len, 72);
        assert_eq!(addr.nl_header().nlmsg_type, NlMsgType::RTM_NEWADDR);
        assert_eq!(addr.family(), libc::AF_INET6 as u8);
        assert_eq!(addr.prefix_len(), 64);
        assert_eq!(addr.header().ifa_scope, 0xfd);
        assert_eq!(addr.ifindex(), 30);
        assert_eq!(
            addr.ip_address().map(|a| a.to_string()),
            Some("fe80::2c41:5cff:fe09:6665".to_string())
        );

        let info = addr.cache_info().expect("cache info");
        assert_eq!(info.ifa_prefered, 3600);
        assert_eq!(info.ifa_valid, 7200);
        assert_eq!(info.cstamp, 28714);
        assert_eq!(info.tstamp, 28741);

        assert_eq!(addr.flags(), 0x80);
        assert!(addr.is_permanent());
    }

    #[test]
    fn test_addr_roundtrip_exact_bytes() {
        let data = addr_newaddr_v6();
        let RtnlMessage::Address(addr) = parse_one(&data) else {
            panic!("expected an address message");
        };
        assert_eq!(addr.to_bytes(LE), data);
    }

    #[test]
    fn test_parse_route_default_v4() {
        let RtnlMessage::Route(route) = parse_one(&route_default_v4()) else {
            panic!("expected a route message");
        };

        assert!(route.is_ipv4());
        assert!(route.is_default());
        assert_eq!(route.table_id(), 254);
        assert_eq!(route.oif(), Some(2));
        assert_eq!(route.priority(), Some(100));
        assert_eq!(
            route.gateway().map(|a| a.to_string()),
            Some("192.168.1.1".to_string())
        );
    }

    #[test]
    fn test_route_roundtrip_exact_bytes() {
        let data = route_default_v4();
        let RtnlMessage::Route(route) = parse_one(&data) else {
            panic!("expected a route message");
        };
        assert_eq!(route.to_bytes(LE), data);
    }

    #[test]
    fn test_parse_link_utf8_name() {
        let RtnlMessage::Link(link) = parse_one(&link_newlink_utf8()) else {
            panic!("expected a link message");
        };

        assert_eq!(link.ifindex(), 3);
        assert_eq!(link.name(), Some("тест0"));
        assert_eq!(link.mtu(), Some(1500));
        assert_eq!(link.mac_address().as_deref(), Some("aa:bb:cc:dd:ee:ff"));
        assert!(link.is_up());
    }

    #[test]
    fn test_link_roundtrip_exact_bytes() {
        let data = link_newlink_utf8();
        let RtnlMessage::Link(link) = parse_one(&data) else {
            panic!("expected a link message");
        };
        assert_eq!(link.to_bytes(LE), data);
    }

    #[test]
    fn test_multi_message_buffer() {
        // Two messages packed back to back, parsed from one cursor with
        // no explicit slicing in between.
        let mut buf = route_default_v4();
        buf.extend_from_slice(&addr_newaddr_v6());

        let mut input = buf.as_slice();
        let first = RtnlMessage::parse(&mut input, Protocol::Route, LE).unwrap();
        assert!(matches!(first, RtnlMessage::Route(_)));
        assert_eq!(input.len(), addr_newaddr_v6().len());

        let second = RtnlMessage::parse(&mut input, Protocol::Route, LE).unwrap();
        assert!(matches!(second, RtnlMessage::Address(_)));
        assert!(input.is_empty());
    }

    #[test]
    fn test_message_iter_drains_buffer() {
        let mut buf = link_newlink_utf8();
        buf.extend_from_slice(&route_default_v4());
        buf.extend_from_slice(&addr_newaddr_v6());

        let messages: Vec<_> = RtnlMessageIter::new(&buf, Protocol::Route, LE)
            .collect::<crate::Result<_>>()
            .unwrap();
        assert_eq!(messages.len(), 3);
        assert!(matches!(messages[0], RtnlMessage::Link(_)));
        assert!(matches!(messages[1], RtnlMessage::Route(_)));
        assert!(matches!(messages[2], RtnlMessage::Address(_)));
    }

    #[test]
    fn test_mapped_gateway_rejected() {
        let data = route_v6_mapped_gateway();
        let mut input = data.as_slice();
        let err = RtnlMessage::parse(&mut input, Protocol::Route, LE).unwrap_err();
        assert!(err.is_family_mismatch());
    }

    #[test]
    fn test_mapped_dst_rejected() {
        let data = route_v6_mapped_dst();
        let mut input = data.as_slice();
        let err = RtnlMessage::parse(&mut input, Protocol::Route, LE).unwrap_err();
        assert!(err.is_family_mismatch());
    }

    #[test]
    fn test_display_rendering() {
        let RtnlMessage::Address(addr) = parse_one(&addr_newaddr_v6()) else {
            panic!("expected an address message");
        };
        assert_eq!(
            addr.to_string(),
            "inet6 fe80::2c41:5cff:fe09:6665/64 dev 30 scope link permanent"
        );

        let RtnlMessage::Route(route) = parse_one(&route_default_v4()) else {
            panic!("expected a route message");
        };
        assert_eq!(
            route.to_string(),
            "default via 192.168.1.1 dev 2 proto static scope global type unicast metric 100"
        );
    }
}
