//! Netlink attribute (rtattr/nlattr) handling.
//!
//! Attributes are type-length-value records padded to a 4-byte
//! boundary. Parsing here is strict: a declared length below the header
//! size or past the end of the region is an error, and the caller
//! decides whether that invalidates the whole message (address, route)
//! or merely ends the attribute walk (link).

use crate::error::{Error, Result};
use crate::parse::{self, Endianness};

/// Netlink attribute alignment.
pub const NLA_ALIGNTO: usize = 4;

/// Align a length to NLA_ALIGNTO boundary.
#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Size of the attribute header.
pub const NLA_HDRLEN: usize = 4;

/// Total aligned size of an attribute with the given payload.
#[inline]
pub const fn nla_size(payload_len: usize) -> usize {
    nla_align(NLA_HDRLEN + payload_len)
}

/// Attribute type flags.
pub const NLA_F_NESTED: u16 = 1 << 15;
pub const NLA_F_NET_BYTEORDER: u16 = 1 << 14;
pub const NLA_TYPE_MASK: u16 = !(NLA_F_NESTED | NLA_F_NET_BYTEORDER);

/// Parse one attribute, returning (raw type, payload).
///
/// The cursor advances past the payload and its alignment padding;
/// padding is clamped at the end of the region so a final unpadded
/// attribute still parses. The raw type keeps any NLA_F_* flag bits —
/// mask with [`NLA_TYPE_MASK`] before matching.
pub fn parse_attr<'a>(input: &mut &'a [u8], endian: Endianness) -> Result<(u16, &'a [u8])> {
    let region = *input;
    if region.len() < NLA_HDRLEN {
        return Err(Error::Truncated {
            expected: NLA_HDRLEN,
            actual: region.len(),
        });
    }
    let len = parse::read_u16([region[0], region[1]], endian) as usize;
    let kind = parse::read_u16([region[2], region[3]], endian);
    if len < NLA_HDRLEN {
        return Err(Error::InvalidAttribute(format!(
            "declared length {} below attribute header size",
            len
        )));
    }
    let payload_len = len - NLA_HDRLEN;
    let rest = &region[NLA_HDRLEN..];
    if payload_len > rest.len() {
        return Err(Error::Truncated {
            expected: payload_len,
            actual: rest.len(),
        });
    }
    let payload = &rest[..payload_len];
    let rest = &rest[payload_len..];
    let padding = (nla_align(len) - len).min(rest.len());
    *input = &rest[padding..];
    Ok((kind, payload))
}

/// Parse every attribute in the region.
///
/// One malformed TLV fails the whole call: attributes are not
/// independently recoverable, since a bad length leaves the position of
/// every following attribute unknown.
pub fn parse_attrs<'a>(
    input: &mut &'a [u8],
    endian: Endianness,
) -> Result<Vec<(u16, &'a [u8])>> {
    let mut attrs = Vec::new();
    while !input.is_empty() {
        attrs.push(parse_attr(input, endian)?);
    }
    Ok(attrs)
}

/// Lenient accessors over a parsed attribute payload.
///
/// A width mismatch yields `None` so the caller can substitute its own
/// default; it is deliberately not a parse failure.
pub mod get {
    use super::Endianness;
    use crate::parse;

    /// Payload as text: strip one trailing NUL, then decode UTF-8.
    pub fn string(data: &[u8]) -> Option<&str> {
        parse::stripped_string(data)
    }

    /// Payload as a u8, if it is exactly one byte.
    pub fn u8(data: &[u8]) -> Option<u8> {
        match data {
            [value] => Some(*value),
            _ => None,
        }
    }

    /// Payload as a u16 in the given byte order, if exactly two bytes.
    pub fn u16(data: &[u8], endian: Endianness) -> Option<u16> {
        let bytes: [u8; 2] = data.try_into().ok()?;
        Some(parse::read_u16(bytes, endian))
    }

    /// Payload as a u32 in the given byte order, if exactly four bytes.
    pub fn u32(data: &[u8], endian: Endianness) -> Option<u32> {
        let bytes: [u8; 4] = data.try_into().ok()?;
        Some(parse::read_u32(bytes, endian))
    }

    /// Payload as a 6-byte hardware address, if exactly six bytes.
    pub fn mac(data: &[u8]) -> Option<[u8; 6]> {
        data.try_into().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attr_with_padding() {
        // len=7 (3-byte payload), type=3, payload "lo\0", one pad byte,
        // then a second attribute.
        let data = [
            0x07, 0x00, 0x03, 0x00, b'l', b'o', 0x00, 0x00, // "lo\0" + pad
            0x08, 0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00, // mtu = 1024
        ];
        let mut input = data.as_ref();

        let (kind, payload) = parse_attr(&mut input, Endianness::Little).unwrap();
        assert_eq!(kind, 3);
        assert_eq!(payload, b"lo\0");

        let (kind, payload) = parse_attr(&mut input, Endianness::Little).unwrap();
        assert_eq!(kind, 4);
        assert_eq!(get::u32(payload, Endianness::Little), Some(1024));
        assert!(input.is_empty());
    }

    #[test]
    fn test_parse_attr_unpadded_tail() {
        // Final attribute whose padding falls past the end of the region.
        let data = [0x05, 0x00, 0x10, 0x00, 0x02];
        let mut input = data.as_ref();
        let (kind, payload) = parse_attr(&mut input, Endianness::Little).unwrap();
        assert_eq!(kind, 0x10);
        assert_eq!(payload, &[0x02]);
        assert!(input.is_empty());
    }

    #[test]
    fn test_parse_attr_rejects_short_length() {
        let data = [0x03, 0x00, 0x01, 0x00];
        let mut input = data.as_ref();
        assert!(parse_attr(&mut input, Endianness::Little).is_err());
    }

    #[test]
    fn test_parse_attr_rejects_overrun() {
        // Declares 12 payload bytes, buffer holds 4.
        let data = [0x10, 0x00, 0x01, 0x00, 0xaa, 0xbb, 0xcc, 0xdd];
        let mut input = data.as_ref();
        let err = parse_attr(&mut input, Endianness::Little).unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_parse_attrs_fails_whole_region() {
        // First attribute is fine, second is truncated.
        let data = [
            0x08, 0x00, 0x01, 0x00, 0x01, 0x02, 0x03, 0x04, //
            0x20, 0x00, 0x02, 0x00, 0xff, 0xff,
        ];
        let mut input = data.as_ref();
        assert!(parse_attrs(&mut input, Endianness::Little).is_err());
    }

    #[test]
    fn test_parse_attrs_collects_all() {
        let data = [
            0x08, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, //
            0x08, 0x00, 0x02, 0x00, 0x02, 0x00, 0x00, 0x00,
        ];
        let mut input = data.as_ref();
        let attrs = parse_attrs(&mut input, Endianness::Little).unwrap();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[0].0, 1);
        assert_eq!(attrs[1].0, 2);
    }

    #[test]
    fn test_lenient_accessors_require_exact_width() {
        assert_eq!(get::u32(&[1, 0, 0, 0], Endianness::Little), Some(1));
        assert_eq!(get::u32(&[1, 0, 0], Endianness::Little), None);
        assert_eq!(get::u32(&[1, 0, 0, 0, 0], Endianness::Little), None);
        assert_eq!(get::u16(&[0x2c, 0x01], Endianness::Little), Some(300));
        assert_eq!(get::u8(&[5]), Some(5));
        assert_eq!(get::u8(&[]), None);
        assert_eq!(get::mac(&[1, 2, 3, 4, 5, 6]), Some([1, 2, 3, 4, 5, 6]));
        assert_eq!(get::mac(&[1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn test_nla_align() {
        assert_eq!(nla_align(1), 4);
        assert_eq!(nla_align(4), 4);
        assert_eq!(nla_align(5), 8);
        assert_eq!(nla_size(4), 8);
        assert_eq!(nla_size(5), 12);
    }
}
