//! Message builder for constructing netlink messages.

use crate::attr::{NLA_HDRLEN, nla_align};
use crate::message::{NLMSG_HDRLEN, NlMsgHdr, nlmsg_align};
use crate::parse::{self, Endianness};

/// Builder for a complete netlink message.
///
/// The header's length field is recomputed from the bytes actually
/// written when [`finish`](Self::finish) is called; callers never set
/// it by hand for well-formed output.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    buf: Vec<u8>,
    endian: Endianness,
}

impl MessageBuilder {
    /// Start a message with the given type and flags.
    pub fn new(msg_type: u16, flags: u16, endian: Endianness) -> Self {
        Self::with_header(NlMsgHdr::new(msg_type, flags), endian)
    }

    /// Start a message from an existing header.
    ///
    /// Type, flags, sequence and port ID are taken as-is; the length is
    /// recomputed on finish.
    pub fn with_header(header: NlMsgHdr, endian: Endianness) -> Self {
        let mut buf = Vec::with_capacity(64);
        header.write_to(&mut buf, endian);
        Self { buf, endian }
    }

    /// Current message length.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if the message is payload-free (header only).
    pub fn is_empty(&self) -> bool {
        self.buf.len() == NLMSG_HDRLEN
    }

    /// Append raw bytes, padded to message alignment.
    pub fn append_bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
        let aligned = nlmsg_align(self.buf.len());
        self.buf.resize(aligned, 0);
    }

    /// Append an attribute with the given type and payload.
    pub fn append_attr(&mut self, attr_type: u16, data: &[u8]) {
        parse::put_u16(&mut self.buf, (NLA_HDRLEN + data.len()) as u16, self.endian);
        parse::put_u16(&mut self.buf, attr_type, self.endian);
        self.buf.extend_from_slice(data);
        let aligned = nla_align(self.buf.len());
        self.buf.resize(aligned, 0);
    }

    /// Append a u8 attribute.
    pub fn append_attr_u8(&mut self, attr_type: u16, value: u8) {
        self.append_attr(attr_type, &[value]);
    }

    /// Append a u16 attribute.
    pub fn append_attr_u16(&mut self, attr_type: u16, value: u16) {
        let mut data = Vec::with_capacity(2);
        parse::put_u16(&mut data, value, self.endian);
        self.append_attr(attr_type, &data);
    }

    /// Append a u32 attribute.
    pub fn append_attr_u32(&mut self, attr_type: u16, value: u32) {
        let mut data = Vec::with_capacity(4);
        parse::put_u32(&mut data, value, self.endian);
        self.append_attr(attr_type, &data);
    }

    /// Append a NUL-terminated string attribute.
    pub fn append_attr_str(&mut self, attr_type: u16, value: &str) {
        let mut data = Vec::with_capacity(value.len() + 1);
        data.extend_from_slice(value.as_bytes());
        data.push(0);
        self.append_attr(attr_type, &data);
    }

    /// Finalize: patch the computed length into the header and return
    /// the message bytes.
    pub fn finish(mut self) -> Vec<u8> {
        let mut len_bytes = Vec::with_capacity(4);
        parse::put_u32(&mut len_bytes, self.buf.len() as u32, self.endian);
        self.buf[0..4].copy_from_slice(&len_bytes);
        self.buf
    }

    /// Get the current buffer for inspection.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{NLM_F_REQUEST, NlMsgType};

    #[test]
    fn test_empty_message_length() {
        let msg =
            MessageBuilder::new(NlMsgType::RTM_GETLINK, NLM_F_REQUEST, Endianness::Little).finish();
        assert_eq!(msg.len(), NLMSG_HDRLEN);

        let mut input = msg.as_slice();
        let header = NlMsgHdr::parse(&mut input, Endianness::Little).unwrap();
        assert_eq!(header.nlmsg_len as usize, NLMSG_HDRLEN);
        assert_eq!(header.nlmsg_type, NlMsgType::RTM_GETLINK);
    }

    #[test]
    fn test_length_covers_attributes() {
        let mut builder = MessageBuilder::new(NlMsgType::RTM_NEWLINK, 0, Endianness::Little);
        builder.append_attr_u32(4, 1500);
        builder.append_attr_str(3, "eth0");
        let msg = builder.finish();

        let mut input = msg.as_slice();
        let header = NlMsgHdr::parse(&mut input, Endianness::Little).unwrap();
        assert_eq!(header.nlmsg_len as usize, msg.len());
        // u32 attr is 8 bytes; "eth0\0" is 9, padded to 12.
        assert_eq!(msg.len(), NLMSG_HDRLEN + 8 + 12);
    }

    #[test]
    fn test_string_attr_is_nul_terminated_and_padded() {
        let mut builder = MessageBuilder::new(NlMsgType::RTM_NEWLINK, 0, Endianness::Little);
        builder.append_attr_str(3, "lo");
        let msg = builder.finish();

        let attr = &msg[NLMSG_HDRLEN..];
        assert_eq!(attr, &[0x07, 0x00, 0x03, 0x00, b'l', b'o', 0x00, 0x00]);
    }

    #[test]
    fn test_big_endian_header_patch() {
        let mut builder = MessageBuilder::new(1, 0, Endianness::Big);
        builder.append_attr_u16(2, 0x0102);
        let msg = builder.finish();
        assert_eq!(&msg[0..4], &[0x00, 0x00, 0x00, 0x18]);
        // Attribute header is also big-endian.
        assert_eq!(&msg[NLMSG_HDRLEN..NLMSG_HDRLEN + 4], &[0x00, 0x06, 0x00, 0x02]);
    }
}
