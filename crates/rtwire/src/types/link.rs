//! Link (network interface) message types.

use crate::error::{Error, Result};
use crate::parse::{self, Endianness};

/// Interface info message (struct ifinfomsg).
///
/// The family occupies one byte on the wire, padded to 16 bits; it is
/// read and written as a single u16 field so captured pad bytes
/// round-trip exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IfInfoMsg {
    /// Address family (usually AF_UNSPEC), padded to 16 bits.
    pub ifi_family: u16,
    /// Device type (ARPHRD_*).
    pub ifi_type: u16,
    /// Interface index.
    pub ifi_index: i32,
    /// Device flags (IFF_*).
    pub ifi_flags: u32,
    /// Change mask.
    pub ifi_change: u32,
}

impl IfInfoMsg {
    /// Size of this structure on the wire.
    pub const SIZE: usize = 16;

    /// Create a new interface info message header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interface index.
    pub fn with_index(mut self, index: i32) -> Self {
        self.ifi_index = index;
        self
    }

    /// Set the device type.
    pub fn with_type(mut self, ifi_type: u16) -> Self {
        self.ifi_type = ifi_type;
        self
    }

    /// Set the device flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.ifi_flags = flags;
        self
    }

    /// Parse the fixed 16-byte record.
    pub fn parse(input: &mut &[u8], endian: Endianness) -> Result<Self> {
        let data = *input;
        if data.len() < Self::SIZE {
            return Err(Error::Truncated {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }
        let msg = Self {
            ifi_family: parse::read_u16(data[0..2].try_into().unwrap(), endian),
            ifi_type: parse::read_u16(data[2..4].try_into().unwrap(), endian),
            ifi_index: parse::read_u32(data[4..8].try_into().unwrap(), endian) as i32,
            ifi_flags: parse::read_u32(data[8..12].try_into().unwrap(), endian),
            ifi_change: parse::read_u32(data[12..16].try_into().unwrap(), endian),
        };
        *input = &data[Self::SIZE..];
        Ok(msg)
    }

    /// Write the fixed 16-byte record.
    pub fn write_to(&self, buf: &mut Vec<u8>, endian: Endianness) {
        parse::put_u16(buf, self.ifi_family, endian);
        parse::put_u16(buf, self.ifi_type, endian);
        parse::put_i32(buf, self.ifi_index, endian);
        parse::put_u32(buf, self.ifi_flags, endian);
        parse::put_u32(buf, self.ifi_change, endian);
    }
}

/// Interface operational state (IF_OPER_*).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OperState {
    Unknown = 0,
    NotPresent = 1,
    Down = 2,
    LowerLayerDown = 3,
    Testing = 4,
    Dormant = 5,
    Up = 6,
}

impl From<u8> for OperState {
    fn from(val: u8) -> Self {
        match val {
            1 => Self::NotPresent,
            2 => Self::Down,
            3 => Self::LowerLayerDown,
            4 => Self::Testing,
            5 => Self::Dormant,
            6 => Self::Up,
            _ => Self::Unknown,
        }
    }
}

impl OperState {
    /// Get the name of this state, as `ip link` prints it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::NotPresent => "NOT-PRESENT",
            Self::Down => "DOWN",
            Self::LowerLayerDown => "LOWERLAYERDOWN",
            Self::Testing => "TESTING",
            Self::Dormant => "DORMANT",
            Self::Up => "UP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ifinfomsg_roundtrip() {
        let header = IfInfoMsg::new()
            .with_index(3)
            .with_type(1)
            .with_flags(0x1003);
        let mut buf = Vec::new();
        header.write_to(&mut buf, Endianness::Little);
        assert_eq!(buf.len(), IfInfoMsg::SIZE);

        let mut input = buf.as_slice();
        let parsed = IfInfoMsg::parse(&mut input, Endianness::Little).unwrap();
        assert_eq!(parsed, header);
        assert!(input.is_empty());
    }

    #[test]
    fn test_ifinfomsg_truncated() {
        let data = [0u8; 15];
        let mut input = data.as_ref();
        assert!(IfInfoMsg::parse(&mut input, Endianness::Little).is_err());
    }

    #[test]
    fn test_operstate_names() {
        assert_eq!(OperState::from(6).name(), "UP");
        assert_eq!(OperState::from(2).name(), "DOWN");
        assert_eq!(OperState::from(99), OperState::Unknown);
    }
}
