use crate::endian::read_u16;
use crate::error::DecodeError;


#[derive(Clone)]
pub struct Udp<'a> {
    data: &'a [u8],
}

impl<'a> Udp<'a> {
    pub const HEADER_SIZE: usize = 8;

    pub const SOURCE_PORT_OFFSET     : usize = 0;
    pub const DESTINATION_PORT_OFFSET: usize = 2;
    pub const LENGTH_OFFSET          : usize = 4;
    pub const CHECK_SUM_OFFSET       : usize = 6;

    fn u16(&self, i: usize) -> u16 { read_u16(self.data, i).unwrap_or_default() }

    pub fn source_port(&self)      -> u16 { self.u16(Self::SOURCE_PORT_OFFSET) }
    pub fn destination_port(&self) -> u16 { self.u16(Self::DESTINATION_PORT_OFFSET) }
    /// Datagram length, header included.
    pub fn length(&self)           -> u16 { self.u16(Self::LENGTH_OFFSET) }
    pub fn check_sum(&self)        -> u16 { self.u16(Self::CHECK_SUM_OFFSET) }

    pub fn declared_payload_length(&self) -> usize {
        self.length() as usize - Self::HEADER_SIZE
    }

    pub fn raw_payload(&self) -> &'a [u8] {
        &self.data[Self::HEADER_SIZE..]
    }

    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::HEADER_SIZE {
            return Err(DecodeError::Truncated { layer: "UDP", needed: Self::HEADER_SIZE, available: data.len() });
        }

        let me = Self { data };

        if (me.length() as usize) < Self::HEADER_SIZE {
            return Err(DecodeError::Malformed { layer: "UDP", reason: "length shorter than header" });
        }

        Ok(me)
    }
}


impl<'a> std::fmt::Debug for Udp<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Udp")
            .field("source_port", &self.source_port())
            .field("destination_port", &self.destination_port())
            .field("length", &self.length())
            .field("check_sum", &self.check_sum())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_expected_fields() {
        let data = [0x00, 0x35, 0x30, 0x39, 0x00, 0x0a, 0x00, 0x00, 0xde, 0xad];
        let datagram = Udp::from_bytes(&data).unwrap();
        assert_eq!(datagram.source_port(), 53);
        assert_eq!(datagram.destination_port(), 12345);
        assert_eq!(datagram.length(), 10);
        assert_eq!(datagram.declared_payload_length(), 2);
        assert_eq!(datagram.raw_payload(), &[0xde, 0xad]);
    }

    #[test]
    fn rejects_length_shorter_than_header() {
        let data = [0x00, 0x35, 0x30, 0x39, 0x00, 0x07, 0x00, 0x00];
        assert!(matches!(Udp::from_bytes(&data), Err(DecodeError::Malformed { .. })));
    }

    #[test]
    fn rejects_short_buffers() {
        assert!(matches!(Udp::from_bytes(&[0; 7]), Err(DecodeError::Truncated { .. })));
    }
}
