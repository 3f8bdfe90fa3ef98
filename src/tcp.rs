use crate::endian::{read_u16, read_u32, read_u8};
use crate::error::DecodeError;


#[derive(Clone)]
pub struct Tcp<'a> {
    data: &'a [u8],
}

impl<'a> Tcp<'a> {
    pub const MIN_HEADER_SIZE   : usize = 20;
    pub const MIN_DATA_OFFSET   : u8    = 5;

    pub const SOURCE_PORT_OFFSET          : usize = 0;
    pub const DESTINATION_PORT_OFFSET     : usize = 2;
    pub const SEQUENCE_NUMBER_OFFSET      : usize = 4;
    pub const ACKNOWLEDGMENT_NUMBER_OFFSET: usize = 8;
    pub const DATA_OFFSET_OFFSET          : usize = 12;
    pub const FLAGS_OFFSET                : usize = 13;
    pub const WINDOW_SIZE_OFFSET          : usize = 14;
    pub const CHECK_SUM_OFFSET            : usize = 16;
    pub const URGENT_POINTER_OFFSET       : usize = 18;

    // Fixed fields are inside the 20 bytes checked by `from_bytes`.
    fn u8(&self, i: usize)  -> u8  { read_u8(self.data, i).unwrap_or_default() }
    fn u16(&self, i: usize) -> u16 { read_u16(self.data, i).unwrap_or_default() }
    fn u32(&self, i: usize) -> u32 { read_u32(self.data, i).unwrap_or_default() }

    pub fn source_port(&self)      -> u16 { self.u16(Self::SOURCE_PORT_OFFSET) }
    pub fn destination_port(&self) -> u16 { self.u16(Self::DESTINATION_PORT_OFFSET) }

    pub fn sequence_number(&self)        -> u32 { self.u32(Self::SEQUENCE_NUMBER_OFFSET) }
    pub fn acknowledgment_number(&self)  -> u32 { self.u32(Self::ACKNOWLEDGMENT_NUMBER_OFFSET) }

    /// Header length in 32-bit words (`doff`).
    pub fn data_offset(&self) -> u8 { (self.u8(Self::DATA_OFFSET_OFFSET) & 0b1111_0000) >> 4 }

    pub fn cwr(&self) -> bool { self.flag(0b1000_0000) }
    pub fn ece(&self) -> bool { self.flag(0b0100_0000) }
    pub fn urg(&self) -> bool { self.flag(0b0010_0000) }
    pub fn ack(&self) -> bool { self.flag(0b0001_0000) }
    pub fn psh(&self) -> bool { self.flag(0b0000_1000) }
    pub fn rst(&self) -> bool { self.flag(0b0000_0100) }
    pub fn syn(&self) -> bool { self.flag(0b0000_0010) }
    pub fn fin(&self) -> bool { self.flag(0b0000_0001) }

    pub fn window_size(&self)    -> u16 { self.u16(Self::WINDOW_SIZE_OFFSET) }
    pub fn check_sum(&self)      -> u16 { self.u16(Self::CHECK_SUM_OFFSET) }
    pub fn urgent_pointer(&self) -> u16 { self.u16(Self::URGENT_POINTER_OFFSET) }

    pub fn header_size(&self) -> usize { self.data_offset() as usize * 4 }

    /// Captured bytes after the header. May include link-layer padding; the
    /// IP total length decides how much of it is real segment data.
    pub fn raw_payload(&self) -> &'a [u8] {
        &self.data[self.header_size()..]
    }

    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::MIN_HEADER_SIZE {
            return Err(DecodeError::Truncated { layer: "TCP", needed: Self::MIN_HEADER_SIZE, available: data.len() });
        }

        let me = Self { data };

        if me.data_offset() < Self::MIN_DATA_OFFSET {
            return Err(DecodeError::Malformed { layer: "TCP", reason: "data offset below 5 words" });
        }
        if me.header_size() > data.len() {
            return Err(DecodeError::Truncated { layer: "TCP", needed: me.header_size(), available: data.len() });
        }

        Ok(me)
    }

    fn flag(&self, mask: u8) -> bool {
        self.u8(Self::FLAGS_OFFSET) & mask != 0
    }
}


impl<'a> std::fmt::Debug for Tcp<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Tcp")
            .field("source_port", &self.source_port())
            .field("destination_port", &self.destination_port())
            .field("sequence_number", &self.sequence_number())
            .field("acknowledgment_number", &self.acknowledgment_number())
            .field("data_offset", &self.data_offset())
            .field("syn", &self.syn())
            .field("ack", &self.ack())
            .field("fin", &self.fin())
            .field("rst", &self.rst())
            .field("window_size", &self.window_size())
            .finish()
    }
}
