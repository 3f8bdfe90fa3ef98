//! Network byte order field readers.
//!
//! Every read is bounds-checked against the slice: a field that would reach
//! past the end of the captured bytes yields `None` instead of touching memory
//! outside the buffer.

use byteorder::{ByteOrder, NetworkEndian};


pub fn read_u8(data: &[u8], offset: usize) -> Option<u8> {
    data.get(offset).copied()
}

pub fn read_u16(data: &[u8], offset: usize) -> Option<u16> {
    field(data, offset, 2).map(NetworkEndian::read_u16)
}

pub fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    field(data, offset, 4).map(NetworkEndian::read_u32)
}

pub fn read_array<const C: usize>(data: &[u8], offset: usize) -> Option<[u8; C]> {
    let mut bytes = [0; C];
    bytes.copy_from_slice(field(data, offset, C)?);
    Some(bytes)
}

fn field(data: &[u8], offset: usize, width: usize) -> Option<&[u8]> {
    let end = offset.checked_add(width)?;
    data.get(offset..end)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_network_order() {
        let data = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(read_u16(&data, 0), Some(0x1234));
        assert_eq!(read_u16(&data, 2), Some(0x5678));
        assert_eq!(read_u32(&data, 0), Some(0x1234_5678));
        assert_eq!(read_u8(&data, 3), Some(0x78));
    }

    #[test]
    fn rejects_fields_past_the_end() {
        let data = [0x12, 0x34, 0x56];
        assert_eq!(read_u8(&data, 3), None);
        assert_eq!(read_u16(&data, 2), None);
        assert_eq!(read_u32(&data, 0), None);
        assert_eq!(read_u16(&data, usize::MAX), None);
    }

    #[test]
    fn reads_fixed_arrays() {
        let data = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(read_array::<6>(&data, 1), Some([2, 3, 4, 5, 6, 7]));
        assert_eq!(read_array::<6>(&data, 2), None);
    }
}
