use crate::endian::read_u8;
use crate::error::DecodeError;


/// ICMP message view. Only the type is required; nothing past the code is decoded.
#[derive(Clone)]
pub struct Icmp<'a> {
    data: &'a [u8],
}

impl<'a> Icmp<'a> {
    pub const TYPE_SIZE: usize = 1;

    pub const ECHO_REPLY  : u8 = 0;
    pub const ECHO_REQUEST: u8 = 8;

    pub fn icmp_type(&self) -> u8 { read_u8(self.data, 0).unwrap_or_default() }
    pub fn code(&self) -> Option<u8> { read_u8(self.data, 1) }

    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::TYPE_SIZE {
            return Err(DecodeError::Truncated { layer: "ICMP", needed: Self::TYPE_SIZE, available: data.len() });
        }
        Ok(Self { data })
    }
}


impl<'a> std::fmt::Debug for Icmp<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Icmp")
            .field("type", &self.icmp_type())
            .field("code", &self.code())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_type_and_code() {
        let message = Icmp::from_bytes(&[Icmp::ECHO_REQUEST, 0, 0xf7, 0xff]).unwrap();
        assert_eq!(message.icmp_type(), 8);
        assert_eq!(message.code(), Some(0));
    }

    #[test]
    fn type_alone_is_enough() {
        let message = Icmp::from_bytes(&[3]).unwrap();
        assert_eq!(message.icmp_type(), 3);
        assert_eq!(message.code(), None);
        assert!(Icmp::from_bytes(&[]).is_err());
    }
}
