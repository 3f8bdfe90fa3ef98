//! IPv4 header view (RFC 791).

use crate::endian::{read_array, read_u16, read_u8};
use crate::error::DecodeError;
use crate::shared::*;
use crate::{icmp, tcp, udp};

use std::net::Ipv4Addr;
use std::ops::Range;


// https://en.wikipedia.org/wiki/List_of_IP_protocol_numbers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    ICMP,
    TCP,
    UDP,
    Other(u8),
}

impl Protocol {
    pub fn from_value(value: u8) -> Self {
        match value {
            TRANSPORT_PROTOCOL_ICMP => Self::ICMP,
            TRANSPORT_PROTOCOL_TCP  => Self::TCP,
            TRANSPORT_PROTOCOL_UDP  => Self::UDP,
            _ => Self::Other(value),
        }
    }
}

#[derive(Debug)]
pub enum Payload<'a> {
    Icmp(icmp::Icmp<'a>),
    Tcp(tcp::Tcp<'a>),
    Udp(udp::Udp<'a>),
    Unsupported(u8),
}


#[derive(Clone)]
pub struct IPv4<'a> {
    data: &'a [u8],
}

impl<'a> IPv4<'a> {
    pub const MIN_HEADER_SIZE           : usize = 20;
    pub const MIN_HEADER_LENGTH         : u8    = 5;

    pub const TOTAL_LENGTH_OFFSET       : usize = 2;
    pub const IDENTIFICATION_OFFSET     : usize = 4;
    pub const TTL_OFFSET                : usize = 8;
    pub const PROTOCOL_OFFSET           : usize = 9;
    pub const HEADER_CHECKSUM_OFFSET    : usize = 10;
    pub const SOURCE_ADDRESS_OFFSET     : Range<usize> = 12..16;
    pub const DESTINATION_ADDRESS_OFFSET: Range<usize> = 16..20;

    // Every fixed field lies inside the 20 bytes `from_bytes` guarantees.
    fn u8(&self, i: usize)  -> u8  { read_u8(self.data, i).unwrap_or_default() }
    fn u16(&self, i: usize) -> u16 { read_u16(self.data, i).unwrap_or_default() }

    pub fn version(&self)       -> u8 { (self.u8(0) & 0b1111_0000) >> 4 }
    /// Header length in 32-bit words (`ihl`).
    pub fn header_length(&self) -> u8 { self.u8(0) & 0b0000_1111 }
    pub fn header_size(&self)   -> usize { self.header_length() as usize * 4 }

    pub fn total_length(&self)    -> u16 { self.u16(Self::TOTAL_LENGTH_OFFSET) }
    pub fn identification(&self)  -> u16 { self.u16(Self::IDENTIFICATION_OFFSET) }
    pub fn time_to_live(&self)    -> u8  { self.u8(Self::TTL_OFFSET) }
    pub fn protocol(&self)        -> Protocol { Protocol::from_value(self.u8(Self::PROTOCOL_OFFSET)) }
    pub fn header_checksum(&self) -> u16 { self.u16(Self::HEADER_CHECKSUM_OFFSET) }

    pub fn source(&self) -> Ipv4Addr {
        Ipv4Addr::from(read_array::<4>(self.data, Self::SOURCE_ADDRESS_OFFSET.start).unwrap_or_default())
    }

    pub fn destination(&self) -> Ipv4Addr {
        Ipv4Addr::from(read_array::<4>(self.data, Self::DESTINATION_ADDRESS_OFFSET.start).unwrap_or_default())
    }

    /// Every captured byte after the header, including any link-layer padding.
    pub fn raw_payload(&self) -> &'a [u8] {
        &self.data[self.header_size()..]
    }

    /// Payload length the header claims: `total_length - ihl * 4`.
    pub fn declared_payload_length(&self) -> usize {
        self.total_length() as usize - self.header_size()
    }

    pub fn payload(&self) -> Result<Payload<'a>, DecodeError> {
        match self.protocol() {
            Protocol::ICMP => Ok(Payload::Icmp(icmp::Icmp::from_bytes(self.raw_payload())?)),
            Protocol::TCP  => Ok(Payload::Tcp(tcp::Tcp::from_bytes(self.raw_payload())?)),
            Protocol::UDP  => Ok(Payload::Udp(udp::Udp::from_bytes(self.raw_payload())?)),
            Protocol::Other(value) => Ok(Payload::Unsupported(value)),
        }
    }

    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DecodeError> {
        if data.len() < Self::MIN_HEADER_SIZE {
            return Err(DecodeError::Truncated { layer: "IPv4", needed: Self::MIN_HEADER_SIZE, available: data.len() });
        }

        let me = Self { data };

        if me.version() != 4 {
            return Err(DecodeError::Malformed { layer: "IPv4", reason: "version must be 4" });
        }
        if me.header_length() < Self::MIN_HEADER_LENGTH {
            return Err(DecodeError::Malformed { layer: "IPv4", reason: "header length below 5 words" });
        }
        if me.header_size() > data.len() {
            return Err(DecodeError::Truncated { layer: "IPv4", needed: me.header_size(), available: data.len() });
        }
        if (me.total_length() as usize) < me.header_size() {
            return Err(DecodeError::Malformed { layer: "IPv4", reason: "total length shorter than header" });
        }

        Ok(me)
    }
}


impl<'a> std::fmt::Debug for IPv4<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("IPv4")
            .field("header_length", &self.header_length())
            .field("total_length", &self.total_length())
            .field("identification", &self.identification())
            .field("time_to_live", &self.time_to_live())
            .field("protocol", &self.protocol())
            .field("header_checksum", &self.header_checksum())
            .field("source", &self.source())
            .field("destination", &self.destination())
            .finish()
    }
}
