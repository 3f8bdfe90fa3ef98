/*
https://standards.ieee.org/ieee/802.3/10422/
*/


use crate::endian::{read_array, read_u16};
use crate::error::DecodeError;
use crate::ipv4;
use crate::shared::*;

use std::ops::Range;


pub const ADDRESS_SIZE     : usize = MacAddress::SIZE;
pub const ETHER_TYPE_SIZE  : usize = 2;
pub const HEADER_SIZE      : usize = ADDRESS_SIZE * 2 + ETHER_TYPE_SIZE;


#[derive(Debug)]
pub enum Payload<'a> {
    IPv4(ipv4::IPv4<'a>),
    Unsupported(EtherType),
}


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EtherType {
    IPv4,   //  0x0800  Internet Protocol version 4 (IPv4)
    ARP,    //  0x0806  Address Resolution Protocol (ARP)
    IPv6,   //  0x86DD  Internet Protocol Version 6 (IPv6)
    Unknown(u16),
}

impl EtherType {
    pub fn from_code(code: u16) -> Self {
        match code {
            NETWORK_PROTOCOL_IPv4 => Self::IPv4,
            NETWORK_PROTOCOL_ARP  => Self::ARP,
            NETWORK_PROTOCOL_IPv6 => Self::IPv6,
            _ => Self::Unknown(code),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::IPv4 => NETWORK_PROTOCOL_IPv4,
            Self::ARP  => NETWORK_PROTOCOL_ARP,
            Self::IPv6 => NETWORK_PROTOCOL_IPv6,
            Self::Unknown(code) => *code,
        }
    }
}


/// Read-only view over an Ethernet II frame as libpcap hands it over, i.e.
/// without preamble and without the trailing frame check sequence.
#[derive(Clone)]
pub struct Ethernet<'a> {
    data: &'a [u8],
}


impl<'a> Ethernet<'a> {
    pub const DEST_MAC_ADDRESS_OFFSET: Range<usize> = 0..6;
    pub const SRC_MAC_ADDRESS_OFFSET:  Range<usize> = 6..12;
    pub const ETHER_TYPE_OFFSET:       Range<usize> = 12..14;
    pub const PAYLOAD_OFFSET:                usize  = HEADER_SIZE;

    pub fn destination(&self) -> MacAddress { MacAddress::from_bytes(self.address(Self::DEST_MAC_ADDRESS_OFFSET.start)) }
    pub fn source(&self)      -> MacAddress { MacAddress::from_bytes(self.address(Self::SRC_MAC_ADDRESS_OFFSET.start))  }

    pub fn ether_type(&self) -> EtherType {
        EtherType::from_code(read_u16(self.data, Self::ETHER_TYPE_OFFSET.start).unwrap_or_default())
    }

    pub fn raw_payload(&self) -> &'a [u8] { &self.data[Self::PAYLOAD_OFFSET..] }

    pub fn payload(&self) -> Result<Payload<'a>, DecodeError> {
        match self.ether_type() {
            EtherType::IPv4 => Ok(Payload::IPv4(ipv4::IPv4::from_bytes(self.raw_payload())?)),
            other => Ok(Payload::Unsupported(other)),
        }
    }

    pub fn from_bytes(data: &'a [u8]) -> Result<Self, DecodeError> {
        if data.len() < HEADER_SIZE {
            return Err(DecodeError::Truncated { layer: "Ethernet", needed: HEADER_SIZE, available: data.len() });
        }

        Ok(Self { data })
    }

    // Both addresses sit inside the header length checked by `from_bytes`.
    fn address(&self, offset: usize) -> [u8; 6] {
        read_array(self.data, offset).unwrap_or_default()
    }
}


impl<'a> std::fmt::Debug for Ethernet<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Ethernet")
            .field("source", &self.source())
            .field("destination", &self.destination())
            .field("ether_type", &self.ether_type())
            .field("payload_size", &self.raw_payload().len())
            .finish()
    }
}
