//! Turns a raw Ethernet frame into the handful of fields the printer shows.

use crate::error::DecodeError;
use crate::icmp::Icmp;
use crate::ipv4::IPv4;
use crate::tcp::Tcp;
use crate::udp::Udp;
use crate::visitor::Visitor;

use std::fmt;
use std::net::Ipv4Addr;


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportKind {
    Icmp,
    Tcp,
    Udp,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Icmp => "ICMP",
            Self::Tcp => "TCP",
            Self::Udp => "UDP",
        })
    }
}


/// Ports and payload of a TCP segment or UDP datagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub source_port: u16,
    pub destination_port: u16,
    /// Exactly `declared_len` bytes; trailing link-layer padding is cut off.
    pub payload: &'a [u8],
    pub declared_len: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transport<'a> {
    Icmp { icmp_type: u8 },
    Tcp(Segment<'a>),
    Udp(Segment<'a>),
}


/// Per-frame decode result. Borrows the payload from the captured frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedSummary<'a> {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub transport: Transport<'a>,
}

impl<'a> DecodedSummary<'a> {
    pub fn kind(&self) -> TransportKind {
        match self.transport {
            Transport::Icmp { .. } => TransportKind::Icmp,
            Transport::Tcp(_) => TransportKind::Tcp,
            Transport::Udp(_) => TransportKind::Udp,
        }
    }

    pub fn segment(&self) -> Option<&Segment<'a>> {
        match &self.transport {
            Transport::Tcp(segment) | Transport::Udp(segment) => Some(segment),
            Transport::Icmp { .. } => None,
        }
    }

    pub fn source_port(&self) -> Option<u16> { self.segment().map(|s| s.source_port) }
    pub fn destination_port(&self) -> Option<u16> { self.segment().map(|s| s.destination_port) }
    pub fn payload(&self) -> &'a [u8] {
        match &self.transport {
            Transport::Tcp(segment) | Transport::Udp(segment) => segment.payload,
            Transport::Icmp { .. } => &[],
        }
    }

    pub fn icmp_type(&self) -> Option<u8> {
        match self.transport {
            Transport::Icmp { icmp_type } => Some(icmp_type),
            _ => None,
        }
    }
}


/// Builds a [`DecodedSummary`] while visiting the layers of a frame.
#[derive(Default)]
pub struct Decoder;

impl<'a> Visitor<'a, DecodedSummary<'a>> for Decoder {
    fn visit_icmp(&mut self, packet: &IPv4<'a>, message: &Icmp<'a>) -> Result<DecodedSummary<'a>, DecodeError> {
        Ok(summary(packet, Transport::Icmp { icmp_type: message.icmp_type() }))
    }

    fn visit_tcp(&mut self, packet: &IPv4<'a>, segment: &Tcp<'a>) -> Result<DecodedSummary<'a>, DecodeError> {
        // tot_len - ihl*4 - doff*4
        let declared_len = packet
            .declared_payload_length()
            .checked_sub(segment.header_size())
            .ok_or(DecodeError::Malformed { layer: "TCP", reason: "total length shorter than headers" })?;

        Ok(summary(packet, Transport::Tcp(Segment {
            source_port: segment.source_port(),
            destination_port: segment.destination_port(),
            payload: declared_payload("TCP", segment.raw_payload(), declared_len)?,
            declared_len,
        })))
    }

    fn visit_udp(&mut self, packet: &IPv4<'a>, datagram: &Udp<'a>) -> Result<DecodedSummary<'a>, DecodeError> {
        let declared_len = datagram.declared_payload_length();
        if declared_len + Udp::HEADER_SIZE > packet.declared_payload_length() {
            return Err(DecodeError::Malformed { layer: "UDP", reason: "length exceeds IP payload" });
        }

        Ok(summary(packet, Transport::Udp(Segment {
            source_port: datagram.source_port(),
            destination_port: datagram.destination_port(),
            payload: declared_payload("UDP", datagram.raw_payload(), declared_len)?,
            declared_len,
        })))
    }
}

fn summary<'a>(packet: &IPv4<'a>, transport: Transport<'a>) -> DecodedSummary<'a> {
    DecodedSummary { source: packet.source(), destination: packet.destination(), transport }
}

// Frames cut short by the snapshot length are rejected, never shown half-read.
fn declared_payload<'a>(layer: &'static str, captured: &'a [u8], declared_len: usize) -> Result<&'a [u8], DecodeError> {
    captured
        .get(..declared_len)
        .ok_or(DecodeError::Truncated { layer, needed: declared_len, available: captured.len() })
}


/// Decode a captured frame, reporting why it was rejected.
pub fn try_decode(frame: &[u8]) -> Result<DecodedSummary<'_>, DecodeError> {
    Decoder.visit_frame(frame)
}

/// Decode a captured frame. `None` for anything that is not well-formed
/// ICMP, TCP or UDP over IPv4 over Ethernet.
pub fn decode(frame: &[u8]) -> Option<DecodedSummary<'_>> {
    try_decode(frame).ok()
}
