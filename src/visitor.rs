use crate::error::DecodeError;
use crate::ethernet::{self, Ethernet};
use crate::icmp::Icmp;
use crate::ipv4::{self, IPv4};
use crate::tcp::Tcp;
use crate::udp::Udp;


/// Walks a captured frame layer by layer. Implementors decide what to do with
/// each transport header; the link and network layers are dispatched here.
///
/// Every step works on a validated view, so a visitor never sees a header whose
/// declared length runs past the captured bytes.
pub trait Visitor<'a, T> {
    fn visit_frame(&mut self, frame: &'a [u8]) -> Result<T, DecodeError> {
        self.visit_ethernet(&Ethernet::from_bytes(frame)?)
    }

    fn visit_ethernet(&mut self, packet: &Ethernet<'a>) -> Result<T, DecodeError> {
        self.visit_ethernet_payload(&packet.payload()?)
    }

    fn visit_ethernet_payload(&mut self, payload: &ethernet::Payload<'a>) -> Result<T, DecodeError> {
        match payload {
            ethernet::Payload::IPv4(packet) => self.visit_ipv4(packet),
            ethernet::Payload::Unsupported(ether_type) => Err(DecodeError::UnsupportedEtherType(ether_type.code())),
        }
    }

    fn visit_ipv4(&mut self, packet: &IPv4<'a>) -> Result<T, DecodeError> {
        self.visit_ipv4_payload(packet, &packet.payload()?)
    }

    fn visit_ipv4_payload(&mut self, packet: &IPv4<'a>, payload: &ipv4::Payload<'a>) -> Result<T, DecodeError> {
        match payload {
            ipv4::Payload::Icmp(message) => self.visit_icmp(packet, message),
            ipv4::Payload::Tcp(segment) => self.visit_tcp(packet, segment),
            ipv4::Payload::Udp(datagram) => self.visit_udp(packet, datagram),
            ipv4::Payload::Unsupported(protocol) => Err(DecodeError::UnsupportedTransport(*protocol)),
        }
    }

    fn visit_icmp(&mut self, packet: &IPv4<'a>, message: &Icmp<'a>) -> Result<T, DecodeError>;
    fn visit_tcp(&mut self, packet: &IPv4<'a>, segment: &Tcp<'a>) -> Result<T, DecodeError>;
    fn visit_udp(&mut self, packet: &IPv4<'a>, datagram: &Udp<'a>) -> Result<T, DecodeError>;
}
