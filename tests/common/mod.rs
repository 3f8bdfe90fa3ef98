#![allow(dead_code)]

use nscap::session::{CompiledFilter, Frame, FrameSource};
use pcap::{Capture, Linktype};

use std::collections::VecDeque;


pub const SOURCE_IP: [u8; 4] = [192, 0, 2, 1];
pub const DESTINATION_IP: [u8; 4] = [198, 51, 100, 7];

pub fn ethernet(ether_type: u16, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0x02, 0, 0, 0, 0, 0x01, 0x02, 0, 0, 0, 0, 0x02];
    frame.extend_from_slice(&ether_type.to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

pub fn ipv4(protocol: u8, transport: &[u8]) -> Vec<u8> {
    let mut packet = vec![0x45, 0, 0, 0, 0, 0, 0x40, 0, 64, protocol, 0, 0];
    packet[2..4].copy_from_slice(&((20 + transport.len()) as u16).to_be_bytes());
    packet.extend_from_slice(&SOURCE_IP);
    packet.extend_from_slice(&DESTINATION_IP);
    packet.extend_from_slice(transport);
    packet
}

pub fn udp_frame(source: u16, destination: u16, payload: &[u8]) -> Vec<u8> {
    let mut datagram = Vec::new();
    datagram.extend_from_slice(&source.to_be_bytes());
    datagram.extend_from_slice(&destination.to_be_bytes());
    datagram.extend_from_slice(&((8 + payload.len()) as u16).to_be_bytes());
    datagram.extend_from_slice(&[0, 0]);
    datagram.extend_from_slice(payload);
    ethernet(0x0800, &ipv4(17, &datagram))
}

pub fn tcp_frame(source: u16, destination: u16, payload: &[u8]) -> Vec<u8> {
    let mut segment = vec![0; 20];
    segment[0..2].copy_from_slice(&source.to_be_bytes());
    segment[2..4].copy_from_slice(&destination.to_be_bytes());
    segment[12] = 5 << 4;
    segment[13] = 0b0001_1000;
    segment.extend_from_slice(payload);
    ethernet(0x0800, &ipv4(6, &segment))
}

pub fn icmp_frame(icmp_type: u8) -> Vec<u8> {
    ethernet(0x0800, &ipv4(1, &[icmp_type, 0, 0, 0, 0, 1, 0, 1]))
}

/// An ARP request: not IP at all.
pub fn arp_frame() -> Vec<u8> {
    let mut arp = vec![0, 1, 0x08, 0, 6, 4, 0, 1];
    arp.extend_from_slice(&[0; 20]);
    ethernet(0x0806, &arp)
}


pub enum Step {
    Frame(Vec<u8>),
    Timeout,
    Fail(&'static str),
}

/// Replays a fixed script of frames and read outcomes. Filters are compiled by
/// libpcap on a dead Ethernet handle and applied in user space once installed.
#[derive(Default)]
pub struct ScriptedSource {
    script: VecDeque<Step>,
    current: Vec<u8>,
    installed: Option<CompiledFilter>,
    pub pulled: usize,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Self {
        Self { script: steps.into_iter().collect(), ..Self::default() }
    }

    pub fn frames(frames: impl IntoIterator<Item = Vec<u8>>) -> Self {
        Self::new(frames.into_iter().map(Step::Frame))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn remaining_frames(&self) -> impl Iterator<Item = &[u8]> {
        self.script.iter().filter_map(|step| match step {
            Step::Frame(data) => Some(data.as_slice()),
            _ => None,
        })
    }
}

impl FrameSource for ScriptedSource {
    fn compile_filter(&mut self, expression: &str) -> Result<CompiledFilter, pcap::Error> {
        let mut dead = Capture::dead(Linktype::ETHERNET)?;
        dead.compile_filter(expression)
    }

    fn install_filter(&mut self, filter: &CompiledFilter) -> Result<(), pcap::Error> {
        self.installed = Some(self.compile_filter(filter.expression())?);
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Frame<'_>, pcap::Error> {
        loop {
            let step = self.script.pop_front().ok_or(pcap::Error::NoMorePackets)?;
            self.pulled += 1;
            match step {
                Step::Frame(data) => {
                    if self.installed.as_ref().map_or(true, |filter| filter.matches(&data)) {
                        self.current = data;
                        return Ok(Frame::new(&self.current));
                    }
                }
                Step::Timeout => return Err(pcap::Error::TimeoutExpired),
                Step::Fail(message) => return Err(pcap::Error::PcapError(message.to_string())),
            }
        }
    }
}
