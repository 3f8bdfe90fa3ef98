//! Live packet capture with a small protocol decoder.
//!
//! Frames come off a libpcap handle ([`session`]), get decoded down to their
//! IPv4 transport header ([`decode`]) and are printed as a short summary
//! ([`display`]). Only ICMP, TCP and UDP over IPv4 over Ethernet are decoded;
//! everything else is skipped.

pub mod cli;
pub mod decode;
pub mod device;
pub mod display;
pub mod endian;
pub mod error;
pub mod ethernet;
pub mod icmp;
pub mod ipv4;
pub mod session;
pub mod shared;
pub mod tcp;
pub mod udp;
pub mod visitor;

pub use decode::{decode, try_decode, DecodedSummary, TransportKind};
pub use error::{CaptureError, DecodeError, SessionError};
pub use session::{CaptureSession, Frame};
