//! Live capture session: one libpcap handle, one filter, one frame handler.
//!
//! The session is driven through chained calls:
//!
//! ```no_run
//! # use nscap::session::CaptureSession;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = CaptureSession::open("eth0")?;
//! session
//!     .compile("udp or tcp or icmp")
//!     .install_filter()
//!     .set_handler(|frame| !frame.data.is_empty())
//!     .run(Some(10));
//!
//! if !session.is_valid() {
//!     session.print_error();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! A failing step does not return early. It records a [`SessionError`], moves
//! the session to [`SessionState::Errored`] and turns every later call into a
//! no-op, so a chain can always be written to the end and checked once.
//! [`CaptureSession::error`] tells which step failed.

use crate::error::{CaptureError, SessionError};

use chrono::{DateTime, Utc};
use pcap::{Activated, Active, BpfProgram, Capture, Packet};

use std::fmt;
use std::io::{self, Write};


/// How a live interface is opened.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub snaplen: i32,
    pub promiscuous: bool,
    pub timeout_ms: i32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            snaplen: 65535,
            promiscuous: true,
            timeout_ms: 1,
        }
    }
}


/// One captured link-layer frame, borrowed from the capture buffer until the
/// next frame is requested.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub data: &'a [u8],
    /// Length on the wire; larger than `data.len()` when the snapshot length cut it.
    pub wire_len: u32,
    pub captured_at: Option<DateTime<Utc>>,
}

impl<'a> Frame<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, wire_len: data.len() as u32, captured_at: None }
    }

    pub fn from_packet(packet: Packet<'a>) -> Self {
        let ts = packet.header.ts;
        Self {
            data: packet.data,
            wire_len: packet.header.len,
            captured_at: DateTime::<Utc>::from_timestamp(ts.tv_sec as i64, ts.tv_usec as u32 * 1000),
        }
    }
}


/// A filter expression that libpcap accepted.
pub struct CompiledFilter {
    expression: String,
    program: BpfProgram,
}

impl CompiledFilter {
    pub fn new(expression: &str, program: BpfProgram) -> Self {
        Self { expression: expression.to_string(), program }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Run the compiled program against a frame in user space.
    pub fn matches(&self, data: &[u8]) -> bool {
        self.program.filter(data)
    }
}

impl fmt::Debug for CompiledFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompiledFilter").field("expression", &self.expression).finish()
    }
}


/// Where a session gets its frames from. Implemented for every activated
/// `pcap::Capture`.
pub trait FrameSource {
    fn compile_filter(&mut self, expression: &str) -> Result<CompiledFilter, pcap::Error>;
    fn install_filter(&mut self, filter: &CompiledFilter) -> Result<(), pcap::Error>;
    /// Block until the next frame arrives or the read timeout expires.
    fn next_frame(&mut self) -> Result<Frame<'_>, pcap::Error>;
}

impl<T: Activated + ?Sized> FrameSource for Capture<T> {
    fn compile_filter(&mut self, expression: &str) -> Result<CompiledFilter, pcap::Error> {
        let program = self.compile(expression, true)?;
        Ok(CompiledFilter::new(expression, program))
    }

    fn install_filter(&mut self, filter: &CompiledFilter) -> Result<(), pcap::Error> {
        self.filter(filter.expression(), true)
    }

    fn next_frame(&mut self) -> Result<Frame<'_>, pcap::Error> {
        self.next_packet().map(Frame::from_packet)
    }
}


/// Decides whether a frame counts toward the capture limit.
pub type FrameHandler = Box<dyn FnMut(&Frame<'_>) -> bool>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Open,
    FilterCompiled,
    FilterInstalled,
    Looping,
    Closed,
    Errored,
}


pub struct CaptureSession<S = Capture<Active>> {
    source: S,
    filter: Option<CompiledFilter>,
    handler: FrameHandler,
    state: SessionState,
    error: Option<SessionError>,
    examined: u64,
    matched: u64,
}

impl CaptureSession<Capture<Active>> {
    /// Open `interface` in promiscuous mode with a 65535 byte snapshot length.
    pub fn open(interface: &str) -> Result<Self, CaptureError> {
        Self::open_with(interface, &CaptureConfig::default())
    }

    pub fn open_with(interface: &str, config: &CaptureConfig) -> Result<Self, CaptureError> {
        let capture = Capture::from_device(interface)
            .and_then(|capture| {
                capture
                    .promisc(config.promiscuous)
                    .snaplen(config.snaplen)
                    .timeout(config.timeout_ms)
                    .open()
            })
            .map_err(|source| CaptureError::Open { interface: interface.to_string(), source })?;

        tracing::info!(interface, snaplen = config.snaplen, promiscuous = config.promiscuous, "opened capture device");
        Ok(Self::from_source(capture))
    }
}

impl<S: FrameSource> CaptureSession<S> {
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            filter: None,
            handler: Box::new(|_| true),
            state: SessionState::Open,
            error: None,
            examined: 0,
            matched: 0,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }

    /// The chain's outcome as a `Result`.
    pub fn finish(&self) -> Result<(), &SessionError> {
        match &self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    pub fn filter(&self) -> Option<&CompiledFilter> {
        self.filter.as_ref()
    }

    /// Frames handed to the handler so far.
    pub fn examined(&self) -> u64 {
        self.examined
    }

    /// Frames the handler accepted so far.
    pub fn matched(&self) -> u64 {
        self.matched
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn compile(&mut self, expression: &str) -> &mut Self {
        if !self.is_valid() { return self; }

        match self.source.compile_filter(expression) {
            Ok(filter) => {
                tracing::debug!(expression, "compiled filter");
                self.filter = Some(filter);
                self.state = SessionState::FilterCompiled;
            }
            Err(source) => self.fail(SessionError::Compile { expression: expression.to_string(), source }),
        }
        self
    }

    pub fn install_filter(&mut self) -> &mut Self {
        if !self.is_valid() { return self; }

        let Some(filter) = self.filter.as_ref() else {
            self.fail(SessionError::MissingFilter);
            return self;
        };

        match self.source.install_filter(filter) {
            Ok(()) => {
                tracing::debug!(expression = filter.expression(), "installed filter");
                self.state = SessionState::FilterInstalled;
            }
            Err(source) => self.fail(SessionError::Install(source)),
        }
        self
    }

    pub fn set_handler<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&Frame<'_>) -> bool + 'static,
    {
        if !self.is_valid() { return self; }
        self.handler = Box::new(handler);
        self
    }

    /// Receive frames until the handler has accepted `limit` of them, or
    /// forever when `limit` is `None`. Read timeouts are retried; an offline
    /// source running dry ends the loop normally.
    pub fn run(&mut self, limit: Option<u32>) -> &mut Self {
        if !self.is_valid() { return self; }

        self.state = SessionState::Looping;
        tracing::info!(?limit, "capture loop started");

        let mut accepted: u32 = 0;
        while limit.map_or(true, |limit| accepted < limit) {
            let outcome = match self.source.next_frame() {
                Ok(frame) if frame.data.is_empty() => Ok(false),
                Ok(frame) => {
                    self.examined += 1;
                    Ok((self.handler)(&frame))
                }
                Err(error) => Err(error),
            };

            match outcome {
                Ok(true) => {
                    accepted += 1;
                    self.matched += 1;
                }
                Ok(false) => {}
                Err(pcap::Error::TimeoutExpired) => continue,
                Err(pcap::Error::NoMorePackets) => break,
                Err(error) => {
                    self.fail(SessionError::Receive(error));
                    return self;
                }
            }
        }

        tracing::info!(examined = self.examined, matched = self.matched, "capture loop finished");
        self.state = SessionState::Closed;
        self
    }

    /// Write the recorded failure, if any, to stderr.
    pub fn print_error(&self) {
        let _ = self.write_error(&mut io::stderr().lock());
    }

    pub fn write_error<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.error {
            Some(error) => writeln!(out, "{}", error),
            None => Ok(()),
        }
    }

    fn fail(&mut self, error: SessionError) {
        tracing::warn!(step = error.step(), %error, "capture session failed");
        self.error = Some(error);
        self.state = SessionState::Errored;
    }
}

impl<S> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        // The owned handle closes itself right after this.
        tracing::debug!(examined = self.examined, matched = self.matched, "closing capture session");
    }
}
