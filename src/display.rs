use crate::decode::DecodedSummary;

use std::fmt::Write as _;
use std::io::{self, Write};


/// Payload bytes shown per frame.
pub const PAYLOAD_PREVIEW: usize = 16;


/// Format a summary the way it is printed to stdout, blank separator line first.
pub fn render(summary: &DecodedSummary<'_>) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out);
    let _ = writeln!(out, "Transport type: {}", summary.kind());
    let _ = writeln!(out, "Source IP: {}", summary.source);
    let _ = writeln!(out, "Destination IP: {}", summary.destination);

    if let Some(icmp_type) = summary.icmp_type() {
        let _ = writeln!(out, "ICMP type value: {}", icmp_type);
    }

    if let Some(segment) = summary.segment() {
        let _ = writeln!(out, "Source port: {}", segment.source_port);
        let _ = writeln!(out, "Destination port: {}", segment.destination_port);
        out.push_str("Payload:");
        for byte in segment.payload.iter().take(PAYLOAD_PREVIEW) {
            let _ = write!(out, " {:02x}", byte);
        }
        out.push('\n');
    }

    out
}


pub struct Printer<W: Write> {
    out: W,
}

impl Printer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print(&mut self, summary: &DecodedSummary<'_>) -> io::Result<()> {
        self.out.write_all(render(summary).as_bytes())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
