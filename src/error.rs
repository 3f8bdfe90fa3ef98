/// Why a captured frame could not be turned into a summary.
///
/// None of these are fatal: the capture loop skips the frame and carries on.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{layer} data too small, expected at least {needed}, got {available}")]
    Truncated { layer: &'static str, needed: usize, available: usize },
    #[error("malformed {layer} header: {reason}")]
    Malformed { layer: &'static str, reason: &'static str },
    #[error("unsupported ether type 0x{0:04x}")]
    UnsupportedEtherType(u16),
    #[error("unsupported transport protocol {0}")]
    UnsupportedTransport(u8),
}

impl DecodeError {
    /// Traffic outside the decoder's scope, as opposed to a damaged frame.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedEtherType(_) | Self::UnsupportedTransport(_))
    }
}


/// Failures acquiring a capture resource. These end the program.
#[derive(thiserror::Error, Debug)]
pub enum CaptureError {
    #[error("pcap_findalldevs: {0}")]
    Enumeration(#[source] pcap::Error),
    #[error("pcap_open_live(): {source}")]
    Open {
        interface: String,
        #[source]
        source: pcap::Error,
    },
}


/// Failures recorded by a [`CaptureSession`](crate::session::CaptureSession)
/// while chaining. Each one is terminal for the session.
#[derive(thiserror::Error, Debug)]
pub enum SessionError {
    #[error("pcap_compile: {source}")]
    Compile {
        expression: String,
        #[source]
        source: pcap::Error,
    },
    #[error("pcap_setfilter: {0}")]
    Install(#[source] pcap::Error),
    #[error("pcap_setfilter: no compiled filter to install")]
    MissingFilter,
    #[error("pcap_next_ex: {0}")]
    Receive(#[source] pcap::Error),
}

impl SessionError {
    /// The chained step that failed.
    pub fn step(&self) -> &'static str {
        match self {
            Self::Compile { .. } => "compile",
            Self::Install(_) | Self::MissingFilter => "install_filter",
            Self::Receive(_) => "run",
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_frames_are_told_apart_from_damaged_ones() {
        assert!(DecodeError::UnsupportedEtherType(0x86dd).is_unsupported());
        assert!(DecodeError::UnsupportedTransport(47).is_unsupported());
        assert!(!DecodeError::Truncated { layer: "Ethernet", needed: 14, available: 3 }.is_unsupported());
    }

    #[test]
    fn session_errors_name_their_step() {
        assert_eq!(SessionError::MissingFilter.step(), "install_filter");
        let error = SessionError::Compile {
            expression: "tcp and".to_string(),
            source: pcap::Error::PcapError("syntax error".to_string()),
        };
        assert_eq!(error.step(), "compile");
        assert!(error.to_string().starts_with("pcap_compile: "));
    }
}
