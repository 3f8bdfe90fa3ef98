use crate::shared::ANY_PACKET_FILTER;

use clap::Parser;


/// nscap: capture live traffic and print ICMP, TCP and UDP summaries
#[derive(Parser, Debug)]
#[command(name = "nscap", version, about)]
pub struct Cli {
    /// Network interface to capture on (e.g. "eth0")
    #[arg(short, long, default_value = "")]
    pub interface: String,

    /// Stop after this many frames were decoded and printed (default: never stop)
    #[arg(short, long)]
    pub count: Option<u32>,

    /// BPF filter expression; "all" means ICMP, TCP and UDP
    #[arg(short, long, default_value = ANY_PACKET_FILTER)]
    pub filter: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn interface(&self) -> Option<&str> {
        Some(self.interface.as_str()).filter(|name| !name.is_empty())
    }

    pub fn filter_expression(&self) -> &str {
        if self.filter == "all" { ANY_PACKET_FILTER } else { &self.filter }
    }

    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
