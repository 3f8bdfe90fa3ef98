use clap::Parser;
use nscap::cli::Cli;
use nscap::decode::try_decode;
use nscap::device::DeviceList;
use nscap::display::Printer;
use nscap::session::{CaptureSession, Frame};

use std::process::ExitCode;


fn main() -> ExitCode {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(interface) = args.interface() else {
        eprintln!("wrong command");
        return ExitCode::FAILURE;
    };

    let devices = match DeviceList::list() {
        Ok(devices) => devices,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    for name in devices.names() {
        println!("Name: {}", name);
    }

    let mut capture = match CaptureSession::open(interface) {
        Ok(capture) => capture,
        Err(error) => {
            eprintln!("{}", error);
            return ExitCode::FAILURE;
        }
    };

    let mut printer = Printer::stdout();
    capture
        .compile(args.filter_expression())
        .install_filter()
        .set_handler(move |frame| handle_frame(&mut printer, frame))
        .run(args.count);

    if !capture.is_valid() {
        capture.print_error();
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}


fn handle_frame<W: std::io::Write>(printer: &mut Printer<W>, frame: &Frame<'_>) -> bool {
    let summary = match try_decode(frame.data) {
        Ok(summary) => summary,
        Err(error) => {
            tracing::debug!(%error, len = frame.data.len(), "skipped frame");
            return false;
        }
    };

    if let Some(time) = frame.captured_at {
        tracing::trace!(time = %time.format("%H:%M:%S%.6f"), wire_len = frame.wire_len, "decoded frame");
    }

    if let Err(error) = printer.print(&summary) {
        tracing::error!(%error, "failed to write summary");
    }
    true
}
