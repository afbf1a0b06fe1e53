//! uv-doctor CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uv_doctor::cli::{Cli, CommandDispatcher};
use uv_doctor::ui::Printer;

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("uv_doctor=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uv_doctor=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    // clap's default error exit is 2; every failure here exits 1.
    let cli = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 });
    });
    init_tracing(cli.debug);

    tracing::debug!("uv-doctor starting with args: {:?}", cli);

    if cli.no_color {
        // SAFETY: before any threads are spawned
        unsafe { std::env::set_var("NO_COLOR", "1") };
        console::set_colors_enabled(false);
    }

    let printer = Printer::new(cli.quiet);
    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, &printer) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            if e.is_fatal() {
                printer.fail(&format!("Fatal: {}", e));
            } else {
                printer.fail(&format!("Error: {}", e));
            }
            ExitCode::from(1)
        }
    }
}
