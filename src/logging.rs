//! Structured logging initialization for the configuration manager.
//!
//! The interactive menu owns stdout, so all diagnostics go to stderr and
//! stay quiet by default.

use std::io::{self, IsTerminal};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Pick the default filter directive for the given verbosity flags.
///
/// * `verbose` - 0 = warn, 1 = info, 2 = debug, 3+ = trace
/// * `quiet` - only errors, regardless of `verbose`
pub fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "xcm=error";
    }
    match verbose {
        0 => "xcm=warn",
        1 => "xcm=info",
        2 => "xcm=debug",
        _ => "xcm=trace",
    }
}

/// Initialize the tracing subscriber based on CLI flags and environment.
///
/// # Environment Variables
///
/// * `RUST_LOG` - Override default filter (e.g., "xcm=debug")
///
/// # Output Behavior
///
/// | TTY | Output |
/// |-----|--------|
/// | yes | Colored output to stderr |
/// | no  | Compact plain output to stderr |
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    if io::stderr().is_terminal() {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    } else {
        // Piped or redirected: no escape codes
        let fmt_layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .compact()
            .with_writer(io::stderr);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
