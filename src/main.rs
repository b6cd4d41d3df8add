//! XFCE Config Manager - interactive backup and restore of XFCE configuration.
#![forbid(unsafe_code)]

use std::io::{self, IsTerminal};

use clap::{CommandFactory, FromArgMatches};
use tracing::{debug, warn};

use xcm::cli::Cli;
use xcm::config::{PathResolver, discover_config};
use xcm::environment::EnvironmentProbe;
use xcm::error::{Result, XcmError};
use xcm::logging::init_logging;
use xcm::output::{HumanOutput, Output};
use xcm::prompt::LinePrompter;
use xcm::session::Session;
use xcm::storage::FsStorage;
use xcm::store::{SnapshotStore, StoreLayout};

/// Build information embedded at compile time.
mod build_info {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    pub fn git_sha() -> &'static str {
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    }

    pub fn git_dirty() -> &'static str {
        option_env!("VERGEN_GIT_DIRTY").unwrap_or("false")
    }

    pub fn build_timestamp() -> &'static str {
        option_env!("VERGEN_BUILD_TIMESTAMP").unwrap_or("unknown")
    }

    pub fn rustc_semver() -> &'static str {
        option_env!("VERGEN_RUSTC_SEMVER").unwrap_or("unknown")
    }

    pub fn target() -> &'static str {
        option_env!("VERGEN_CARGO_TARGET_TRIPLE").unwrap_or("unknown")
    }

    /// Text shown by `--version`.
    pub fn long_version() -> String {
        format!(
            "{VERSION}\ngit: {}{}\nbuilt: {}\nrustc: {}\ntarget: {}",
            git_sha(),
            if git_dirty() == "true" { " (dirty)" } else { "" },
            build_timestamp(),
            rustc_semver(),
            target()
        )
    }
}

/// Exit code when the environment gate or the live-config check fails.
const EXIT_PRECONDITION: i32 = 2;

fn main() {
    let matches = Cli::command()
        .long_version(build_info::long_version())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.verbose, cli.quiet);

    // Handle no-color flag or non-TTY
    if cli.no_color || !io::stdout().is_terminal() {
        console::set_colors_enabled(false);
    }

    if let Err(e) = install_interrupt_handler() {
        warn!(error = %e, "Could not install Ctrl-C handler");
    }

    let output = HumanOutput::stdout();
    let code = match run(&cli, &output) {
        Ok(()) => 0,
        Err(XcmError::Interrupted) => {
            output.newline();
            output.info("Program interrupted");
            0
        }
        Err(e) if e.is_precondition_failure() => {
            output.error(&e);
            EXIT_PRECONDITION
        }
        Err(e) => {
            output.error(&XcmError::Other(format!("Unexpected error: {e}")));
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli, output: &HumanOutput) -> Result<()> {
    let resolver = PathResolver::from_process()?;
    let config = discover_config(cli.config.as_deref(), resolver.base_dir())?;
    debug!(?config, "Effective configuration");

    output.info("Detecting environment...");
    EnvironmentProbe::from_process()
        .evaluate(&config.desktop_id)
        .into_result()?;
    output.success("System: Linux");
    output.success(&format!("Desktop: {}", config.desktop_id.to_uppercase()));

    let layout = StoreLayout::from_config(&config, &resolver);
    let store = SnapshotStore::new(FsStorage::new(), layout).with_max_backups(config.max_backups);
    store.verify_live()?;
    output.success(&format!(
        "Configuration found at: {}",
        store.layout().live.display()
    ));
    store.ensure_layout()?;

    let title = format!("{} CONFIGURATION MANAGER", config.desktop_id.to_uppercase());
    Session::new(store, LinePrompter::stdio(), output)
        .with_title(title)
        .run()
}

/// Exit with a farewell on SIGINT, even while blocked on a prompt.
#[cfg(unix)]
fn install_interrupt_handler() -> Result<()> {
    use signal_hook::consts::SIGINT;
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT])?;
    std::thread::spawn(move || {
        if signals.forever().next().is_some() {
            println!("\n\nProgram interrupted");
            std::process::exit(0);
        }
    });
    Ok(())
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn install_interrupt_handler() -> Result<()> {
    Ok(())
}
