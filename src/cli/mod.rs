//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// XFCE Config Manager - save, back up and restore your XFCE configuration.
///
/// Runs an interactive menu. Must be started from inside an XFCE session,
/// in the directory of the configuration repository.
#[derive(Parser, Debug)]
#[command(name = "xcm", version, about, long_about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (TOML or YAML); defaults to ./xcm.toml when present
    #[arg(long, short = 'c', value_name = "FILE", env = "XCM_CONFIG")]
    pub config: Option<PathBuf>,
}
