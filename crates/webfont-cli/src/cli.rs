//! CLI argument definitions using Clap v4

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Webfont - keep an icon font in step with its SVG sources
#[derive(Parser, Debug)]
#[command(name = "webfont")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Regenerate the webfont once if its icons changed
    #[command(alias = "b")]
    Build(BuildArgs),

    /// Build, then rebuild whenever the icons change
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Validate the configuration and report what a build would do
    Check(CommonArgs),
}

/// Options shared by every command
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// JSON configuration file
    #[arg(short = 'c', long = "config", default_value = "webfont.json")]
    pub config: PathBuf,

    /// Silent mode (errors only)
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Give up on generation after this many seconds
    #[arg(long = "timeout")]
    pub timeout_secs: Option<u64>,
}

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Polling interval in milliseconds
    #[arg(long = "interval-ms", default_value = "300")]
    pub interval_ms: u64,

    /// Quiet period before a change batch triggers a rebuild, in milliseconds
    #[arg(long = "aggregate-ms", default_value = "300")]
    pub aggregate_ms: u64,

    /// Exit after this many rebuilds
    #[arg(long = "max-rebuilds")]
    pub max_rebuilds: Option<usize>,
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Build(args) => &args.common,
            Commands::Watch(args) => &args.common,
            Commands::Check(args) => args,
        }
    }
}
