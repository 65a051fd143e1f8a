//! Webfont CLI - drive the webfont plugin from the command line

mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.common());

    match &cli.command {
        Commands::Build(args) => commands::build::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Check(args) => commands::check::run(args),
    }
}

/// `--verbose`/`--quiet` pick the default level; `RUST_LOG` still wins
fn init_logging(args: &cli::CommonArgs) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
