//! Build command implementation
//!
//! Fires `run` then `after-emit` once against an in-process host.

use std::time::Duration;

use anyhow::{Context, Result};
use webfont::{HookRegistry, Outcome};
use webfont_core::{CancellationToken, Compilation};

use crate::cli::BuildArgs;
use crate::config::CliConfig;

pub fn run(args: &BuildArgs) -> Result<()> {
    let config = CliConfig::load(&args.common.config)?;
    let plugin = config.plugin()?;

    let mut host = HookRegistry::new();
    plugin.apply(&mut host);

    let cancel = match args.timeout_secs {
        Some(secs) => CancellationToken::with_timeout(Duration::from_secs(secs)),
        None => CancellationToken::new(),
    };
    let mut compilation = Compilation::with_cancellation(cancel);

    host.build(&mut compilation).context("Webfont build failed")?;

    if !args.common.quiet {
        let name = &plugin.options().font_name;
        let icons = compilation.file_dependencies().len();
        match plugin.last_outcome() {
            Some(Outcome::Generated(written)) => {
                println!("✓ {name} generated ({icons} icons, {} files)", written.len());
            },
            Some(Outcome::Busy) => println!("• {name} skipped, another build is running"),
            Some(Outcome::UpToDate) | None => println!("✓ {name} up to date ({icons} icons)"),
        }
    }
    Ok(())
}
