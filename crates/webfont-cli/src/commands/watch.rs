//! Watch command implementation
//!
//! Builds once, then polls the icon glob and fires `watch-run` for every
//! settled change batch. Failed rebuilds are reported and watching goes on.

use std::time::Duration;

use anyhow::{Context, Result};
use webfont::{HookRegistry, InputWatcher};
use webfont_core::{CancellationToken, Compilation};

use crate::cli::WatchArgs;
use crate::config::CliConfig;

pub fn run(args: &WatchArgs) -> Result<()> {
    let config = CliConfig::load(&args.common.config)?;
    let plugin = config.plugin()?;
    let pattern = config
        .options
        .files
        .clone()
        .context("Require `files` option")?;

    let mut host = HookRegistry::new();
    plugin.apply(&mut host);

    if let Err(e) = host.build(&mut Compilation::new()) {
        log::error!("initial build failed: {e}");
    }

    let mut watcher = InputWatcher::new(pattern)?;
    let interval = Duration::from_millis(args.interval_ms.max(1));
    let aggregate = Duration::from_millis(args.aggregate_ms);
    // Never fires; watching ends with the process
    let stop = CancellationToken::new();

    if !args.common.quiet {
        eprintln!("Watching {} icons...", watcher.len());
    }

    let mut rebuilds = 0;
    while args.max_rebuilds.map_or(true, |max| rebuilds < max) {
        if !watcher.wait_for_change(interval, aggregate, &stop)? {
            break;
        }

        rebuilds += 1;
        match host.rebuild(&mut Compilation::new()) {
            Ok(()) => log::info!("rebuild {rebuilds} complete"),
            Err(e) => log::error!("rebuild {rebuilds} failed: {e}"),
        }
    }

    Ok(())
}
