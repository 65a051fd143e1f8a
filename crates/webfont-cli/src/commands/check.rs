//! Check command implementation
//!
//! Validates the configuration and prints what a build would do,
//! without generating anything.

use anyhow::Result;
use webfont::{discover, Staleness};

use crate::cli::CommonArgs;
use crate::config::CliConfig;

pub fn run(args: &CommonArgs) -> Result<()> {
    let config = CliConfig::load(&args.config)?;
    let plugin = config.plugin()?;
    let options = plugin.options().validate()?;

    println!("Webfont v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Generator: {}", config.generator.command);
    println!("Pattern:   {}", options.files());

    let inputs = discover(options.files())?;
    println!("Icons:     {}", inputs.len());
    if args.verbose {
        for input in &inputs {
            println!("  {}", input.display());
        }
    }

    println!();
    println!("Outputs:");
    for output in options.output_paths() {
        let marker = if output.is_file() { "✓" } else { "✗" };
        println!("  {marker} {}", output.display());
    }

    println!();
    match Staleness::evaluate(&options, &inputs)? {
        Staleness::UpToDate => println!("Status: up to date"),
        Staleness::Stale(reason) => println!("Status: stale ({reason:?})"),
    }

    Ok(())
}
