//! omni-splice CLI: run a hard-coded integration plan against the monolith.
//!
//! With no arguments it runs the StatsTab plan on `Production/src/main.js`.
//!
//! Logging: set `RUST_LOG=omni_splice=debug` (or `warn`) to adjust the
//! per-step audit lines on stderr.

mod cli;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use omni_splice::{IntegrationReport, SpliceConfig, integrate_file, patch_file_line, plans};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing: RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_splice=debug,omni_io=debug"
        } else {
            "omni_splice=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = SpliceConfig {
        dry_run: cli.dry_run,
        ..SpliceConfig::default()
    };

    let report = match cli.command.unwrap_or(Command::StatsTab) {
        Command::StatsTab => {
            let plan = plans::stats_tab_plan().context("building StatsTab plan")?;
            integrate_file(&cli.file, &plan, config)
                .with_context(|| format!("integrating {}", cli.file.display()))?
        }
        Command::FixBatteryRegex { line } => {
            patch_file_line(&cli.file, &plans::battery_regex_patch(line), config)
                .with_context(|| format!("patching line {line} of {}", cli.file.display()))?
        }
    };

    print_report(&report, cli.json, cli.dry_run)
}

fn print_report(report: &IntegrationReport, json: bool, dry_run: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", report.format_report(dry_run));
    }
    Ok(())
}
