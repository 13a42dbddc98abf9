use std::path::PathBuf;

use clap::{Parser, Subcommand};

use omni_splice::plans::{BATTERY_REGEX_LINE, DEFAULT_TARGET};

#[derive(Parser)]
#[command(name = "omni-splice")]
#[command(about = "Integrate extracted modules into a monolith. No arguments: run the StatsTab plan.")]
pub(crate) struct Cli {
    /// File to rewrite.
    #[arg(long, global = true, default_value = DEFAULT_TARGET)]
    pub(crate) file: PathBuf,

    /// Run every step and print the diff, but do not write the file.
    #[arg(long, global = true)]
    pub(crate) dry_run: bool,

    /// Print the audit report as JSON.
    #[arg(long, global = true)]
    pub(crate) json: bool,

    /// Debug-level logs (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    /// Import StatsTab.js, redirect stats calls, remove the local copies (default).
    StatsTab,
    /// Collapse the doubled escapes in the battery-level regex line.
    FixBatteryRegex {
        /// 1-indexed line holding the regex.
        #[arg(long, default_value_t = BATTERY_REGEX_LINE)]
        line: usize,
    },
}
