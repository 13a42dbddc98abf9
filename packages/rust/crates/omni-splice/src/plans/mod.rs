//! Hard-coded plans run by the `omni-splice` binary.

pub mod battery_regex;
pub mod stats_tab;

pub use battery_regex::{BATTERY_REGEX_LINE, battery_regex_patch};
pub use stats_tab::stats_tab_plan;

/// Monolith the plans target, relative to the working directory.
pub const DEFAULT_TARGET: &str = "Production/src/main.js";
