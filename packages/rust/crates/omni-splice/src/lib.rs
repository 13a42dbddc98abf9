#![allow(clippy::doc_markdown)]

//! omni-splice - Deterministic Monolith Integration for Omni DevEnv
//!
//! Rewrites a large source file after functions were extracted into a
//! module: the module is imported, former local calls are redirected to the
//! module's exports, and the superseded local definitions are removed.
//! The file is treated as text; there is no parser.
//!
//! # Features
//!
//! - **Import Injection**: Idempotent, anchored after an existing import
//! - **Call-Site Rewriting**: Ordered literal and pattern rules
//! - **Definition Excision**: Brace-balanced removal with a one-time marker
//! - **Line Patch**: Confined literal fix on one addressed line
//! - **Audit Trail**: One entry per step, text or JSON, plus a unified diff
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-splice/src/
//! ├── lib.rs         # Re-exports (this file)
//! ├── error.rs       # SpliceError enum (thiserror)
//! ├── buffer.rs      # SourceBuffer, Position
//! ├── types.rs       # Stage, Outcome, AuditEntry, Pass, SpliceConfig
//! ├── import.rs      # Import Injector
//! ├── rewrite.rs     # Call-Site Rewriter
//! ├── scanner.rs     # Nested-brace scanner
//! ├── excise.rs      # Definition Excision Engine
//! ├── line_patch.rs  # Single-line corrective patch
//! ├── diff.rs        # Unified diff generation
//! ├── pipeline.rs    # Stage composition, file I/O, report
//! └── plans/         # Hard-coded plans (StatsTab, battery regex)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use omni_splice::{SpliceConfig, integrate_file, plans};
//!
//! let plan = plans::stats_tab_plan()?;
//! let report = integrate_file(plans::DEFAULT_TARGET, &plan, SpliceConfig::default())?;
//! println!("{}", report.format_report(false));
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod buffer;
mod diff;
mod error;
mod excise;
mod import;
mod line_patch;
mod pipeline;
mod rewrite;
mod scanner;
mod types;

pub mod plans;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use buffer::{Position, SourceBuffer};
pub use error::SpliceError;
pub use types::{AuditEntry, Outcome, Pass, SpliceConfig, Stage};

pub use excise::{
    DefinitionTarget, ExcisionPass, ExcisionPlan, MarkerPolicy, MarkerState, excise_definitions,
};
pub use import::{ImportInjection, inject_import};
pub use line_patch::{LinePatch, LinePatchPass, apply_line_patch};
pub use rewrite::{Cardinality, SubstitutionRule, rewrite_call_sites};
pub use scanner::find_block_end;

pub use pipeline::{
    IntegrationPlan, IntegrationReport, integrate_file, patch_file_line, run_integration,
};

// Re-export diff utility for external use
pub use diff::generate_unified_diff;
