//! Core types for the integration pipeline.
//!
//! Every step produces an [`AuditEntry`]; the ordered list of entries is the
//! operator-visible record of what matched and what did not.

use std::fmt;

use serde::Serialize;

use crate::buffer::SourceBuffer;

/// Pipeline stage that produced an audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Import Injector.
    Import,
    /// Call-Site Rewriter.
    CallSite,
    /// Definition Excision Engine.
    Excision,
    /// Single-line corrective patch.
    LinePatch,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Import => "import",
            Self::CallSite => "call-site",
            Self::Excision => "excision",
            Self::LinePatch => "line-patch",
        })
    }
}

/// Result of one step against the current buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// The step matched and rewrote `count` spans; `line` is the first one.
    Applied {
        /// Number of spans rewritten.
        count: usize,
        /// 1-indexed line of the first rewritten span.
        line: usize,
    },
    /// The text the step would produce is already there; nothing changed.
    AlreadyPresent,
    /// Nothing matched; the buffer is untouched for this step.
    NotFound,
}

impl Outcome {
    /// Whether the step changed the buffer.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// One line of the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Stage that ran the step.
    pub stage: Stage,
    /// Human-readable name of the rule, import or definition.
    pub label: String,
    /// What happened.
    pub outcome: Outcome,
}

impl AuditEntry {
    /// Build an entry and emit its log line.
    pub fn record(stage: Stage, label: impl Into<String>, outcome: Outcome) -> Self {
        let entry = Self {
            stage,
            label: label.into(),
            outcome,
        };
        entry.log();
        entry
    }

    /// A `NotFound` outcome is the only warning the pipeline raises.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        self.outcome == Outcome::NotFound
    }

    fn log(&self) {
        match &self.outcome {
            Outcome::Applied { count, line } => tracing::info!(
                stage = %self.stage,
                label = %self.label,
                count,
                line,
                "applied"
            ),
            Outcome::AlreadyPresent => tracing::debug!(
                stage = %self.stage,
                label = %self.label,
                "already present, skipped"
            ),
            Outcome::NotFound => tracing::warn!(
                stage = %self.stage,
                label = %self.label,
                "could not find match"
            ),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Applied { count, line } => write!(
                f,
                "[{}] OK       L{line} x{count}: {}",
                self.stage, self.label
            ),
            Outcome::AlreadyPresent => write!(f, "[{}] PRESENT  {}", self.stage, self.label),
            Outcome::NotFound => write!(f, "[{}] WARNING  not found: {}", self.stage, self.label),
        }
    }
}

/// Buffer produced by a stage, with one audit entry per step it ran.
#[derive(Debug, Clone)]
pub struct Pass {
    /// Buffer after the stage.
    pub buffer: SourceBuffer,
    /// Entries in step order.
    pub entries: Vec<AuditEntry>,
}

/// Configuration for file-level operations.
///
/// Controls the read limit and whether the result is written back.
#[derive(Debug, Clone, Copy)]
pub struct SpliceConfig {
    /// Maximum file size in bytes (default 16MB).
    pub max_file_size: u64,
    /// Run the pipeline and report, but leave the file untouched.
    pub dry_run: bool,
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            max_file_size: 16 * 1024 * 1024,
            dry_run: false,
        }
    }
}
