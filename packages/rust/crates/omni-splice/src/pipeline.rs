//! Integration pipeline.
//!
//! Import Injector → Call-Site Rewriter → Definition Excision Engine over one
//! buffer, then a single write. The file is touched only after every stage
//! has run in memory.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::buffer::SourceBuffer;
use crate::diff::generate_unified_diff;
use crate::error::SpliceError;
use crate::excise::{ExcisionPlan, excise_definitions};
use crate::import::{ImportInjection, inject_import};
use crate::line_patch::{LinePatch, apply_line_patch};
use crate::rewrite::{SubstitutionRule, rewrite_call_sites};
use crate::types::{AuditEntry, Outcome, SpliceConfig};

/// Everything one integration run does, in order.
#[derive(Debug, Clone)]
pub struct IntegrationPlan {
    /// Import declarations to ensure, in order.
    pub imports: Vec<ImportInjection>,
    /// Call-site rules, in order.
    pub rules: Vec<SubstitutionRule>,
    /// Definitions to remove and the marker to leave.
    pub excision: ExcisionPlan,
}

/// Outcome of a run: both versions of the text, the audit trail and a diff.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationReport {
    /// Target path as given.
    pub path: String,
    /// Text before the run.
    #[serde(skip)]
    pub original: String,
    /// Text after the run.
    #[serde(skip)]
    pub modified: String,
    /// One entry per step, in execution order.
    pub entries: Vec<AuditEntry>,
    /// Whether a marker comment was written.
    pub marker_inserted: bool,
    /// Whether the result was written back to `path`.
    pub written: bool,
    /// Unified diff of `original` → `modified`.
    pub diff: String,
}

impl IntegrationReport {
    fn new(
        path: &str,
        original: String,
        modified: SourceBuffer,
        entries: Vec<AuditEntry>,
        marker_inserted: bool,
    ) -> Self {
        let modified = modified.into_string();
        let diff = generate_unified_diff(&original, &modified, path);
        Self {
            path: path.to_string(),
            original,
            modified,
            entries,
            marker_inserted,
            written: false,
            diff,
        }
    }

    /// Whether the run changed the text.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.original != self.modified
    }

    /// Number of steps that rewrote something.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_applied()).count()
    }

    /// Number of steps skipped because their result was already there.
    #[must_use]
    pub fn already_present_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == Outcome::AlreadyPresent)
            .count()
    }

    /// Number of steps that matched nothing.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_warning()).count()
    }

    /// Whether any step matched nothing.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.entries.iter().any(AuditEntry::is_warning)
    }

    /// One-line closing summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let verdict = if self.has_warnings() {
            "completed with warnings"
        } else {
            "complete"
        };
        format!(
            "Integration {verdict}: {} applied, {} already present, {} not found{}",
            self.applied_count(),
            self.already_present_count(),
            self.warning_count(),
            if self.written { "" } else { " (file not written)" }
        )
    }

    /// Human-readable audit: one line per step, then the summary.
    ///
    /// With `include_diff`, the unified diff follows.
    #[must_use]
    pub fn format_report(&self, include_diff: bool) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "// SPLICE: {}", self.path);
        for entry in &self.entries {
            let _ = writeln!(output, "{entry}");
        }
        let _ = writeln!(output, "\n{}", self.summary());

        if include_diff {
            output.push_str("\n// Diff:\n");
            if self.diff.is_empty() {
                output.push_str("[No changes]\n");
            } else {
                output.push_str(&self.diff);
            }
        }
        output
    }
}

/// Run the three stages over `buffer`.
///
/// Returns the final buffer, every audit entry in execution order and
/// whether a marker was written. Pure: no I/O besides logging.
#[must_use]
pub fn run_integration(
    buffer: SourceBuffer,
    plan: &IntegrationPlan,
) -> (SourceBuffer, Vec<AuditEntry>, bool) {
    let mut buffer = buffer;
    let mut entries = Vec::new();

    for injection in &plan.imports {
        let pass = inject_import(buffer, injection);
        buffer = pass.buffer;
        entries.extend(pass.entries);
    }

    let pass = rewrite_call_sites(buffer, &plan.rules);
    entries.extend(pass.entries);

    let excised = excise_definitions(pass.buffer, &plan.excision);
    entries.extend(excised.entries);

    (excised.buffer, entries, excised.marker.marker_inserted())
}

/// Run `plan` against the file at `path`.
///
/// The file is read once and, unless `config.dry_run` is set or nothing
/// changed, overwritten once atomically.
///
/// # Errors
/// Returns `SpliceError::Io` when the file cannot be read or written.
pub fn integrate_file<P: AsRef<Path>>(
    path: P,
    plan: &IntegrationPlan,
    config: SpliceConfig,
) -> Result<IntegrationReport, SpliceError> {
    let path = path.as_ref();
    let original = omni_io::read_text_safe(path, config.max_file_size)?;

    let (modified, entries, marker_inserted) =
        run_integration(SourceBuffer::new(original.as_str()), plan);
    let mut report = IntegrationReport::new(
        &path.to_string_lossy(),
        original,
        modified,
        entries,
        marker_inserted,
    );

    commit(path, &mut report, config)?;
    Ok(report)
}

/// Apply a single line patch to the file at `path`.
///
/// # Errors
/// Returns `SpliceError::Io` on read/write failure and
/// `SpliceError::LineOutOfRange` when the file is too short; in both cases
/// nothing is written.
pub fn patch_file_line<P: AsRef<Path>>(
    path: P,
    patch: &LinePatch,
    config: SpliceConfig,
) -> Result<IntegrationReport, SpliceError> {
    let path = path.as_ref();
    let original = omni_io::read_text_safe(path, config.max_file_size)?;

    let pass = apply_line_patch(SourceBuffer::new(original.as_str()), patch)?;
    let mut report = IntegrationReport::new(
        &path.to_string_lossy(),
        original,
        pass.buffer,
        vec![pass.entry],
        false,
    );

    commit(path, &mut report, config)?;
    Ok(report)
}

fn commit(
    path: &Path,
    report: &mut IntegrationReport,
    config: SpliceConfig,
) -> Result<(), SpliceError> {
    if config.dry_run {
        tracing::info!(path = %path.display(), "dry run, file left untouched");
        return Ok(());
    }
    if !report.changed() {
        tracing::info!(path = %path.display(), "no changes, file left untouched");
        return Ok(());
    }
    omni_io::write_text_atomic(path, &report.modified)?;
    report.written = true;
    Ok(())
}
