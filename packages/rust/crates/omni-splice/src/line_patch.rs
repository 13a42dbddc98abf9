//! Single-line corrective patch.
//!
//! Applies literal replacements to one addressed line and leaves every other
//! byte of the buffer alone, line terminators included.

use crate::buffer::SourceBuffer;
use crate::error::SpliceError;
use crate::types::{AuditEntry, Outcome, Stage};

/// Literal replacements confined to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinePatch {
    line: usize,
    replacements: Vec<(String, String)>,
}

impl LinePatch {
    /// Patch for 1-indexed `line` with no replacements yet.
    #[must_use]
    pub const fn new(line: usize) -> Self {
        Self {
            line,
            replacements: Vec::new(),
        }
    }

    /// Add a replacement; replacements run in the order added, each over
    /// every occurrence on the line.
    #[must_use]
    pub fn replace(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into(), to.into()));
        self
    }

    /// Target line (1-indexed).
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }
}

/// Buffer after a line patch plus the old and new text of the line.
#[derive(Debug, Clone)]
pub struct LinePatchPass {
    /// Patched buffer.
    pub buffer: SourceBuffer,
    /// Audit entry for the patch.
    pub entry: AuditEntry,
    /// Line content before, without terminator.
    pub before: String,
    /// Line content after, without terminator.
    pub after: String,
}

/// Apply `patch` to its line.
///
/// The outcome counts every occurrence rewritten across all pairs; a line
/// none of the pairs matches is `NotFound` and the buffer is unchanged.
///
/// # Errors
/// Returns `SpliceError::LineOutOfRange` when the buffer has no such line.
pub fn apply_line_patch(
    buffer: SourceBuffer,
    patch: &LinePatch,
) -> Result<LinePatchPass, SpliceError> {
    let range = buffer
        .line_range(patch.line)
        .ok_or_else(|| SpliceError::LineOutOfRange {
            line: patch.line,
            lines: buffer.line_count(),
        })?;

    let raw = &buffer.as_str()[range.clone()];
    let content_len = raw.trim_end_matches(['\r', '\n']).len();
    let before = raw[..content_len].to_string();

    let mut after = before.clone();
    let mut count = 0;
    for (from, to) in &patch.replacements {
        if from.is_empty() {
            continue;
        }
        count += after.matches(from.as_str()).count();
        after = after.replace(from.as_str(), to);
    }

    let label = format!("line {}", patch.line);
    if count == 0 {
        return Ok(LinePatchPass {
            buffer,
            entry: AuditEntry::record(Stage::LinePatch, label, Outcome::NotFound),
            before: before.clone(),
            after: before,
        });
    }

    tracing::info!(line = patch.line, old = %before.trim(), new = %after.trim(), "line patched");
    let content_range = range.start..range.start + content_len;
    Ok(LinePatchPass {
        buffer: buffer.splice(content_range, &after),
        entry: AuditEntry::record(
            Stage::LinePatch,
            label,
            Outcome::Applied {
                count,
                line: patch.line,
            },
        ),
        before,
        after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_target_line_changes() {
        let buffer = SourceBuffer::new("a-a\r\na-a\r\na-a");
        let pass = apply_line_patch(buffer, &LinePatch::new(2).replace("-", "+")).unwrap();
        assert_eq!(pass.buffer.as_str(), "a-a\r\na+a\r\na-a");
        assert_eq!(pass.before, "a-a");
        assert_eq!(pass.after, "a+a");
    }

    #[test]
    fn test_pairs_apply_in_order() {
        let buffer = SourceBuffer::new("ab\n");
        let patch = LinePatch::new(1).replace("a", "b").replace("bb", "c");
        let pass = apply_line_patch(buffer, &patch).unwrap();
        assert_eq!(pass.buffer.as_str(), "c\n");
        assert_eq!(pass.entry.outcome, Outcome::Applied { count: 2, line: 1 });
    }

    #[test]
    fn test_no_match_is_warning() {
        let buffer = SourceBuffer::new("abc\n");
        let pass = apply_line_patch(buffer, &LinePatch::new(1).replace("x", "y")).unwrap();
        assert_eq!(pass.buffer.as_str(), "abc\n");
        assert!(pass.entry.is_warning());
    }

    #[test]
    fn test_out_of_range() {
        let buffer = SourceBuffer::new("one\ntwo\n");
        let result = apply_line_patch(buffer, &LinePatch::new(3));
        assert!(matches!(
            result,
            Err(SpliceError::LineOutOfRange { line: 3, lines: 2 })
        ));
    }
}
