//! Definition Excision Engine.
//!
//! Removes superseded function definitions. A definition is located by its
//! header pattern and ends at the brace that balances the header's opening
//! brace, so inner blocks never truncate the span.
//!
//! Marker policy: with [`MarkerPolicy::FirstRemoval`] the first definition
//! removed in a run is replaced by one marker comment line and every later
//! removal leaves nothing behind. Which definition carries the marker
//! follows target order, not file order.

use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::buffer::SourceBuffer;
use crate::error::SpliceError;
use crate::scanner::find_block_end;
use crate::types::{AuditEntry, Outcome, Stage};

/// A local definition to remove, keyed by its display name.
#[derive(Debug, Clone)]
pub struct DefinitionTarget {
    name: String,
    header: Regex,
}

impl DefinitionTarget {
    /// `function <name>(<params>) {` starting its own line.
    ///
    /// Whitespace inside the header is flexible; `name` and `params` are
    /// matched literally.
    ///
    /// # Errors
    /// Returns `SpliceError::Pattern` if the generated header does not compile.
    pub fn function(name: &str, params: &str) -> Result<Self, SpliceError> {
        let pattern = format!(
            r"(?m)^[ \t]*function\s+{}\s*\(\s*{}\s*\)\s*\{{",
            regex::escape(name),
            regex::escape(params)
        );
        Self::with_header(name, &pattern)
    }

    /// Custom header pattern. The body starts at the first `{` at or after
    /// the end of the header match.
    ///
    /// # Errors
    /// Returns `SpliceError::Pattern` if `pattern` does not compile.
    pub fn with_header(name: impl Into<String>, pattern: &str) -> Result<Self, SpliceError> {
        Ok(Self {
            name: name.into(),
            header: Regex::new(pattern)?,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Span of the first definition in `text`.
    ///
    /// The span starts at the beginning of the header line when only
    /// indentation precedes the header, and runs through the closing brace
    /// plus the rest of its line when that rest is blank.
    #[must_use]
    pub fn locate(&self, text: &str) -> Option<Range<usize>> {
        let header = self.header.find(text)?;
        let open = if text[..header.end()].ends_with('{') {
            header.end() - 1
        } else {
            header.end() + text[header.end()..].find('{')?
        };
        let close_end = find_block_end(text, open)?;

        let line_start = text[..header.start()].rfind('\n').map_or(0, |i| i + 1);
        let start = if text[line_start..header.start()].trim().is_empty() {
            line_start
        } else {
            header.start()
        };

        let rest = &text[close_end..];
        let rest_of_line = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let end = if rest[..rest_of_line].trim().is_empty() {
            close_end + rest_of_line
        } else {
            close_end
        };

        Some(start..end)
    }
}

/// Whether removals leave a marker comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPolicy {
    /// The first removal of the run is replaced by the marker line.
    #[default]
    FirstRemoval,
    /// Removals never leave a marker.
    Omit,
}

/// Marker progress within one run. Never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerState {
    /// No marker written yet.
    NotStarted,
    /// The marker has been written; further removals leave no residue.
    MarkerInserted,
    /// All targets processed.
    Done {
        /// Whether a marker was written during the run.
        marker_inserted: bool,
    },
}

impl MarkerState {
    /// Whether the marker has been written.
    #[must_use]
    pub const fn marker_inserted(self) -> bool {
        matches!(
            self,
            Self::MarkerInserted
                | Self::Done {
                    marker_inserted: true
                }
        )
    }

    const fn finish(self) -> Self {
        Self::Done {
            marker_inserted: self.marker_inserted(),
        }
    }
}

/// Targets to remove plus the marker to leave behind.
#[derive(Debug, Clone)]
pub struct ExcisionPlan {
    /// Definitions in processing order.
    pub targets: Vec<DefinitionTarget>,
    /// Marker comment text, without indentation or line terminator.
    pub marker: String,
    /// Marker policy for the run.
    pub policy: MarkerPolicy,
}

/// Buffer after excision, its audit entries and the final marker state.
#[derive(Debug, Clone)]
pub struct ExcisionPass {
    /// Buffer after every target was processed.
    pub buffer: SourceBuffer,
    /// One entry per target.
    pub entries: Vec<AuditEntry>,
    /// Always `MarkerState::Done`.
    pub marker: MarkerState,
}

/// Remove every target found in `buffer`, in plan order.
#[must_use]
pub fn excise_definitions(buffer: SourceBuffer, plan: &ExcisionPlan) -> ExcisionPass {
    let mut buffer = buffer;
    let mut state = MarkerState::NotStarted;
    let mut entries = Vec::with_capacity(plan.targets.len());

    for target in &plan.targets {
        let Some(span) = target.locate(buffer.as_str()) else {
            entries.push(AuditEntry::record(
                Stage::Excision,
                target.name(),
                Outcome::NotFound,
            ));
            continue;
        };

        let line = buffer.position(span.start).line;
        let (span, replacement) = if plan.policy == MarkerPolicy::FirstRemoval
            && state == MarkerState::NotStarted
        {
            state = MarkerState::MarkerInserted;
            let indent: String = buffer.as_str()[span.start..]
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect();
            let eol = buffer.line_ending_at(span.start);
            tracing::debug!(definition = target.name(), line, "marker comment placed");
            (span, format!("{indent}{}{eol}", plan.marker))
        } else {
            let start = absorb_blank_line_before(buffer.as_str(), span.start);
            (start..span.end, String::new())
        };

        buffer = buffer.splice(span, &replacement);
        entries.push(AuditEntry::record(
            Stage::Excision,
            target.name(),
            Outcome::Applied { count: 1, line },
        ));
    }

    ExcisionPass {
        buffer,
        entries,
        marker: state.finish(),
    }
}

/// Start of the blank line directly above `start`, if there is one.
///
/// Silent removals take their separating blank line with them so repeated
/// removals do not leave a run of empty lines.
fn absorb_blank_line_before(text: &str, start: usize) -> usize {
    let Some(above) = text[..start].strip_suffix('\n') else {
        return start;
    };
    let prev_start = above.rfind('\n').map_or(0, |i| i + 1);
    if above[prev_start..].trim().is_empty() {
        prev_start
    } else {
        start
    }
}
