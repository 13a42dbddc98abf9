//! Import Injector.
//!
//! Places a new import declaration on the line right after an existing one.

use crate::buffer::SourceBuffer;
use crate::types::{AuditEntry, Outcome, Pass, Stage};

/// A declaration to insert after an anchor declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInjection {
    /// Existing text the declaration is placed after.
    pub anchor: String,
    /// Declaration to insert, without a line terminator.
    pub declaration: String,
}

impl ImportInjection {
    /// Create an injection of `declaration` after `anchor`.
    pub fn new(anchor: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            anchor: anchor.into(),
            declaration: declaration.into(),
        }
    }
}

/// Insert `injection.declaration` on its own line after the first anchor.
/// The new line ends the way the anchor's line does.
///
/// Returns the buffer unchanged with `AlreadyPresent` when the declaration is
/// already in the buffer verbatim, or with `NotFound` when the anchor is
/// missing.
pub fn inject_import(buffer: SourceBuffer, injection: &ImportInjection) -> Pass {
    let outcome = if buffer.as_str().contains(&injection.declaration) {
        Outcome::AlreadyPresent
    } else {
        match buffer.as_str().find(&injection.anchor) {
            Some(start) => {
                let end = start + injection.anchor.len();
                // The declaration lands on the line after the anchor's last line.
                let line = buffer.position(end).line + 1;
                let eol = buffer.line_ending_at(end);
                let inserted = format!("{eol}{}", injection.declaration);
                return Pass {
                    buffer: buffer.splice(end..end, &inserted),
                    entries: vec![AuditEntry::record(
                        Stage::Import,
                        &injection.declaration,
                        Outcome::Applied { count: 1, line },
                    )],
                };
            }
            None => Outcome::NotFound,
        }
    };

    Pass {
        buffer,
        entries: vec![AuditEntry::record(
            Stage::Import,
            &injection.declaration,
            outcome,
        )],
    }
}
