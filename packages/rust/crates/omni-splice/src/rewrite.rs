//! Call-Site Rewriter.
//!
//! Applies an ordered list of substitution rules. Each rule is searched
//! against the buffer as left by the rules before it, so a rule may target
//! text an earlier rule produced, and can never see text a later rule will
//! produce.

use regex::{Regex, RegexBuilder};

use crate::buffer::SourceBuffer;
use crate::error::SpliceError;
use crate::types::{AuditEntry, Outcome, Pass, Stage};

/// How a rule finds its call sites.
#[derive(Debug, Clone)]
enum Matcher {
    /// Exact text. When it starts with an identifier character it only
    /// matches where the preceding character is not part of an identifier or
    /// a member access, so `renderStats(x);` skips `StatsTab.renderStats(x);`.
    Literal(String),
    /// Regular expression; `.` also matches newlines. The replacement may use
    /// `$1` / `${name}` to carry captured arguments over.
    Pattern(Regex),
}

/// How many matches a rule rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// Only the first match.
    #[default]
    First,
    /// Every match.
    All,
}

/// One ordered `(match, replacement)` pair.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    label: String,
    matcher: Matcher,
    replacement: String,
    cardinality: Cardinality,
}

impl SubstitutionRule {
    /// Literal rule rewriting the first call site. The label is the literal.
    pub fn literal(from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        Self {
            label: from.clone(),
            matcher: Matcher::Literal(from),
            replacement: to.into(),
            cardinality: Cardinality::First,
        }
    }

    /// Pattern rule rewriting the first match. The label is the pattern.
    ///
    /// # Errors
    /// Returns `SpliceError::Pattern` if `pattern` does not compile.
    pub fn pattern(pattern: &str, replacement: impl Into<String>) -> Result<Self, SpliceError> {
        let regex = RegexBuilder::new(pattern)
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self {
            label: pattern.to_string(),
            matcher: Matcher::Pattern(regex),
            replacement: replacement.into(),
            cardinality: Cardinality::First,
        })
    }

    /// Rewrite every match instead of the first.
    #[must_use]
    pub fn all(mut self) -> Self {
        self.cardinality = Cardinality::All;
        self
    }

    /// Label shown in the audit trail.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replacement text (may contain capture references for pattern rules).
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Apply the rule once to `buffer`.
    #[must_use]
    pub fn apply(&self, buffer: SourceBuffer) -> (SourceBuffer, Outcome) {
        match &self.matcher {
            Matcher::Literal(needle) => self.apply_literal(buffer, needle),
            Matcher::Pattern(regex) => self.apply_pattern(buffer, regex),
        }
    }

    fn apply_literal(&self, buffer: SourceBuffer, needle: &str) -> (SourceBuffer, Outcome) {
        let mut starts = call_site_matches(buffer.as_str(), needle);
        if self.cardinality == Cardinality::First {
            starts.truncate(1);
        }
        let Some(&first) = starts.first() else {
            return (buffer, Outcome::NotFound);
        };
        let line = buffer.position(first).line;

        let text = buffer.as_str();
        let mut modified = String::with_capacity(text.len() + starts.len() * self.replacement.len());
        let mut last = 0;
        for &start in &starts {
            modified.push_str(&text[last..start]);
            modified.push_str(&self.replacement);
            last = start + needle.len();
        }
        modified.push_str(&text[last..]);

        let count = starts.len();
        (SourceBuffer::from(modified), Outcome::Applied { count, line })
    }

    fn apply_pattern(&self, buffer: SourceBuffer, regex: &Regex) -> (SourceBuffer, Outcome) {
        let Some(first) = regex.find(buffer.as_str()) else {
            return (buffer, Outcome::NotFound);
        };
        let line = buffer.position(first.start()).line;

        let text = buffer.as_str();
        let (modified, count) = match self.cardinality {
            Cardinality::First => (
                regex.replacen(text, 1, self.replacement.as_str()).into_owned(),
                1,
            ),
            Cardinality::All => (
                regex.replace_all(text, self.replacement.as_str()).into_owned(),
                regex.find_iter(text).count(),
            ),
        };

        (SourceBuffer::from(modified), Outcome::Applied { count, line })
    }
}

/// Run `rules` top to bottom, one audit entry per rule.
pub fn rewrite_call_sites(buffer: SourceBuffer, rules: &[SubstitutionRule]) -> Pass {
    let mut buffer = buffer;
    let mut entries = Vec::with_capacity(rules.len());

    for rule in rules {
        let (next, outcome) = rule.apply(buffer);
        buffer = next;
        entries.push(AuditEntry::record(Stage::CallSite, rule.label(), outcome));
    }

    Pass { buffer, entries }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Byte offsets of `needle` in `haystack` that sit on a call-site boundary.
fn call_site_matches(haystack: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    let guarded = needle.chars().next().is_some_and(is_ident_char);

    haystack
        .match_indices(needle)
        .map(|(start, _)| start)
        .filter(|&start| {
            !guarded
                || !haystack[..start]
                    .chars()
                    .next_back()
                    .is_some_and(|c| is_ident_char(c) || c == '.')
        })
        .collect()
}
