//! Diff generation utilities.
//!
//! Unified diffs for dry-run previews, built on the `similar` crate.

use similar::TextDiff;

/// Unified diff between two versions of the file at `path`.
///
/// Three lines of context, `a/` and `b/` headers, hunk headers included.
/// Identical inputs yield an empty string.
#[must_use]
pub fn generate_unified_diff(original: &str, modified: &str, path: &str) -> String {
    if original == modified {
        return String::new();
    }

    let diff = TextDiff::from_lines(original, modified);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("a/{path}"), &format!("b/{path}"))
        .to_string()
}
