//! Battery regex escape fix.
//!
//! One line of `main.js` carries a battery-level regex whose escapes were
//! doubled when it was generated, so `\s` reads as `\\s` in the source.

use crate::line_patch::LinePatch;

/// Line holding the over-escaped regex literal.
pub const BATTERY_REGEX_LINE: usize = 1557;

/// Patch collapsing the doubled escapes on `line`.
#[must_use]
pub fn battery_regex_patch(line: usize) -> LinePatch {
    LinePatch::new(line)
        .replace(r"\\\\s*", r"\\s*")
        .replace(r"\\\\d+", r"\\d+")
        .replace(r"\\\\[", r"\\[")
        .replace(r"/;\\n", r"/;\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SourceBuffer;
    use crate::line_patch::apply_line_patch;

    #[test]
    fn test_collapses_escapes() {
        let line = r"const rgx = /level:\\\\s*(\\\\d+)\\\\[/;\\n";
        let buffer = SourceBuffer::new(format!("{line}\n"));
        let pass = apply_line_patch(buffer, &battery_regex_patch(1)).unwrap();
        assert_eq!(pass.after, r"const rgx = /level:\\s*(\\d+)\\[/;\n");
    }
}
