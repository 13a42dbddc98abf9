//! The in-memory source buffer threaded through every stage.

use std::fmt;
use std::ops::Range;

use serde::Serialize;

/// 1-indexed line/column of a byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number in bytes (1-indexed).
    pub column: usize,
}

/// Full text of the target file.
///
/// Stages take a buffer by value and hand back a new one, so each stage can
/// be tested on its own and nothing else holds a reference to the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBuffer {
    text: String,
}

impl SourceBuffer {
    /// Wrap file contents.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Unwrap into the owned text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.text
    }

    /// Number of lines. A trailing newline does not open an extra line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.text.split_inclusive('\n').count()
    }

    /// Byte range of a 1-indexed line, including its terminator.
    #[must_use]
    pub fn line_range(&self, line: usize) -> Option<Range<usize>> {
        let mut start = 0;
        for (idx, chunk) in self.text.split_inclusive('\n').enumerate() {
            if idx + 1 == line {
                return Some(start..start + chunk.len());
            }
            start += chunk.len();
        }
        None
    }

    /// Terminator of the line holding `offset`: `"\r\n"` or `"\n"`.
    ///
    /// The last line has no terminator of its own and takes the one of the
    /// line above it.
    #[must_use]
    pub fn line_ending_at(&self, offset: usize) -> &'static str {
        let offset = offset.min(self.text.len());
        let newline = self.text[offset..]
            .find('\n')
            .map(|i| offset + i)
            .or_else(|| self.text[..offset].rfind('\n'));
        match newline {
            Some(i) if i > 0 && self.text.as_bytes()[i - 1] == b'\r' => "\r\n",
            _ => "\n",
        }
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let before = &self.text.as_bytes()[..offset];
        let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = before.iter().rposition(|&b| b == b'\n').map_or(0, |i| i + 1);
        Position {
            line,
            column: offset - line_start + 1,
        }
    }

    /// Replace `range` with `replacement`.
    ///
    /// `range` must lie on char boundaries; every caller derives it from a
    /// `str` search or an ASCII delimiter.
    #[must_use]
    pub fn splice(mut self, range: Range<usize>, replacement: &str) -> Self {
        self.text.replace_range(range, replacement);
        self
    }
}

impl From<String> for SourceBuffer {
    fn from(text: String) -> Self {
        Self { text }
    }
}

impl From<&str> for SourceBuffer {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for SourceBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let buffer = SourceBuffer::new("ab\ncd\nef");
        assert_eq!(buffer.position(0), Position { line: 1, column: 1 });
        assert_eq!(buffer.position(4), Position { line: 2, column: 2 });
        assert_eq!(buffer.position(100), Position { line: 3, column: 3 });
    }

    #[test]
    fn test_line_range() {
        let buffer = SourceBuffer::new("ab\r\ncd\nef");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line_range(1), Some(0..4));
        assert_eq!(buffer.line_range(3), Some(7..9));
        assert_eq!(buffer.line_range(4), None);
        assert_eq!(buffer.line_range(0), None);
    }

    #[test]
    fn test_line_ending_at() {
        let buffer = SourceBuffer::new("ab\r\ncd\nef");
        assert_eq!(buffer.line_ending_at(0), "\r\n");
        assert_eq!(buffer.line_ending_at(5), "\n");
        assert_eq!(buffer.line_ending_at(8), "\n");
        assert_eq!(SourceBuffer::new("a\r\nb").line_ending_at(4), "\r\n");
        assert_eq!(SourceBuffer::new("ab").line_ending_at(1), "\n");
    }

    #[test]
    fn test_splice() {
        let buffer = SourceBuffer::new("hello world").splice(0..5, "goodbye");
        assert_eq!(buffer.as_str(), "goodbye world");
    }
}
