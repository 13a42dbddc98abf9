//! Nested-delimiter scanner for JavaScript-like brace blocks.
//!
//! Counts `{` / `}` from an opening brace to its partner while stepping over
//! the places a brace does not count: string literals, template literals
//! (but not their `${ ... }` substitutions), comments and regex literals.
//! It is a tokenizer-level approximation, not a parser.

/// What a `}` closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Block,
    TemplateExpr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Code,
    Quoted(u8),
    Template,
    LineComment,
    BlockComment,
    Regex { in_class: bool },
}

/// Keywords after which `/` starts a regex literal rather than a division.
const REGEX_KEYWORDS: &[&str] = &[
    "return", "typeof", "instanceof", "case", "in", "of", "new", "delete", "void", "throw",
    "else", "do", "yield", "await",
];

/// Offset just past the `}` that closes the `{` at `open`.
///
/// Returns `None` when `open` is not a `{` or the block never closes.
#[must_use]
pub fn find_block_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut stack = vec![Frame::Block];
    let mut mode = Mode::Code;
    // Last significant code byte, used to tell a regex from a division.
    let mut last_sig: Option<usize> = Some(open);
    let mut i = open + 1;

    while i < bytes.len() {
        let b = bytes[i];
        match mode {
            Mode::Code => match b {
                b'{' => {
                    stack.push(Frame::Block);
                    last_sig = Some(i);
                }
                b'}' => {
                    match stack.pop() {
                        Some(Frame::Block) if stack.is_empty() => return Some(i + 1),
                        Some(Frame::TemplateExpr) => mode = Mode::Template,
                        Some(Frame::Block) => {}
                        None => return None,
                    }
                    last_sig = Some(i);
                }
                b'\'' | b'"' => mode = Mode::Quoted(b),
                b'`' => mode = Mode::Template,
                b'/' => match bytes.get(i + 1) {
                    Some(b'/') => mode = Mode::LineComment,
                    Some(b'*') => {
                        mode = Mode::BlockComment;
                        i += 1;
                    }
                    _ if regex_allowed(text, last_sig) => mode = Mode::Regex { in_class: false },
                    _ => last_sig = Some(i),
                },
                b if b.is_ascii_whitespace() => {}
                _ => last_sig = Some(i),
            },
            Mode::Quoted(quote) => {
                if b == b'\\' {
                    i += 1;
                } else if b == quote {
                    mode = Mode::Code;
                    last_sig = Some(i);
                } else if b == b'\n' {
                    // Unterminated string; resume counting on the next line.
                    mode = Mode::Code;
                }
            }
            Mode::Template => {
                if b == b'\\' {
                    i += 1;
                } else if b == b'`' {
                    mode = Mode::Code;
                    last_sig = Some(i);
                } else if b == b'$' && bytes.get(i + 1) == Some(&b'{') {
                    stack.push(Frame::TemplateExpr);
                    mode = Mode::Code;
                    last_sig = Some(i + 1);
                    i += 1;
                }
            }
            Mode::LineComment => {
                if b == b'\n' {
                    mode = Mode::Code;
                }
            }
            Mode::BlockComment => {
                if b == b'*' && bytes.get(i + 1) == Some(&b'/') {
                    mode = Mode::Code;
                    i += 1;
                }
            }
            Mode::Regex { in_class } => match b {
                b'\\' => i += 1,
                b'[' => mode = Mode::Regex { in_class: true },
                b']' => mode = Mode::Regex { in_class: false },
                b'/' if !in_class => {
                    mode = Mode::Code;
                    last_sig = Some(i);
                }
                b'\n' => mode = Mode::Code,
                _ => {}
            },
        }
        i += 1;
    }

    None
}

/// Whether a `/` following the byte at `last_sig` opens a regex literal.
fn regex_allowed(text: &str, last_sig: Option<usize>) -> bool {
    let Some(pos) = last_sig else {
        return true;
    };
    let bytes = text.as_bytes();
    let prev = bytes[pos];
    if matches!(
        prev,
        b'(' | b','
            | b'='
            | b':'
            | b'['
            | b'!'
            | b'&'
            | b'|'
            | b'?'
            | b'{'
            | b'}'
            | b';'
            | b'+'
            | b'-'
            | b'*'
            | b'%'
            | b'<'
            | b'>'
            | b'~'
            | b'^'
    ) {
        return true;
    }
    if prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'$' {
        let word_start = bytes[..=pos]
            .iter()
            .rposition(|&c| !(c.is_ascii_alphanumeric() || c == b'_' || c == b'$'))
            .map_or(0, |p| p + 1);
        let word = &text[word_start..=pos];
        return REGEX_KEYWORDS.contains(&word);
    }
    false
}
