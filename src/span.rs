//! Byte-offset source spans and line/column resolution.

use serde::Serialize;
use std::fmt;

/// Half-open byte range into a source file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Span {
        Span { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..{}]", self.start, self.end)
    }
}

/// 1-based line and column, for human-facing diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Resolve a byte offset to a 1-based line/column pair.
///
/// Counts `\n` only; a `\r\n` pair therefore resolves to the same line as
/// the `\n` that terminates it.
pub fn line_column_at(source: &str, offset: u32) -> LineColumn {
    let offset = (offset as usize).min(source.len());
    let mut line = 1u32;
    let mut line_start = 0usize;
    for (i, b) in source.as_bytes()[..offset].iter().enumerate() {
        if *b == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    LineColumn {
        line,
        column: (offset - line_start) as u32 + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_column_of_first_byte() {
        assert_eq!(line_column_at("abc", 0), LineColumn { line: 1, column: 1 });
    }

    #[test]
    fn line_column_after_newlines() {
        let src = "a\nbb\nccc";
        assert_eq!(line_column_at(src, 2), LineColumn { line: 2, column: 1 });
        assert_eq!(line_column_at(src, 6), LineColumn { line: 3, column: 2 });
    }

    #[test]
    fn line_column_clamps_past_end() {
        assert_eq!(line_column_at("ab", 99), LineColumn { line: 1, column: 3 });
    }
}
