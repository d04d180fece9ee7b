//! Source positions for converted syntax trees
//!
//! Canonical nodes carry 1-based line/column pairs. A position whose line is
//! zero was never filled in from the foreign tree.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A 1-based line/column location
#[derive(
    Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize, Display,
)]
#[display("{line}:{column}")]
pub struct Position {
    /// Line number, starting at 1
    pub line: u32,
    /// Column number, starting at 1
    pub column: u32,
}

impl Position {
    /// Position of a node that has no source location
    pub const UNKNOWN: Self = Self { line: 0, column: 0 };

    /// Creates a position from a line and column
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Whether the position was filled in from source
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.line != 0
    }

    /// Returns the same position moved `columns` to the right, saturating
    /// at the last representable column
    #[must_use]
    pub const fn shifted(self, columns: u32) -> Self {
        Self {
            line: self.line,
            column: self.column.saturating_add(columns),
        }
    }

    /// Byte offset of this position inside `source`
    ///
    /// Columns count characters, not bytes. Returns `None` when the position
    /// is unknown or lies outside the text.
    pub fn byte_offset(&self, source: &str) -> Option<usize> {
        if !self.is_known() || self.column == 0 {
            return None;
        }

        let line_start = if self.line == 1 {
            0
        } else {
            source
                .match_indices('\n')
                .nth(self.line as usize - 2)
                .map(|(index, _)| index + 1)?
        };

        let line_text = source[line_start..].split('\n').next().unwrap_or_default();
        let column_index = self.column as usize - 1;
        if column_index == line_text.chars().count() {
            return Some(line_start + line_text.len());
        }
        line_text
            .char_indices()
            .nth(column_index)
            .map(|(offset, _)| line_start + offset)
    }

    /// Span covering the character at this position
    pub fn span_in(&self, source: &str) -> Option<Span> {
        let start = self.byte_offset(source)?;
        let width = source[start..].chars().next().map_or(0, char::len_utf8);
        Some(Span::new(start as u32, (start + width) as u32))
    }
}

/// A byte offset span in a source text
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// First byte of the span
    pub start: u32,
    /// One past the last byte
    pub end: u32,
}

impl Span {
    /// Creates a span from byte offsets
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The span as a `usize` range
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    /// Length in bytes
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_position() {
        assert!(!Position::UNKNOWN.is_known());
        assert_eq!(Position::default(), Position::UNKNOWN);
        assert_eq!(Position::UNKNOWN.byte_offset("a = 1"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 12).to_string(), "3:12");
    }

    #[test]
    fn test_shifted_keeps_line() {
        assert_eq!(Position::new(2, 1).shifted(4), Position::new(2, 5));
    }

    #[test]
    fn test_shifted_saturates() {
        let far = Position::new(1, u32::MAX - 1);
        assert_eq!(far.shifted(4), Position::new(1, u32::MAX));
    }

    #[test]
    fn test_byte_offset_on_later_line() {
        let source = "a = 1\nbb = 2\n";
        assert_eq!(Position::new(1, 1).byte_offset(source), Some(0));
        assert_eq!(Position::new(2, 1).byte_offset(source), Some(6));
        assert_eq!(Position::new(2, 4).byte_offset(source), Some(9));
        assert_eq!(Position::new(5, 1).byte_offset(source), None);
    }

    #[test]
    fn test_byte_offset_counts_characters() {
        let source = "é = b";
        assert_eq!(Position::new(1, 3).byte_offset(source), Some(3));
    }

    #[test]
    fn test_span_at_end_of_line_is_empty() {
        let span = Position::new(1, 6).span_in("a b c").map(|span| span.range());
        assert_eq!(span, Some(5..5));
    }
}
