//! Decoration planning: byte offsets to line/column ranges.

use serde::{Deserialize, Serialize};

use crate::matcher::Match;
use crate::rule::PatternRule;

/// A position in document text.
///
/// Lines are 0-indexed. Columns are 0-indexed UTF-16 code units, the
/// addressing convention used by LSP clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed).
    pub line: u32,
    /// Column in UTF-16 code units (0-indexed).
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A decorated range with its hover annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecorationSpan {
    pub start: Position,
    pub end: Position,
    pub hover_message: String,
}

/// Walks text forward, tracking the line and column of a byte offset.
///
/// Line breaks are `\n`, `\r\n` and a lone `\r`. Advancing to offsets in
/// increasing order costs one pass over the text in total.
#[derive(Debug, Clone)]
pub struct PositionCursor<'a> {
    text: &'a str,
    offset: usize,
    position: Position,
}

impl<'a> PositionCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            offset: 0,
            position: Position::new(0, 0),
        }
    }

    /// Moves to `offset` and returns its position.
    ///
    /// Returns `None` if `offset` lies past the end of the text or inside a
    /// UTF-8 sequence. Moving backwards restarts from the beginning.
    pub fn advance_to(&mut self, offset: usize) -> Option<Position> {
        if offset > self.text.len() {
            return None;
        }
        if offset < self.offset {
            *self = Self::new(self.text);
        }

        let base = self.offset;
        let slice = self.text.get(base..offset)?;
        let bytes = self.text.as_bytes();
        let mut pos = self.position;

        for (i, ch) in slice.char_indices() {
            match ch {
                '\n' => {
                    pos.line += 1;
                    pos.character = 0;
                }
                // The '\r' of a "\r\n" pair takes no column.
                '\r' if bytes.get(base + i + 1) == Some(&b'\n') => {}
                '\r' => {
                    pos.line += 1;
                    pos.character = 0;
                }
                _ => pos.character += ch.len_utf16() as u32,
            }
        }

        self.offset = offset;
        self.position = pos;
        Some(pos)
    }
}

/// Converts a byte offset to a position.
///
/// Returns `None` if `offset` lies past the end of `text`.
pub fn offset_to_position(offset: usize, text: &str) -> Option<Position> {
    PositionCursor::new(text).advance_to(offset)
}

/// Plans one decoration per match. Overlapping ranges are kept as-is.
///
/// `matches` are expected in document order, as `find_matches` yields them.
pub fn plan(rule: &PatternRule, text: &str, matches: &[Match]) -> Vec<DecorationSpan> {
    let mut cursor = PositionCursor::new(text);
    matches
        .iter()
        .filter_map(|m| {
            let start = cursor.advance_to(m.offset)?;
            let end = cursor.advance_to(m.end())?;
            Some(DecorationSpan {
                start,
                end,
                hover_message: rule.hover().render_match(m),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_offset_to_position_basic_ascii() {
        let text = "Hello World";
        assert_eq!(offset_to_position(0, text), Some(Position::new(0, 0)));
        assert_eq!(offset_to_position(5, text), Some(Position::new(0, 5)));
        assert_eq!(offset_to_position(11, text), Some(Position::new(0, 11)));
        assert_eq!(offset_to_position(12, text), None);
    }

    #[test]
    fn test_offset_to_position_multiline() {
        let text = "Line 1\nLine 2\nLine 3";
        assert_eq!(offset_to_position(6, text), Some(Position::new(0, 6)));
        assert_eq!(offset_to_position(7, text), Some(Position::new(1, 0)));
        assert_eq!(offset_to_position(20, text), Some(Position::new(2, 6)));
    }

    #[test]
    fn test_offset_to_position_counts_utf16_units() {
        // 'あ' is 3 bytes in UTF-8 and 1 UTF-16 unit; '🎉' is 4 bytes and 2 units.
        let text = "あ🎉b";
        assert_eq!(offset_to_position(3, text), Some(Position::new(0, 1)));
        assert_eq!(offset_to_position(7, text), Some(Position::new(0, 3)));
        assert_eq!(offset_to_position(8, text), Some(Position::new(0, 4)));
    }

    #[test]
    fn test_offset_to_position_line_endings() {
        let text = "a\rb\r\nc\n\rd";
        assert_eq!(offset_to_position(2, text), Some(Position::new(1, 0)));
        // Between '\r' and '\n' is still the end of line 1.
        assert_eq!(offset_to_position(4, text), Some(Position::new(1, 1)));
        assert_eq!(offset_to_position(5, text), Some(Position::new(2, 0)));
        assert_eq!(offset_to_position(7, text), Some(Position::new(3, 0)));
        assert_eq!(offset_to_position(8, text), Some(Position::new(4, 0)));
    }

    #[test]
    fn test_cursor_restarts_when_moving_backwards() {
        let text = "ab\ncd";
        let mut cursor = PositionCursor::new(text);
        assert_eq!(cursor.advance_to(4), Some(Position::new(1, 1)));
        assert_eq!(cursor.advance_to(1), Some(Position::new(0, 1)));
        assert_eq!(cursor.advance_to(6), None);
        assert_eq!(cursor.advance_to(5), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_offset_inside_utf8_sequence() {
        assert_eq!(offset_to_position(1, "あ"), None);
    }

    #[test]
    fn test_offset_to_position_empty_string() {
        assert_eq!(offset_to_position(0, ""), Some(Position::new(0, 0)));
        assert_eq!(offset_to_position(1, ""), None);
    }

    #[test]
    fn test_plan_bounds_each_match() {
        let rule = PatternRule::builtin().unwrap();
        let text = "a: 1;\n  hieght: 2;\n🎉 HiEgHt";
        let matches = crate::find_matches(&rule, text);

        let spans = plan(&rule, text, &matches);
        assert_eq!(
            spans,
            vec![
                DecorationSpan {
                    start: Position::new(1, 2),
                    end: Position::new(1, 8),
                    hover_message: "Did you mean height?".to_string(),
                },
                DecorationSpan {
                    start: Position::new(2, 3),
                    end: Position::new(2, 9),
                    hover_message: "Did you mean height?".to_string(),
                },
            ]
        );
    }
}
