//! Source code representation, position management and stack safety.

use std::fmt;

pub mod stack;

/// A `line:column` location in the source. Both components are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}:{}", self.line, self.column)
    }
}

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Byte offsets of the first character of every line.
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            content,
            line_starts,
        }
    }

    /// Number of lines in the source. An empty source has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Maps a byte `offset` to its [`Position`].
    /// Columns count characters, not bytes. Offsets past the end map to the end of the source.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.content.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = self.line_starts[line];
        let column = self
            .content
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        Position::new(line as u32 + 1, column as u32 + 1)
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_first_line() {
        let source = Source::new("let x");
        assert_eq!(source.position(0), Position::new(1, 1));
        assert_eq!(source.position(4), Position::new(1, 5));
    }

    #[test]
    fn test_position_after_newline() {
        let source = Source::new("a\nbc\n\nd");
        assert_eq!(source.line_count(), 4);
        assert_eq!(source.position(1), Position::new(1, 2)); // the newline itself
        assert_eq!(source.position(2), Position::new(2, 1));
        assert_eq!(source.position(3), Position::new(2, 2));
        assert_eq!(source.position(5), Position::new(3, 1));
        assert_eq!(source.position(6), Position::new(4, 1));
    }

    #[test]
    fn test_position_past_end() {
        let source = Source::new("ab");
        assert_eq!(source.position(10), Position::new(1, 3));
    }

    #[test]
    fn test_columns_count_chars() {
        let source = Source::new("é x");
        assert_eq!(source.position(3), Position::new(1, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 14).to_string(), "line 3:14");
    }
}
