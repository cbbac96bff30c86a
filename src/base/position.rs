/// Position tracking for diagnostics
///
/// Source locations are attached to runtime errors so that a failure can be
/// reported against the script line that caused it. A location names the
/// source it belongs to so that errors raised inside another script can be
/// told apart from errors raised by the current one.
use std::fmt;

/// A span representing a range in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Identifies one loaded script source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub u32);

/// A span within a particular source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub source: SourceId,
    pub span: Span,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Create a span from line/column coordinates
    pub fn from_coords(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl SourceLocation {
    pub fn new(source: SourceId, span: Span) -> Self {
        Self { source, span }
    }

    /// True if both locations point into the same source.
    pub fn same_source(&self, other: &SourceLocation) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Displayed 1-indexed, the way editors number lines.
        write!(
            f,
            "source {}, line {}, column {}",
            self.source.0,
            self.span.start.line + 1,
            self.span.start.column + 1
        )
    }
}
