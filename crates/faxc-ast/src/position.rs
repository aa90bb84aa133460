//! Source positions for AST and TAST nodes.

use faxc_util::FileId;

/// A single line/column location (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl LineCol {
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A source range carried by every AST and TAST node.
///
/// Unlike `faxc_util::Span`, which records a single start point plus byte
/// offsets, a `Position` records the full `min`..`max` line/column range a
/// node spans in its source file. Every typed node keeps the position of
/// the untyped node it was derived from; typing never fabricates one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub file: FileId,
    pub min: LineCol,
    pub max: LineCol,
}

impl Position {
    pub const fn new(file: FileId, min: LineCol, max: LineCol) -> Self {
        Self { file, min, max }
    }

    /// A placeholder position for hand-built or synthetic nodes.
    pub const DUMMY: Position = Position {
        file: FileId::DUMMY,
        min: LineCol::new(0, 0),
        max: LineCol::new(0, 0),
    };
}
