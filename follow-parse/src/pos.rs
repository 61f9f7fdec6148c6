//! Positions and ranges in source text.

use core::fmt::{self, Display};

/// Position in a document.
///
/// Lines and characters are zero-based.
/// The offset counts characters from the start of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub character: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, character: usize, offset: usize) -> Self {
        Self {
            line,
            character,
            offset,
        }
    }

    /// Advance the position past the character `c`.
    pub fn advance(&mut self, c: char) {
        if is_newline(c) {
            self.line += 1;
            self.character = 0;
        } else {
            self.character += 1;
        }
        self.offset += 1;
    }

    /// Compare by line and character only, ignoring the offset.
    ///
    /// Editors only ever send line and character, so lookups use this.
    pub fn cmp_lc(&self, other: &Self) -> core::cmp::Ordering {
        (self.line, self.character).cmp(&(other.line, other.character))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.character + 1)
    }
}

/// Half-open range `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Empty range at the given position.
    pub fn empty(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Return true if the position lies in `[start, end)`.
    ///
    /// ~~~
    /// # use follow_parse::{Position, Range};
    /// let r = Range::new(Position::new(0, 2, 2), Position::new(0, 5, 5));
    /// assert!(r.contains(&Position::new(0, 2, 0)));
    /// assert!(!r.contains(&Position::new(0, 5, 0)));
    /// ~~~
    pub fn contains(&self, pos: &Position) -> bool {
        use core::cmp::Ordering::*;
        self.start.cmp_lc(pos) != Greater && self.end.cmp_lc(pos) == Greater
    }

    /// Order a range relative to a position:
    /// `Less` if the range ends before the position,
    /// `Greater` if it starts after it, and
    /// `Equal` if it contains the position.
    ///
    /// This is suitable for `binary_search_by`.
    pub fn locate(&self, pos: &Position) -> core::cmp::Ordering {
        use core::cmp::Ordering::*;
        if self.contains(pos) {
            Equal
        } else if self.end.cmp_lc(pos) != Greater {
            Less
        } else {
            Greater
        }
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Line terminators: LF, LINE SEPARATOR and PARAGRAPH SEPARATOR.
pub fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\u{2028}' | '\u{2029}')
}

#[test]
fn advance() {
    let mut pos = Position::default();
    "a\u{2028}bc\n".chars().for_each(|c| pos.advance(c));
    assert_eq!(pos, Position::new(2, 0, 5));
}
