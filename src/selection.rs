//! Selection range within a mask buffer.

use std::ops::Range;

/// A selection as a pair of char offsets.
///
/// `start` may be greater than `end` for a selection made right to left; the
/// orientation is kept across formatting. A collapsed selection is a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// A collapsed selection.
    pub fn cursor(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn is_cursor(&self) -> bool {
        self.start == self.end
    }

    /// Clamp both offsets into `0..=len`.
    pub fn clamped(&self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }

    /// The selected range, lowest offset first.
    pub fn range(&self) -> Range<usize> {
        self.start.min(self.end)..self.start.max(self.end)
    }
}

impl From<Range<usize>> for Selection {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}
