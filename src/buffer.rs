//! The tagged text buffer behind a masked field.
//!
//! Text lives in a `Rope`; a parallel `Vec<CharTag>` records, per char,
//! whether the user typed it or the mask put it there. Every edit keeps the
//! two in step and moves the buffer's marks.

use std::fmt;
use std::ops::Range;

use itertools::Itertools;
use ropey::Rope;

use crate::marks::{MarkId, MarkSet};
use crate::selection::Selection;

/// Who put a char into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CharTag {
    /// Typed or pasted by the user.
    #[default]
    User,
    /// Fills an unfilled wildcard slot.
    Placeholder,
    /// Copied from a literal template slot.
    Literal,
}

impl CharTag {
    /// True for chars inserted by formatting rather than by the user.
    pub fn is_mask(&self) -> bool {
        !matches!(self, CharTag::User)
    }
}

/// A rope with per-char tags and live marks.
#[derive(Debug, Clone, Default)]
pub struct MaskBuffer {
    rope: Rope,
    tags: Vec<CharTag>,
    marks: MarkSet,
}

impl fmt::Display for MaskBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}

// Constructors
impl MaskBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A buffer whose every char is tagged `User`.
    pub fn from_user_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let tags = vec![CharTag::User; rope.len_chars()];
        Self {
            rope,
            tags,
            marks: MarkSet::new(),
        }
    }
}

// Queries
impl MaskBuffer {
    pub fn len_chars(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.rope.get_char(idx)
    }

    pub fn tag_at(&self, idx: usize) -> Option<CharTag> {
        self.tags.get(idx).copied()
    }

    pub fn tags(&self) -> &[CharTag] {
        &self.tags
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// Chars paired with their tags.
    pub fn tagged_chars(&self) -> impl Iterator<Item = (char, CharTag)> + '_ {
        self.rope.chars().zip(self.tags.iter().copied())
    }

    /// Only the user's chars, in order. Does not touch the buffer.
    pub fn user_text(&self) -> String {
        self.tagged_chars()
            .filter(|(_, tag)| !tag.is_mask())
            .map(|(ch, _)| ch)
            .collect()
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }
}

// Edits
impl MaskBuffer {
    /// Insert a single char at `at`, clamped to the buffer end.
    pub fn insert_char(&mut self, at: usize, ch: char, tag: CharTag) {
        let at = at.min(self.len_chars());
        self.rope.insert_char(at, ch);
        self.tags.insert(at, tag);
        self.marks.update_after_insert(at, 1);
    }

    /// Insert `text` at `at`, every char carrying `tag`.
    pub fn insert_str(&mut self, at: usize, text: &str, tag: CharTag) {
        let len = text.chars().count();
        if len == 0 {
            return;
        }
        let at = at.min(self.len_chars());
        self.rope.insert(at, text);
        self.tags.splice(at..at, std::iter::repeat_n(tag, len));
        self.marks.update_after_insert(at, len);
    }

    /// Remove the chars in `range`, clamped to the buffer.
    pub fn remove(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let (from, to) = (range.start.min(len), range.end.min(len));
        if from >= to {
            return;
        }
        self.rope.remove(from..to);
        self.tags.drain(from..to);
        self.marks.update_after_delete(from, to);
    }

    /// Drop everything past `len` chars.
    pub fn truncate(&mut self, len: usize) {
        self.remove(len..self.len_chars());
    }

    /// Replace `range` with user-typed `text`.
    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        let start = range.start.min(range.end);
        self.remove(start..range.end.max(range.start));
        self.insert_str(start, text, CharTag::User);
    }

    /// Remove every placeholder and literal char in place, leaving only what
    /// the user typed. Marks follow the removals.
    pub fn strip_mask_chars(&mut self) {
        let runs = self
            .tags
            .iter()
            .enumerate()
            .chunk_by(|(_, tag)| tag.is_mask())
            .into_iter()
            .filter(|(is_mask, _)| *is_mask)
            .filter_map(|(_, mut run)| {
                let (first, _) = run.next()?;
                let last = run.last().map_or(first, |(idx, _)| idx);
                Some(first..last + 1)
            })
            .collect_vec();

        // Back to front so earlier ranges stay valid.
        for range in runs.into_iter().rev() {
            self.remove(range);
        }
    }
}

// Selection anchoring
impl MaskBuffer {
    /// Anchor `selection` as marks so it follows subsequent edits.
    pub fn anchor_selection(&mut self, selection: Selection) {
        let selection = selection.clamped(self.len_chars());
        self.marks.set(MarkId::SelectionStart, selection.start);
        self.marks.set(MarkId::SelectionEnd, selection.end);
    }

    /// Resolve and release the selection marks. Without an anchored
    /// selection this is a cursor at the buffer end.
    pub fn release_selection(&mut self) -> Selection {
        let len = self.len_chars();
        self.marks.clamp(len);
        let start = self.marks.unset(MarkId::SelectionStart).unwrap_or(len);
        let end = self.marks.unset(MarkId::SelectionEnd).unwrap_or(start);
        Selection::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags_of(s: &str) -> Vec<CharTag> {
        s.chars()
            .map(|c| match c {
                'u' => CharTag::User,
                'p' => CharTag::Placeholder,
                _ => CharTag::Literal,
            })
            .collect()
    }

    #[test]
    fn from_user_text_tags_everything_user() {
        let buf = MaskBuffer::from_user_text("héllo");
        assert_eq!(buf.len_chars(), 5);
        assert!(buf.tags().iter().all(|t| *t == CharTag::User));
        assert_eq!(buf.to_string(), "héllo");
    }

    #[test]
    fn insert_keeps_tags_aligned() {
        let mut buf = MaskBuffer::from_user_text("13");
        buf.insert_char(1, '-', CharTag::Literal);
        buf.insert_str(3, "__", CharTag::Placeholder);
        assert_eq!(buf.to_string(), "1-3__");
        assert_eq!(buf.tags(), tags_of("ulupp").as_slice());
    }

    #[test]
    fn insert_past_end_appends() {
        let mut buf = MaskBuffer::from_user_text("ab");
        buf.insert_char(10, 'c', CharTag::User);
        assert_eq!(buf.to_string(), "abc");
    }

    #[test]
    fn remove_clamps_range() {
        let mut buf = MaskBuffer::from_user_text("abcdef");
        buf.remove(4..99);
        assert_eq!(buf.to_string(), "abcd");
        buf.remove(3..1);
        assert_eq!(buf.to_string(), "abcd");
        assert_eq!(buf.tags().len(), 4);
    }

    #[test]
    fn truncate() {
        let mut buf = MaskBuffer::from_user_text("12345");
        buf.truncate(2);
        assert_eq!(buf.to_string(), "12");
        buf.truncate(10);
        assert_eq!(buf.to_string(), "12");
    }

    #[test]
    fn replace_inserts_user_chars() {
        let mut buf = MaskBuffer::new();
        buf.insert_str(0, "(__)", CharTag::Literal);
        buf.replace(1..3, "42");
        assert_eq!(buf.to_string(), "(42)");
        assert_eq!(buf.tags(), tags_of("luul").as_slice());
    }

    #[test]
    fn strip_mask_chars_removes_runs() {
        let mut buf = MaskBuffer::new();
        buf.insert_str(0, "(", CharTag::Literal);
        buf.insert_str(1, "5", CharTag::User);
        buf.insert_str(2, "_", CharTag::Placeholder);
        buf.insert_str(3, ") ", CharTag::Literal);
        buf.insert_str(5, "7", CharTag::User);
        assert_eq!(buf.to_string(), "(5_) 7");

        assert_eq!(buf.user_text(), "57");
        assert_eq!(buf.to_string(), "(5_) 7");

        buf.strip_mask_chars();
        assert_eq!(buf.to_string(), "57");
        assert_eq!(buf.tags(), tags_of("uu").as_slice());

        buf.strip_mask_chars();
        assert_eq!(buf.to_string(), "57");
    }

    #[test]
    fn strip_moves_selection() {
        let mut buf = MaskBuffer::new();
        buf.insert_str(0, "(", CharTag::Literal);
        buf.insert_str(1, "56", CharTag::User);
        buf.insert_str(3, ") ", CharTag::Literal);
        buf.insert_str(5, "7", CharTag::User);
        buf.anchor_selection(Selection::new(2, 6));

        buf.strip_mask_chars();

        assert_eq!(buf.release_selection(), Selection::new(1, 3));
        assert!(buf.marks().is_empty());
    }

    #[test]
    fn anchored_selection_is_clamped() {
        let mut buf = MaskBuffer::from_user_text("abc");
        buf.anchor_selection(Selection::new(7, 1));
        assert_eq!(buf.release_selection(), Selection::new(3, 1));
    }

    #[test]
    fn release_without_anchor_is_end_cursor() {
        let mut buf = MaskBuffer::from_user_text("abc");
        assert_eq!(buf.release_selection(), Selection::cursor(3));
    }
}
