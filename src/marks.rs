//! Mark system for tracking offsets in a mask buffer.
//!
//! Marks are named char offsets that automatically update when the buffer is
//! modified. They have "mark" gravity: text inserted exactly at a mark goes
//! after it, so the mark keeps its offset.

use std::collections::HashMap;

/// A unique identifier for a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkId {
    SelectionStart,
    SelectionEnd,
}

/// Manages all marks in a buffer.
#[derive(Debug, Clone, Default)]
pub struct MarkSet {
    marks: HashMap<MarkId, usize>,
}

impl MarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a mark by ID.
    pub fn get(&self, id: MarkId) -> Option<usize> {
        self.marks.get(&id).copied()
    }

    /// Set the offset of a mark.
    pub fn set(&mut self, id: MarkId, offset: usize) {
        self.marks.insert(id, offset);
    }

    /// Unset a mark, returning its last offset.
    pub fn unset(&mut self, id: MarkId) -> Option<usize> {
        self.marks.remove(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Update all marks after `len` chars were inserted at `at`.
    pub fn update_after_insert(&mut self, at: usize, len: usize) {
        for offset in self.marks.values_mut() {
            if *offset > at {
                *offset += len;
            }
        }
    }

    /// Update all marks after deleting the chars in `from..to`.
    pub fn update_after_delete(&mut self, from: usize, to: usize) {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };

        for offset in self.marks.values_mut() {
            if *offset <= from {
                continue;
            }
            // Marks in the deletion range move to start of deletion
            if *offset < to {
                *offset = from;
            } else {
                *offset -= to - from;
            }
        }
    }

    /// Pull every mark back into `0..=len`.
    pub fn clamp(&mut self, len: usize) {
        for offset in self.marks.values_mut() {
            *offset = (*offset).min(len);
        }
    }
}
