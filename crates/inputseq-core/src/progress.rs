#![forbid(unsafe_code)]

//! Progress bookkeeping shared by every sequence kind.
//!
//! [`Progress`] owns the position cursor, the per-position success record and
//! the completed flag. It knows nothing about tokens or input; automata decide
//! *when* to advance, reset, or complete and delegate the state changes here.
//!
//! # Invariants
//!
//! 1. `0 <= index <= len`, and the record always has exactly `len` entries.
//! 2. For a non-empty sequence, `index == len` is only reached by advancing
//!    past the final position or by [`Progress::fill`], both of which also
//!    complete.
//! 3. After [`Progress::reset`] the cursor is 0, nothing is complete, and
//!    every record entry is false.
//! 4. [`Progress::resets`] moves exactly when a reset discarded a cursor
//!    position or a completion.

use crate::error::{Result, SequenceError};

/// Outcome of [`Progress::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the next position.
    Moved,
    /// The final position matched; the sequence is now complete.
    Completed,
    /// Nothing to advance (already complete, or zero length).
    Stuck,
}

/// Cursor, success record, and completion flag for one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    index: usize,
    record: Vec<bool>,
    completed: bool,
    resets: u64,
}

impl Progress {
    /// Fresh progress for a sequence of `len` positions.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            record: vec![false; len],
            completed: false,
            resets: 0,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.record.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Next expected position.
    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn record(&self) -> &[bool] {
        &self.record
    }

    /// True iff the position just before the cursor was matched.
    #[must_use]
    pub fn last_input_successful(&self) -> bool {
        self.index > 0 && self.record[self.index - 1]
    }

    /// True iff every position has been matched.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.record.iter().all(|&matched| matched)
    }

    /// Mark the current position matched and move past it.
    pub fn advance(&mut self) -> Advance {
        if self.completed || self.index >= self.record.len() {
            return Advance::Stuck;
        }
        self.record[self.index] = true;
        self.index += 1;
        if self.index == self.record.len() {
            self.completed = true;
            Advance::Completed
        } else {
            Advance::Moved
        }
    }

    /// Number of resets that discarded progress.
    #[inline]
    #[must_use]
    pub fn resets(&self) -> u64 {
        self.resets
    }

    /// Back to the start with an empty record.
    pub fn reset(&mut self) {
        if self.index > 0 || self.completed {
            self.resets = self.resets.wrapping_add(1);
        }
        self.index = 0;
        self.completed = false;
        self.record.fill(false);
    }

    /// Set the completed flag without touching cursor or record.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Rewrite into the fully matched terminal form.
    pub fn fill(&mut self) {
        self.record.fill(true);
        self.index = self.record.len();
        self.completed = true;
    }

    /// Read one record entry.
    pub fn get(&self, index: usize) -> Result<bool> {
        self.record
            .get(index)
            .copied()
            .ok_or(SequenceError::IndexOutOfRange {
                index,
                len: self.record.len(),
            })
    }

    /// Overwrite one record entry.
    pub fn set(&mut self, index: usize, matched: bool) -> Result<()> {
        let len = self.record.len();
        let slot = self
            .record
            .get_mut(index)
            .ok_or(SequenceError::IndexOutOfRange { index, len })?;
        *slot = matched;
        Ok(())
    }
}
