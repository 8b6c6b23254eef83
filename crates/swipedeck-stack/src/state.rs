#![forbid(unsafe_code)]

//! Authoritative index bookkeeping for the card stack.
//!
//! [`StackStateManager`] owns the mapping from stack position to backing-data
//! index and the ordered swipe history. Every structural mutation renumbers
//! both sequences so they stay a permutation of the backing range.
//!
//! # Invariants
//!
//! 1. `remaining_indices` holds no duplicates.
//! 2. `remaining_indices` and the history's indices together are always a
//!    permutation of `[0, total_index_count())`.
//! 3. History is append-only except for [`undo_swipe`](StackStateManager::undo_swipe),
//!    which pops the tail; [`swipe`](StackStateManager::swipe) is the sole
//!    grower.
//!
//! # Failure Modes
//!
//! - Out-of-range positions panic (the caller handed us a position that does
//!   not exist); out-of-range indices are the controller's count-validation
//!   job, not ours.
//! - `swipe` on an empty stack and `undo_swipe` on an empty history are
//!   silent no-ops.

use swipedeck_core::Direction;

/// One entry of the swipe history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Swipe {
    /// Backing-data index of the swiped item.
    pub index: usize,
    /// Direction it left in.
    pub direction: Direction,
}

/// Tracks which backing indices remain and which have been swiped, in order.
#[derive(Debug, Clone, Default)]
pub struct StackStateManager {
    remaining_indices: Vec<usize>,
    swipes: Vec<Swipe>,
}

impl StackStateManager {
    /// An empty state manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing indices not yet swiped, in display order (0 = top).
    #[inline]
    #[must_use]
    pub fn remaining_indices(&self) -> &[usize] {
        &self.remaining_indices
    }

    /// The swipe history in chronological order.
    #[inline]
    #[must_use]
    pub fn swipes(&self) -> &[Swipe] {
        &self.swipes
    }

    /// Total number of indices tracked, remaining plus swiped.
    #[inline]
    #[must_use]
    pub fn total_index_count(&self) -> usize {
        self.remaining_indices.len() + self.swipes.len()
    }

    /// Insert a new backing index at the given remaining position.
    ///
    /// Every tracked index ≥ `index` is renumbered up by one first, in both
    /// the remaining sequence and the history.
    pub fn insert(&mut self, index: usize, position: usize) {
        for i in &mut self.remaining_indices {
            if *i >= index {
                *i += 1;
            }
        }
        for swipe in &mut self.swipes {
            if swipe.index >= index {
                swipe.index += 1;
            }
        }
        self.remaining_indices.insert(position, index);
    }

    /// Remove a backing index, wherever it lives, renumbering every larger
    /// index down by one.
    pub fn delete(&mut self, index: usize) {
        self.swipes.retain(|swipe| swipe.index != index);
        if let Some(position) = self.remaining_indices.iter().position(|&i| i == index) {
            self.remaining_indices.remove(position);
        }
        for i in &mut self.remaining_indices {
            if *i > index {
                *i -= 1;
            }
        }
        for swipe in &mut self.swipes {
            if swipe.index > index {
                swipe.index -= 1;
            }
        }
    }

    /// Remove several backing indices.
    ///
    /// Duplicates are dropped (first occurrence wins) and the input is
    /// processed left to right, re-biasing each subsequent index down by one
    /// whenever it is ≥ the index just removed.
    pub fn delete_all(&mut self, indices: &[usize]) {
        let mut pending = removing_duplicates(indices);
        while !pending.is_empty() {
            let index = pending.remove(0);
            self.delete(index);
            for i in &mut pending {
                if *i >= index {
                    *i -= 1;
                }
            }
        }
    }

    /// Remove the backing index at a remaining position.
    ///
    /// Panics if `position` is out of range.
    pub fn delete_at_position(&mut self, position: usize) {
        let index = self.remaining_indices.remove(position);
        for i in &mut self.remaining_indices {
            if *i > index {
                *i -= 1;
            }
        }
        for swipe in &mut self.swipes {
            if swipe.index > index {
                swipe.index -= 1;
            }
        }
    }

    /// Remove the backing indices at several remaining positions, re-biasing
    /// subsequent positions downward after each removal.
    pub fn delete_at_positions(&mut self, positions: &[usize]) {
        let mut pending = removing_duplicates(positions);
        while !pending.is_empty() {
            let position = pending.remove(0);
            self.delete_at_position(position);
            for p in &mut pending {
                if *p >= position {
                    *p -= 1;
                }
            }
        }
    }

    /// Pop the top remaining index into the history. No-op when empty.
    pub fn swipe(&mut self, direction: Direction) {
        if self.remaining_indices.is_empty() {
            return;
        }
        let index = self.remaining_indices.remove(0);
        self.swipes.push(Swipe { index, direction });
    }

    /// Pop the most recent swipe and restore its index to the top.
    #[must_use]
    pub fn undo_swipe(&mut self) -> Option<Swipe> {
        let last = self.swipes.pop()?;
        self.remaining_indices.insert(0, last.index);
        Some(last)
    }

    /// Rotate the remaining indices by `distance`, positive toward the back.
    ///
    /// Distances wrap modularly, so negative values and magnitudes larger
    /// than the sequence length are fine. The history is untouched.
    pub fn shift(&mut self, distance: isize) {
        let len = self.remaining_indices.len();
        if len == 0 {
            return;
        }
        let offset = distance.rem_euclid(len as isize) as usize;
        self.remaining_indices.rotate_left(offset);
    }

    /// Reinitialize to the identity permutation `[0, count)` with an empty
    /// history.
    pub fn reset(&mut self, count: usize) {
        self.remaining_indices = (0..count).collect();
        self.swipes.clear();
    }
}

fn removing_duplicates(values: &[usize]) -> Vec<usize> {
    let mut seen = Vec::with_capacity(values.len());
    for &value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
