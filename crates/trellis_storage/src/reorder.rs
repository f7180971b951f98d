//! Batch reordering of an [`OrderIndex`].
//!
//! The four batch moves shift each selected name a single step (or splice
//! the selection to one end) and keep every unselected name in its relative
//! place. Names that are not tracked are ignored. Each step writes both maps
//! together, so the index is consistent after every step of a batch.
//!
//! `move_up` and `move_down` keep a watermark: once a selected name cannot
//! move (it is blocked by the edge or by another selected name that could
//! not move), the names behind it cannot jump over it.

use std::collections::BTreeSet;

use trellis_foundation::{Error, Result};

use crate::order::{OrderIndex, Position};

impl OrderIndex {
    /// Moves each named child one step towards the start.
    ///
    /// Returns true if anything moved.
    pub fn move_up<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        let Some(first) = self.first_position() else {
            return false;
        };

        let positions = self.selected_positions(names);
        let mut targets = positions.iter().copied().peekable();

        let mut min_key = first - 1;
        if targets.peek() == Some(&first) {
            min_key = first;
            targets.next();
        }

        let mut changed = false;
        for idx in targets {
            let Some(prev) = self.prev_position(idx) else {
                continue;
            };

            if prev <= min_key {
                min_key = idx;
                continue;
            }

            log::trace!("move_up: swap {prev} <-> {idx}");
            self.swap(idx, prev);
            changed = true;
        }

        changed
    }

    /// Moves each named child one step towards the end.
    ///
    /// Returns true if anything moved.
    pub fn move_down<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        let Some(last) = self.last_position() else {
            return false;
        };

        let positions = self.selected_positions(names);
        let mut max_key = last + 1;
        let mut changed = false;

        for idx in positions.iter().rev().copied() {
            if idx >= last {
                max_key = last;
                continue;
            }

            let Some(next) = self.next_position(idx) else {
                continue;
            };

            if next >= max_key {
                max_key = idx;
                continue;
            }

            log::trace!("move_down: swap {idx} <-> {next}");
            self.swap(idx, next);
            changed = true;
        }

        changed
    }

    /// Moves the named children to the start, keeping their relative order.
    ///
    /// Returns true if anything moved. Positions below the previous first
    /// position are used, so they may become negative.
    pub fn move_top<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        let Some(mut zero) = self.first_position() else {
            return false;
        };

        let positions = self.selected_positions(names);
        let mut changed = false;

        for idx in positions.iter().rev().copied() {
            if idx == zero {
                continue;
            }

            zero -= 1;
            log::trace!("move_top: {idx} -> {zero}");
            self.relocate(idx, zero);
            changed = true;
        }

        changed
    }

    /// Moves the named children to the end, keeping their relative order.
    ///
    /// Returns true if anything moved.
    pub fn move_bottom<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        let Some(mut end) = self.last_position() else {
            return false;
        };

        let positions = self.selected_positions(names);
        let mut changed = false;

        for idx in positions.iter().copied() {
            if idx == end {
                continue;
            }

            end += 1;
            log::trace!("move_bottom: {idx} -> {end}");
            self.relocate(idx, end);
            changed = true;
        }

        changed
    }

    /// Replaces the whole order.
    ///
    /// The new order must be a permutation of the tracked names. On success
    /// positions are renumbered densely as `0..n`.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleKeySet` if the length differs from the number of
    /// tracked names, or if the names are not exactly the tracked names. The
    /// index is left untouched on error.
    pub fn update_order<S: AsRef<str>>(&mut self, new_order: &[S]) -> Result<()> {
        if new_order.len() != self.len() {
            return Err(Error::incompatible_key_set(self.len(), new_order.len()));
        }

        let requested: BTreeSet<&str> = new_order.iter().map(|name| name.as_ref()).collect();
        let tracked: BTreeSet<&str> = self.names().collect();
        if requested != tracked {
            return Err(Error::incompatible_key_set(tracked.len(), requested.len()));
        }

        self.clear();
        for (pos, name) in (0..).zip(new_order.iter().map(|name| name.as_ref())) {
            self.place(pos, name.to_owned());
        }

        log::debug!("order replaced with {} names", self.len());
        Ok(())
    }

    /// Resolves names to their current positions, ascending, dropping
    /// untracked names and duplicates.
    fn selected_positions<S: AsRef<str>>(&self, names: &[S]) -> BTreeSet<Position> {
        names
            .iter()
            .filter_map(|name| self.position_of(name.as_ref()))
            .collect()
    }
}
