//! The persistent child-order index of a container.
//!
//! An [`OrderIndex`] keeps two sorted maps that are exact inverses of each
//! other: `order` from position to child name and `border` from child name
//! to position. Ascending iteration over `order` is the display order of the
//! container's children.
//!
//! Positions are sparse. New names are appended at `last + 1`, batch moves
//! swap positions in place, [`move_top`](OrderIndex::move_top) may produce
//! negative positions, and [`update_order`](OrderIndex::update_order)
//! renumbers densely from 0.

use trellis_foundation::{Error, ErrorKind, LtOrdMap, Result};

use crate::container::Container;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position key in an order index.
pub type Position = i64;

/// Bidirectional position/name index over the children of one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderIndex {
    /// Position -> name.
    order: LtOrdMap<Position, String>,
    /// Name -> position.
    border: LtOrdMap<String, Position>,
}

impl OrderIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an index over the container's current children.
    #[must_use]
    pub fn from_container<C: Container>(container: &C) -> Self {
        let mut index = Self::new();
        index.rebuild(container);
        index
    }

    /// Discards the current order and re-reads the container's children in
    /// their native iteration order.
    pub fn rebuild<C: Container>(&mut self, container: &C) {
        self.clear();
        for name in container.keys() {
            self.add_item(name);
        }
        log::debug!("rebuilt order index with {} names", self.len());
    }

    /// Returns the key the next appended name will receive: one past the
    /// largest position, or 1 for an empty index.
    #[must_use]
    pub fn generate_key(&self) -> Position {
        self.order.last().map_or(1, |(pos, _)| pos + 1)
    }

    /// Appends a name at the end of the order.
    ///
    /// Returns false, changing nothing, if the name is already tracked.
    pub fn add_item(&mut self, name: &str) -> bool {
        if self.border.contains_key(name) {
            return false;
        }

        let pos = self.generate_key();
        self.order.insert(pos, name.to_owned());
        self.border.insert(name.to_owned(), pos);
        true
    }

    /// Drops a name from the order.
    ///
    /// Returns false, changing nothing, if the name is not tracked.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let Some(pos) = self.border.remove(name) else {
            return false;
        };
        self.order.remove(&pos);
        true
    }

    /// Returns the name after `name` in the order.
    ///
    /// Without a name, returns the first name. At the end of the order the
    /// name itself is returned.
    ///
    /// # Errors
    ///
    /// Returns `EmptyOrder` when called without a name on an empty index, or
    /// `NameNotFound` if the name is not tracked.
    pub fn next_key(&self, name: Option<&str>) -> Result<&str> {
        let Some(name) = name else {
            return self.first_name();
        };

        let pos = self.require_position(name)?;
        self.order
            .next_after(&pos)
            .map(|(_, value)| value.as_str())
            .or_else(|| self.order.get(&pos).map(String::as_str))
            .ok_or_else(|| Error::position_not_found(pos))
    }

    /// Returns the name before `name` in the order.
    ///
    /// Without a name, returns the last name. At the start of the order the
    /// name itself is returned.
    ///
    /// # Errors
    ///
    /// Returns `EmptyOrder` when called without a name on an empty index, or
    /// `NameNotFound` if the name is not tracked.
    pub fn previous_key(&self, name: Option<&str>) -> Result<&str> {
        let Some(name) = name else {
            return self.last_name();
        };

        let pos = self.require_position(name)?;
        self.order
            .prev_before(&pos)
            .map(|(_, value)| value.as_str())
            .or_else(|| self.order.get(&pos).map(String::as_str))
            .ok_or_else(|| Error::position_not_found(pos))
    }

    /// Returns the position of a name, or 0 when called without one.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the name is not tracked.
    pub fn key_position(&self, name: Option<&str>) -> Result<Position> {
        match name {
            None => Ok(0),
            Some(name) => self.require_position(name),
        }
    }

    /// Returns the name stored at a position.
    ///
    /// # Errors
    ///
    /// Returns `PositionNotFound` if nothing occupies the position.
    pub fn name_at(&self, position: Position) -> Result<&str> {
        self.order
            .get(&position)
            .map(String::as_str)
            .ok_or_else(|| Error::position_not_found(position))
    }

    /// Returns the position of a name, if tracked.
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<Position> {
        self.border.get(name).copied()
    }

    /// Returns true if the name is tracked.
    #[must_use]
    pub fn is_tracked(&self, name: &str) -> bool {
        self.border.contains_key(name)
    }

    /// Returns the names in display order.
    pub fn names(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.order.values().map(String::as_str)
    }

    /// Returns `(position, name)` pairs in display order.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = (Position, &str)> {
        self.order.iter().map(|(pos, name)| (*pos, name.as_str()))
    }

    /// Returns the number of tracked names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if no names are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the smallest position in use.
    #[must_use]
    pub fn first_position(&self) -> Option<Position> {
        self.order.first().map(|(pos, _)| *pos)
    }

    /// Returns the largest position in use.
    #[must_use]
    pub fn last_position(&self) -> Option<Position> {
        self.order.last().map(|(pos, _)| *pos)
    }

    /// Checks that the two maps are exact inverses of each other.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.order.len() == self.border.len()
            && self
                .border
                .iter()
                .all(|(name, pos)| self.order.get(pos) == Some(name))
    }

    /// Checks that every tracked name is a child of the container and every
    /// child is tracked.
    #[must_use]
    pub fn mirrors<C: Container>(&self, container: &C) -> bool {
        self.len() == container.len() && self.names().all(|name| container.contains(name))
    }

    fn first_name(&self) -> Result<&str> {
        self.order
            .first()
            .map(|(_, name)| name.as_str())
            .ok_or_else(|| Error::new(ErrorKind::EmptyOrder))
    }

    fn last_name(&self) -> Result<&str> {
        self.order
            .last()
            .map(|(_, name)| name.as_str())
            .ok_or_else(|| Error::new(ErrorKind::EmptyOrder))
    }

    fn require_position(&self, name: &str) -> Result<Position> {
        self.position_of(name)
            .ok_or_else(|| Error::name_not_found(name))
    }

    pub(crate) fn prev_position(&self, position: Position) -> Option<Position> {
        self.order.prev_before(&position).map(|(pos, _)| *pos)
    }

    pub(crate) fn next_position(&self, position: Position) -> Option<Position> {
        self.order.next_after(&position).map(|(pos, _)| *pos)
    }

    pub(crate) fn clear(&mut self) {
        self.order.clear();
        self.border.clear();
    }

    /// Exchanges the names stored at two occupied positions.
    pub(crate) fn swap(&mut self, a: Position, b: Position) {
        let (Some(first), Some(second)) = (self.order.get(&a).cloned(), self.order.get(&b).cloned())
        else {
            return;
        };

        self.order.insert(a, second.clone());
        self.order.insert(b, first.clone());
        self.border.insert(first, b);
        self.border.insert(second, a);
    }

    /// Moves the name stored at `from` to the free position `to`.
    pub(crate) fn relocate(&mut self, from: Position, to: Position) {
        let Some(name) = self.order.remove(&from) else {
            return;
        };

        self.order.insert(to, name.clone());
        self.border.insert(name, to);
    }

    /// Stores a name at a position, in both maps.
    pub(crate) fn place(&mut self, position: Position, name: String) {
        self.order.insert(position, name.clone());
        self.border.insert(name, position);
    }
}
