//! A container seen through its order index.

use trellis_foundation::{ContainerId, Error, Result, Value};

use crate::container::{Container, Folder};
use crate::content::Content;
use crate::event::{Journal, SiteEvent};
use crate::order::{OrderIndex, Position};

/// A folder bound to its order index.
///
/// Names come from the index, in display order; the children themselves
/// come from the folder. Obtained from [`Site::order`](crate::Site::order).
#[derive(Debug)]
pub struct OrderedContainer<'a> {
    id: ContainerId,
    folder: &'a Folder,
    index: &'a mut OrderIndex,
    journal: &'a mut Journal,
}

impl<'a> OrderedContainer<'a> {
    pub(crate) fn new(
        id: ContainerId,
        folder: &'a Folder,
        index: &'a mut OrderIndex,
        journal: &'a mut Journal,
    ) -> Self {
        Self {
            id,
            folder,
            index,
            journal,
        }
    }

    /// Returns the folder id.
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Returns the underlying index.
    #[must_use]
    pub fn index(&self) -> &OrderIndex {
        self.index
    }

    // --- Sequence access ---

    /// Returns child names in display order.
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.index.names()
    }

    /// Returns children in display order.
    #[must_use]
    pub fn values(&self) -> Vec<&Content> {
        self.index
            .names()
            .filter_map(|name| self.folder.get(name))
            .collect()
    }

    /// Returns `(name, child)` pairs in display order.
    #[must_use]
    pub fn items(&self) -> Vec<(&str, &Content)> {
        self.index
            .names()
            .filter_map(|name| self.folder.get(name).map(|child| (name, child)))
            .collect()
    }

    /// Returns the children from `start` (default 0) up to `stop` (default
    /// the number of children), in display order.
    #[must_use]
    pub fn slice(&self, start: Option<usize>, stop: Option<usize>) -> Vec<&Content> {
        let start = start.unwrap_or(0);
        let stop = stop.unwrap_or_else(|| self.folder.len());

        self.index
            .names()
            .skip(start)
            .take(stop.saturating_sub(start))
            .filter_map(|name| self.folder.get(name))
            .collect()
    }

    /// Gets a child by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Content> {
        self.folder.get(name)
    }

    /// Returns true if the folder holds a child with this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.folder.contains(name)
    }

    /// Returns the number of ordered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no names are ordered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the child stored at a position.
    ///
    /// # Errors
    ///
    /// Returns `PositionNotFound` if the position is free.
    pub fn get_by_position(&self, position: Position) -> Result<&Content> {
        let name = self.index.name_at(position)?;
        self.folder
            .get(name)
            .ok_or_else(|| Error::name_not_found(name))
    }

    /// See [`OrderIndex::next_key`].
    ///
    /// # Errors
    ///
    /// Fails like [`OrderIndex::next_key`].
    pub fn next_key(&self, name: Option<&str>) -> Result<&str> {
        self.index.next_key(name)
    }

    /// See [`OrderIndex::previous_key`].
    ///
    /// # Errors
    ///
    /// Fails like [`OrderIndex::previous_key`].
    pub fn previous_key(&self, name: Option<&str>) -> Result<&str> {
        self.index.previous_key(name)
    }

    /// See [`OrderIndex::key_position`].
    ///
    /// # Errors
    ///
    /// Fails like [`OrderIndex::key_position`].
    pub fn key_position(&self, name: Option<&str>) -> Result<Position> {
        self.index.key_position(name)
    }

    // --- Mutation ---

    /// Appends a child's name to the order.
    ///
    /// Returns false if the name is already ordered.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the folder has no such child.
    pub fn add_item(&mut self, name: &str) -> Result<bool> {
        if !self.folder.contains(name) {
            return Err(Error::name_not_found(name));
        }
        Ok(self.index.add_item(name))
    }

    /// Drops a name from the order. Returns false if it was not ordered.
    pub fn remove_item(&mut self, name: &str) -> bool {
        self.index.remove_item(name)
    }

    /// Re-reads the folder's children in name order, discarding the manual
    /// order.
    pub fn rebuild(&mut self) {
        self.index.rebuild(self.folder);
    }

    /// See [`OrderIndex::move_up`].
    pub fn move_up<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        self.index.move_up(names)
    }

    /// See [`OrderIndex::move_down`].
    pub fn move_down<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        self.index.move_down(names)
    }

    /// See [`OrderIndex::move_top`].
    pub fn move_top<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        self.index.move_top(names)
    }

    /// See [`OrderIndex::move_bottom`].
    pub fn move_bottom<S: AsRef<str>>(&mut self, names: &[S]) -> bool {
        self.index.move_bottom(names)
    }

    /// Replaces the whole order and records that the folder was modified.
    ///
    /// # Errors
    ///
    /// Fails like [`OrderIndex::update_order`]; nothing is recorded then.
    pub fn update_order<S: AsRef<str>>(&mut self, new_order: &[S]) -> Result<()> {
        self.index.update_order(new_order)?;
        self.journal.push(SiteEvent::ContainerModified(self.id));
        Ok(())
    }

    /// Replaces the whole order from an untyped value.
    ///
    /// # Errors
    ///
    /// Returns `TypeMismatch` unless the value is a list of text, and
    /// otherwise fails like [`update_order`](Self::update_order).
    pub fn update_order_value(&mut self, new_order: &Value) -> Result<()> {
        let names = new_order.as_text_list()?;
        self.update_order(&names)
    }
}
