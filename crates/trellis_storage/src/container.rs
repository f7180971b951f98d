//! Containers: named collections of content.

use trellis_foundation::{ContainerId, LtOrdMap, LtSet};

use crate::content::{Content, Marker};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read access to the children of a container.
///
/// This is everything an order index needs from the container it
/// describes: names in native iteration order, lookup, and membership.
pub trait Container {
    /// Returns child names in the container's native iteration order.
    fn keys(&self) -> impl Iterator<Item = &str>;

    /// Gets a child by name.
    fn get(&self, name: &str) -> Option<&Content>;

    /// Returns the number of children.
    fn len(&self) -> usize;

    /// Returns true if a child with this name exists.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Returns true if the container has no children.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a folder is stored: its parent container and its name there.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement {
    /// The containing folder.
    pub parent: ContainerId,
    /// The folder's name within the parent.
    pub name: String,
}

/// A container record.
///
/// Children are kept in a sorted map, so native iteration is by name.
/// Structural changes go through [`Site`](crate::Site) so that event
/// handlers see them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Folder {
    id: ContainerId,
    content_type: Option<String>,
    placement: Option<Placement>,
    children: LtOrdMap<String, Content>,
    markers: LtSet<Marker>,
    reserved: LtSet<String>,
}

impl Folder {
    pub(crate) fn new(id: ContainerId) -> Self {
        Self {
            id,
            content_type: None,
            placement: None,
            children: LtOrdMap::new(),
            markers: LtSet::new(),
            reserved: LtSet::new(),
        }
    }

    pub(crate) fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }

    pub(crate) fn with_markers<'a>(mut self, markers: impl IntoIterator<Item = &'a Marker>) -> Self {
        for marker in markers {
            self.markers = self.markers.insert(*marker);
        }
        self
    }

    /// Returns this folder's id.
    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Returns the content type name of the folder itself.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns where the folder is stored, or `None` for a root.
    #[must_use]
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// Returns the parent folder id, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ContainerId> {
        self.placement.as_ref().map(|p| p.parent)
    }

    /// Returns true if the folder carries the marker.
    #[must_use]
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Returns true if the folder keeps a manual child order.
    #[must_use]
    pub fn is_order_aware(&self) -> bool {
        self.has_marker(Marker::OrderAware)
    }

    /// Returns the folder's markers.
    #[must_use]
    pub fn markers(&self) -> &LtSet<Marker> {
        &self.markers
    }

    /// Adds a marker to the folder.
    pub fn mark(&mut self, marker: Marker) {
        self.markers = self.markers.insert(marker);
    }

    /// Returns true if the name is reserved in this folder.
    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.iter().any(|r| r == name)
    }

    /// Reserves a name so that content cannot be stored under it.
    pub fn reserve(&mut self, name: impl Into<String>) {
        self.reserved = self.reserved.insert(name.into());
    }

    /// Returns the reserved names.
    #[must_use]
    pub fn reserved_names(&self) -> &LtSet<String> {
        &self.reserved
    }

    /// Returns the children map.
    #[must_use]
    pub fn children(&self) -> &LtOrdMap<String, Content> {
        &self.children
    }

    /// Gets a mutable reference to a child.
    ///
    /// Only the child's data can change this way; its name and presence
    /// cannot.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Content> {
        self.children.get_mut(name)
    }

    /// Gives the folder a new id and detaches it, for copying.
    pub(crate) fn reassign(&mut self, id: ContainerId) {
        self.id = id;
        self.placement = None;
    }

    pub(crate) fn set_placement(&mut self, placement: Option<Placement>) {
        self.placement = placement;
    }

    pub(crate) fn put(&mut self, name: impl Into<String>, content: Content) -> Option<Content> {
        self.children.insert(name.into(), content)
    }

    pub(crate) fn take(&mut self, name: &str) -> Option<Content> {
        self.children.remove(name)
    }
}

impl Container for Folder {
    fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    fn get(&self, name: &str) -> Option<&Content> {
        self.children.get(name)
    }

    fn len(&self) -> usize {
        self.children.len()
    }

    fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }
}
