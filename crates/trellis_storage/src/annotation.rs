//! Side-table data attached to containers.
//!
//! Annotations are keyed by container id and a string key. The order index
//! of a container lives here under [`ORDER_ANNOTATION_KEY`].

use trellis_foundation::{ContainerId, LtOrdMap, Value};

use crate::order::OrderIndex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Annotation key under which a container's order index is stored.
pub const ORDER_ANNOTATION_KEY: &str = "trellis.content-containerorder";

/// A value attached to a container.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Annotation {
    /// A child order index.
    Order(OrderIndex),
    /// Arbitrary data.
    Value(Value),
}

impl Annotation {
    /// Returns the order index, if this is one.
    #[must_use]
    pub fn as_order(&self) -> Option<&OrderIndex> {
        match self {
            Self::Order(index) => Some(index),
            Self::Value(_) => None,
        }
    }

    /// Returns the order index mutably, if this is one.
    pub fn as_order_mut(&mut self) -> Option<&mut OrderIndex> {
        match self {
            Self::Order(index) => Some(index),
            Self::Value(_) => None,
        }
    }

    /// Returns the value, if this is one.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Order(_) => None,
        }
    }
}

/// Annotations for all containers of a site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnotationStore {
    entries: LtOrdMap<(ContainerId, String), Annotation>,
}

impl AnnotationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets an annotation.
    #[must_use]
    pub fn get(&self, container: ContainerId, key: &str) -> Option<&Annotation> {
        self.entries.get(&(container, key.to_owned()))
    }

    /// Gets an annotation mutably.
    pub fn get_mut(&mut self, container: ContainerId, key: &str) -> Option<&mut Annotation> {
        self.entries.get_mut(&(container, key.to_owned()))
    }

    /// Sets an annotation, returning the previous one.
    pub fn set(
        &mut self,
        container: ContainerId,
        key: impl Into<String>,
        annotation: Annotation,
    ) -> Option<Annotation> {
        self.entries.insert((container, key.into()), annotation)
    }

    /// Removes an annotation.
    pub fn remove(&mut self, container: ContainerId, key: &str) -> Option<Annotation> {
        self.entries.remove(&(container, key.to_owned()))
    }

    /// Returns true if the annotation exists.
    #[must_use]
    pub fn contains(&self, container: ContainerId, key: &str) -> bool {
        self.get(container, key).is_some()
    }

    /// Returns the annotation keys held for a container.
    #[must_use]
    pub fn keys_for(&self, container: ContainerId) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|(id, _)| *id == container)
            .map(|(_, key)| key.as_str())
            .collect()
    }

    /// Drops every annotation of a container. Returns how many were dropped.
    pub fn drop_container(&mut self, container: ContainerId) -> usize {
        let keys: Vec<(ContainerId, String)> = self
            .entries
            .keys()
            .filter(|(id, _)| *id == container)
            .cloned()
            .collect();

        for key in &keys {
            self.entries.remove(key);
        }
        keys.len()
    }

    /// Gets the order index of a container.
    #[must_use]
    pub fn order(&self, container: ContainerId) -> Option<&OrderIndex> {
        self.get(container, ORDER_ANNOTATION_KEY)
            .and_then(Annotation::as_order)
    }

    /// Gets the order index of a container mutably.
    pub fn order_mut(&mut self, container: ContainerId) -> Option<&mut OrderIndex> {
        self.get_mut(container, ORDER_ANNOTATION_KEY)
            .and_then(Annotation::as_order_mut)
    }

    /// Stores the order index of a container.
    pub fn set_order(&mut self, container: ContainerId, index: OrderIndex) {
        self.set(container, ORDER_ANNOTATION_KEY, Annotation::Order(index));
    }

    /// Returns the number of annotations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no annotations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
