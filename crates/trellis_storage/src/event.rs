//! Structural events and the handlers that react to them.
//!
//! Every structural change a [`Site`] makes is reported as a [`SiteEvent`],
//! recorded in the site's journal and passed synchronously to each
//! registered [`EventHandler`]. [`OrderMaintainer`] is the handler that keeps
//! order indices in step with their containers.

use std::fmt;

use trellis_foundation::{ContainerId, Result};

use crate::site::Site;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A child moved into, out of, or within the site.
///
/// Additions have no old parent; removals have no new parent. A rename keeps
/// the parent and changes the name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectMoved {
    /// Container the child left.
    pub old_parent: Option<ContainerId>,
    /// Name the child had in the old container.
    pub old_name: Option<String>,
    /// Container the child entered.
    pub new_parent: Option<ContainerId>,
    /// Name the child has in the new container.
    pub new_name: Option<String>,
}

impl ObjectMoved {
    /// A child was added.
    #[must_use]
    pub fn added(parent: ContainerId, name: impl Into<String>) -> Self {
        Self {
            old_parent: None,
            old_name: None,
            new_parent: Some(parent),
            new_name: Some(name.into()),
        }
    }

    /// A child was removed.
    #[must_use]
    pub fn removed(parent: ContainerId, name: impl Into<String>) -> Self {
        Self {
            old_parent: Some(parent),
            old_name: Some(name.into()),
            new_parent: None,
            new_name: None,
        }
    }

    /// A child moved between containers or was renamed.
    #[must_use]
    pub fn moved(
        old_parent: ContainerId,
        old_name: impl Into<String>,
        new_parent: ContainerId,
        new_name: impl Into<String>,
    ) -> Self {
        Self {
            old_parent: Some(old_parent),
            old_name: Some(old_name.into()),
            new_parent: Some(new_parent),
            new_name: Some(new_name.into()),
        }
    }

    /// Returns true if this is an addition.
    #[must_use]
    pub fn is_addition(&self) -> bool {
        self.old_parent.is_none() && self.new_parent.is_some()
    }

    /// Returns true if this is a removal.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.old_parent.is_some() && self.new_parent.is_none()
    }

    /// The container and name the child arrived at, if any.
    #[must_use]
    pub fn destination(&self) -> Option<(ContainerId, &str)> {
        self.new_parent.zip(self.new_name.as_deref())
    }

    /// The container and name the child left, if any.
    #[must_use]
    pub fn origin(&self) -> Option<(ContainerId, &str)> {
        self.old_parent.zip(self.old_name.as_deref())
    }
}

/// Events recorded by a site.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SiteEvent {
    /// A child was added, removed, renamed or relocated.
    Moved(ObjectMoved),
    /// A child was copied. Followed by the `Moved` event adding the copy.
    Copied {
        /// Container of the original.
        source: ContainerId,
        /// Name of the original.
        source_name: String,
        /// Container of the copy.
        target: ContainerId,
        /// Name of the copy.
        target_name: String,
    },
    /// A container's children were reordered.
    ContainerModified(ContainerId),
}

impl fmt::Display for SiteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved(moved) => match (moved.origin(), moved.destination()) {
                (None, Some((to, name))) => write!(f, "added {name} to {to}"),
                (Some((from, name)), None) => write!(f, "removed {name} from {from}"),
                (Some((from, old)), Some((to, new))) => {
                    write!(f, "moved {from}/{old} to {to}/{new}")
                }
                (None, None) => write!(f, "empty move"),
            },
            Self::Copied {
                source,
                source_name,
                target,
                target_name,
            } => write!(f, "copied {source}/{source_name} to {target}/{target_name}"),
            Self::ContainerModified(id) => write!(f, "modified {id}"),
        }
    }
}

/// The record of events a site has raised, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    events: Vec<SiteEvent>,
    limit: usize,
}

impl Journal {
    /// Creates a journal keeping at most `limit` events (0 = unbounded).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            events: Vec::new(),
            limit,
        }
    }

    /// Appends an event, dropping the oldest ones past the limit.
    pub fn push(&mut self, event: SiteEvent) {
        self.events.push(event);
        if self.limit > 0 && self.events.len() > self.limit {
            let excess = self.events.len() - self.limit;
            self.events.drain(..excess);
        }
    }

    /// Returns the recorded events.
    #[must_use]
    pub fn events(&self) -> &[SiteEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<SiteEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Reacts synchronously to site events.
///
/// Handlers run after the change is applied. An error from a handler is
/// returned from the operation that raised the event; wrap the operation in
/// [`Site::atomically`] to roll the change back as well.
pub trait EventHandler: fmt::Debug {
    /// Handles one event.
    ///
    /// # Errors
    ///
    /// Returns an error if the handler cannot bring its data up to date.
    fn handle(&self, site: &mut Site, event: &SiteEvent) -> Result<()>;
}

/// Keeps the order index of order-aware containers in step with their
/// children.
///
/// On every move, the name is appended to the new parent's order and dropped
/// from the old parent's order. Reorderings never pass through here.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderMaintainer;

impl EventHandler for OrderMaintainer {
    fn handle(&self, site: &mut Site, event: &SiteEvent) -> Result<()> {
        let SiteEvent::Moved(moved) = event else {
            return Ok(());
        };

        if let Some((parent, name)) = moved.destination() {
            if site.has_order(parent) {
                site.ensure_order(parent)?.add_item(name);
            }
        }

        if let Some((parent, name)) = moved.origin() {
            if site.has_order(parent) {
                site.ensure_order(parent)?.remove_item(name);
            }
        }

        Ok(())
    }
}
