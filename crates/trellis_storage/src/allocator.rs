//! Folder id bookkeeping for a site.
//!
//! Every folder in a site is addressed by a [`ContainerId`]. When a folder is
//! abandoned (deleted, or replaced by a copy) its slot is recycled, and the
//! slot's generation moves on so old handles fail with `StaleContainer`
//! instead of silently naming whatever folder took the slot.

use std::collections::BTreeSet;

use trellis_foundation::{ContainerId, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
enum Slot {
    Occupied(u32),
    Vacant(u32),
}

/// Hands out folder ids and recognises ids of abandoned folders.
///
/// Vacant slots are recycled lowest index first, so ids stay compact across
/// long runs of copy and delete.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerAllocator {
    slots: Vec<Slot>,
    vacant: BTreeSet<u64>,
}

impl ContainerAllocator {
    /// Creates an allocator with no folders.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims an id for a new folder.
    pub fn allocate(&mut self) -> ContainerId {
        if let Some(index) = self.vacant.pop_first() {
            if let Some(slot) = usize::try_from(index).ok().and_then(|i| self.slots.get_mut(i)) {
                if let Slot::Vacant(previous) = *slot {
                    let generation = previous.wrapping_add(1);
                    *slot = Slot::Occupied(generation);
                    return ContainerId::new(index, generation);
                }
            }
            log::warn!("vacant slot {index} was not recyclable");
        }

        let index = self.slots.len() as u64;
        self.slots.push(Slot::Occupied(0));
        ContainerId::new(index, 0)
    }

    /// Gives back the id of an abandoned folder.
    ///
    /// # Errors
    ///
    /// Fails like [`validate`](Self::validate); releasing twice is an error.
    pub fn release(&mut self, id: ContainerId) -> Result<()> {
        self.validate(id)?;
        if let Some(slot) = usize::try_from(id.index).ok().and_then(|i| self.slots.get_mut(i)) {
            *slot = Slot::Vacant(id.generation);
            self.vacant.insert(id.index);
        }
        Ok(())
    }

    /// Checks that an id names a folder that is still part of the site.
    ///
    /// # Errors
    ///
    /// Returns `ContainerNotFound` for an index this site never handed out,
    /// and `StaleContainer` once the folder behind the id was abandoned.
    pub fn validate(&self, id: ContainerId) -> Result<()> {
        let slot = usize::try_from(id.index)
            .ok()
            .and_then(|i| self.slots.get(i))
            .ok_or_else(|| Error::container_not_found(id))?;

        match *slot {
            Slot::Occupied(generation) if generation == id.generation => Ok(()),
            Slot::Occupied(_) | Slot::Vacant(_) => Err(Error::stale_container(id)),
        }
    }
}
