//! Container identifiers with generational indices.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Container identifier with generational index for stale reference detection.
///
/// The generation counter increments when a container slot is reused after the
/// container was abandoned, so ids held by annotations or callers that outlive
/// their container are detected instead of silently aliasing a new one.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerId {
    /// Index into container storage.
    pub index: u64,
    /// Generation counter for stale reference detection.
    pub generation: u32,
}

impl ContainerId {
    /// Creates a new container ID with the given index and generation.
    #[must_use]
    pub const fn new(index: u64, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId({}v{})", self.index, self.generation)
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Container({})", self.index)
    }
}
