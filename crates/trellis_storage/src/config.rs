//! Configuration for a site.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`Site`](crate::Site).
///
/// Controls the root folder and whether order indices are maintained
/// automatically.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SiteConfig {
    /// Content type name of the root folder.
    pub root_type: Option<String>,

    /// Install the handler that keeps order indices in step with children.
    pub maintain_orders: bool,

    /// Whether the root folder keeps a manual child order.
    pub order_aware_root: bool,

    /// Names reserved in the root folder.
    pub reserved_names: Vec<String>,

    /// Maximum number of events kept in the journal (0 = unbounded).
    pub journal_limit: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root_type: None,
            maintain_orders: true,
            order_aware_root: true,
            reserved_names: Vec::new(),
            journal_limit: 0,
        }
    }
}

impl SiteConfig {
    /// Creates a configuration for a site whose root has the given type.
    #[must_use]
    pub fn rooted(root_type: impl Into<String>) -> Self {
        Self {
            root_type: Some(root_type.into()),
            ..Self::default()
        }
    }

    /// Builder method to set the root content type.
    #[must_use]
    pub fn with_root_type(mut self, root_type: impl Into<String>) -> Self {
        self.root_type = Some(root_type.into());
        self
    }

    /// Builder method to enable or disable automatic order maintenance.
    #[must_use]
    pub fn with_order_maintenance(mut self, enabled: bool) -> Self {
        self.maintain_orders = enabled;
        self
    }

    /// Builder method to set whether the root keeps a manual order.
    #[must_use]
    pub fn with_order_aware_root(mut self, order_aware: bool) -> Self {
        self.order_aware_root = order_aware;
        self
    }

    /// Builder method to reserve a name in the root folder.
    #[must_use]
    pub fn with_reserved_name(mut self, name: impl Into<String>) -> Self {
        self.reserved_names.push(name.into());
        self
    }

    /// Builder method to bound the event journal.
    #[must_use]
    pub fn with_journal_limit(mut self, limit: usize) -> Self {
        self.journal_limit = limit;
        self
    }
}
