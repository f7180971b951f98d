//! Content records stored as children of containers.

use chrono::{DateTime, Utc};
use trellis_foundation::{ContainerId, Error, ErrorKind, LtMap, LtSet, Result, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capability markers carried by content and containers.
///
/// Markers replace interface declarations: a container is order-aware
/// because it carries [`Marker::OrderAware`], not because of its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Marker {
    /// The container accepts content added through content types.
    ContentContainer,
    /// The container keeps a manual child order.
    OrderAware,
    /// Constraints are read from the container's own content type.
    ContainerNamesContainer,
    /// Constraints are read from the item's content type.
    ContentNamesContainer,
    /// An empty name is derived from the title.
    TitleBasedName,
    /// The content refuses to be removed.
    Unremovable,
    /// The content keeps its name when moved or copied.
    RenameNotAllowed,
}

/// Seconds from the epoch to 2000-01-01T00:00:00Z.
const EFFECTIVE_FLOOR_SECS: i64 = 946_684_800;

/// Seconds from the epoch to 2100-01-01T00:00:00Z.
const EXPIRES_DEFAULT_SECS: i64 = 4_102_444_800;

/// The earliest effective date content can carry.
#[must_use]
pub fn effective_floor() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(EFFECTIVE_FLOOR_SECS, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// The expiration date given to new content.
#[must_use]
pub fn default_expires() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(EXPIRES_DEFAULT_SECS, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A child of a container.
///
/// If the content is itself a container, `folder` names the container
/// record holding its children.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Content {
    content_type: Option<String>,
    title: String,
    description: String,
    effective: DateTime<Utc>,
    expires: DateTime<Utc>,
    attributes: LtMap<String, Value>,
    markers: LtSet<Marker>,
    folder: Option<ContainerId>,
}

impl Content {
    /// Creates content of the given content type with default dates.
    #[must_use]
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..Self::untyped()
        }
    }

    /// Creates content that no content type claims.
    #[must_use]
    pub fn untyped() -> Self {
        Self {
            content_type: None,
            title: String::new(),
            description: String::new(),
            effective: effective_floor(),
            expires: default_expires(),
            attributes: LtMap::new(),
            markers: LtSet::new(),
            folder: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a marker.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers = self.markers.insert(marker);
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Returns the content type name, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Returns the effective date.
    #[must_use]
    pub fn effective(&self) -> DateTime<Utc> {
        self.effective
    }

    /// Sets the effective date. Dates before 2000-01-01 are raised to it;
    /// clearing it goes back to 2000-01-01.
    pub fn set_effective(&mut self, effective: Option<DateTime<Utc>>) {
        self.effective = effective.map_or_else(effective_floor, |date| date.max(effective_floor()));
    }

    /// Returns the expiration date.
    #[must_use]
    pub fn expires(&self) -> DateTime<Utc> {
        self.expires
    }

    /// Sets the expiration date; clearing it goes back to 2100-01-01.
    pub fn set_expires(&mut self, expires: Option<DateTime<Utc>>) {
        self.expires = expires.unwrap_or_else(default_expires);
    }

    /// Checks that the content becomes effective before it expires.
    ///
    /// # Errors
    ///
    /// Returns `PublishingDates` if the content would expire before it
    /// becomes effective.
    pub fn validate_publishing_dates(&self) -> Result<()> {
        if self.effective < self.expires {
            Ok(())
        } else {
            Err(Error::new(ErrorKind::PublishingDates))
        }
    }

    /// Gets an attribute.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Sets an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes = self.attributes.insert(name.into(), value.into());
    }

    /// Returns all attributes.
    #[must_use]
    pub fn attributes(&self) -> &LtMap<String, Value> {
        &self.attributes
    }

    /// Returns true if the content carries the marker.
    #[must_use]
    pub fn has_marker(&self, marker: Marker) -> bool {
        self.markers.contains(&marker)
    }

    /// Returns the markers.
    #[must_use]
    pub fn markers(&self) -> &LtSet<Marker> {
        &self.markers
    }

    /// Returns the container holding this content's children, if any.
    #[must_use]
    pub fn folder(&self) -> Option<ContainerId> {
        self.folder
    }

    /// Returns true if this content is itself a container.
    #[must_use]
    pub fn is_folder(&self) -> bool {
        self.folder.is_some()
    }

    pub(crate) fn set_folder(&mut self, folder: Option<ContainerId>) {
        self.folder = folder;
    }
}
