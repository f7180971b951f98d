//! Containment constraints.
//!
//! Two rules decide whether content may live in a container:
//! - the container's type lists what it may contain
//!   ([`ItemTypePrecondition`], keyed by the container's type name)
//! - the item's type lists where it may live
//!   ([`ContainerTypesConstraint`], keyed by the item's type name)
//!
//! Both match a content type either by name or by one of its tags.

use trellis_foundation::{ContainerId, Error, ErrorKind, Result};
use trellis_storage::{Content, Site};

use crate::content_type::ContentType;
use crate::registry::ContentTypeRegistry;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const UNKNOWN: &str = "<unknown>";

/// What a container type accepts as children.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemTypePrecondition {
    /// Accepted content type names.
    pub types: Vec<String>,
    /// Accepted tags.
    pub tags: Vec<String>,
}

impl ItemTypePrecondition {
    /// Creates a precondition accepting nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a content type by name.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.types, name.into());
        self
    }

    /// Accepts every content type carrying a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        push_unique(&mut self.tags, tag.into());
        self
    }

    /// Returns true if nothing is listed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.tags.is_empty()
    }

    /// Adds everything `other` accepts.
    pub fn merge(&mut self, other: &Self) {
        for name in &other.types {
            push_unique(&mut self.types, name.clone());
        }
        for tag in &other.tags {
            push_unique(&mut self.tags, tag.clone());
        }
    }

    /// Returns true if the content type is accepted.
    #[must_use]
    pub fn accepts(&self, content_type: &ContentType) -> bool {
        self.types.iter().any(|t| *t == content_type.name)
            || self.tags.iter().any(|tag| content_type.has_tag(tag))
    }

    /// Checks an item offered to `container` under `name`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidItemType` if the item has no content type or its type
    /// is not accepted.
    pub fn check(
        &self,
        container: ContainerId,
        name: &str,
        item: Option<&ContentType>,
    ) -> Result<()> {
        if item.is_some_and(|ct| self.accepts(ct)) {
            return Ok(());
        }
        Err(Error::new(ErrorKind::InvalidItemType {
            container,
            item: item.map_or(UNKNOWN, |ct| ct.name.as_str()).to_string(),
            allowed: self.allowed(),
            name: name.to_string(),
        }))
    }

    fn allowed(&self) -> Vec<String> {
        self.types.iter().chain(&self.tags).cloned().collect()
    }
}

/// Which container types an item type may live in.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainerTypesConstraint {
    /// Accepted container type names.
    pub types: Vec<String>,
    /// Accepted container tags.
    pub tags: Vec<String>,
}

impl ContainerTypesConstraint {
    /// Creates a constraint accepting no container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a container type by name.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        push_unique(&mut self.types, name.into());
        self
    }

    /// Accepts every container type carrying a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        push_unique(&mut self.tags, tag.into());
        self
    }

    /// Adds everything `other` accepts.
    pub fn merge(&mut self, other: &Self) {
        for name in &other.types {
            push_unique(&mut self.types, name.clone());
        }
        for tag in &other.tags {
            push_unique(&mut self.tags, tag.clone());
        }
    }

    /// Checks a container by its content type.
    ///
    /// # Errors
    ///
    /// Returns `InvalidContainerType` if the container has no content type or
    /// its type is not accepted.
    pub fn check(&self, container_type: Option<&ContentType>) -> Result<()> {
        let Some(ct) = container_type else {
            return Err(self.rejection(UNKNOWN));
        };

        if self.types.iter().any(|t| *t == ct.name) || self.tags.iter().any(|tag| ct.has_tag(tag))
        {
            return Ok(());
        }
        Err(self.rejection(&ct.name))
    }

    fn rejection(&self, container_type: &str) -> Error {
        Error::new(ErrorKind::InvalidContainerType {
            container_type: container_type.to_string(),
            allowed: self.types.clone(),
        })
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// Checks whether `content` may be stored in `container` under `name`.
///
/// The container's precondition is consulted if its type has one; otherwise
/// the content merely needs a registered type. Then the content type's
/// container constraint, if any, must accept the container.
///
/// # Errors
///
/// Returns `InvalidItemType` or `InvalidContainerType` when a rule rejects
/// the placement, or an error if the container is not live.
pub fn check_object(
    registry: &ContentTypeRegistry,
    site: &Site,
    container: ContainerId,
    name: &str,
    content: &Content,
) -> Result<()> {
    let folder = site.folder(container)?;
    let container_type = registry.folder_content_type(folder);
    let item_type = registry.content_type_of(content);

    match container_type.and_then(|ct| registry.precondition(&ct.name)) {
        Some(precondition) => precondition.check(container, name, item_type)?,
        None => {
            if item_type.is_none() {
                return Err(Error::new(ErrorKind::InvalidItemType {
                    container,
                    item: UNKNOWN.to_string(),
                    allowed: Vec::new(),
                    name: name.to_string(),
                }));
            }
        }
    }

    if let Some(constraint) = item_type.and_then(|ct| registry.container_constraint(&ct.name)) {
        constraint.check(container_type)?;
    }
    Ok(())
}

/// Checks whether instances of `content_type` could be added to `container`.
///
/// # Errors
///
/// Returns `InvalidContainerType` if the container has no content type or the
/// item type refuses it, and `InvalidItemType` if the container refuses the
/// item type.
pub fn check_content_type(
    registry: &ContentTypeRegistry,
    site: &Site,
    container: ContainerId,
    content_type: &ContentType,
) -> Result<()> {
    let folder = site.folder(container)?;
    let Some(container_type) = registry.folder_content_type(folder) else {
        return Err(Error::new(ErrorKind::InvalidContainerType {
            container_type: UNKNOWN.to_string(),
            allowed: Vec::new(),
        }));
    };

    if let Some(precondition) = registry.precondition(&container_type.name) {
        precondition.check(container, "", Some(content_type))?;
    }
    if let Some(constraint) = registry.container_constraint(&content_type.name) {
        constraint.check(Some(container_type))?;
    }
    Ok(())
}
