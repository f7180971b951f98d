//! Moving and copying content between containers.
//!
//! Both operations check the containment rules of the target first and let
//! the target's name chooser settle the final name. The site then raises the
//! usual move events, so order indices follow along on their own.

use trellis_foundation::{ContainerId, Result};
use trellis_storage::{Marker, Site};

use crate::constraints::check_object;
use crate::name_chooser::{NameChooser, NameChooserConfig};
use crate::registry::ContentTypeRegistry;

/// Moves one child of a container elsewhere.
#[derive(Debug, Clone)]
pub struct ContentMover<'a> {
    registry: &'a ContentTypeRegistry,
    config: &'a NameChooserConfig,
    container: ContainerId,
    name: String,
}

impl<'a> ContentMover<'a> {
    /// Creates a mover for the child `name` of `container`.
    #[must_use]
    pub fn new(
        registry: &'a ContentTypeRegistry,
        config: &'a NameChooserConfig,
        container: ContainerId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            config,
            container,
            name: name.into(),
        }
    }

    /// Moves the child into `target`, keeping its name unless `new_name` is
    /// given, and returns the name it ends up under.
    ///
    /// Moving onto itself does nothing. A taken name gets a counter suffix.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the child is gone, a containment error if
    /// the target refuses it, or any error raised while relocating.
    pub fn move_to(
        &self,
        site: &mut Site,
        target: ContainerId,
        new_name: Option<&str>,
    ) -> Result<String> {
        let wanted = new_name.unwrap_or(&self.name);
        let chosen = {
            let content = site.child(self.container, &self.name)?;
            check_object(self.registry, site, target, wanted, content)?;

            if target == self.container && wanted == self.name {
                return Ok(self.name.clone());
            }
            NameChooser::for_container(site, target, self.config)?.choose_name(wanted, content)?
        };

        site.relocate(self.container, &self.name, target, chosen.clone())?;
        Ok(chosen)
    }

    /// Content can always be moved.
    #[must_use]
    pub fn moveable(&self) -> bool {
        true
    }

    /// Returns true if the target's containment rules accept the child.
    ///
    /// # Errors
    ///
    /// Returns errors other than containment rejections, such as a missing
    /// child or a stale target.
    pub fn moveable_to(&self, site: &Site, target: ContainerId, name: Option<&str>) -> Result<bool> {
        placeable(self.registry, site, self.container, &self.name, target, name)
    }
}

/// Copies one child of a container elsewhere.
#[derive(Debug, Clone)]
pub struct ContentCopier<'a> {
    registry: &'a ContentTypeRegistry,
    config: &'a NameChooserConfig,
    container: ContainerId,
    name: String,
}

impl<'a> ContentCopier<'a> {
    /// Creates a copier for the child `name` of `container`.
    #[must_use]
    pub fn new(
        registry: &'a ContentTypeRegistry,
        config: &'a NameChooserConfig,
        container: ContainerId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            config,
            container,
            name: name.into(),
        }
    }

    /// Copies the child into `target` and returns the name of the copy.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the child is gone, a containment error if
    /// the target refuses it, or any error raised while duplicating.
    pub fn copy_to(
        &self,
        site: &mut Site,
        target: ContainerId,
        new_name: Option<&str>,
    ) -> Result<String> {
        let wanted = new_name.unwrap_or(&self.name);
        let chosen = {
            let content = site.child(self.container, &self.name)?;
            check_object(self.registry, site, target, wanted, content)?;
            NameChooser::for_container(site, target, self.config)?.choose_name(wanted, content)?
        };

        site.duplicate(self.container, &self.name, target, chosen.clone())?;
        Ok(chosen)
    }

    /// Returns true unless the child refuses renaming or removal.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if the child is gone.
    pub fn copyable(&self, site: &Site) -> Result<bool> {
        let content = site.child(self.container, &self.name)?;
        Ok(!content.has_marker(Marker::RenameNotAllowed) && !content.has_marker(Marker::Unremovable))
    }

    /// Returns true if the target's containment rules accept the child.
    ///
    /// # Errors
    ///
    /// Returns errors other than containment rejections.
    pub fn copyable_to(&self, site: &Site, target: ContainerId, name: Option<&str>) -> Result<bool> {
        placeable(self.registry, site, self.container, &self.name, target, name)
    }
}

fn placeable(
    registry: &ContentTypeRegistry,
    site: &Site,
    container: ContainerId,
    name: &str,
    target: ContainerId,
    new_name: Option<&str>,
) -> Result<bool> {
    let content = site.child(container, name)?;
    match check_object(registry, site, target, new_name.unwrap_or(name), content) {
        Ok(()) => Ok(true),
        Err(err) if err.is_invalid() => Ok(false),
        Err(err) => Err(err),
    }
}
