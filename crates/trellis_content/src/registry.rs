//! The content type registry.
//!
//! Holds every [`ContentType`] by name along with the containment rules and
//! availability checkers that apply to them. Rules are keyed by type name
//! and may be declared before or after the type they name.

use std::collections::BTreeMap;
use std::sync::Arc;

use trellis_foundation::{ContainerId, Error, ErrorKind, Result};
use trellis_storage::{Content, Folder, Site};

use crate::bound::BoundContentType;
use crate::checker::ContentTypeChecker;
use crate::constraints::{ContainerTypesConstraint, ItemTypePrecondition};
use crate::content_type::{ACTIVE, ContentType, INACTIVE};

/// Registry of content types, containment rules and checkers.
#[derive(Debug, Default, Clone)]
pub struct ContentTypeRegistry {
    types: BTreeMap<String, ContentType>,
    preconditions: BTreeMap<String, ItemTypePrecondition>,
    container_constraints: BTreeMap<String, ContainerTypesConstraint>,
    checkers: Vec<Arc<dyn ContentTypeChecker + Send + Sync>>,
}

impl ContentTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Registration ---

    /// Registers a content type.
    ///
    /// A type without a factory is tagged inactive; inactive wins over
    /// active; a type with no tags at all is tagged active. The type's own
    /// `contains` and `containers` rules are merged into the registry, and a
    /// type that names nothing it contains accepts every active type.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateRegistration` if the name is taken.
    pub fn register(&mut self, content_type: ContentType) -> Result<()> {
        if self.types.contains_key(&content_type.name) {
            return Err(Error::new(ErrorKind::DuplicateRegistration(
                content_type.name.clone(),
            )));
        }

        let mut content_type = content_type;
        if content_type.factory.is_none() {
            content_type.tags.insert(INACTIVE.to_string());
        }
        if content_type.is_inactive() {
            content_type.tags.remove(ACTIVE);
        }
        if content_type.tags.is_empty() {
            content_type.tags.insert(ACTIVE.to_string());
        }

        let contains = content_type.contains.clone().unwrap_or_default();
        self.add_precondition(&content_type.name, &contains);
        if let Some(containers) = &content_type.containers {
            self.add_container_constraint(&content_type.name, containers);
        }

        log::debug!("registered content type {}", content_type.name);
        self.types.insert(content_type.name.clone(), content_type);
        Ok(())
    }

    /// Extends what containers of type `name` accept.
    ///
    /// A precondition left empty accepts every active type.
    pub fn add_precondition(&mut self, name: &str, precondition: &ItemTypePrecondition) {
        let entry = self.preconditions.entry(name.to_string()).or_default();
        entry.merge(precondition);
        if entry.is_empty() {
            *entry = ItemTypePrecondition::new().with_tag(ACTIVE);
        }
    }

    /// Extends which containers content of type `name` may enter.
    pub fn add_container_constraint(&mut self, name: &str, constraint: &ContainerTypesConstraint) {
        self.container_constraints
            .entry(name.to_string())
            .or_default()
            .merge(constraint);
    }

    /// Adds an availability checker.
    pub fn add_checker(&mut self, checker: Arc<dyn ContentTypeChecker + Send + Sync>) {
        self.checkers.push(checker);
    }

    // --- Lookup ---

    /// Gets a content type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ContentType> {
        self.types.get(name)
    }

    /// Gets a content type by name.
    ///
    /// # Errors
    ///
    /// Returns `ContentTypeNotFound` if no type has this name.
    pub fn lookup(&self, name: &str) -> Result<&ContentType> {
        self.get(name)
            .ok_or_else(|| Error::new(ErrorKind::ContentTypeNotFound(name.to_string())))
    }

    /// Returns true if a type with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Returns all types, by name.
    pub fn iter(&self) -> impl Iterator<Item = &ContentType> {
        self.types.values()
    }

    /// Returns the types carrying a tag, by name.
    pub fn types_with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ContentType> {
        self.types.values().filter(move |ct| ct.has_tag(tag))
    }

    /// Returns the number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns what containers of type `name` accept.
    #[must_use]
    pub fn precondition(&self, name: &str) -> Option<&ItemTypePrecondition> {
        self.preconditions.get(name)
    }

    /// Returns which containers content of type `name` may enter.
    #[must_use]
    pub fn container_constraint(&self, name: &str) -> Option<&ContainerTypesConstraint> {
        self.container_constraints.get(name)
    }

    /// Returns the registered checkers.
    #[must_use]
    pub fn checkers(&self) -> &[Arc<dyn ContentTypeChecker + Send + Sync>] {
        &self.checkers
    }

    /// Returns the registered type of a content object.
    #[must_use]
    pub fn content_type_of(&self, content: &Content) -> Option<&ContentType> {
        content.content_type().and_then(|name| self.get(name))
    }

    /// Returns the registered type of a folder.
    #[must_use]
    pub fn folder_content_type(&self, folder: &Folder) -> Option<&ContentType> {
        folder.content_type().and_then(|name| self.get(name))
    }

    // --- Binding ---

    /// Binds the type `name` to a container.
    ///
    /// # Errors
    ///
    /// Returns `ContentTypeNotFound` if no type has this name.
    pub fn bind(&self, name: &str, container: ContainerId) -> Result<BoundContentType<'_>> {
        Ok(self.lookup(name)?.bind(self, container))
    }

    /// Returns a folder's own type, bound to the folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder is not live, or `ContentTypeNotFound`
    /// if its type is not registered.
    pub fn folder_type(&self, site: &Site, folder: ContainerId) -> Result<BoundContentType<'_>> {
        let name = site
            .folder(folder)?
            .content_type()
            .ok_or_else(|| Error::new(ErrorKind::ContentTypeNotFound(String::new())))?;
        self.bind(name, folder)
    }
}
