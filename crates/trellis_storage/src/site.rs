//! The site: every container, its annotations and the event plumbing.
//!
//! A [`Site`] owns a tree of [`Folder`]s rooted at [`Site::root`]. All
//! structural changes (insert, remove, rename, relocate, duplicate) go
//! through the site, which records a [`SiteEvent`] for each and runs the
//! registered [`EventHandler`]s synchronously. Folder and annotation tables
//! are persistent maps, so [`Site::atomically`] can snapshot and restore
//! them cheaply.

use std::sync::Arc;

use trellis_foundation::{ContainerId, Error, ErrorKind, LtOrdMap, Result};

use crate::allocator::ContainerAllocator;
use crate::annotation::AnnotationStore;
use crate::config::SiteConfig;
use crate::container::{Container, Folder, Placement};
use crate::content::{Content, Marker};
use crate::event::{EventHandler, Journal, ObjectMoved, OrderMaintainer, SiteEvent};
use crate::order::OrderIndex;
use crate::ordered::OrderedContainer;

#[cfg(feature = "serde")]
mod serde_support {
    use super::{ContainerAllocator, ContainerId, Folder, LtOrdMap, Site, SiteConfig};
    use crate::annotation::AnnotationStore;
    use serde::ser::SerializeStruct;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Site {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            // Handlers and the journal are runtime state
            let mut state = serializer.serialize_struct("Site", 5)?;
            state.serialize_field("config", &self.config)?;
            state.serialize_field("root", &self.root)?;
            state.serialize_field("folders", &self.folders)?;
            state.serialize_field("annotations", &self.annotations)?;
            state.serialize_field("allocator", &self.allocator)?;
            state.end()
        }
    }

    #[derive(Deserialize)]
    struct SiteData {
        config: SiteConfig,
        root: ContainerId,
        folders: LtOrdMap<ContainerId, Folder>,
        annotations: AnnotationStore,
        allocator: ContainerAllocator,
    }

    impl<'de> Deserialize<'de> for Site {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let data = SiteData::deserialize(deserializer)?;
            let mut site = Site::assemble(data.config, data.root, data.allocator);
            site.folders = data.folders;
            site.annotations = data.annotations;
            Ok(site)
        }
    }
}

/// A tree of containers with annotations and synchronous event handlers.
///
/// Clone is cheap: folder and annotation tables share structure, and
/// handlers are reference counted.
#[derive(Clone, Debug)]
pub struct Site {
    config: SiteConfig,
    root: ContainerId,
    folders: LtOrdMap<ContainerId, Folder>,
    annotations: AnnotationStore,
    allocator: ContainerAllocator,
    handlers: Vec<Arc<dyn EventHandler>>,
    journal: Journal,
}

impl Default for Site {
    fn default() -> Self {
        Self::new()
    }
}

impl Site {
    /// Creates a site with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SiteConfig::default())
    }

    /// Creates a site with the given configuration.
    #[must_use]
    pub fn with_config(config: SiteConfig) -> Self {
        let mut allocator = ContainerAllocator::new();
        let root = allocator.allocate();

        let mut folder = Folder::new(root).with_content_type(config.root_type.clone());
        folder.mark(Marker::ContentContainer);
        if config.order_aware_root {
            folder.mark(Marker::OrderAware);
        }
        for name in &config.reserved_names {
            folder.reserve(name.clone());
        }

        let mut site = Self::assemble(config, root, allocator);
        site.folders.insert(root, folder);
        site
    }

    /// Builds a site around existing tables, installing handlers per config.
    fn assemble(config: SiteConfig, root: ContainerId, allocator: ContainerAllocator) -> Self {
        let mut handlers: Vec<Arc<dyn EventHandler>> = Vec::new();
        if config.maintain_orders {
            handlers.push(Arc::new(OrderMaintainer));
        }
        let journal = Journal::new(config.journal_limit);

        Self {
            config,
            root,
            folders: LtOrdMap::new(),
            annotations: AnnotationStore::new(),
            allocator,
            handlers,
            journal,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Returns the root folder id.
    #[must_use]
    pub fn root(&self) -> ContainerId {
        self.root
    }

    /// Registers an event handler. Handlers run in registration order.
    pub fn add_handler(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    // --- Lookup ---

    /// Gets a folder.
    ///
    /// # Errors
    ///
    /// Returns `StaleContainer` or `ContainerNotFound` if the id does not
    /// name a live folder.
    pub fn folder(&self, id: ContainerId) -> Result<&Folder> {
        self.allocator.validate(id)?;
        self.folders
            .get(&id)
            .ok_or_else(|| Error::container_not_found(id))
    }

    /// Gets a folder mutably.
    ///
    /// # Errors
    ///
    /// Returns `StaleContainer` or `ContainerNotFound` if the id does not
    /// name a live folder.
    pub fn folder_mut(&mut self, id: ContainerId) -> Result<&mut Folder> {
        self.allocator.validate(id)?;
        self.folders
            .get_mut(&id)
            .ok_or_else(|| Error::container_not_found(id))
    }

    /// Returns the ids of all live folders.
    pub fn folder_ids(&self) -> impl Iterator<Item = ContainerId> + '_ {
        self.folders.keys().copied()
    }

    /// Returns the number of live folders, the root included.
    #[must_use]
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Gets a child of a folder.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder is not live or has no such child.
    pub fn child(&self, container: ContainerId, name: &str) -> Result<&Content> {
        self.folder(container)?
            .get(name)
            .ok_or_else(|| Error::name_not_found(name))
    }

    /// Gets a child of a folder mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if the folder is not live or has no such child.
    pub fn child_mut(&mut self, container: ContainerId, name: &str) -> Result<&mut Content> {
        self.folder_mut(container)?
            .child_mut(name)
            .ok_or_else(|| Error::name_not_found(name))
    }

    /// Returns the folder a child holds its own children in.
    ///
    /// # Errors
    ///
    /// Returns `NotAContainer` if the child is not a folder.
    pub fn child_folder(&self, container: ContainerId, name: &str) -> Result<ContainerId> {
        self.child(container, name)?
            .folder()
            .ok_or_else(|| Error::new(ErrorKind::NotAContainer))
    }

    /// Returns true if `ancestor` is `id` or contains it, at any depth.
    #[must_use]
    pub fn is_within(&self, id: ContainerId, ancestor: ContainerId) -> bool {
        let mut current = Some(id);
        while let Some(folder) = current {
            if folder == ancestor {
                return true;
            }
            current = self.folders.get(&folder).and_then(Folder::parent);
        }
        false
    }

    /// Returns the annotation table.
    #[must_use]
    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Returns the annotation table mutably.
    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    // --- Structural changes ---

    /// Adds content to a folder under a name.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the name is taken, `InvalidName` if it is
    /// empty, or any error raised by an event handler.
    pub fn insert(
        &mut self,
        container: ContainerId,
        name: impl Into<String>,
        content: Content,
    ) -> Result<()> {
        let name = name.into();
        if content.is_folder() {
            return Err(Error::internal(format!(
                "{name} already holds a folder; relocate or duplicate it instead"
            )));
        }

        self.attach(container, &name, content)?;
        log::debug!("inserted {name} into {container}");
        self.notify(SiteEvent::Moved(ObjectMoved::added(container, name)))
    }

    /// Creates a child folder and returns its id.
    ///
    /// The folder takes its content type from `content`.
    ///
    /// # Errors
    ///
    /// Fails like [`insert`](Self::insert).
    pub fn create_folder(
        &mut self,
        parent: ContainerId,
        name: impl Into<String>,
        content: Content,
        markers: &[Marker],
    ) -> Result<ContainerId> {
        let name = name.into();
        self.check_free(parent, &name)?;

        let id = self.allocator.allocate();
        let folder = Folder::new(id)
            .with_content_type(content.content_type().map(str::to_owned))
            .with_markers(markers);
        self.folders.insert(id, folder);

        let mut content = content;
        content.set_folder(Some(id));
        if let Err(err) = self.attach(parent, &name, content) {
            self.abandon(id);
            return Err(err);
        }

        log::debug!("created folder {id} as {name} in {parent}");
        self.notify(SiteEvent::Moved(ObjectMoved::added(parent, name)))?;
        Ok(id)
    }

    /// Removes a child and returns it.
    ///
    /// A removed folder is abandoned along with everything below it: ids
    /// become stale and annotations, including orders, are dropped.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if there is no such child, or
    /// `UnremovableContent` if the child refuses removal.
    pub fn remove(&mut self, container: ContainerId, name: &str) -> Result<Content> {
        if self.child(container, name)?.has_marker(Marker::Unremovable) {
            return Err(Error::new(ErrorKind::UnremovableContent(name.to_owned())));
        }

        let mut content = self
            .folder_mut(container)?
            .take(name)
            .ok_or_else(|| Error::name_not_found(name))?;

        if let Some(nested) = content.folder() {
            self.abandon(nested);
            content.set_folder(None);
        }

        log::debug!("removed {name} from {container}");
        self.notify(SiteEvent::Moved(ObjectMoved::removed(container, name)))?;
        Ok(content)
    }

    /// Renames a child within its folder.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if there is no such child, or `DuplicateName`
    /// if the new name is taken.
    pub fn rename(
        &mut self,
        container: ContainerId,
        old_name: &str,
        new_name: impl Into<String>,
    ) -> Result<()> {
        self.relocate(container, old_name, container, new_name)
    }

    /// Moves a child to another folder (or another name in the same folder).
    ///
    /// Moving to the same folder under the same name does nothing.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if there is no such child, `DuplicateName` if
    /// the target name is taken, or `MoveIntoSelf` if a folder would end up
    /// inside itself.
    pub fn relocate(
        &mut self,
        from: ContainerId,
        name: &str,
        to: ContainerId,
        new_name: impl Into<String>,
    ) -> Result<()> {
        let new_name = new_name.into();
        let nested = self.child(from, name)?.folder();
        if from == to && name == new_name {
            return Ok(());
        }

        self.check_free(to, &new_name)?;
        if let Some(nested) = nested {
            if self.is_within(to, nested) {
                return Err(Error::new(ErrorKind::MoveIntoSelf(name.to_owned())));
            }
        }

        let content = self
            .folder_mut(from)?
            .take(name)
            .ok_or_else(|| Error::name_not_found(name))?;
        self.attach(to, &new_name, content)?;

        log::debug!("moved {from}/{name} to {to}/{new_name}");
        self.notify(SiteEvent::Moved(ObjectMoved::moved(
            from, name, to, new_name,
        )))
    }

    /// Copies a child, with everything below it, into a folder.
    ///
    /// Copied folders get fresh ids and carry copies of their annotations.
    ///
    /// # Errors
    ///
    /// Returns `NameNotFound` if there is no such child, `DuplicateName` if
    /// the target name is taken, or `MoveIntoSelf` if a folder would be
    /// copied into itself.
    pub fn duplicate(
        &mut self,
        from: ContainerId,
        name: &str,
        to: ContainerId,
        new_name: impl Into<String>,
    ) -> Result<()> {
        let new_name = new_name.into();
        let mut copy = self.child(from, name)?.clone();

        self.check_free(to, &new_name)?;
        if let Some(nested) = copy.folder() {
            if self.is_within(to, nested) {
                return Err(Error::new(ErrorKind::MoveIntoSelf(name.to_owned())));
            }
            let copied = self.copy_tree(nested)?;
            copy.set_folder(Some(copied));
        }

        self.attach(to, &new_name, copy)?;

        log::debug!("copied {from}/{name} to {to}/{new_name}");
        self.notify(SiteEvent::Copied {
            source: from,
            source_name: name.to_owned(),
            target: to,
            target_name: new_name.clone(),
        })?;
        self.notify(SiteEvent::Moved(ObjectMoved::added(to, new_name)))
    }

    /// Runs `f` as one unit: if it fails, folders, annotations, ids and the
    /// journal are restored to their state before the call.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`.
    pub fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let folders = self.folders.clone();
        let annotations = self.annotations.clone();
        let allocator = self.allocator.clone();
        let journal = self.journal.clone();

        match f(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                log::debug!("rolling back: {err}");
                self.folders = folders;
                self.annotations = annotations;
                self.allocator = allocator;
                self.journal = journal;
                Err(err)
            }
        }
    }

    // --- Orders ---

    /// Returns true if the folder is live and keeps a manual order.
    #[must_use]
    pub fn has_order(&self, id: ContainerId) -> bool {
        self.folder(id).is_ok_and(Folder::is_order_aware)
    }

    /// Returns the stored order index of a folder without creating one.
    #[must_use]
    pub fn query_order(&self, id: ContainerId) -> Option<&OrderIndex> {
        self.annotations.order(id)
    }

    /// Returns the order index of a folder, building it from the current
    /// children if none is stored yet.
    ///
    /// # Errors
    ///
    /// Returns `NotOrderAware` if the folder does not keep a manual order,
    /// or an error if the id does not name a live folder.
    pub fn ensure_order(&mut self, id: ContainerId) -> Result<&mut OrderIndex> {
        if !self.folder(id)?.is_order_aware() {
            return Err(Error::new(ErrorKind::NotOrderAware(id)));
        }

        if self.annotations.order(id).is_none() {
            let index = OrderIndex::from_container(self.folder(id)?);
            self.annotations.set_order(id, index);
        }

        self.annotations
            .order_mut(id)
            .ok_or_else(|| Error::internal(format!("order of {id} vanished")))
    }

    /// Returns an ordered view of a folder.
    ///
    /// # Errors
    ///
    /// Fails like [`ensure_order`](Self::ensure_order).
    pub fn order(&mut self, id: ContainerId) -> Result<OrderedContainer<'_>> {
        self.ensure_order(id)?;

        let folder = self
            .folders
            .get(&id)
            .ok_or_else(|| Error::container_not_found(id))?;
        let index = self
            .annotations
            .order_mut(id)
            .ok_or_else(|| Error::internal(format!("order of {id} vanished")))?;

        Ok(OrderedContainer::new(id, folder, index, &mut self.journal))
    }

    // --- Events ---

    /// Returns the events recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SiteEvent] {
        self.journal.events()
    }

    /// Removes and returns the recorded events.
    pub fn drain_events(&mut self) -> Vec<SiteEvent> {
        self.journal.drain()
    }

    /// Records an event and runs every handler on it.
    fn notify(&mut self, event: SiteEvent) -> Result<()> {
        log::trace!("event: {event}");
        self.journal.push(event.clone());

        let handlers = self.handlers.clone();
        for handler in &handlers {
            handler.handle(self, &event)?;
        }
        Ok(())
    }

    // --- Internals ---

    fn check_free(&self, container: ContainerId, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::invalid_name("empty names are not allowed"));
        }
        if self.folder(container)?.contains(name) {
            return Err(Error::new(ErrorKind::DuplicateName(name.to_owned())));
        }
        Ok(())
    }

    /// Stores content under a name and points a nested folder at its new
    /// place.
    fn attach(&mut self, container: ContainerId, name: &str, content: Content) -> Result<()> {
        self.check_free(container, name)?;

        let nested = content.folder();
        self.folder_mut(container)?.put(name, content);

        if let Some(nested) = nested {
            if let Some(folder) = self.folders.get_mut(&nested) {
                folder.set_placement(Some(Placement {
                    parent: container,
                    name: name.to_owned(),
                }));
            }
        }
        Ok(())
    }

    /// Drops a folder and everything below it.
    fn abandon(&mut self, id: ContainerId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(folder) = self.folders.remove(&current) {
                pending.extend(folder.children().values().filter_map(Content::folder));
            }
            self.annotations.drop_container(current);
            if let Err(err) = self.allocator.release(current) {
                log::warn!("abandoning {current}: {err}");
            }
        }
    }

    /// Copies a folder and everything below it under fresh ids.
    fn copy_tree(&mut self, source: ContainerId) -> Result<ContainerId> {
        let mut folder = self.folder(source)?.clone();
        let id = self.allocator.allocate();
        folder.reassign(id);

        let nested: Vec<(String, ContainerId)> = folder
            .children()
            .iter()
            .filter_map(|(name, child)| child.folder().map(|f| (name.clone(), f)))
            .collect();

        for (name, child_source) in nested {
            let child_id = self.copy_tree(child_source)?;
            if let Some(child) = folder.child_mut(&name) {
                child.set_folder(Some(child_id));
            }
            if let Some(child_folder) = self.folders.get_mut(&child_id) {
                child_folder.set_placement(Some(Placement { parent: id, name }));
            }
        }

        let keys: Vec<String> = self
            .annotations
            .keys_for(source)
            .into_iter()
            .map(str::to_owned)
            .collect();
        for key in keys {
            if let Some(annotation) = self.annotations.get(source, &key).cloned() {
                self.annotations.set(id, key, annotation);
            }
        }

        self.folders.insert(id, folder);
        Ok(id)
    }
}
