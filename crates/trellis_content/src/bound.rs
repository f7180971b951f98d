//! Content types bound to a container.
//!
//! Binding answers the questions that depend on where content would go:
//! may this type be added here, which types may be added inside a
//! container of this type, and the actual add.

use std::collections::BTreeSet;
use std::fmt;

use trellis_foundation::{ContainerId, Error, ErrorKind, LtMap, Result, Value};
use trellis_storage::{Content, Marker, Site};

use crate::constraints::check_object;
use crate::content_type::{ACTIVE, ContentType, EXPLICITLY_ADDABLE};
use crate::name_chooser::{NameChooser, NameChooserConfig};
use crate::registry::ContentTypeRegistry;

/// Markers a nested folder inherits from the content that holds it.
const FOLDER_MARKERS: [Marker; 3] = [
    Marker::ContentContainer,
    Marker::OrderAware,
    Marker::ContainerNamesContainer,
];

/// A content type together with the container it would add to.
#[derive(Debug, Clone, Copy)]
pub struct BoundContentType<'a> {
    content_type: &'a ContentType,
    registry: &'a ContentTypeRegistry,
    container: ContainerId,
}

impl<'a> BoundContentType<'a> {
    pub(crate) fn new(
        content_type: &'a ContentType,
        registry: &'a ContentTypeRegistry,
        container: ContainerId,
    ) -> Self {
        Self {
            content_type,
            registry,
            container,
        }
    }

    /// Returns the unbound content type.
    #[must_use]
    pub fn content_type(&self) -> &'a ContentType {
        self.content_type
    }

    /// Returns the type name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        &self.content_type.name
    }

    /// Returns the type title.
    #[must_use]
    pub fn title(&self) -> &'a str {
        &self.content_type.title
    }

    /// Returns the container the type is bound to.
    #[must_use]
    pub fn container(&self) -> ContainerId {
        self.container
    }

    /// Returns true if instances may be added to the container: the type is
    /// not inactive and every checker agrees.
    #[must_use]
    pub fn is_addable(&self, site: &Site) -> bool {
        !self.content_type.is_inactive()
            && self
                .registry
                .checkers()
                .iter()
                .all(|checker| checker.check(self.content_type, site, self.container))
    }

    /// Returns true if the type should be offered in the container.
    #[must_use]
    pub fn is_available(&self, site: &Site) -> bool {
        self.is_addable(site)
    }

    /// Lists the types that may be added inside a container of this type.
    ///
    /// This type must be the container's own type. Candidates come from the
    /// container's precondition: named types first, then types carrying a
    /// listed tag. Explicitly-addable types are kept only if the
    /// precondition names them or one of their tags other than the generic
    /// ones. A candidate whose container constraint refuses this type is
    /// dropped. With `check_availability`, unavailable types are dropped
    /// too.
    #[must_use]
    pub fn list_contained_types(&self, site: &Site, check_availability: bool) -> Vec<Self> {
        let is_content_container = site
            .folder(self.container)
            .is_ok_and(|folder| folder.has_marker(Marker::ContentContainer));
        if !is_content_container {
            return Vec::new();
        }
        let Some(precondition) = self.registry.precondition(&self.content_type.name) else {
            return Vec::new();
        };

        let mut seen = BTreeSet::new();
        let mut candidates = Vec::new();
        let named = precondition
            .types
            .iter()
            .filter_map(|name| self.registry.get(name));
        let tagged = precondition
            .tags
            .iter()
            .flat_map(|tag| self.registry.types_with_tag(tag));
        for ct in named.chain(tagged) {
            if seen.insert(ct.name.as_str()) {
                candidates.push(ct);
            }
        }

        let mut result = Vec::new();
        for ct in candidates {
            let explicit = !ct.has_tag(EXPLICITLY_ADDABLE)
                || precondition
                    .tags
                    .iter()
                    .any(|tag| tag != ACTIVE && tag != EXPLICITLY_ADDABLE && ct.has_tag(tag))
                || precondition.types.contains(&ct.name);
            if !explicit {
                continue;
            }

            if let Some(constraint) = self.registry.container_constraint(&ct.name) {
                if constraint.check(Some(self.content_type)).is_err() {
                    continue;
                }
            }

            let bound = ct.bind(self.registry, self.container);
            if !check_availability || bound.is_available(site) {
                result.push(bound);
            }
        }
        result
    }

    /// Checks whether `content` may be stored in the container under `name`.
    ///
    /// # Errors
    ///
    /// Fails like [`check_object`].
    pub fn check_object(&self, site: &Site, name: &str, content: &Content) -> Result<()> {
        check_object(self.registry, site, self.container, name, content)
    }

    /// Builds a new instance; see [`ContentType::create`].
    ///
    /// # Errors
    ///
    /// Fails like [`ContentType::create`].
    pub fn create(&self, args: &[Value], data: &LtMap<String, Value>) -> Result<Content> {
        self.content_type.create(args, data)
    }

    /// Adds content to the container and returns the name it was stored
    /// under.
    ///
    /// The name is chosen by the container's [`NameChooser`]; containers
    /// marked [`Marker::ContainerNamesContainer`] ignore `name` entirely.
    /// Content marked [`Marker::ContentContainer`] gets a folder of its own.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the type is not addable here, `CannotAdd`
    /// if the target is not a content container, a naming error, a
    /// containment error, or any error raised while storing.
    pub fn add(
        &self,
        site: &mut Site,
        content: Content,
        name: &str,
        config: &NameChooserConfig,
    ) -> Result<String> {
        if !self.is_addable(site) {
            return Err(Error::new(ErrorKind::Unauthorized(format!(
                "can't create '{}' instance",
                self.content_type.name
            ))));
        }

        let name = {
            let folder = site.folder(self.container)?;
            if !folder.has_marker(Marker::ContentContainer)
                && !content.has_marker(Marker::ContentNamesContainer)
            {
                return Err(Error::new(ErrorKind::CannotAdd));
            }

            let chooser = NameChooser::new(folder, config);
            if folder.has_marker(Marker::ContainerNamesContainer) {
                chooser.choose_name("", &content)?
            } else {
                let chosen = chooser.choose_name(name, &content)?;
                chooser.check_name(&chosen, &content)?;
                chosen
            }
        };

        self.check_object(site, &name, &content)?;

        if content.has_marker(Marker::ContentContainer) {
            let markers: Vec<Marker> = FOLDER_MARKERS
                .into_iter()
                .filter(|marker| content.has_marker(*marker))
                .collect();
            site.create_folder(self.container, name.clone(), content, &markers)?;
        } else {
            site.insert(self.container, name.clone(), content)?;
        }

        log::debug!(
            "added {} instance as {name} in {}",
            self.content_type.name,
            self.container
        );
        Ok(name)
    }
}

impl fmt::Display for BoundContentType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<BoundContentType:{} '{}'>",
            self.content_type.name, self.content_type.title
        )
    }
}
