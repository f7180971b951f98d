//! Content type descriptors.
//!
//! A [`ContentType`] names a kind of content: its schema, how instances are
//! built, which permission guards adding them, and a set of tags the
//! containment rules can match on.

use std::collections::BTreeSet;
use std::fmt;

use trellis_foundation::{ContainerId, Error, ErrorKind, LtMap, Result, Value};
use trellis_storage::{Content, Marker};

use crate::bound::BoundContentType;
use crate::constraints::{ContainerTypesConstraint, ItemTypePrecondition};
use crate::registry::ContentTypeRegistry;
use crate::schema::{ContentSchema, apply_field};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tag carried by types that can be added wherever active types are allowed.
pub const ACTIVE: &str = "active";
/// Tag carried by types that can never be added.
pub const INACTIVE: &str = "inactive";
/// Tag carried by top-level portal types.
pub const PORTAL: &str = "portal";
/// Tag for types a container must name explicitly to accept.
pub const EXPLICITLY_ADDABLE: &str = "explicitly-addable";
/// Tag for container types an item must name explicitly to enter.
pub const EXPLICITLY_CONTAINED: &str = "explicitly-contained";

/// Default permission required to add content.
pub const DEFAULT_PERMISSION: &str = "trellis.AddContent";

/// How instances of a content type are constructed.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Factory {
    /// Arguments that must be supplied, positionally or by name.
    pub required_args: Vec<String>,
    /// Arguments that may be supplied by name.
    pub optional_args: Vec<String>,
    /// Instances hold children of their own.
    pub container: bool,
    /// Instances that hold children keep a manual order.
    pub order_aware: bool,
    /// Markers given to every instance.
    pub markers: Vec<Marker>,
}

impl Factory {
    /// Creates a factory for plain items.
    #[must_use]
    pub fn item() -> Self {
        Self::default()
    }

    /// Creates a factory for containers that keep a manual order.
    #[must_use]
    pub fn container() -> Self {
        Self {
            container: true,
            order_aware: true,
            ..Self::default()
        }
    }

    /// Adds a required argument.
    #[must_use]
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.required_args.push(name.into());
        self
    }

    /// Adds an optional argument.
    #[must_use]
    pub fn with_optional(mut self, name: impl Into<String>) -> Self {
        self.optional_args.push(name.into());
        self
    }

    /// Sets whether containers keep a manual order.
    #[must_use]
    pub fn with_order(mut self, order_aware: bool) -> Self {
        self.order_aware = order_aware;
        self
    }

    /// Adds a marker given to every instance.
    #[must_use]
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.markers.push(marker);
        self
    }

    fn takes(&self, name: &str) -> bool {
        self.required_args.iter().chain(&self.optional_args).any(|a| a == name)
    }

    fn build(&self, type_name: &str) -> Content {
        let mut content = Content::new(type_name);
        for marker in &self.markers {
            content = content.with_marker(*marker);
        }
        if self.container {
            content = content.with_marker(Marker::ContentContainer);
            if self.order_aware {
                content = content.with_marker(Marker::OrderAware);
            }
        }
        content
    }
}

/// A registered kind of content.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContentType {
    /// Unique type name.
    pub name: String,
    /// Human readable title.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Fields accepted as creation data.
    pub schema: ContentSchema,
    /// Instance construction; `None` means the type cannot be created.
    pub factory: Option<Factory>,
    /// Permission required to add instances. Empty means unrestricted.
    pub permission: String,
    /// Name of a custom add form.
    pub add_form: Option<String>,
    /// Tags matched by containment rules.
    pub tags: BTreeSet<String>,
    /// What instances may contain, if they are containers.
    pub contains: Option<ItemTypePrecondition>,
    /// Which containers instances may be added to.
    pub containers: Option<ContainerTypesConstraint>,
}

impl ContentType {
    /// Creates a content type with the item schema and no factory.
    #[must_use]
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            description: String::new(),
            schema: ContentSchema::item(),
            factory: None,
            permission: DEFAULT_PERMISSION.to_string(),
            add_form: None,
            tags: BTreeSet::new(),
            contains: None,
            containers: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the schema.
    #[must_use]
    pub fn with_schema(mut self, schema: ContentSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the factory.
    #[must_use]
    pub fn with_factory(mut self, factory: Factory) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Sets the permission required to add instances.
    #[must_use]
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = permission.into();
        self
    }

    /// Sets the add form name.
    #[must_use]
    pub fn with_add_form(mut self, add_form: impl Into<String>) -> Self {
        self.add_form = Some(add_form.into());
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Sets what instances may contain.
    #[must_use]
    pub fn with_contains(mut self, precondition: ItemTypePrecondition) -> Self {
        self.contains = Some(precondition);
        self
    }

    /// Sets which containers instances may enter.
    #[must_use]
    pub fn with_containers(mut self, constraint: ContainerTypesConstraint) -> Self {
        self.containers = Some(constraint);
        self
    }

    /// Returns true if the type carries the tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Returns true if the type is tagged inactive.
    #[must_use]
    pub fn is_inactive(&self) -> bool {
        self.has_tag(INACTIVE)
    }

    /// Returns true if instances hold children.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.factory.as_ref().is_some_and(|f| f.container)
    }

    /// Binds the type to a container it would add instances to.
    #[must_use]
    pub fn bind<'a>(
        &'a self,
        registry: &'a ContentTypeRegistry,
        container: ContainerId,
    ) -> BoundContentType<'a> {
        BoundContentType::new(self, registry, container)
    }

    /// Builds a new instance.
    ///
    /// Positional `args` fill the factory's arguments in order. Entries of
    /// `data` fill the remaining factory arguments by name; any other entry
    /// the schema declares is validated and set on the instance.
    ///
    /// # Errors
    ///
    /// Returns `CannotCreate` if the type has no factory, `MissingArgument`
    /// if a required argument is absent, or a validation error from the
    /// schema.
    pub fn create(&self, args: &[Value], data: &LtMap<String, Value>) -> Result<Content> {
        let factory = self
            .factory
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::CannotCreate(self.name.clone())))?;

        for name in factory.required_args.iter().skip(args.len()) {
            if !data.contains_key(name) {
                return Err(Error::new(ErrorKind::MissingArgument(name.clone())));
            }
        }

        let arg_names: Vec<&String> = factory
            .required_args
            .iter()
            .chain(&factory.optional_args)
            .collect();
        if args.len() > arg_names.len() {
            return Err(Error::internal(format!(
                "{} takes {} arguments, {} given",
                self.name,
                arg_names.len(),
                args.len()
            )));
        }

        let mut content = factory.build(&self.name);

        for (name, value) in arg_names.iter().zip(args) {
            self.apply(&mut content, name, value)?;
        }
        for name in arg_names.iter().skip(args.len()) {
            if let Some(value) = data.get(name.as_str()) {
                self.apply(&mut content, name, value)?;
            }
        }

        for (name, value) in data.iter() {
            if factory.takes(name) {
                continue;
            }
            if let Some(field) = self.schema.field(name) {
                field.set(&mut content, value)?;
            }
        }

        log::debug!("created {} instance", self.name);
        Ok(content)
    }

    fn apply(&self, content: &mut Content, name: &str, value: &Value) -> Result<()> {
        match self.schema.field(name) {
            Some(field) => field.set(content, value),
            None => {
                apply_field(content, name, value);
                Ok(())
            }
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<ContentType:{} '{}'>", self.name, self.title)
    }
}
