//! Content types, containment rules and content movement for Trellis.
//!
//! This crate provides:
//! - [`ContentType`] and [`Factory`] - Named, titled kinds of content
//! - [`ContentTypeRegistry`] - Every registered type plus containment rules
//! - [`ItemTypePrecondition`] and [`ContainerTypesConstraint`] - What may go where
//! - [`BoundContentType`] - A type bound to the container it would add to
//! - [`NameChooser`] - Free, valid names for new children
//! - [`ContentMover`] and [`ContentCopier`] - Moving and copying content
//! - [`addable_content`] and [`portal_content`] - Vocabularies of types
//!
//! # Example
//!
//! ```
//! use trellis_content::{ContentType, ContentTypeRegistry, Factory, NameChooserConfig};
//! use trellis_foundation::LtMap;
//! use trellis_storage::{Site, SiteConfig};
//!
//! let mut registry = ContentTypeRegistry::new();
//! registry
//!     .register(ContentType::new("site", "Site").with_factory(Factory::container()))
//!     .unwrap();
//! registry
//!     .register(ContentType::new("document", "Document").with_factory(Factory::item()))
//!     .unwrap();
//!
//! let mut site = Site::with_config(SiteConfig::rooted("site"));
//! let root = site.root();
//! let document = registry.bind("document", root).unwrap();
//! let content = document.create(&[], &LtMap::new()).unwrap();
//! let name = document
//!     .add(&mut site, content, "", &NameChooserConfig::default())
//!     .unwrap();
//!
//! assert_eq!(name, "document");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bound;
pub mod checker;
pub mod constraints;
pub mod content_type;
pub mod mover;
pub mod name_chooser;
pub mod registry;
pub mod schema;
pub mod vocabulary;

pub use bound::BoundContentType;
pub use checker::{AllowAll, ContentTypeChecker, GrantedPermissions, PermissionChecker, SecurityPolicy};
pub use constraints::{
    ContainerTypesConstraint, ItemTypePrecondition, check_content_type, check_object,
};
pub use content_type::{
    ACTIVE, ContentType, DEFAULT_PERMISSION, EXPLICITLY_ADDABLE, EXPLICITLY_CONTAINED, Factory,
    INACTIVE, PORTAL,
};
pub use mover::{ContentCopier, ContentMover};
pub use name_chooser::{NameChooser, NameChooserConfig, title_slug};
pub use registry::ContentTypeRegistry;
pub use schema::{ContentSchema, FieldSchema};
pub use vocabulary::{Term, addable_content, portal_content};
