//! Containers, annotations and the persistent child-order index for Trellis.
//!
//! This crate provides:
//! - [`Site`] - A tree of folders with synchronous structural events
//! - [`Folder`] and the [`Container`] trait - Named collections of content
//! - [`Content`] - Content objects with markers and publishing dates
//! - [`OrderIndex`] - The persistent manual order of a container's children
//! - [`OrderedContainer`] - A folder seen through its order
//! - [`AnnotationStore`] - Per-container metadata, including orders
//! - [`OrderMaintainer`] - Keeps orders in step with moves
//!
//! # Example
//!
//! ```
//! use trellis_storage::{Content, Site};
//!
//! let mut site = Site::new();
//! let root = site.root();
//! site.insert(root, "a", Content::new("document")).unwrap();
//! site.insert(root, "b", Content::new("document")).unwrap();
//!
//! let mut view = site.order(root).unwrap();
//! view.move_top(&["b"]);
//! assert_eq!(view.keys().collect::<Vec<_>>(), vec!["b", "a"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod annotation;
pub mod config;
pub mod container;
pub mod content;
pub mod event;
pub mod order;
pub mod ordered;
mod reorder;
pub mod site;
#[cfg(feature = "serde")]
pub mod snapshot;

pub use allocator::ContainerAllocator;
pub use annotation::{Annotation, AnnotationStore, ORDER_ANNOTATION_KEY};
pub use config::SiteConfig;
pub use container::{Container, Folder, Placement};
pub use content::{default_expires, effective_floor, Content, Marker};
pub use event::{EventHandler, Journal, ObjectMoved, OrderMaintainer, SiteEvent};
pub use order::{OrderIndex, Position};
pub use ordered::OrderedContainer;
pub use site::Site;
