//! Core identifiers, values, errors and persistent collections for Trellis.
//!
//! This crate provides:
//! - [`ContainerId`] - Generational container identifiers
//! - [`Value`] - Dynamic values for content attributes and form input
//! - [`Type`] - Type descriptors for schema validation
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`LtVec`], [`LtSet`], [`LtMap`], [`LtOrdMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod id;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtOrdMap, LtSet, LtVec};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::ContainerId;
pub use types::Type;
pub use value::Value;
