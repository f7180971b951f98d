//! Trellis - Content-type registry and manually ordered content containers
//!
//! This crate re-exports all layers of the Trellis system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: trellis_content    — Content types, containment rules, naming, move/copy
//! Layer 1: trellis_storage    — Sites, folders, annotations, order index, events
//! Layer 0: trellis_foundation — Core types (Value, ContainerId, Error)
//! ```

pub use trellis_content as content;
pub use trellis_foundation as foundation;
pub use trellis_storage as storage;
