//! Error types for the Trellis system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Kinds fall into three families callers care about: lookups that found
//! nothing ([`Error::is_not_found`]), containment-constraint rejections
//! ([`Error::is_invalid`]) and everything else.

use std::fmt;

use thiserror::Error;

use crate::id::ContainerId;
use crate::types::Type;

/// Result alias used throughout Trellis.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Trellis operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a name-not-found error.
    #[must_use]
    pub fn name_not_found(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameNotFound(name.into()))
    }

    /// Creates a position-not-found error.
    #[must_use]
    pub fn position_not_found(position: i64) -> Self {
        Self::new(ErrorKind::PositionNotFound(position))
    }

    /// Creates a container-not-found error.
    #[must_use]
    pub fn container_not_found(id: ContainerId) -> Self {
        Self::new(ErrorKind::ContainerNotFound(id))
    }

    /// Creates a stale container reference error.
    #[must_use]
    pub fn stale_container(id: ContainerId) -> Self {
        Self::new(ErrorKind::StaleContainer(id))
    }

    /// Creates an incompatible key set error.
    #[must_use]
    pub fn incompatible_key_set(expected: usize, actual: usize) -> Self {
        Self::new(ErrorKind::IncompatibleKeySet { expected, actual })
    }

    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidName(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Returns true for lookup failures (untracked names, empty orders,
    /// missing positions, containers or content types).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NameNotFound(_)
                | ErrorKind::PositionNotFound(_)
                | ErrorKind::EmptyOrder
                | ErrorKind::ContainerNotFound(_)
                | ErrorKind::StaleContainer(_)
                | ErrorKind::ContentTypeNotFound(_)
        )
    }

    /// Returns true for containment-constraint rejections.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidItemType { .. } | ErrorKind::InvalidContainerType { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A child name is not tracked by the order or not held by the container.
    #[error("name not found: {0}")]
    NameNotFound(String),

    /// No child occupies the requested order position.
    #[error("no item at position {0}")]
    PositionNotFound(i64),

    /// The order has no entries.
    #[error("order is empty")]
    EmptyOrder,

    /// Container was not found in storage.
    #[error("container not found: {0:?}")]
    ContainerNotFound(ContainerId),

    /// Container reference is stale (generation mismatch).
    #[error("stale container reference: {0:?}")]
    StaleContainer(ContainerId),

    /// No content type registered under this name.
    #[error("content type not found: {0}")]
    ContentTypeNotFound(String),

    /// Type mismatch in untyped input.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// A replacement ordering is not a permutation of the tracked names.
    #[error("incompatible key set: expected {expected} names, got {actual}")]
    IncompatibleKeySet {
        /// Number of tracked names.
        expected: usize,
        /// Number of names supplied.
        actual: usize,
    },

    /// A child name failed validation.
    #[error("invalid name: {0}")]
    InvalidName(String),

    /// A child name is already used in the container.
    #[error("the given name is already being used: {0}")]
    DuplicateName(String),

    /// A child name is reserved by the container.
    #[error("name reserved: {0}")]
    NameReserved(String),

    /// A required constructor argument was not supplied.
    #[error("not enough arguments: missing {0}")]
    MissingArgument(String),

    /// Publishing dates are missing or out of order.
    #[error("publishing dates are wrong")]
    PublishingDates,

    /// The container does not accept this kind of item.
    #[error("invalid item type {item} for container {container}")]
    InvalidItemType {
        /// Container the item was offered to.
        container: ContainerId,
        /// Content type of the item, or `"<unknown>"`.
        item: String,
        /// Content type names the container accepts.
        allowed: Vec<String>,
        /// Name the item would have been stored under.
        name: String,
    },

    /// The item does not accept this kind of container.
    #[error("invalid container type {container_type}")]
    InvalidContainerType {
        /// Content type of the container, or `"<unknown>"`.
        container_type: String,
        /// Container type names the item accepts.
        allowed: Vec<String>,
    },

    /// The target is not a content container.
    #[error("container is not a valid content container")]
    NotAContainer,

    /// The caller lacks the permission to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The content type has no factory.
    #[error("can't create content type: {0}")]
    CannotCreate(String),

    /// The container cannot receive content through a content type.
    #[error("can't add content")]
    CannotAdd,

    /// The content refuses removal.
    #[error("unremovable content: {0}")]
    UnremovableContent(String),

    /// A folder cannot be moved or copied into itself or its descendants.
    #[error("cannot move {0} into itself or a subobject")]
    MoveIntoSelf(String),

    /// The container does not keep a manual order.
    #[error("container does not keep an order: {0:?}")]
    NotOrderAware(ContainerId),

    /// Something was registered twice.
    #[error("already registered: {0}")]
    DuplicateRegistration(String),

    /// Reading or writing a snapshot file failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// Snapshot encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Container the operation ran against.
    pub container: Option<ContainerId>,
    /// Operation frames, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the container.
    #[must_use]
    pub fn with_container(mut self, container: ContainerId) -> Self {
        self.container = Some(container);
        self
    }

    /// Adds an operation frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(container) = &self.container {
            write!(f, "in {container}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
