//! Availability checks for content types.
//!
//! A bound content type is addable only if every registered
//! [`ContentTypeChecker`] agrees. Security itself lives outside Trellis:
//! [`PermissionChecker`] asks a [`SecurityPolicy`] whether the content
//! type's permission is held in the container.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use trellis_foundation::ContainerId;
use trellis_storage::Site;

use crate::content_type::ContentType;

/// Decides whether a content type may be used in a container.
pub trait ContentTypeChecker: fmt::Debug {
    /// Returns true if `content_type` may be added to `container`.
    fn check(&self, content_type: &ContentType, site: &Site, container: ContainerId) -> bool;
}

/// Answers permission questions for the current caller.
pub trait SecurityPolicy: fmt::Debug {
    /// Returns true if the permission is held in `container`.
    fn check_permission(&self, permission: &str, site: &Site, container: ContainerId) -> bool;
}

/// Grants every permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl SecurityPolicy for AllowAll {
    fn check_permission(&self, _permission: &str, _site: &Site, _container: ContainerId) -> bool {
        true
    }
}

/// Grants a fixed set of permissions everywhere.
#[derive(Debug, Clone, Default)]
pub struct GrantedPermissions {
    granted: BTreeSet<String>,
}

impl GrantedPermissions {
    /// Creates a policy granting nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants a permission.
    #[must_use]
    pub fn grant(mut self, permission: impl Into<String>) -> Self {
        self.granted.insert(permission.into());
        self
    }
}

impl SecurityPolicy for GrantedPermissions {
    fn check_permission(&self, permission: &str, _site: &Site, _container: ContainerId) -> bool {
        self.granted.contains(permission)
    }
}

/// Requires the content type's permission. Types without one always pass.
#[derive(Debug, Clone)]
pub struct PermissionChecker {
    policy: Arc<dyn SecurityPolicy + Send + Sync>,
}

impl PermissionChecker {
    /// Creates a checker consulting `policy`.
    #[must_use]
    pub fn new(policy: Arc<dyn SecurityPolicy + Send + Sync>) -> Self {
        Self { policy }
    }
}

impl ContentTypeChecker for PermissionChecker {
    fn check(&self, content_type: &ContentType, site: &Site, container: ContainerId) -> bool {
        if content_type.permission.is_empty() {
            return true;
        }
        self.policy
            .check_permission(&content_type.permission, site, container)
    }
}
