use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Name of the sentinel permission that satisfies every check.
pub const ALL_PERMISSIONS: &str = "all_permissions";

/// Permission identifier.
///
/// Permissions are opaque `<action>_<entity>` strings (e.g. "manage_users").
/// The sentinel [`ALL_PERMISSIONS`] grants everything, but only when it is
/// granted explicitly; it is never synthesized from a complete enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn all() -> Self {
        Self::from_static(ALL_PERMISSIONS)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_sentinel(&self) -> bool {
        self.as_str() == ALL_PERMISSIONS
    }

    /// Leading segment of the name (`"view"` for `"view_audit_logs"`).
    pub fn action(&self) -> &str {
        action_of(self.as_str())
    }

    /// Everything after the first `_` (`"audit_logs"` for `"view_audit_logs"`).
    ///
    /// `None` when there is no underscore or nothing follows it.
    pub fn entity(&self) -> Option<&str> {
        entity_of(self.as_str())
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub(crate) fn action_of(name: &str) -> &str {
    name.split('_').next().unwrap_or(name)
}

pub(crate) fn entity_of(name: &str) -> Option<&str> {
    match name.split_once('_') {
        Some((_, rest)) if !rest.is_empty() => Some(rest),
        _ => None,
    }
}

/// Permissions the console itself checks before opening a management screen.
pub mod admin {
    use super::Permission;

    pub const MANAGE_USERS: Permission = Permission::from_static("manage_users");
    pub const MANAGE_ROLES: Permission = Permission::from_static("manage_roles");
    pub const MANAGE_PERMISSIONS: Permission = Permission::from_static("manage_permissions");
}
