//! Navigation and dashboard affordances derived from a granted set.

use serde::Serialize;

use crate::Permission;
use crate::authorize::has_permission;
use crate::permissions::admin;

/// Anything that may require a permission before it is shown.
pub trait Gated {
    /// `None` means visible to any authenticated principal.
    fn required_permission(&self) -> Option<&Permission>;
}

/// Order-preserving filter of `items` down to what `granted` may see.
pub fn visible_items<'a, T: Gated, S: AsRef<str>>(items: &'a [T], granted: &[S]) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| match item.required_permission() {
            None => true,
            Some(required) => has_permission(granted, required.as_str()),
        })
        .collect()
}

/// Entry of the primary navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub permission: Option<Permission>,
}

impl Gated for NavItem {
    fn required_permission(&self) -> Option<&Permission> {
        self.permission.as_ref()
    }
}

/// Dashboard shortcut card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagementLink {
    pub title: &'static str,
    pub description: &'static str,
    pub href: &'static str,
    pub permission: Permission,
}

impl Gated for ManagementLink {
    fn required_permission(&self) -> Option<&Permission> {
        Some(&self.permission)
    }
}

pub fn navigation_items() -> Vec<NavItem> {
    vec![
        NavItem { label: "Dashboard", href: "/dashboard", permission: None },
        NavItem { label: "Users", href: "/users", permission: Some(admin::MANAGE_USERS) },
        NavItem { label: "Roles", href: "/roles", permission: Some(admin::MANAGE_ROLES) },
        NavItem {
            label: "Permissions",
            href: "/permissions",
            permission: Some(admin::MANAGE_PERMISSIONS),
        },
    ]
}

pub fn management_links() -> Vec<ManagementLink> {
    vec![
        ManagementLink {
            title: "User Management",
            description: "Manage system users and their roles",
            href: "/users",
            permission: admin::MANAGE_USERS,
        },
        ManagementLink {
            title: "Role Management",
            description: "Create and manage user roles",
            href: "/roles",
            permission: admin::MANAGE_ROLES,
        },
        ManagementLink {
            title: "Permission Management",
            description: "Define and manage permissions",
            href: "/permissions",
            permission: admin::MANAGE_PERMISSIONS,
        },
    ]
}
