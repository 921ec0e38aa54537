//! `warden-auth`: the permission model.
//!
//! Pure evaluation, grouping, bulk-selection and visibility rules over
//! permission strings, plus the records and save gates the admin flows use.
//! This crate performs no IO.

pub mod authorize;
pub mod catalog;
pub mod grouping;
pub mod permissions;
pub mod principal;
pub mod roles;
pub mod selection;
pub mod user;
pub mod visibility;

pub use authorize::{AuthorizationExplanation, AuthzError, authorize, explain_authorization, has_permission};
pub use catalog::{PermissionDraft, PermissionRecord, PermissionRequest, catalog_names};
pub use grouping::{PermissionGroups, group_permissions};
pub use permissions::{ALL_PERMISSIONS, Permission};
pub use principal::{AuthResponse, Principal};
pub use roles::{Role, RoleDraft, RoleRequest};
pub use selection::PermissionSelection;
pub use user::{FormMode, User, UserDraft, UserPayload};
pub use visibility::{Gated, ManagementLink, NavItem, management_links, navigation_items, visible_items};
