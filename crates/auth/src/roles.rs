//! Role records and the role save gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::{DomainError, DomainResult, Entity, RoleId};

use crate::PermissionSelection;
use crate::permissions::ALL_PERMISSIONS;

/// Role definition as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Role {
    /// True for the `["all_permissions"]` shorthand (or any list holding it).
    pub fn grants_everything(&self) -> bool {
        self.permissions.iter().any(|p| p == ALL_PERMISSIONS)
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Body of `POST /roles` and `PUT /roles/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRequest {
    pub name: String,
    /// `None` only for inline creation; an empty string clears it on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub permissions: Vec<String>,
}

/// Editable state of a role form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
    pub selection: PermissionSelection,
}

impl RoleDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edit(role: &Role) -> Self {
        Self {
            name: role.name.clone(),
            description: role.description.clone().unwrap_or_default(),
            selection: role.permissions.iter().collect(),
        }
    }

    /// Save gate for the roles screen. The selection is sent as-is and the
    /// description is always sent, so an empty one clears it on update.
    pub fn validate(&self) -> DomainResult<RoleRequest> {
        self.check()?;
        Ok(RoleRequest {
            name: self.name.trim().to_string(),
            description: Some(self.description.trim().to_string()),
            permissions: self.selection.as_slice().to_vec(),
        })
    }

    /// Save gate for a role created inline from the users screen.
    ///
    /// A selection holding `all_permissions` collapses to exactly
    /// `["all_permissions"]`; everything else selected is discarded.
    pub fn validate_inline(&self) -> DomainResult<RoleRequest> {
        self.check()?;
        let permissions = if self.selection.contains(ALL_PERMISSIONS) {
            vec![ALL_PERMISSIONS.to_string()]
        } else {
            self.selection.as_slice().to_vec()
        };
        Ok(RoleRequest {
            name: self.name.trim().to_string(),
            description: None,
            permissions,
        })
    }

    fn check(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() || self.selection.is_empty() {
            return Err(DomainError::validation(
                "Role name and at least one permission are required",
            ));
        }
        Ok(())
    }
}
