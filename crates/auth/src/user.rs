//! User accounts as returned by the backend, and the user save gate.

use serde::{Deserialize, Serialize};

use warden_core::{DomainError, DomainResult, Entity, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// User Record
// ─────────────────────────────────────────────────────────────────────────────

/// A user account.
///
/// `name` and `fullName` are both accepted from the backend; older payloads
/// carry `roles` instead of `role`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub id: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl User {
    /// `name`, else `fullName`, else empty.
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref())
            .or_else(|| non_empty(self.full_name.as_deref()))
            .unwrap_or("")
    }

    /// `role`, falling back to the legacy `roles[0]`.
    pub fn primary_role(&self) -> Option<&str> {
        non_empty(self.role.as_deref()).or_else(|| non_empty(self.roles.first().map(String::as_str)))
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ─────────────────────────────────────────────────────────────────────────────
// Draft + Save Gate
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a user form creates a new account or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit,
}

/// Editable state of the user form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub mode: FormMode,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
}

/// Body of `POST /users` and `PUT /users/{id}`.
///
/// `password` is omitted entirely when an edit leaves the credential unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPayload {
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserDraft {
    pub fn create() -> Self {
        Self::default()
    }

    /// Pre-fill an edit form from an existing record. The password starts
    /// empty, meaning "unchanged".
    pub fn edit(user: &User) -> Self {
        Self {
            mode: FormMode::Edit,
            email: user.email.clone(),
            name: user.display_name().to_string(),
            password: String::new(),
            role: user.primary_role().unwrap_or("").to_string(),
        }
    }

    /// Run the save gate and build the request body.
    pub fn validate(&self) -> DomainResult<UserPayload> {
        let password_missing = self.password.trim().is_empty();
        if self.email.trim().is_empty()
            || self.name.trim().is_empty()
            || self.role.trim().is_empty()
            || (self.mode == FormMode::Create && password_missing)
        {
            return Err(DomainError::validation("All fields are required"));
        }

        Ok(UserPayload {
            email: self.email.trim().to_string(),
            name: self.name.trim().to_string(),
            role: self.role.trim().to_string(),
            password: (!password_missing).then(|| self.password.clone()),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
