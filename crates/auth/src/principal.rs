use serde::{Deserialize, Serialize};

use crate::{User, authorize::has_permission};

/// The authenticated actor for whom permissions are evaluated.
///
/// The permission list is whatever the backend materialized at login; it is
/// never re-derived from role definitions on this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(User);

impl Principal {
    pub fn user(&self) -> &User {
        &self.0
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn permissions(&self) -> &[String] {
        &self.0.permissions
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        has_permission(self.permissions(), permission)
    }

    /// `role`, falling back to the legacy `roles[0]`.
    pub fn primary_role(&self) -> Option<&str> {
        self.0.primary_role()
    }

    /// Name used in greetings: display name, else email.
    pub fn greeting_name(&self) -> &str {
        match self.0.display_name() {
            "" => &self.0.email,
            name => name,
        }
    }
}

impl From<User> for Principal {
    fn from(value: User) -> Self {
        Self(value)
    }
}

/// Body returned by both login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Principal,
}
