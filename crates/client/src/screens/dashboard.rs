use warden_auth::{ManagementLink, NavItem, Principal, management_links, navigation_items, visible_items};

use crate::error::ClientError;
use crate::session::{Session, SessionStore};

/// Landing view for an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub greeting: String,
    pub role: Option<String>,
    pub navigation: Vec<NavItem>,
    pub links: Vec<ManagementLink>,
    pub permissions: Vec<String>,
}

impl Dashboard {
    pub fn for_principal(principal: &Principal) -> Self {
        let granted = principal.permissions();
        Self {
            greeting: principal.greeting_name().to_string(),
            role: principal.primary_role().map(str::to_string),
            navigation: visible_items(&navigation_items(), granted).into_iter().cloned().collect(),
            links: visible_items(&management_links(), granted).into_iter().cloned().collect(),
            permissions: granted.to_vec(),
        }
    }

    pub fn for_session<S: SessionStore>(session: &Session<S>) -> Result<Self, ClientError> {
        session
            .principal()
            .map(Self::for_principal)
            .ok_or(ClientError::NotAuthenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_auth::User;

    #[test]
    fn shows_only_granted_shortcuts() {
        let principal = Principal::from(User {
            email: "eve@example.com".to_string(),
            role: Some("support".to_string()),
            permissions: vec!["manage_users".to_string()],
            ..User::default()
        });

        let dash = Dashboard::for_principal(&principal);
        assert_eq!(dash.greeting, "eve@example.com");
        assert_eq!(dash.role.as_deref(), Some("support"));
        assert_eq!(
            dash.navigation.iter().map(|n| n.label).collect::<Vec<_>>(),
            vec!["Dashboard", "Users"]
        );
        assert_eq!(dash.links.len(), 1);
        assert_eq!(dash.links[0].title, "User Management");
    }
}
