use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::permissions::ALL_PERMISSIONS;
use crate::{Permission, Principal};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Test whether a granted set satisfies `query`.
///
/// True iff the set holds the sentinel `all_permissions` or holds `query`
/// exactly (case-sensitive, no wildcard or prefix matching). An empty set
/// denies everything.
pub fn has_permission<S: AsRef<str>>(granted: &[S], query: &str) -> bool {
    granted
        .iter()
        .any(|p| p.as_ref() == ALL_PERMISSIONS || p.as_ref() == query)
}

/// Authorize a principal for a single permission.
///
/// - No IO
/// - No panics
/// - Absent principal (logged out) is denied
pub fn authorize(principal: Option<&Principal>, required: &Permission) -> Result<(), AuthzError> {
    let granted = principal.map(Principal::permissions).unwrap_or_default();
    if has_permission(granted, required.as_str()) {
        Ok(())
    } else {
        tracing::debug!(permission = %required, "authorization denied");
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorizationExplanation {
    /// The permission that was being checked.
    pub required_permission: String,

    /// Whether the authorization was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// True when the sentinel decided the outcome.
    pub via_sentinel: bool,

    /// The principal's role, if any.
    pub role: Option<String>,

    /// Effective permissions, sorted for readability.
    pub effective_permissions: Vec<String>,
}

/// Explain why an authorization decision was made (or would be made).
pub fn explain_authorization(
    principal: Option<&Principal>,
    required: &Permission,
) -> AuthorizationExplanation {
    let required_str = required.as_str().to_string();

    let Some(principal) = principal else {
        return AuthorizationExplanation {
            required_permission: required_str,
            granted: false,
            reason: "No authenticated principal; every check is denied".to_string(),
            via_sentinel: false,
            role: None,
            effective_permissions: Vec::new(),
        };
    };

    let effective: BTreeSet<&str> = principal.permissions().iter().map(String::as_str).collect();
    let via_sentinel = effective.contains(ALL_PERMISSIONS);
    let explicit = effective.contains(required.as_str());

    let reason = if via_sentinel {
        format!("Principal holds the '{}' permission", ALL_PERMISSIONS)
    } else if explicit {
        format!("Principal has explicit permission '{}'", required_str)
    } else {
        format!(
            "Principal does not have permission '{}'; assign a role that grants it or '{}'",
            required_str, ALL_PERMISSIONS
        )
    };

    AuthorizationExplanation {
        required_permission: required_str,
        granted: via_sentinel || explicit,
        reason,
        via_sentinel,
        role: principal.primary_role().map(str::to_string),
        effective_permissions: effective.into_iter().map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::User;
    use proptest::prelude::*;

    fn principal(perms: &[&str]) -> Principal {
        Principal::from(User {
            permissions: perms.iter().map(|p| p.to_string()).collect(),
            role: Some("editor".to_string()),
            ..User::default()
        })
    }

    #[test]
    fn exact_match_grants() {
        assert!(has_permission(&["view_users", "manage_roles"], "manage_roles"));
        assert!(!has_permission(&["view_users"], "View_users"));
    }

    #[test]
    fn no_prefix_or_wildcard_matching() {
        assert!(!has_permission(&["manage"], "manage_users"));
        assert!(!has_permission(&["*"], "manage_users"));
    }

    #[test]
    fn empty_set_denies_everything() {
        let none: [&str; 0] = [];
        assert!(!has_permission(&none, "manage_users"));
        assert!(!has_permission(&none, ""));
        assert!(!has_permission(&none, ALL_PERMISSIONS));
    }

    #[test]
    fn sentinel_is_not_synthesized() {
        let everything = ["view_users", "manage_users", "manage_roles", "manage_permissions"];
        assert!(!has_permission(&everything, ALL_PERMISSIONS));
    }

    #[test]
    fn empty_query_only_passes_with_sentinel() {
        assert!(!has_permission(&["view_users"], ""));
        assert!(has_permission(&[ALL_PERMISSIONS], ""));
    }

    #[test]
    fn authorize_denies_absent_principal() {
        let err = authorize(None, &Permission::new("manage_users")).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("manage_users".to_string()));
    }

    #[test]
    fn authorize_uses_principal_grants() {
        let p = principal(&["manage_users"]);
        assert!(authorize(Some(&p), &Permission::new("manage_users")).is_ok());
        assert!(authorize(Some(&p), &Permission::new("manage_roles")).is_err());
    }

    #[test]
    fn explanation_reports_sentinel() {
        let p = principal(&[ALL_PERMISSIONS]);
        let e = explain_authorization(Some(&p), &Permission::new("delete_users"));
        assert!(e.granted);
        assert!(e.via_sentinel);
        assert_eq!(e.role.as_deref(), Some("editor"));
    }

    #[test]
    fn explanation_lists_sorted_permissions_on_denial() {
        let p = principal(&["view_users", "edit_roles"]);
        let e = explain_authorization(Some(&p), &Permission::new("manage_users"));
        assert!(!e.granted);
        assert!(!e.via_sentinel);
        assert_eq!(e.effective_permissions, vec!["edit_roles", "view_users"]);
        assert!(e.reason.contains("manage_users"));
    }

    #[test]
    fn explanation_without_principal_is_denied() {
        let e = explain_authorization(None, &Permission::new("manage_users"));
        assert!(!e.granted);
        assert!(e.effective_permissions.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the sentinel satisfies any query, whatever else is granted.
        #[test]
        fn sentinel_satisfies_every_query(
            mut granted in prop::collection::vec("[a-z_]{0,12}", 0..8),
            query in ".{0,16}",
        ) {
            granted.push(ALL_PERMISSIONS.to_string());
            prop_assert!(has_permission(&granted, &query));
        }

        /// Property: without the sentinel, an ungranted query is always denied.
        #[test]
        fn ungranted_query_is_denied(
            granted in prop::collection::vec("[a-z]{1,8}_[a-z]{1,8}", 0..8),
            query in "[a-z_]{0,16}",
        ) {
            prop_assume!(!granted.iter().any(|g| g == ALL_PERMISSIONS || *g == query));
            prop_assert!(!has_permission(&granted, &query));
        }
    }
}
