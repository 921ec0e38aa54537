//! Grouping of catalog permissions by entity for bulk editing.
//!
//! `manage_users` and `view_users` land in group `users`; `view_audit_logs`
//! lands in `audit_logs`. The sentinel and names without an entity segment
//! are left out of every group.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::permissions::{ALL_PERMISSIONS, action_of, entity_of};

/// Display order of actions inside a group. Unlisted actions sort last.
pub const ACTION_PRIORITY: [&str; 5] = ["view", "create", "edit", "delete", "manage"];

/// Group key → permissions in display order.
///
/// Ordering across groups carries no meaning; the sorted map only keeps
/// output stable.
pub type PermissionGroups = BTreeMap<String, Vec<String>>;

/// Group `catalog` by entity and order each group by action priority.
pub fn group_permissions<S: AsRef<str>>(catalog: &[S]) -> PermissionGroups {
    let mut groups = PermissionGroups::new();

    for name in catalog.iter().map(AsRef::as_ref) {
        if name == ALL_PERMISSIONS {
            continue;
        }
        // Names like "dashboard" cannot be grouped and are dropped.
        let Some(entity) = entity_of(name) else {
            continue;
        };
        groups
            .entry(entity.to_string())
            .or_default()
            .push(name.to_string());
    }

    for perms in groups.values_mut() {
        perms.sort_by(|a, b| compare_permissions(a, b));
        perms.dedup();
    }

    groups
}

/// Action-priority order, ties broken by the full name.
pub fn compare_permissions(a: &str, b: &str) -> Ordering {
    action_rank(a).cmp(&action_rank(b)).then_with(|| a.cmp(b))
}

fn action_rank(name: &str) -> usize {
    let action = action_of(name);
    ACTION_PRIORITY
        .iter()
        .position(|known| *known == action)
        .unwrap_or(usize::MAX)
}

/// Human label for a group key (`"audit_logs"` → `"Audit logs"`).
pub fn group_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
