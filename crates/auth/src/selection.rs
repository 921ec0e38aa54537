//! Tri-state checkbox logic shared by every permission editor.
//!
//! All operations take `&self` and return a new selection.

use serde::{Deserialize, Serialize};

/// Ordered, duplicate-free set of selected permission names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSelection(Vec<String>);

impl PermissionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.iter().any(|p| p == permission)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Check or uncheck a single permission.
    pub fn toggle(&self, permission: &str, checked: bool) -> Self {
        if checked {
            self.union([permission])
        } else {
            Self(self.0.iter().filter(|p| *p != permission).cloned().collect())
        }
    }

    /// True iff every member of `group` is selected (vacuously true when empty).
    pub fn is_group_checked<S: AsRef<str>>(&self, group: &[S]) -> bool {
        group.iter().all(|p| self.contains(p.as_ref()))
    }

    /// Checked: add every member of `group`. Unchecked: remove them, keeping
    /// unrelated selections.
    pub fn toggle_group<S: AsRef<str>>(&self, group: &[S], checked: bool) -> Self {
        if checked {
            self.union(group.iter().map(AsRef::as_ref))
        } else {
            Self(
                self.0
                    .iter()
                    .filter(|p| !group.iter().any(|g| g.as_ref() == p.as_str()))
                    .cloned()
                    .collect(),
            )
        }
    }

    /// True iff every catalog entry, sentinel included, is selected.
    pub fn is_all_checked<S: AsRef<str>>(&self, catalog: &[S]) -> bool {
        self.is_group_checked(catalog)
    }

    /// Checked: exactly the catalog. Unchecked: nothing, including selections
    /// made one by one or by group.
    pub fn toggle_all<S: AsRef<str>>(&self, catalog: &[S], checked: bool) -> Self {
        if checked {
            Self::new().union(catalog.iter().map(AsRef::as_ref))
        } else {
            Self::new()
        }
    }

    fn union<'a>(&self, extra: impl IntoIterator<Item = &'a str>) -> Self {
        let mut next = self.0.clone();
        for p in extra {
            if !next.iter().any(|existing| existing == p) {
                next.push(p.to_string());
            }
        }
        Self(next)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PermissionSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = Self::new();
        for p in iter {
            if !selection.contains(p.as_ref()) {
                selection.0.push(p.as_ref().to_string());
            }
        }
        selection
    }
}
