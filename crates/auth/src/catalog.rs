//! Permission catalog entries and the permission save gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::{DomainError, DomainResult, Entity, PermissionId};

/// One entry of the permission catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    pub id: PermissionId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Entity for PermissionRecord {
    type Id = PermissionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog names in backend order.
pub fn catalog_names(records: &[PermissionRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

/// Body of `POST /permissions` and `PUT /permissions/{id}`.
///
/// `description` is always sent; an empty string clears it on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRequest {
    pub name: String,
    pub description: String,
}

/// Editable state of the permission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionDraft {
    pub name: String,
    pub description: String,
}

impl PermissionDraft {
    pub fn edit(record: &PermissionRecord) -> Self {
        Self {
            name: record.name.clone(),
            description: record.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> DomainResult<PermissionRequest> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Permission name is required"));
        }
        Ok(PermissionRequest {
            name: name.to_string(),
            description: self.description.trim().to_string(),
        })
    }
}
