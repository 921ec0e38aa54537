use warden_auth::permissions::admin;
use warden_auth::{PermissionDraft, PermissionGroups, PermissionRecord, catalog_names, group_permissions};
use warden_core::{DomainError, PermissionId};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::listing::Listing;
use crate::session::{Session, SessionStore};

/// Permission catalog management.
#[derive(Debug)]
pub struct PermissionsScreen {
    api: ApiClient,
    permissions: Listing<PermissionRecord>,
}

impl PermissionsScreen {
    /// Requires `manage_permissions`.
    pub async fn open<S: SessionStore>(session: &Session<S>, api: &ApiClient) -> Result<Self, ClientError> {
        let api = super::gate(session, api, &admin::MANAGE_PERMISSIONS)?;
        let permissions = api.list_permissions().await?;

        Ok(Self {
            api,
            permissions: Listing::new(permissions),
        })
    }

    pub fn permissions(&self) -> &[PermissionRecord] {
        self.permissions.items()
    }

    pub fn permission_groups(&self) -> PermissionGroups {
        group_permissions(&catalog_names(self.permissions.items()))
    }

    pub fn edit_draft(&self, id: PermissionId) -> Result<PermissionDraft, ClientError> {
        self.permissions
            .get(&id)
            .map(PermissionDraft::edit)
            .ok_or_else(|| DomainError::not_found().into())
    }

    pub async fn save(
        &mut self,
        draft: &PermissionDraft,
        target: Option<PermissionId>,
    ) -> Result<(), ClientError> {
        let request = draft.validate()?;

        match target {
            None => {
                self.api.create_permission(&request).await?;
                tracing::info!(permission = %request.name, "permission created");
            }
            Some(id) => {
                self.api.update_permission(id, &request).await?;
                tracing::info!(permission_id = %id, "permission updated");
            }
        }

        self.permissions.replace(self.api.list_permissions().await?);
        Ok(())
    }

    pub async fn delete(&mut self, id: PermissionId) -> Result<(), ClientError> {
        self.api.delete_permission(id).await?;
        self.permissions.remove(&id);
        tracing::info!(permission_id = %id, "permission deleted");
        Ok(())
    }
}
