use warden_auth::permissions::admin;
use warden_auth::{PermissionGroups, Role, RoleDraft, group_permissions};
use warden_core::{DomainError, RoleId};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::listing::Listing;
use crate::session::{Session, SessionStore};

/// Role management.
#[derive(Debug)]
pub struct RolesScreen {
    api: ApiClient,
    roles: Listing<Role>,
    catalog: Vec<String>,
}

impl RolesScreen {
    /// Requires `manage_roles`. Loads roles and the permission catalog.
    pub async fn open<S: SessionStore>(session: &Session<S>, api: &ApiClient) -> Result<Self, ClientError> {
        let api = super::gate(session, api, &admin::MANAGE_ROLES)?;
        let (roles, catalog) = tokio::try_join!(api.list_roles(), api.permission_names())?;

        Ok(Self {
            api,
            roles: Listing::new(roles),
            catalog,
        })
    }

    pub fn roles(&self) -> &[Role] {
        self.roles.items()
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.get(&id)
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn permission_groups(&self) -> PermissionGroups {
        group_permissions(&self.catalog)
    }

    pub fn edit_draft(&self, id: RoleId) -> Result<RoleDraft, ClientError> {
        self.roles
            .get(&id)
            .map(RoleDraft::edit)
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Create (`target == None`) or update a role, then re-fetch the list.
    pub async fn save(&mut self, draft: &RoleDraft, target: Option<RoleId>) -> Result<(), ClientError> {
        let request = draft.validate()?;

        match target {
            None => {
                self.api.create_role(&request).await?;
                tracing::info!(role = %request.name, "role created");
            }
            Some(id) => {
                self.api.update_role(id, &request).await?;
                tracing::info!(role_id = %id, "role updated");
            }
        }

        self.roles.replace(self.api.list_roles().await?);
        Ok(())
    }

    pub async fn delete(&mut self, id: RoleId) -> Result<(), ClientError> {
        self.api.delete_role(id).await?;
        self.roles.remove(&id);
        tracing::info!(role_id = %id, "role deleted");
        Ok(())
    }
}
