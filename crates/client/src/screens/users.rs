use warden_auth::permissions::admin;
use warden_auth::{
    FormMode, PermissionGroups, Role, RoleDraft, User, UserDraft, group_permissions,
};
use warden_core::{DomainError, UserId};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::listing::Listing;
use crate::session::{Session, SessionStore};

/// User management: accounts, the roles they can be given, and inline role
/// creation.
#[derive(Debug)]
pub struct UsersScreen {
    api: ApiClient,
    users: Listing<User>,
    roles: Listing<Role>,
    catalog: Vec<String>,
}

impl UsersScreen {
    /// Requires `manage_users`. Loads users, roles and the permission catalog.
    pub async fn open<S: SessionStore>(session: &Session<S>, api: &ApiClient) -> Result<Self, ClientError> {
        let api = super::gate(session, api, &admin::MANAGE_USERS)?;
        let (users, roles, catalog) =
            tokio::try_join!(api.list_users(), api.list_roles(), api.permission_names())?;

        Ok(Self {
            api,
            users: Listing::new(users),
            roles: Listing::new(roles),
            catalog,
        })
    }

    pub fn users(&self) -> &[User] {
        self.users.items()
    }

    pub fn roles(&self) -> &[Role] {
        self.roles.items()
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    pub fn permission_groups(&self) -> PermissionGroups {
        group_permissions(&self.catalog)
    }

    pub fn edit_draft(&self, id: &UserId) -> Result<UserDraft, ClientError> {
        self.users
            .get(id)
            .map(UserDraft::edit)
            .ok_or_else(|| DomainError::not_found().into())
    }

    /// Create (`FormMode::Create`) or update `target` (`FormMode::Edit`),
    /// then re-fetch the user list.
    pub async fn save(&mut self, draft: &UserDraft, target: Option<&UserId>) -> Result<(), ClientError> {
        let payload = draft.validate()?;

        match (draft.mode, target) {
            (FormMode::Create, _) => {
                self.api.create_user(&payload).await?;
                tracing::info!(email = %payload.email, "user created");
            }
            (FormMode::Edit, Some(id)) => {
                self.api.update_user(id, &payload).await?;
                tracing::info!(user_id = %id, password_changed = payload.password.is_some(), "user updated");
            }
            (FormMode::Edit, None) => {
                return Err(DomainError::validation("No user selected").into());
            }
        }

        self.users.replace(self.api.list_users().await?);
        Ok(())
    }

    pub async fn delete(&mut self, id: &UserId) -> Result<(), ClientError> {
        self.api.delete_user(id).await?;
        self.users.remove(id);
        tracing::info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Create a role without leaving the screen; it becomes assignable at once.
    ///
    /// When the backend answers without the created record the role list is
    /// re-fetched instead.
    pub async fn create_inline_role(&mut self, draft: &RoleDraft) -> Result<&Role, ClientError> {
        let request = draft.validate_inline()?;
        let index = match self.api.create_role(&request).await? {
            Some(role) => {
                self.roles.push(role);
                self.roles.len() - 1
            }
            None => {
                self.roles.replace(self.api.list_roles().await?);
                self.roles
                    .items()
                    .iter()
                    .position(|r| r.name == request.name)
                    .ok_or_else(|| ClientError::Parse(format!("created role {} not listed", request.name)))?
            }
        };
        tracing::info!(role = %request.name, "role created from users screen");
        Ok(&self.roles.items()[index])
    }
}
