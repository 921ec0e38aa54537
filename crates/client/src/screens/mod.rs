//! Headless admin screens.
//!
//! Each screen checks its permission before touching the network, keeps list
//! snapshots that change only after a successful round-trip, and takes
//! `&mut self` for mutations so one screen never has two in flight.

pub mod dashboard;
pub mod permissions;
pub mod roles;
pub mod users;

pub use dashboard::Dashboard;
pub use permissions::PermissionsScreen;
pub use roles::RolesScreen;
pub use users::UsersScreen;

use warden_auth::Permission;

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::session::{Session, SessionStore};

/// Authenticated client for a screen gated on `required`.
pub(crate) fn gate<S: SessionStore>(
    session: &Session<S>,
    api: &ApiClient,
    required: &Permission,
) -> Result<ApiClient, ClientError> {
    if !session.is_authenticated() {
        return Err(ClientError::NotAuthenticated);
    }
    if let Err(e) = session.authorize(required) {
        tracing::warn!(permission = %required, "screen access denied");
        return Err(e.into());
    }
    session.client(api)
}
