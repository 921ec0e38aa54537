//! Explicit session context.
//!
//! A [`Session`] is created once by hydrating from a [`SessionStore`] and is
//! passed to every consumer that needs the principal or the token. Logout
//! clears both the store and the in-memory state.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use warden_auth::{AuthResponse, AuthzError, Permission, Principal};

use crate::api::ApiClient;
use crate::error::ClientError;

/// What survives between runs: the bearer token and the principal snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: Principal,
}

impl From<AuthResponse> for StoredSession {
    fn from(value: AuthResponse) -> Self {
        Self {
            token: value.token,
            user: value.user,
        }
    }
}

/// Persistence backend for [`StoredSession`].
pub trait SessionStore {
    fn load(&self) -> Result<Option<StoredSession>, ClientError>;
    fn save(&self, session: &StoredSession) -> Result<(), ClientError>;
    fn clear(&self) -> Result<(), ClientError>;
}

/// Process-local store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>, ClientError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>, ClientError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read(&self.path)
            .map_err(|e| ClientError::Session(format!("read {:?}: {}", self.path, e)))?;
        let session = serde_json::from_slice(&raw)
            .map_err(|e| ClientError::Session(format!("corrupt session file {:?}: {}", self.path, e)))?;
        Ok(Some(session))
    }

    fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ClientError::Session(format!("create {:?}: {}", parent, e)))?;
        }
        let raw = serde_json::to_vec_pretty(session).map_err(|e| ClientError::Session(e.to_string()))?;
        write_private(&self.path, &raw)
            .map_err(|e| ClientError::Session(format!("write {:?}: {}", self.path, e)))
    }

    fn clear(&self) -> Result<(), ClientError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Session(format!("remove {:?}: {}", self.path, e))),
        }
    }
}

/// Write `raw` readable by the owner only; the file holds a bearer token.
fn write_private(path: &Path, raw: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    // `mode` only applies on creation.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(raw)
}

/// The authenticated (or anonymous) session of one operator.
#[derive(Debug)]
pub struct Session<S: SessionStore> {
    store: S,
    current: Option<StoredSession>,
}

impl<S: SessionStore> Session<S> {
    /// Hydrate from `store`, or start empty.
    ///
    /// An unreadable record is discarded so the next run starts clean.
    pub fn hydrate(store: S) -> Self {
        let current = match store.load() {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session");
                if let Err(e) = store.clear() {
                    tracing::warn!(error = %e, "failed to clear session store");
                }
                None
            }
        };
        Self { store, current }
    }

    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<&Principal, ClientError> {
        let auth = api.login(email, password).await?;
        self.establish(auth)
    }

    pub async fn google_login(&mut self, api: &ApiClient, id_token: &str) -> Result<&Principal, ClientError> {
        let auth = api.google_login(id_token).await?;
        self.establish(auth)
    }

    fn establish(&mut self, auth: AuthResponse) -> Result<&Principal, ClientError> {
        let stored = StoredSession::from(auth);
        self.store.save(&stored)?;
        tracing::info!(email = stored.user.email(), "logged in");
        Ok(&self.current.insert(stored).user)
    }

    /// Drop the in-memory session, then the persisted one.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        if let Some(previous) = self.current.take() {
            tracing::info!(email = previous.user.email(), "logged out");
        }
        self.store.clear()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.current.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// False for every query while logged out.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.principal().is_some_and(|p| p.has_permission(permission))
    }

    pub fn authorize(&self, required: &Permission) -> Result<(), AuthzError> {
        warden_auth::authorize(self.principal(), required)
    }

    /// `api` carrying this session's bearer token.
    pub fn client(&self, api: &ApiClient) -> Result<ApiClient, ClientError> {
        self.token()
            .map(|token| api.with_token(token))
            .ok_or(ClientError::NotAuthenticated)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
