//! HTTP bindings for the RBAC backend.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use warden_auth::{
    AuthResponse, PermissionRecord, PermissionRequest, Role, RoleRequest, User, UserPayload,
};
use warden_core::{PermissionId, RoleId, UserId};

use crate::config::ClientConfig;
use crate::error::{ClientError, error_message};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoogleLoginRequest<'a> {
    id_token: &'a str,
}

/// Client for the backend's JSON API.
///
/// Cheap to clone; clones share the connection pool. Every endpoint except
/// the two logins sends `Authorization: Bearer <token>` and fails with
/// [`ClientError::NotAuthenticated`] when no token is attached.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    /// Same client, authenticated with `token`.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Authentication
    // ─────────────────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let req = self
            .anonymous(Method::POST, "/users/login")
            .json(&LoginRequest { email, password });
        self.send_json(req).await
    }

    pub async fn google_login(&self, id_token: &str) -> Result<AuthResponse, ClientError> {
        let req = self
            .anonymous(Method::POST, "/users/google-login")
            .json(&GoogleLoginRequest { id_token });
        self.send_json(req).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        self.send_json(self.authed(Method::GET, "/users")?).await
    }

    pub async fn get_user(&self, id: &UserId) -> Result<User, ClientError> {
        self.send_json(self.authed(Method::GET, &format!("/users/{id}"))?).await
    }

    /// The created record, or `None` when the backend answers without a body.
    pub async fn create_user(&self, payload: &UserPayload) -> Result<Option<User>, ClientError> {
        self.send_optional(self.authed(Method::POST, "/users")?.json(payload))
            .await
    }

    pub async fn update_user(&self, id: &UserId, payload: &UserPayload) -> Result<(), ClientError> {
        self.send_empty(self.authed(Method::PUT, &format!("/users/{id}"))?.json(payload))
            .await
    }

    pub async fn delete_user(&self, id: &UserId) -> Result<(), ClientError> {
        self.send_empty(self.authed(Method::DELETE, &format!("/users/{id}"))?)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Roles
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_roles(&self) -> Result<Vec<Role>, ClientError> {
        self.send_json(self.authed(Method::GET, "/roles")?).await
    }

    pub async fn get_role(&self, id: RoleId) -> Result<Role, ClientError> {
        self.send_json(self.authed(Method::GET, &format!("/roles/{id}"))?).await
    }

    pub async fn create_role(&self, request: &RoleRequest) -> Result<Option<Role>, ClientError> {
        self.send_optional(self.authed(Method::POST, "/roles")?.json(request))
            .await
    }

    pub async fn update_role(&self, id: RoleId, request: &RoleRequest) -> Result<(), ClientError> {
        self.send_empty(self.authed(Method::PUT, &format!("/roles/{id}"))?.json(request))
            .await
    }

    pub async fn delete_role(&self, id: RoleId) -> Result<(), ClientError> {
        self.send_empty(self.authed(Method::DELETE, &format!("/roles/{id}"))?)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Permissions
    // ─────────────────────────────────────────────────────────────────────

    pub async fn list_permissions(&self) -> Result<Vec<PermissionRecord>, ClientError> {
        self.send_json(self.authed(Method::GET, "/permissions")?).await
    }

    /// The catalog as bare names, in backend order.
    pub async fn permission_names(&self) -> Result<Vec<String>, ClientError> {
        let records = self.list_permissions().await?;
        Ok(warden_auth::catalog_names(&records))
    }

    pub async fn get_permission(&self, id: PermissionId) -> Result<PermissionRecord, ClientError> {
        self.send_json(self.authed(Method::GET, &format!("/permissions/{id}"))?)
            .await
    }

    pub async fn create_permission(
        &self,
        request: &PermissionRequest,
    ) -> Result<Option<PermissionRecord>, ClientError> {
        self.send_optional(self.authed(Method::POST, "/permissions")?.json(request))
            .await
    }

    pub async fn update_permission(
        &self,
        id: PermissionId,
        request: &PermissionRequest,
    ) -> Result<(), ClientError> {
        self.send_empty(self.authed(Method::PUT, &format!("/permissions/{id}"))?.json(request))
            .await
    }

    pub async fn delete_permission(&self, id: PermissionId) -> Result<(), ClientError> {
        self.send_empty(self.authed(Method::DELETE, &format!("/permissions/{id}"))?)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Transport
    // ─────────────────────────────────────────────────────────────────────

    fn anonymous(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.anonymous(method, path).bearer_auth(token))
    }

    async fn execute(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let req = req.build().map_err(|e| ClientError::Network(e.to_string()))?;
        let (method, path) = (req.method().clone(), req.url().path().to_string());

        let resp = self
            .http
            .execute(req)
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = resp.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "backend request");

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.bytes().await.unwrap_or_default();
        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(status.as_u16(), &body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = self.execute(req).await?;
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Like `send_json`, but a 204 or an empty body is a success without a value.
    async fn send_optional<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<Option<T>, ClientError> {
        let resp = self.execute(req).await?;
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        serde_json::from_slice(&body)
            .map(Some)
            .map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// For 204-style endpoints; any body is ignored.
    async fn send_empty(&self, req: RequestBuilder) -> Result<(), ClientError> {
        self.execute(req).await.map(|_| ())
    }
}
