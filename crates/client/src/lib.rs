//! `warden-client`
//!
//! **Responsibility:** talk to the RBAC backend on behalf of one operator.
//!
//! This crate provides:
//! - Typed bindings for the backend's JSON API
//! - An explicit session context (hydrate, login, logout)
//! - Headless admin screens built on the permission model
//!
//! The backend remains the authority; nothing here is applied locally before
//! it acknowledges.

pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod screens;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use listing::Listing;
pub use screens::{Dashboard, PermissionsScreen, RolesScreen, UsersScreen};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, StoredSession};
