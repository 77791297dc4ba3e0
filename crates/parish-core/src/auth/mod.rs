//! Credential storage and the session lifecycle.
//!
//! This module provides:
//! - `CredentialStore`: durable storage for the session and refresh credentials
//! - `AuthService`: login, logout, explicit refresh, and the other `/auth` calls
//!
//! Credentials are persisted under the names `userToken` and `refreshToken`.

pub mod credentials;
pub mod session;

pub use credentials::{CredentialKey, CredentialStore, FileStore, KeyringStore, MemoryStore, StoreError};
pub use session::{AuthService, SignupRequest, TokenResponse};
