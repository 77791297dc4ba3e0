//! Core library for the parish community client.
//!
//! - `auth`: credential store backends and the login/logout lifecycle
//! - `api`: the authenticated request gateway every backend call uses
//! - `services`: one thin service per backend area (holy items, mass
//!   intentions, certificates, newsletters/schedules, profiles)
//! - `models`: wire types for backend payloads
//! - `config`: persisted settings and gateway construction

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

pub use api::{ApiError, ApiResponse, FileUpload, Gateway, RequestContext};
pub use auth::{AuthService, CredentialKey, CredentialStore, StoreError};
pub use config::Config;
