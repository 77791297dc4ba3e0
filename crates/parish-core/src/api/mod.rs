//! Authenticated access to the parish REST backend.
//!
//! This module provides the `Gateway` every backend call goes through,
//! the `RequestContext` a call is described by, the `ApiResponse`
//! envelope the backend wraps payloads in, and the `ApiError` taxonomy.
//!
//! The backend uses bearer token authentication; the token lives in the
//! credential store and is read fresh for every request.

pub mod envelope;
pub mod error;
pub mod gateway;
pub mod request;

pub use envelope::ApiResponse;
pub use error::ApiError;
pub use gateway::Gateway;
pub use request::{FileUpload, RequestContext};
