use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use super::{CredentialKey, StoreError};
use crate::api::{ApiError, ApiResponse, Gateway, RequestContext};

#[derive(Debug, Clone, Serialize)]
struct LoginRequest<'a> {
    #[serde(rename = "mobileNumber")]
    mobile_number: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    pub password: String,
    pub email: String,
}

/// Shortest password the backend accepts at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 6;

impl SignupRequest {
    /// Check the fields before anything is sent
    pub fn validate(&self) -> Result<(), ApiError> {
        let fields = [&self.name, &self.mobile_number, &self.email, &self.password];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ApiError::InvalidRequest("Please fill all fields".to_string()));
        }
        if !is_valid_email(&self.email) {
            return Err(ApiError::InvalidRequest(
                "Please enter a valid email address".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::InvalidRequest(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

/// `local@domain.tld`: one `@`, no whitespace, a dot inside the domain
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[derive(Debug, Clone, Serialize)]
struct RefreshRequest<'a> {
    #[serde(rename = "refreshToken")]
    refresh_token: &'a str,
}

/// Body returned by `/auth/login` and `/auth/refresh`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken", default)]
    pub access_token: Option<String>,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Login, logout, and the other `/auth` endpoints.
///
/// Tokens returned by the backend are written to the gateway's credential
/// store; every later request picks them up from there.
pub struct AuthService<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Authenticate and store the returned credentials.
    ///
    /// The store is only written once the backend has answered with an
    /// access token; any failure before that leaves it untouched.
    pub async fn login(&self, mobile_number: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let ctx = RequestContext::post("/auth/login").json(&LoginRequest {
            mobile_number,
            password,
        })?;
        let tokens: TokenResponse = self.gateway.send(ctx).await?;
        self.store_tokens(&tokens)?;
        info!("Login successful");
        Ok(tokens)
    }

    /// Exchange the stored refresh credential for a new session credential.
    ///
    /// Only ever called explicitly; a 401 elsewhere does not trigger it.
    pub async fn refresh(&self) -> Result<TokenResponse, ApiError> {
        let refresh_token = self
            .gateway
            .store()
            .get(CredentialKey::RefreshToken)?
            .ok_or_else(|| ApiError::InvalidRequest("No refresh credential stored".to_string()))?;

        let ctx = RequestContext::post("/auth/refresh").json(&RefreshRequest {
            refresh_token: &refresh_token,
        })?;
        let tokens: TokenResponse = self.gateway.send(ctx).await?;
        self.store_tokens(&tokens)?;
        info!("Session credential refreshed");
        Ok(tokens)
    }

    fn store_tokens(&self, tokens: &TokenResponse) -> Result<(), ApiError> {
        let access = tokens
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApiError::InvalidResponse(
                    tokens
                        .message
                        .clone()
                        .unwrap_or_else(|| "Invalid response from server".to_string()),
                )
            })?;

        let store = self.gateway.store();
        store.set(CredentialKey::UserToken, access)?;
        if let Some(refresh) = tokens.refresh_token.as_deref().filter(|t| !t.is_empty()) {
            store.set(CredentialKey::RefreshToken, refresh)?;
        }
        Ok(())
    }

    /// Forget both credentials locally. The backend is not contacted.
    pub fn logout(&self) -> Result<(), StoreError> {
        let store = self.gateway.store();
        let mut first_error = None;
        for key in CredentialKey::ALL {
            if let Err(e) = store.remove(key) {
                warn!(key = %key, error = %e, "Failed to remove credential on logout");
                first_error.get_or_insert(e);
            }
        }
        info!("Logged out");
        first_error.map_or(Ok(()), Err)
    }

    /// Whether a session credential is stored. A store failure counts as no.
    pub fn is_authenticated(&self) -> bool {
        match self.gateway.store().get(CredentialKey::UserToken) {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!(error = %e, "Could not read session credential");
                false
            }
        }
    }

    /// Register a new account. Invalid input is rejected before any call.
    pub async fn signup(&self, request: &SignupRequest) -> Result<ApiResponse<Value>, ApiError> {
        request.validate()?;
        let ctx = RequestContext::post("/auth/signup").json(request)?;
        self.gateway.send(ctx).await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<ApiResponse<Value>, ApiError> {
        let ctx = RequestContext::post("/auth/request-password-reset")
            .json(&serde_json::json!({ "email": email }))?;
        self.gateway.send(ctx).await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<ApiResponse<Value>, ApiError> {
        let ctx = RequestContext::post("/auth/reset-password")
            .json(&serde_json::json!({ "token": token, "newPassword": new_password }))?;
        self.gateway.send(ctx).await
    }

    pub async fn update_role(&self, mobile_number: &str, roles: &str) -> Result<ApiResponse<Value>, ApiError> {
        let ctx = RequestContext::post("/auth/update-role")
            .json(&serde_json::json!({ "mobileNumber": mobile_number, "roles": roles }))?;
        self.gateway.send(ctx).await
    }
}
