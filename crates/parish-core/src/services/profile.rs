use serde_json::Value;

use crate::api::{ApiError, ApiResponse, Gateway, RequestContext};
use crate::models::{EditUser, ParishProfile, ParishProfileInput, UserProfile};

/// User accounts and parish membership profiles.
pub struct UserProfileService<'a> {
    gateway: &'a Gateway,
}

impl<'a> UserProfileService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn all_users(&self) -> Result<ApiResponse<Vec<UserProfile>>, ApiError> {
        self.gateway.send(RequestContext::get("/user")).await
    }

    /// The signed-in user. This endpoint answers with the bare profile, no envelope.
    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.gateway.send(RequestContext::get("/user/profile")).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<ApiResponse<Value>, ApiError> {
        self.gateway.send(RequestContext::delete(format!("/user/{}", id))).await
    }

    pub async fn edit(&self, mobile_number: &str, name: &str) -> Result<ApiResponse<UserProfile>, ApiError> {
        let ctx = RequestContext::put("/user/edit").json(&EditUser {
            mobile_number: mobile_number.to_string(),
            name: name.to_string(),
        })?;
        self.gateway.send(ctx).await
    }

    pub async fn save_parish_profile(&self, input: &ParishProfileInput) -> Result<ApiResponse<ParishProfile>, ApiError> {
        let ctx = RequestContext::post("/api/parish-profile").json(input)?;
        self.gateway.send(ctx).await
    }

    pub async fn parish_profiles_by_street(&self, street: &str) -> Result<ApiResponse<Vec<ParishProfile>>, ApiError> {
        let ctx = RequestContext::get(format!(
            "/api/parish-profile/street/{}",
            urlencoding::encode(street)
        ));
        self.gateway.send(ctx).await
    }

    pub async fn my_parish_profile(&self) -> Result<ApiResponse<ParishProfile>, ApiError> {
        self.gateway.send(RequestContext::get("/api/parish-profile/me")).await
    }
}
