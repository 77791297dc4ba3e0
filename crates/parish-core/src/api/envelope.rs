use serde::{Deserialize, Serialize};

use super::ApiError;

/// The `{ success, message, data }` wrapper the backend puts around payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload of a successful response.
    ///
    /// `success: false` and a missing `data` field both become
    /// [`ApiError::InvalidResponse`] carrying the backend's message if any.
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::InvalidResponse(
                self.message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        self.data.ok_or_else(|| {
            ApiError::InvalidResponse(
                self.message
                    .unwrap_or_else(|| "Response contained no data".to_string()),
            )
        })
    }

    /// Payload of a list endpoint; an unsuccessful or empty envelope is an empty list
    pub fn data_or_default(self) -> T
    where
        T: Default,
    {
        if self.success {
            self.data.unwrap_or_default()
        } else {
            T::default()
        }
    }
}
