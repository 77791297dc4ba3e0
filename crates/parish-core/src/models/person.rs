use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role allowed to manage the holy-item inventory
pub const SUPERADMIN_ROLE: &str = "SUPERADMIN";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "mobileNumber", default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub roles: Option<Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("User")
    }

    /// `roles` arrives either as a single string or a list of strings
    pub fn has_role(&self, role: &str) -> bool {
        match &self.roles {
            Some(Value::String(r)) => r.trim() == role,
            Some(Value::Array(roles)) => roles.iter().filter_map(Value::as_str).any(|r| r.trim() == role),
            _ => false,
        }
    }

    pub fn can_manage_inventory(&self) -> bool {
        self.has_role(SUPERADMIN_ROLE)
    }

    /// Up to two initials from the user's name
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditUser {
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
    pub name: String,
}

/// Parish membership details attached to a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParishProfile {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(rename = "streetName", default)]
    pub street_name: Option<String>,
    #[serde(rename = "dateOfBirth", default)]
    pub date_of_birth: Option<String>,
    #[serde(rename = "feastName", default)]
    pub feast_name: Option<String>,
}

/// Birthday listings are parish profiles with the owning user embedded.
pub type Birthday = ParishProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParishProfileInput {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "streetName")]
    pub street_name: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: String,
    #[serde(rename = "feastName")]
    pub feast_name: String,
}
