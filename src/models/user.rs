// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{Permissions, Role};
use crate::errors::ApiError;

/// Back-office user account
/// Role is stored as its lowercase tag; parsing happens at the API edge
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub address_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// API response with the resolved permission record attached
    pub fn to_response(&self) -> UserResponse {
        // Stored roles are validated on write; unknown tags degrade to no
        // permissions rather than failing the read
        let role = Role::from_str(&self.role).unwrap_or(Role::Banned);

        UserResponse {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role,
            permissions: role.permissions(),
            address_id: self.address_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub permissions: Permissions,
    pub address_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 255))]
    pub display_name: String,
    pub role: String,
    #[serde(default)]
    pub address_id: Option<Uuid>,
}

impl CreateUserRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;
        Role::from_str(&self.role).map_err(ApiError::Validation)?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub address_id: Option<Uuid>,
}

impl UpdateUserRequest {
    pub fn validate_fields(&self) -> Result<(), ApiError> {
        if let Some(role) = &self.role {
            Role::from_str(role).map_err(ApiError::Validation)?;
        }
        if let Some(email) = &self.email {
            if !validator::validate_email(email) {
                return Err(ApiError::Validation("Invalid email".to_string()));
            }
        }
        if let Some(display_name) = &self.display_name {
            if display_name.is_empty() || display_name.len() > 255 {
                return Err(ApiError::Validation(
                    "Display name must be between 1 and 255 characters".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub role: Option<String>,
    /// Substring match on email or display name
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(email: Option<&str>, role: Option<&str>) -> UpdateUserRequest {
        UpdateUserRequest {
            email: email.map(String::from),
            display_name: None,
            role: role.map(String::from),
            address_id: None,
        }
    }

    #[test]
    fn test_update_user_email_checked_like_create() {
        assert!(update(Some("a@"), None).validate_fields().is_err());
        assert!(update(Some("not-an-email"), None).validate_fields().is_err());
        assert!(update(Some("editor@example.com"), None)
            .validate_fields()
            .is_ok());
    }

    #[test]
    fn test_update_user_rejects_unknown_role() {
        assert!(update(None, Some("superuser")).validate_fields().is_err());
        assert!(update(None, Some("manager")).validate_fields().is_ok());
    }

    #[test]
    fn test_update_user_rejects_empty_display_name() {
        let req = UpdateUserRequest {
            email: None,
            display_name: Some(String::new()),
            role: None,
            address_id: None,
        };
        assert!(req.validate_fields().is_err());
    }
}
