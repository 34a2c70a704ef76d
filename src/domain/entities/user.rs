use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use uuid::Uuid;

use crate::domain::password::validate_password_strength;


#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user. The identifier travels as `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 8, message = "Must be at least 8 characters"),
        custom(
            function = "validate_password_strength",
            message = "Must include uppercase, number, and symbol"
        )
    )]
    pub password: String,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}

impl NewUser {
    pub fn prepare_for_insert(&self, password_hash: String) -> User {
        User {
            id: Uuid::new_v4(),
            email: normalize_email(&self.email),
            name: self.name.trim().to_string(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_for_insert_normalizes_email() {
        let new_user = NewUser {
            email: "  Ada@Example.COM ".into(),
            password: "unused".into(),
            name: " Ada ".into(),
        };

        let user = new_user.prepare_for_insert("hash".into());
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");
        assert_eq!(user.password_hash, "hash");
    }

    #[test]
    fn user_response_serializes_id_as_underscore_id() {
        let response = UserResponse {
            id: Uuid::nil(),
            email: "a@b.co".into(),
            name: "A".into(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["_id"], Uuid::nil().to_string());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn login_requires_a_password() {
        let login = LoginUser { email: "test@example.com".into(), password: String::new() };
        assert!(login.validate().is_err());
    }
}
