use serde::{ Serialize, Deserialize };

use crate::constants::TOKEN_TYPE;
use crate::entities::user::UserResponse;

/// Body returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(token: String, user: UserResponse) -> Self {
        AuthResponse {
            token,
            token_type: TOKEN_TYPE.to_string(),
            user,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}
