use serde::{Deserialize, Serialize};

use crate::models::{Identity, Role};

// -- JWT Claims --

/// Claims carried by a session token. Shared between the issuer and the
/// bearer middleware so both sides agree on the wire shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: u64,
    pub username: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.username.clone(),
            role: self.role,
        }
    }
}

// -- Auth --

/// Both fields are optional on the wire so a missing field can be reported
/// as a validation error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Identity,
}

// -- Messages --

/// `message` is kept as a raw JSON value; anything but a non-empty string is
/// rejected by the handler.
#[derive(Debug, Default, Deserialize)]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub msg: String,
}
