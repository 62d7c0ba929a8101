use serde::{Deserialize, Serialize};

/// Permission label attached to a user and embedded in their session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Readonly,
}

/// Operations guarded by a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadMessages,
    PostMessage,
}

impl Role {
    /// Capability table. Adding a role or an action means adding a row here.
    pub fn allows(self, action: Action) -> bool {
        match (self, action) {
            (Role::Admin, Action::ReadMessages) => true,
            (Role::Admin, Action::PostMessage) => true,
            (Role::Readonly, Action::ReadMessages) => true,
            (Role::Readonly, Action::PostMessage) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Readonly => "readonly",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of `user.json`. `password` is an Argon2 PHC string, never plaintext.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// A row of `messages.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    #[serde(rename = "userId")]
    pub author_id: u64,
    #[serde(rename = "message")]
    pub text: String,
}

/// The public part of a user: what a successful login proves and what a
/// session token carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u64,
    pub username: String,
    pub role: Role,
}

impl From<&UserRecord> for Identity {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readonly_can_read_but_not_post() {
        assert!(Role::Readonly.allows(Action::ReadMessages));
        assert!(!Role::Readonly.allows(Action::PostMessage));
    }

    #[test]
    fn admin_can_do_everything() {
        assert!(Role::Admin.allows(Action::ReadMessages));
        assert!(Role::Admin.allows(Action::PostMessage));
    }

    #[test]
    fn message_uses_legacy_field_names() {
        let msg = Message { id: 3, author_id: 1, text: "hi".into() };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 3, "userId": 1, "message": "hi" }));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let res: Result<Role, _> = serde_json::from_str("\"superuser\"");
        assert!(res.is_err());
    }
}
