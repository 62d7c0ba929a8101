use std::path::Path;

use pinboard_types::models::{Message, Role, UserRecord};
use tracing::info;

use crate::credentials::hash_password;
use crate::error::Result;
use crate::json_file;

const SEED_USERS: &[(u64, &str, &str, Role)] = &[
    (1, "admin", "admin123", Role::Admin),
    (2, "user", "user123", Role::Readonly),
];

const SEED_MESSAGES: &[(u64, u64, &str)] = &[
    (1, 1, "Welcome to the message board!"),
    (2, 1, "This is a sample message."),
];

/// Write seed content for whichever data files are missing. Existing files
/// are never touched.
pub fn run(users_path: &Path, messages_path: &Path) -> Result<()> {
    if !users_path.exists() {
        let users = SEED_USERS
            .iter()
            .map(|&(id, username, password, role)| {
                Ok(UserRecord {
                    id,
                    username: username.to_string(),
                    password: hash_password(password)?,
                    role,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        json_file::save(users_path, &users)?;
        info!("Seeded {} users into {}", users.len(), users_path.display());
    }

    if !messages_path.exists() {
        let messages: Vec<Message> = SEED_MESSAGES
            .iter()
            .map(|&(id, author_id, text)| Message {
                id,
                author_id,
                text: text.to_string(),
            })
            .collect();
        json_file::save(messages_path, &messages)?;
        info!("Seeded {} messages into {}", messages.len(), messages_path.display());
    }

    Ok(())
}
