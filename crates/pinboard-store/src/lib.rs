pub mod credentials;
pub mod error;
pub mod json_file;
pub mod messages;
pub mod seed;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use pinboard_types::models::{Message, UserRecord};
use tracing::info;

pub use error::{Result, StoreError};

pub const USERS_FILE: &str = "user.json";
pub const MESSAGES_FILE: &str = "messages.json";

/// File-backed board state: the user table and the message list.
///
/// Users are loaded once and never change while running. Messages are held
/// in memory behind a mutex; every append rewrites `messages.json` while the
/// lock is held, so concurrent appends are serialized.
pub struct Store {
    users: Vec<UserRecord>,
    messages: Mutex<Vec<Message>>,
    messages_path: PathBuf,
}

impl Store {
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let users_path = dir.join(USERS_FILE);
        let messages_path = dir.join(MESSAGES_FILE);

        seed::run(&users_path, &messages_path)?;

        let users: Vec<UserRecord> = json_file::load(&users_path)?;
        check_users(&users_path, &users)?;

        let messages: Vec<Message> = json_file::load(&messages_path)?;
        check_messages(&messages_path, &messages)?;

        info!(
            "Data directory opened at {} ({} users, {} messages)",
            dir.display(),
            users.len(),
            messages.len()
        );
        Ok(Self {
            users,
            messages: Mutex::new(messages),
            messages_path,
        })
    }

    fn lock_messages(&self) -> Result<MutexGuard<'_, Vec<Message>>> {
        self.messages.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

fn check_users(path: &Path, users: &[UserRecord]) -> Result<()> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for user in users {
        if !ids.insert(user.id) {
            return Err(corrupt(path, format!("duplicate user id {}", user.id)));
        }
        if !names.insert(user.username.as_str()) {
            return Err(corrupt(path, format!("duplicate username '{}'", user.username)));
        }
    }
    Ok(())
}

fn check_messages(path: &Path, messages: &[Message]) -> Result<()> {
    let mut ids = HashSet::new();
    for msg in messages {
        if !ids.insert(msg.id) {
            return Err(corrupt(path, format!("duplicate message id {}", msg.id)));
        }
        if msg.text.is_empty() {
            return Err(corrupt(path, format!("message {} has empty text", msg.id)));
        }
    }
    Ok(())
}

fn corrupt(path: &Path, reason: String) -> StoreError {
    StoreError::Corrupt {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    pub fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("pinboard_store_{}_{}", tag, uuid::Uuid::new_v4()))
    }
}
