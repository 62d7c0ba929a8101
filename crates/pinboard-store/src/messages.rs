use pinboard_types::models::Message;
use tracing::{error, info};

use crate::Store;
use crate::error::{Result, StoreError};
use crate::json_file;

impl Store {
    /// One page of messages in insertion order. `page` is 1-indexed; page 0,
    /// `per_page` 0 and pages past the end all yield an empty list.
    pub fn list(&self, page: usize, per_page: usize) -> Result<Vec<Message>> {
        let messages = self.lock_messages()?;
        if page == 0 || per_page == 0 {
            return Ok(Vec::new());
        }

        let start = (page - 1).saturating_mul(per_page);
        if start >= messages.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(per_page).min(messages.len());
        Ok(messages[start..end].to_vec())
    }

    /// Append a message and rewrite `messages.json`. The new id is one past
    /// the current maximum. If the write fails nothing changes in memory.
    pub fn append(&self, author_id: u64, text: &str) -> Result<Message> {
        if text.is_empty() {
            return Err(StoreError::InvalidInput("message text must not be empty"));
        }

        let mut messages = self.lock_messages()?;
        let id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let message = Message {
            id,
            author_id,
            text: text.to_string(),
        };

        messages.push(message.clone());
        if let Err(e) = json_file::save(&self.messages_path, messages.as_slice()) {
            messages.pop();
            error!("Failed to persist message {}: {}", id, e);
            return Err(e);
        }

        info!("Message {} appended by user {}", id, author_id);
        Ok(message)
    }

    pub fn message_count(&self) -> Result<usize> {
        Ok(self.lock_messages()?.len())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::test_support::temp_dir;

    fn store_with(count: u64) -> Store {
        let dir = temp_dir("msgs");
        std::fs::create_dir_all(&dir).unwrap();
        let messages: Vec<Message> = (1..=count)
            .map(|id| Message { id, author_id: 1, text: format!("m{}", id) })
            .collect();
        json_file::save(&dir.join(crate::MESSAGES_FILE), &messages).unwrap();
        Store::open(&dir).unwrap()
    }

    fn ids(messages: &[Message]) -> Vec<u64> {
        messages.iter().map(|m| m.id).collect()
    }

    #[test]
    fn pages_slice_by_position() {
        let store = store_with(25);
        assert_eq!(ids(&store.list(1, 10).unwrap()), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&store.list(2, 10).unwrap()), (11..=20).collect::<Vec<_>>());
        assert_eq!(ids(&store.list(3, 10).unwrap()), (21..=25).collect::<Vec<_>>());
        assert!(store.list(4, 10).unwrap().is_empty());
    }

    #[test]
    fn degenerate_pages_are_empty() {
        let store = store_with(5);
        assert!(store.list(0, 10).unwrap().is_empty());
        assert!(store.list(1, 0).unwrap().is_empty());
        assert!(store.list(usize::MAX, usize::MAX).unwrap().is_empty());
    }

    #[test]
    fn append_uses_max_id_plus_one() {
        let dir = temp_dir("gap");
        std::fs::create_dir_all(&dir).unwrap();
        let messages = vec![
            Message { id: 9, author_id: 1, text: "late".into() },
            Message { id: 4, author_id: 1, text: "early".into() },
        ];
        json_file::save(&dir.join(crate::MESSAGES_FILE), &messages).unwrap();
        let store = Store::open(&dir).unwrap();

        let created = store.append(2, "next").unwrap();
        assert_eq!(created, Message { id: 10, author_id: 2, text: "next".into() });
    }

    #[test]
    fn append_to_empty_store_starts_at_one() {
        let store = store_with(0);
        assert_eq!(store.append(1, "first").unwrap().id, 1);
    }

    #[test]
    fn empty_text_is_rejected_without_effect() {
        let store = store_with(2);
        assert!(matches!(store.append(1, ""), Err(StoreError::InvalidInput(_))));
        assert_eq!(store.message_count().unwrap(), 2);
    }

    #[test]
    fn appended_messages_survive_reopen() {
        let dir = temp_dir("reopen");
        let store = Store::open(&dir).unwrap();
        store.append(1, "persisted").unwrap();
        drop(store);

        let reopened = Store::open(&dir).unwrap();
        let all = reopened.list(1, 100).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[2].text, "persisted");
        assert!(!dir.join("messages.json.tmp").exists());
    }

    #[test]
    fn concurrent_appends_get_distinct_ids() {
        let store = Arc::new(store_with(0));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                thread::spawn(move || store.append(1, &format!("t{}", i)).unwrap().id)
            })
            .collect();

        let mut got: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        got.sort();
        assert_eq!(got, (1..=8).collect::<Vec<_>>());
        assert_eq!(store.message_count().unwrap(), 8);
    }
}
