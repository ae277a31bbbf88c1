use std::sync::{Mutex, MutexGuard};

use anyhow::{anyhow, Result};

use super::store::MessageStore;
use super::types::{Message, Role};

/// Process-local message log. State is lost on restart. The mutex keeps
/// concurrent sends from interleaving their appends.
#[derive(Default)]
pub struct MemoryStore {
    messages: Mutex<Vec<Message>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Message>>> {
        self.messages
            .lock()
            .map_err(|_| anyhow!("message log mutex poisoned"))
    }
}

impl MessageStore for MemoryStore {
    fn insert(&self, role: Role, content: &str) -> Result<Message> {
        let message = Message {
            id: None,
            role,
            content: content.to_string(),
            timestamp: None,
        };
        self.lock()?.push(message.clone());
        Ok(message)
    }

    fn latest(&self, n: usize) -> Result<Vec<Message>> {
        Ok(self.lock()?.iter().rev().take(n).cloned().collect())
    }

    fn all(&self) -> Result<Vec<Message>> {
        Ok(self.lock()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_order_is_history_order() {
        let store = MemoryStore::new();
        store.insert(Role::User, "one").unwrap();
        store.insert(Role::Assistant, "two").unwrap();
        store.insert(Role::User, "three").unwrap();

        let all = store.all().unwrap();
        let contents: Vec<&str> = all.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["one", "two", "three"]);
    }

    #[test]
    fn latest_returns_newest_first() {
        let store = MemoryStore::new();
        store.insert(Role::User, "one").unwrap();
        store.insert(Role::Assistant, "two").unwrap();

        let latest = store.latest(2).unwrap();
        let contents: Vec<&str> = latest.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["two", "one"]);
    }

    #[test]
    fn latest_on_empty_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.latest(2).unwrap().is_empty());
    }

    #[test]
    fn stored_messages_carry_no_row_metadata() {
        let store = MemoryStore::new();
        let message = store.insert(Role::User, "hello").unwrap();
        assert_eq!(message.id, None);
        assert_eq!(message.timestamp, None);
    }

    #[test]
    fn content_round_trips_unchanged() {
        let store = MemoryStore::new();
        let content = "multi\nline with unicode 你好 and 'quotes'";
        store.insert(Role::Assistant, content).unwrap();
        assert_eq!(store.all().unwrap()[0].content, content);
        assert_eq!(store.latest(1).unwrap()[0].content, content);
    }
}
