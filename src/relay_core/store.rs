use anyhow::Result;

use super::types::{Message, Role};

/// Storage contract shared by the database-backed and in-memory logs.
/// Messages are immutable once inserted; there is no update or delete.
pub trait MessageStore: Send + Sync {
    /// Appends a message and returns it as stored.
    fn insert(&self, role: Role, content: &str) -> Result<Message>;

    /// The `n` most recent messages, newest first.
    fn latest(&self, n: usize) -> Result<Vec<Message>>;

    /// Every message, oldest first.
    fn all(&self) -> Result<Vec<Message>>;
}
