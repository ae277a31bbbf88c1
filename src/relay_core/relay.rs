use std::sync::Arc;

use thiserror::Error;

use super::completion::{CompletionClient, CompletionError};
use super::store::MessageStore;
use super::types::{ChatMessage, Role};

#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Completion(#[from] CompletionError),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Ties the storage adapter to the completion client: one call per user
/// message, producing the stored user/assistant pair.
pub struct Relay {
    store: Arc<dyn MessageStore>,
    completion: CompletionClient,
}

impl Relay {
    pub fn new(store: Arc<dyn MessageStore>, completion: CompletionClient) -> Relay {
        Relay { store, completion }
    }

    pub fn store(&self) -> &dyn MessageStore {
        self.store.as_ref()
    }

    /// Stores the user message, asks for a reply with the accumulated
    /// history as context, then stores and returns the reply. On failure
    /// the user message stays stored and nothing else changes.
    pub async fn send(&self, content: &str) -> Result<ChatMessage, SendError> {
        self.store.insert(Role::User, content)?;
        let context: Vec<ChatMessage> =
            self.store.all()?.iter().map(ChatMessage::from).collect();
        let reply = self.completion.complete(&context).await?;
        self.store.insert(reply.role, &reply.content)?;
        Ok(reply)
    }
}
