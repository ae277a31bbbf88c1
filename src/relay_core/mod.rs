pub mod completion;
pub mod memory;
pub mod relay;
pub mod schema;
pub mod sql;
pub mod store;
pub mod types;

pub use completion::{CompletionClient, CompletionError};
pub use memory::MemoryStore;
pub use relay::{Relay, SendError};
pub use sql::SqliteStore;
pub use store::MessageStore;
pub use types::{ChatMessage, Message, Role};
