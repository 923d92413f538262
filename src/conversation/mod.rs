// Session-scoped conversation state
//
// The store is the single owner of per-session history. Handlers never
// touch session state directly; they go through the orchestrator, which
// serializes turns on the store's per-session lock.

mod store;
mod types;

pub use store::{SessionStore, StoreError};
pub use types::{Conversation, Message, Role};
