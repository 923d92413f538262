// In-memory session store
//
// Each session's history is kept as its serialized JSON form, mirroring
// how the surrounding session layer persists it. A `save` replaces the
// whole value in one DashMap insert, so a concurrent `load` observes
// either the old or the new conversation, never a partial write.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

use super::types::Conversation;

/// Errors from the persistence layer. Absence of a session is not an
/// error; these only cover serialization problems.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("stored history for session {session_id} is corrupt: {source}")]
    Corrupt {
        session_id: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize conversation: {0}")]
    Serialize(serde_json::Error),
}

struct SessionEntry {
    /// Serialized conversation (JSON list of `{role, content}` pairs)
    history: String,
    last_access: Instant,
}

/// Session-keyed conversation store.
///
/// Turns for one session must serialize on `turn_lock`; turns for
/// different sessions share no mutable state and run freely in parallel.
pub struct SessionStore {
    sessions: DashMap<String, SessionEntry>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            locks: DashMap::new(),
        }
    }

    /// Load the conversation for a session. Unseen sessions get an empty
    /// conversation.
    pub fn load(&self, session_id: &str) -> Result<Conversation, StoreError> {
        match self.sessions.get_mut(session_id) {
            Some(mut entry) => {
                entry.last_access = Instant::now();
                serde_json::from_str(&entry.history).map_err(|source| StoreError::Corrupt {
                    session_id: session_id.to_string(),
                    source,
                })
            }
            None => Ok(Conversation::new()),
        }
    }

    /// Replace the persisted conversation for a session.
    pub fn save(&self, session_id: &str, conversation: &Conversation) -> Result<(), StoreError> {
        let history = serde_json::to_string(conversation).map_err(StoreError::Serialize)?;
        self.sessions.insert(
            session_id.to_string(),
            SessionEntry {
                history,
                last_access: Instant::now(),
            },
        );
        Ok(())
    }

    /// Per-session turn lock. Callers hold it across the whole
    /// load/append/save sequence of a turn.
    pub fn turn_lock(&self, session_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop sessions that have been idle longer than `max_idle`.
    /// Call periodically from a background task.
    pub fn purge_idle(&self, max_idle: Duration) {
        let now = Instant::now();
        self.sessions
            .retain(|_, entry| now.duration_since(entry.last_access) < max_idle);
        // A lock may be live before its session's first save (a first turn
        // still awaiting the backend). Dropping it would hand a concurrent
        // turn a fresh mutex, so keep any lock another holder still shares.
        self.locks.retain(|id, lock| {
            self.sessions.contains_key(id.as_str()) || Arc::strong_count(lock) > 1
        });
    }

    /// Number of currently tracked sessions.
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;

    #[test]
    fn test_load_unseen_session_is_empty() {
        let store = SessionStore::new();
        let conv = store.load("never-written").unwrap();
        assert!(conv.is_empty());
        assert_eq!(store.active_count(), 0);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let store = SessionStore::new();
        let mut conv = Conversation::new();
        conv.push(Message::user("Hello"));
        conv.push(Message::assistant("Hi there"));

        store.save("s1", &conv).unwrap();
        let loaded = store.load("s1").unwrap();
        assert_eq!(loaded, conv);
    }

    #[test]
    fn test_roundtrip_empty_and_unicode_content() {
        let store = SessionStore::new();
        let mut conv = Conversation::new();
        conv.push(Message::user(""));
        conv.push(Message::assistant("résumé 日本語 ✓"));

        store.save("s1", &conv).unwrap();
        assert_eq!(store.load("s1").unwrap(), conv);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let mut conv = Conversation::new();
        conv.push(Message::user("private"));
        store.save("alice", &conv).unwrap();

        assert!(store.load("bob").unwrap().is_empty());
        assert_eq!(store.load("alice").unwrap().len(), 1);
    }

    #[test]
    fn test_save_overwrites_whole_history() {
        let store = SessionStore::new();
        let mut first = Conversation::new();
        first.push(Message::user("one"));
        store.save("s1", &first).unwrap();

        let mut second = Conversation::new();
        second.push(Message::user("two"));
        second.push(Message::assistant("three"));
        store.save("s1", &second).unwrap();

        assert_eq!(store.load("s1").unwrap(), second);
    }

    #[test]
    fn test_turn_lock_same_session_shared() {
        let store = SessionStore::new();
        let a = store.turn_lock("s1");
        let b = store.turn_lock("s1");
        assert!(Arc::ptr_eq(&a, &b));

        let c = store.turn_lock("s2");
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn test_purge_idle_drops_stale_sessions() {
        let store = SessionStore::new();
        store.save("s1", &Conversation::new()).unwrap();
        assert_eq!(store.active_count(), 1);

        // Zero idle allowance purges everything
        store.purge_idle(Duration::from_secs(0));
        assert_eq!(store.active_count(), 0);
        assert!(store.load("s1").unwrap().is_empty());
    }

    #[test]
    fn test_purge_idle_keeps_lock_of_inflight_first_turn() {
        // A session's first turn holds its lock before anything is saved.
        // The sweep must not recycle that lock, or a concurrent turn for
        // the same session would stop serializing against it.
        let store = SessionStore::new();
        let held = store.turn_lock("fresh");

        store.purge_idle(Duration::from_secs(1800));

        let again = store.turn_lock("fresh");
        assert!(
            Arc::ptr_eq(&held, &again),
            "sweep dropped the in-flight session's lock"
        );
    }

    #[test]
    fn test_purge_idle_keeps_lock_of_live_session() {
        let store = SessionStore::new();
        store.save("s1", &Conversation::new()).unwrap();
        let before = store.turn_lock("s1");

        store.purge_idle(Duration::from_secs(3600));

        assert!(Arc::ptr_eq(&before, &store.turn_lock("s1")));
    }

    #[test]
    fn test_purge_idle_keeps_fresh_sessions() {
        let store = SessionStore::new();
        store.save("s1", &Conversation::new()).unwrap();
        store.purge_idle(Duration::from_secs(3600));
        assert_eq!(store.active_count(), 1);
    }
}
