//! In-memory session store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use deskhand_core::error::SessionError;
use deskhand_core::message::{Message, SessionKey};
use deskhand_core::session::SessionStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// An in-memory store keeping each session's messages in a Vec.
/// Useful for tests and runs where persistence isn't needed.
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, Vec<Message>>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn load(&self, key: &SessionKey) -> Result<Vec<Message>, SessionError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(key.as_str()).cloned().unwrap_or_default())
    }

    async fn append(&self, key: &SessionKey, message: &Message) -> Result<(), SessionError> {
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(key.0.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SessionKey>, SessionError> {
        let sessions = self.sessions.read().await;
        let mut keys: Vec<SessionKey> = sessions.keys().map(|k| SessionKey(k.clone())).collect();
        keys.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_and_load() {
        let store = InMemorySessionStore::new();
        let key = SessionKey::from_display_name("Maria");

        store.append(&key, &Message::user("hello")).await.unwrap();
        store.append(&key, &Message::assistant("hi!")).await.unwrap();

        let messages = store.load(&key).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1].content, "hi!");
    }

    #[tokio::test]
    async fn unknown_key_is_empty() {
        let store = InMemorySessionStore::new();
        let key = SessionKey::from_display_name("Nobody");
        assert!(store.load(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_known_sessions() {
        let store = InMemorySessionStore::new();
        store
            .append(&SessionKey::from_display_name("bob"), &Message::user("hi"))
            .await
            .unwrap();
        store
            .append(&SessionKey::from_display_name("ana"), &Message::user("hi"))
            .await
            .unwrap();

        let keys = store.list().await.unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].0, "ana");
    }
}
