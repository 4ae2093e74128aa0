//! SessionStore trait — durable, append-only per-session message logs.
//!
//! One record per session key, holding the ordered message sequence. The
//! store is the exclusive owner of persisted history; the agent loop only
//! ever appends. Appends are atomic with respect to a single session and
//! durable before the call returns.

use crate::error::SessionError;
use crate::message::{Message, SessionKey};
use async_trait::async_trait;

/// The core SessionStore trait.
///
/// Implementations: JSONL-file-per-session (durable), in-memory (tests).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The backend name (e.g., "file", "in_memory").
    fn name(&self) -> &str;

    /// Load the ordered message sequence for a session.
    ///
    /// A session that has never been written yields an empty sequence; the
    /// durable record is created on first append.
    async fn load(&self, key: &SessionKey) -> std::result::Result<Vec<Message>, SessionError>;

    /// Append one message to a session.
    ///
    /// Atomic per session (no interleaved partial writes) and durable before
    /// the call returns.
    async fn append(
        &self,
        key: &SessionKey,
        message: &Message,
    ) -> std::result::Result<(), SessionError>;

    /// List all known session keys.
    async fn list(&self) -> std::result::Result<Vec<SessionKey>, SessionError> {
        Ok(Vec::new())
    }

    /// Number of messages persisted for a session.
    async fn count(&self, key: &SessionKey) -> std::result::Result<usize, SessionError> {
        Ok(self.load(key).await?.len())
    }
}
