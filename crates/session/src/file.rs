//! File-based session store — one JSONL file per session key.
//!
//! Each line is a JSON-encoded `Message`. Appends go through `O_APPEND` and
//! are fsynced before returning, so a message that `append` acknowledged
//! survives a process crash. The file is never rewritten: history grows by
//! appending only.
//!
//! Storage location: `~/.deskhand/sessions/<key>.jsonl`

use async_trait::async_trait;
use deskhand_core::error::SessionError;
use deskhand_core::message::{Message, SessionKey};
use deskhand_core::session::SessionStore;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A file-backed session store using JSONL (one JSON object per line).
///
/// Access is serialized per session key with a keyed mutex: concurrent
/// callers on the same session queue up, while distinct sessions proceed
/// independently.
pub struct FileSessionStore {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FileSessionStore {
    /// Create a new file-based store rooted at the given directory.
    ///
    /// The directory is created lazily on first append.
    pub fn new(dir: PathBuf) -> Self {
        debug!(dir = %dir.display(), "File session store ready");
        Self {
            dir,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Default directory: `~/.deskhand/sessions`
    pub fn default_dir() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".deskhand").join("sessions")
    }

    /// Acquire the per-key lock, creating it on first use.
    async fn lock_for(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.0.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn session_path(&self, key: &SessionKey) -> PathBuf {
        self.dir.join(format!("{}.jsonl", file_stem(key.as_str())))
    }

    fn read_messages(path: &PathBuf, key: &SessionKey) -> Vec<Message> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Vec::new(), // No record yet — created on first append
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<Message>(line) {
                Ok(msg) => Some(msg),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping corrupted session record line");
                    None
                }
            })
            .collect()
    }
}

/// Map a session key to a filesystem-safe file stem.
///
/// Keys come from operator display names, so anything path-hostile
/// (separators, dots, whitespace) is replaced.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn load(&self, key: &SessionKey) -> Result<Vec<Message>, SessionError> {
        let lock = self.lock_for(key).await;
        let _guard = lock.lock().await;

        let path = self.session_path(key);
        Ok(Self::read_messages(&path, key))
    }

    async fn append(&self, key: &SessionKey, message: &Message) -> Result<(), SessionError> {
        let lock = self.lock_for(key).await;
        let _guard = lock.lock().await;

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SessionError::Storage(format!("Failed to create session directory: {e}"))
        })?;

        let line = serde_json::to_string(message)
            .map_err(|e| SessionError::Storage(format!("Failed to serialize message: {e}")))?;

        let path = self.session_path(key);
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SessionError::Storage(format!("Failed to open session file: {e}")))?;

        // Single write call keeps the line intact even under interleaving;
        // sync_all makes it durable before we acknowledge.
        writeln!(file, "{line}")
            .map_err(|e| SessionError::Storage(format!("Failed to append message: {e}")))?;
        file.sync_all()
            .map_err(|e| SessionError::Storage(format!("Failed to sync session file: {e}")))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<SessionKey>, SessionError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(_) => return Ok(Vec::new()), // Directory not created yet
        };

        let mut keys: Vec<SessionKey> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|ext| ext.to_str()) == Some("jsonl"))
            .filter_map(|p| {
                p.file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| SessionKey(s.to_string()))
            })
            .collect();

        keys.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn store() -> (tempfile::TempDir, FileSessionStore) {
        let tmp = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(tmp.path().to_path_buf());
        (tmp, store)
    }

    #[tokio::test]
    async fn load_unknown_session_is_empty() {
        let (_tmp, store) = store();
        let key = SessionKey::from_display_name("Nobody");
        assert!(store.load(&key).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_then_load_preserves_order() {
        let (_tmp, store) = store();
        let key = SessionKey::from_display_name("Maria");

        store.append(&key, &Message::user("first")).await.unwrap();
        store
            .append(&key, &Message::assistant("second"))
            .await
            .unwrap();
        store.append(&key, &Message::user("third")).await.unwrap();

        let messages = store.load(&key).await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "first");
        assert_eq!(messages[1].content, "second");
        assert_eq!(messages[2].content, "third");
    }

    #[tokio::test]
    async fn survives_reload_from_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let key = SessionKey::from_display_name("Ana");

        {
            let store = FileSessionStore::new(tmp.path().to_path_buf());
            store.append(&key, &Message::user("remember me")).await.unwrap();
        }

        // A fresh store over the same directory simulates a process restart
        let store = FileSessionStore::new(tmp.path().to_path_buf());
        let messages = store.load(&key).await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "remember me");
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let (_tmp, store) = store();
        let maria = SessionKey::from_display_name("Maria");
        let bob = SessionKey::from_display_name("Bob");

        store.append(&maria, &Message::user("hola")).await.unwrap();
        store.append(&bob, &Message::user("hello")).await.unwrap();

        assert_eq!(store.load(&maria).await.unwrap().len(), 1);
        assert_eq!(store.load(&bob).await.unwrap().len(), 1);
        assert_eq!(store.load(&maria).await.unwrap()[0].content, "hola");
    }

    #[tokio::test]
    async fn list_returns_sorted_keys() {
        let (_tmp, store) = store();
        store
            .append(&SessionKey::from_display_name("zoe"), &Message::user("hi"))
            .await
            .unwrap();
        store
            .append(&SessionKey::from_display_name("ana"), &Message::user("hi"))
            .await
            .unwrap();

        let keys = store.list().await.unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].0, "ana");
        assert_eq!(keys[1].0, "zoe");
    }

    #[tokio::test]
    async fn skips_corrupted_lines() {
        let (tmp, store) = store();
        let key = SessionKey::from_display_name("Maria");
        store.append(&key, &Message::user("valid")).await.unwrap();

        // Corrupt the log by hand
        let path = tmp.path().join("maria.jsonl");
        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "this is not json").unwrap();
        drop(file);
        store.append(&key, &Message::user("also valid")).await.unwrap();

        let messages = store.load(&key).await.unwrap();
        assert_eq!(messages.len(), 2);
    }

    #[tokio::test]
    async fn count_matches_appends() {
        let (_tmp, store) = store();
        let key = SessionKey::from_display_name("Maria");
        for i in 0..4 {
            store.append(&key, &Message::user(format!("m{i}"))).await.unwrap();
        }
        assert_eq!(store.count(&key).await.unwrap(), 4);
    }

    #[test]
    fn file_stem_sanitizes_hostile_keys() {
        assert_eq!(file_stem("maria"), "maria");
        assert_eq!(file_stem("../etc/passwd"), "___etc_passwd");
        assert_eq!(file_stem("ana lópez"), "ana_lópez");
    }
}
