//! `deskhand sessions` — Inspect persisted conversations.

use deskhand_config::AppConfig;
use deskhand_core::message::{Role, SessionKey};
use deskhand_core::session::SessionStore;
use deskhand_session::FileSessionStore;

pub async fn run(show: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let store = FileSessionStore::new(config.sessions_dir());

    match show {
        Some(key) => transcript(&store, &key).await,
        None => list(&store).await,
    }
}

async fn list(store: &FileSessionStore) -> Result<(), Box<dyn std::error::Error>> {
    let keys = store.list().await?;

    println!("💬 Persisted Sessions");
    println!("=====================");
    if keys.is_empty() {
        println!("   (none yet — run `deskhand chat` to start one)");
        return Ok(());
    }

    for key in keys {
        let count = store.count(&key).await?;
        println!("  {key:<24} {count} message(s)");
    }

    Ok(())
}

async fn transcript(
    store: &FileSessionStore,
    key: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = SessionKey::from_display_name(key);
    let messages = store.load(&key).await?;

    if messages.is_empty() {
        println!("No session found for '{key}'.");
        return Ok(());
    }

    println!("💬 Session '{key}' — {} message(s)", messages.len());
    println!("==========================================");

    for msg in &messages {
        let who = match msg.role {
            Role::User => msg.sender_name.as_deref().unwrap_or("user"),
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
        };
        let tag = match &msg.tool_call_id {
            Some(id) => format!(" [{id}]"),
            None => String::new(),
        };
        println!("  {who}{tag}:");
        for line in msg.content.lines() {
            println!("    {line}");
        }
        for tc in &msg.tool_calls {
            println!("    → {}({}) [{}]", tc.name, tc.arguments, tc.id);
        }
    }

    Ok(())
}
