//! CLI channel — interactive terminal-based chat.
//!
//! This is the simplest surface: reads from stdin, writes to stdout.
//! Used for `deskhand chat` interactive mode.

use async_trait::async_trait;
use deskhand_core::channel::{Channel, ChannelMessage};
use deskhand_core::error::ChannelError;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Interactive CLI channel for terminal-based chat.
///
/// Carries the operator's display name on every message so downstream
/// consumers know who is talking without re-asking.
pub struct CliChannel {
    display_name: String,
}

impl CliChannel {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    /// Commands that end the interactive session.
    pub fn is_exit_command(line: &str) -> bool {
        matches!(line, "exit" | "quit" | "/exit" | "/quit" | ":q")
    }
}

#[async_trait]
impl Channel for CliChannel {
    fn name(&self) -> &str {
        "cli"
    }

    async fn start(
        &self,
    ) -> Result<mpsc::Receiver<Result<ChannelMessage, ChannelError>>, ChannelError> {
        let (tx, rx) = mpsc::channel(32);
        let display_name = self.display_name.clone();

        tokio::spawn(async move {
            let stdin = io::stdin();
            let reader = BufReader::new(stdin);
            let mut lines = reader.lines();

            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let line = line.trim().to_string();
                        if line.is_empty() {
                            continue;
                        }

                        if CliChannel::is_exit_command(&line) {
                            break;
                        }

                        let msg = ChannelMessage {
                            channel: "cli".into(),
                            sender_name: display_name.clone(),
                            content: line,
                        };

                        if tx.send(Ok(msg)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break, // EOF (Ctrl+D)
                    Err(e) => {
                        let _ = tx
                            .send(Err(ChannelError::ConnectionLost(e.to_string())))
                            .await;
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, content: &str) -> Result<(), ChannelError> {
        println!("{content}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_channel_properties() {
        let ch = CliChannel::new("Maria");
        assert_eq!(ch.name(), "cli");
        assert_eq!(ch.display_name, "Maria");
    }

    #[test]
    fn exit_commands_recognized() {
        for cmd in ["exit", "quit", "/exit", "/quit", ":q"] {
            assert!(CliChannel::is_exit_command(cmd));
        }
        assert!(!CliChannel::is_exit_command("exist"));
        assert!(!CliChannel::is_exit_command("hello"));
    }
}
