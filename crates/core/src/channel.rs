//! Channel trait — the abstraction over operator surfaces.
//!
//! A Channel connects deskhand to wherever the operator types: today that is
//! the CLI. It receives free-text input and sends answers back.

use crate::error::ChannelError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A message received from an operator surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMessage {
    /// Which channel produced this message (e.g., "cli")
    pub channel: String,

    /// Human-readable sender display name
    pub sender_name: String,

    /// The text content
    pub content: String,
}

/// The core Channel trait.
///
/// Implementations handle surface-specific input/output; the designated exit
/// command ends the stream.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name (e.g., "cli").
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    ///
    /// Returns a receiver that yields incoming messages. The stream ends
    /// when the operator issues the exit command or input closes.
    async fn start(
        &self,
    ) -> std::result::Result<
        tokio::sync::mpsc::Receiver<std::result::Result<ChannelMessage, ChannelError>>,
        ChannelError,
    >;

    /// Send a response back to the operator.
    async fn send(&self, content: &str) -> std::result::Result<(), ChannelError>;
}
