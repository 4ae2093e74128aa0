//! # Deskhand Core
//!
//! Domain types, traits, and error definitions for the deskhand helpdesk
//! agent runtime. This crate has **zero framework dependencies** — it defines
//! the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod channel;
pub mod error;
pub mod event;
pub mod identity;
pub mod message;
pub mod provider;
pub mod session;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use channel::{Channel, ChannelMessage};
pub use error::{Error, Result};
pub use event::{DomainEvent, EventBus};
pub use identity::Identity;
pub use message::{Message, Role, SessionKey};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ToolDefinition};
pub use session::SessionStore;
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult};
