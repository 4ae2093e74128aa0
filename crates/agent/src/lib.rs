//! The core agent loop — the heart of deskhand.
//!
//! The agent follows a **Reason → Act → Observe** cycle:
//!
//! 1. **Receive** a user message from the operator surface
//! 2. **Build context** (system prompt + persisted history + working sequence)
//! 3. **Send to the model** via the configured provider
//! 4. **If tool calls**: enrich arguments, execute in order, fold the results
//!    back in, loop to step 3
//! 5. **If a text response**: persist it and return the answer
//!
//! The loop continues until the model responds with text only (no tool calls)
//! or the turn budget is exhausted.

pub mod enrich;
pub mod loop_runner;

pub use enrich::enrich_user_args;
pub use loop_runner::{AgentLoop, TurnOutcome};
