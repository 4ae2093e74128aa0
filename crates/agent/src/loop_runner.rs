//! The agent reasoning loop implementation.

use crate::enrich::enrich_user_args;
use deskhand_core::error::ToolError;
use deskhand_core::event::{DomainEvent, EventBus};
use deskhand_core::identity::Identity;
use deskhand_core::message::{Message, SessionKey};
use deskhand_core::provider::{Provider, ProviderRequest, RAW_CONTENT_KEY};
use deskhand_core::session::SessionStore;
use deskhand_core::tool::{Tool, ToolCall, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a completed turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model produced a final textual answer.
    Answered(String),

    /// The turn budget ran out before the model produced a terminal
    /// response. Expected condition, reported distinctly from failures.
    BudgetExhausted,
}

/// The core agent loop that orchestrates model calls and tool execution.
///
/// One instance serves one session at a time; all state between turns lives
/// in the session store, which the loop only ever appends to.
pub struct AgentLoop {
    /// The LLM provider to use
    provider: Arc<dyn Provider>,

    /// The model to use
    model: String,

    /// Temperature setting
    temperature: f32,

    /// Default max tokens per response
    max_tokens: Option<u32>,

    /// Tool registry
    tools: Arc<ToolRegistry>,

    /// Durable conversation storage
    store: Arc<dyn SessionStore>,

    /// Assistant identity (system prompt)
    identity: Identity,

    /// Maximum model↔tool round-trips per user turn
    turn_budget: u32,

    /// Event bus for domain events
    event_bus: Arc<EventBus>,
}

impl AgentLoop {
    /// Create a new agent loop.
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        temperature: f32,
        tools: Arc<ToolRegistry>,
        store: Arc<dyn SessionStore>,
        identity: Identity,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
            max_tokens: None,
            tools,
            store,
            identity,
            turn_budget: 5,
            event_bus,
        }
    }

    /// Set the maximum number of model↔tool round-trips per turn.
    pub fn with_turn_budget(mut self, budget: u32) -> Self {
        self.turn_budget = budget;
        self
    }

    /// Set the default max tokens per model response.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Process one operator input and run the turn to completion.
    ///
    /// This is the main entry point for the agent loop. It:
    /// 1. Loads persisted history, seeding a first-contact introduction
    /// 2. Persists the user message
    /// 3. Calls the model; if tool calls come back, dispatches them in order
    ///    and folds the results in, up to the turn budget
    /// 4. Returns the final answer or the budget-exhausted outcome
    ///
    /// Provider and storage failures abort the turn with an error; tool-level
    /// problems are converted into failure results and fed back to the model.
    pub async fn run_turn(
        &self,
        key: &SessionKey,
        display_name: &str,
        input: &str,
    ) -> Result<TurnOutcome, deskhand_core::Error> {
        let mut history = self.store.load(key).await?;

        // First contact: seed the durable record with an introduction so the
        // model has identity context across process restarts without re-asking.
        if history.is_empty() {
            let intro = Message::introduction(display_name);
            self.store.append(key, &intro).await?;
            info!(session = %key, "Seeded new session with introduction");
            history.push(intro);
        }

        let user_msg = Message::user_named(input, display_name);
        self.store.append(key, &user_msg).await?;

        self.event_bus.publish(DomainEvent::MessageReceived {
            session_key: key.to_string(),
            content_preview: preview(input),
            timestamp: chrono::Utc::now(),
        });

        info!(
            session = %key,
            history = history.len(),
            "Processing turn"
        );

        // The working sequence for this turn. History stays untouched; new
        // messages are appended both here and to the store as they finalize.
        let mut working: Vec<Message> = vec![user_msg];

        let tool_definitions = self.tools.definitions();
        // Per-turn counter for synthesized correlation ids.
        let mut synthesized_ids: u32 = 0;

        for round in 1..=self.turn_budget {
            debug!(session = %key, round, "Agent loop round");

            let mut messages: Vec<Message> =
                Vec::with_capacity(1 + history.len() + working.len());
            messages.push(Message::system(&self.identity.system_prompt));
            messages.extend(history.iter().cloned());
            messages.extend(working.iter().cloned());

            let request = ProviderRequest {
                model: self.model.clone(),
                messages,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
                tools: tool_definitions.clone(),
            };

            // The loop does not retry failed model calls: transport errors
            // are turn-fatal and the session keeps everything persisted so
            // far (through the user message and completed rounds).
            let response = match self.provider.complete(request).await {
                Ok(r) => r,
                Err(e) => {
                    self.event_bus.publish(DomainEvent::TurnFailed {
                        session_key: key.to_string(),
                        error_message: e.to_string(),
                        timestamp: chrono::Utc::now(),
                    });
                    return Err(e.into());
                }
            };

            if let Some(usage) = &response.usage {
                self.event_bus.publish(DomainEvent::ResponseGenerated {
                    session_key: key.to_string(),
                    model: response.model.clone(),
                    tokens_used: usage.total_tokens,
                    timestamp: chrono::Utc::now(),
                });
            }

            let mut assistant = response.message;

            if assistant.tool_calls.is_empty() {
                // Terminal success path: extract and present the answer.
                let answer = extract_answer(&assistant);
                self.store.append(key, &assistant).await?;
                return Ok(TurnOutcome::Answered(answer));
            }

            // Normalize correlation ids before the assistant message is
            // persisted, so every tool result below matches exactly one
            // pending call in the preceding assistant message.
            for tc in &mut assistant.tool_calls {
                if tc.id.is_empty() {
                    synthesized_ids += 1;
                    tc.id = format!("call_{}_{}", tc.name, synthesized_ids);
                }
            }

            debug!(
                session = %key,
                tool_count = assistant.tool_calls.len(),
                "Dispatching tool calls"
            );

            let tool_calls = assistant.tool_calls.clone();
            self.store.append(key, &assistant).await?;
            working.push(assistant);

            // Dispatch in the order the model emitted the calls. All results
            // of this round are collected before any of them is folded in,
            // so the model never sees a partially-folded round.
            let mut results: Vec<Message> = Vec::with_capacity(tool_calls.len());
            for tc in &tool_calls {
                let output = self.dispatch(tc, display_name).await;
                results.push(Message::tool_result(&tc.id, &output));
            }

            for msg in &results {
                self.store.append(key, msg).await?;
            }
            working.extend(results);
        }

        warn!(
            session = %key,
            budget = self.turn_budget,
            "Turn budget exhausted without a terminal response"
        );
        Ok(TurnOutcome::BudgetExhausted)
    }

    /// Execute one tool call and render its outcome as observation text.
    ///
    /// This is the single catch boundary for dispatch: unknown actions and
    /// handler failures come back as descriptive strings, never as errors.
    async fn dispatch(&self, tc: &deskhand_core::message::MessageToolCall, display_name: &str) -> String {
        let raw_args: serde_json::Value =
            serde_json::from_str(&tc.arguments).unwrap_or_default();

        // Enrich only for tools that declare a user identity parameter.
        let arguments = match self.tools.get(&tc.name) {
            Some(tool) if !tool.identity_params().is_empty() => {
                enrich_user_args(raw_args, display_name)
            }
            _ => raw_args,
        };

        let call = ToolCall {
            id: tc.id.clone(),
            name: tc.name.clone(),
            arguments,
        };

        let start = std::time::Instant::now();
        let result = self.tools.execute(&call).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(tool_result) => {
                self.event_bus.publish(DomainEvent::ToolExecuted {
                    tool_name: tc.name.clone(),
                    success: tool_result.success,
                    duration_ms,
                    timestamp: chrono::Utc::now(),
                });
                tool_result.output
            }
            Err(ToolError::NotFound(name)) => {
                warn!(tool = %name, "Model requested an unregistered tool");
                self.event_bus.publish(DomainEvent::ToolExecuted {
                    tool_name: tc.name.clone(),
                    success: false,
                    duration_ms,
                    timestamp: chrono::Utc::now(),
                });
                format!("The tool '{name}' is not available.")
            }
            Err(e) => {
                warn!(tool = %tc.name, error = %e, "Tool execution failed");
                self.event_bus.publish(DomainEvent::ToolExecuted {
                    tool_name: tc.name.clone(),
                    success: false,
                    duration_ms,
                    timestamp: chrono::Utc::now(),
                });
                format!("Error executing {}: {e}", tc.name)
            }
        }
    }
}

/// Extract the presentable answer from a terminal assistant message.
///
/// Falls back to the raw response content recorded by the provider when
/// structured text extraction produced nothing.
fn extract_answer(message: &Message) -> String {
    if !message.content.trim().is_empty() {
        return message.content.clone();
    }

    if let Some(raw) = message.metadata.get(RAW_CONTENT_KEY) {
        warn!("Structured text extraction failed, presenting raw response content");
        return match raw {
            serde_json::Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        };
    }

    warn!("Model returned an empty response");
    String::new()
}

/// Shorten operator input for event payloads.
fn preview(input: &str) -> String {
    const MAX: usize = 80;
    if input.chars().count() <= MAX {
        input.to_string()
    } else {
        let truncated: String = input.chars().take(MAX).collect();
        format!("{truncated}…")
    }
}
