//! `deskhand chat` — Interactive or single-message helpdesk mode.

use deskhand_agent::{AgentLoop, TurnOutcome};
use deskhand_channels::CliChannel;
use deskhand_config::AppConfig;
use deskhand_core::channel::Channel;
use deskhand_core::event::EventBus;
use deskhand_core::identity::{Identity, IdentityPaths};
use deskhand_core::message::SessionKey;
use deskhand_core::session::SessionStore;
use deskhand_session::{FileSessionStore, InMemorySessionStore};
use std::io::Write;
use std::sync::Arc;

pub async fn run(
    name: Option<String>,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early — give a clear error
    if config.api_key.is_none() && config.providers.is_empty() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    DESKHAND_API_KEY   (generic)");
        eprintln!("    GOOGLE_API_KEY     (for Gemini, the default provider)");
        eprintln!("    OPENROUTER_API_KEY / OPENAI_API_KEY / ANTHROPIC_API_KEY");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    // --- Operator identification ---
    let raw_name = match name {
        Some(n) => n,
        None => prompt_for_name()?,
    };
    let display_name = normalize_display_name(&raw_name);
    let session_key = SessionKey::from_display_name(&display_name);

    // --- Identity / system prompt ---
    let identity = Identity::load(&IdentityPaths {
        prompt_file: config.prompt_file(),
        system_prompt_override: config.identity.system_prompt_override.clone(),
    });

    // --- Provider ---
    let router = deskhand_providers::router::build_from_config(&config);
    let provider = router.default().ok_or("No default provider configured")?;

    // --- Session store ---
    let store: Arc<dyn SessionStore> = match config.sessions.backend.as_str() {
        "in_memory" => Arc::new(InMemorySessionStore::new()),
        _ => Arc::new(FileSessionStore::new(config.sessions_dir())),
    };

    // --- Tools & agent ---
    let tools = Arc::new(deskhand_tools::default_registry());
    let event_bus = Arc::new(EventBus::default());
    let agent = AgentLoop::new(
        provider,
        &config.default_model,
        config.default_temperature,
        tools,
        store,
        identity,
        event_bus,
    )
    .with_turn_budget(config.turn_budget)
    .with_max_tokens(config.default_max_tokens);

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let outcome = agent.run_turn(&session_key, &display_name, &msg).await?;
        eprint!("\r              \r");
        match outcome {
            TurnOutcome::Answered(answer) => println!("{answer}"),
            TurnOutcome::BudgetExhausted => {
                eprintln!("  [Warning] Reached the tool-call limit for this turn.");
            }
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║      deskhand — HR/IT Helpdesk Assistant      ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", config.default_model);
    println!("  Session:   {session_key}");
    println!();
    println!("  Type your question and press Enter.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();

    let channel = CliChannel::new(&display_name);
    let mut rx = channel
        .start()
        .await
        .map_err(|e| format!("Channel error: {e}"))?;

    print!("  What can I help you with today, {display_name}? > ");
    std::io::stdout().flush()?;

    while let Some(result) = rx.recv().await {
        match result {
            Ok(chan_msg) => {
                eprint!("  ...");

                // A single bad turn must never terminate the session: every
                // outcome, including errors, returns us to the prompt.
                match agent
                    .run_turn(&session_key, &display_name, &chan_msg.content)
                    .await
                {
                    Ok(TurnOutcome::Answered(answer)) => {
                        eprint!("\r     \r");
                        println!();
                        for line in answer.lines() {
                            println!("  Assistant > {line}");
                        }
                        println!();
                    }
                    Ok(TurnOutcome::BudgetExhausted) => {
                        eprint!("\r     \r");
                        println!();
                        println!("  [Warning] Reached the tool-call limit for this turn.");
                        println!();
                    }
                    Err(e) => {
                        eprint!("\r     \r");
                        eprintln!("  [Error] {e}");
                        println!();
                    }
                }

                print!("  {display_name} > ");
                std::io::stdout().flush()?;
            }
            Err(e) => {
                eprintln!("  [Channel Error] {e}");
                break;
            }
        }
    }

    println!();
    println!("  Goodbye, {display_name}! Thanks for using the helpdesk assistant.");
    println!();

    Ok(())
}

/// Ask the operator for their name on stdin.
fn prompt_for_name() -> Result<String, Box<dyn std::error::Error>> {
    print!("Please enter your name: ");
    std::io::stdout().flush()?;
    let mut raw = String::new();
    std::io::stdin().read_line(&mut raw)?;
    Ok(raw)
}

/// Title-case the operator's name for presentation; blank input falls back
/// to a default.
fn normalize_display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "User".into();
    }

    trimmed
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
