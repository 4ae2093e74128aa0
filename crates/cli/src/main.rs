//! deskhand CLI — the main entry point.
//!
//! Commands:
//! - `onboard`  — Initialize config and session storage
//! - `chat`     — Interactive helpdesk chat or single-message mode
//! - `sessions` — List or show persisted conversations
//! - `doctor`   — Diagnose system health

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "deskhand",
    about = "deskhand — HR/IT helpdesk agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration and session storage
    Onboard,

    /// Chat with the helpdesk agent
    Chat {
        /// Your display name (prompted for if omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// List or show persisted sessions
    Sessions {
        /// Show the transcript for one session key
        #[arg(long)]
        show: Option<String>,
    },

    /// Diagnose system health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Chat { name, message } => commands::chat::run(name, message).await?,
        Commands::Sessions { show } => commands::sessions::run(show).await?,
        Commands::Doctor => commands::doctor::run().await?,
    }

    Ok(())
}
