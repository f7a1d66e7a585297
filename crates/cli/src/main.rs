//! Helpdesk CLI
//!
//! Main entry point for the helpdesk command-line tool. Exercises the
//! vector knowledge base and the simulated ITSM ticket tools.

mod commands;

use clap::{Parser, Subcommand};
use commands::{KbCommand, TicketCommand, UserCommand};
use helpdesk_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Helpdesk CLI - ITSM knowledge base and ticket tooling
#[derive(Parser, Debug)]
#[command(name = "helpdesk")]
#[command(about = "ITSM knowledge base and ticket tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "HELPDESK_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Embedding provider (mock, gemini)
    #[arg(short, long, global = true, env = "HELPDESK_PROVIDER")]
    provider: Option<String>,

    /// Embedding model identifier
    #[arg(short, long, global = true, env = "HELPDESK_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Knowledge base operations
    Kb(KbCommand),

    /// Ticket operations (simulated ServiceNow)
    Ticket(TicketCommand),

    /// User session state
    User(UserCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    let config = config.with_overrides(
        cli.workspace,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);

    config.validate()?;
    config.ensure_helpdesk_dir()?;

    let command_name = match &cli.command {
        Commands::Kb(_) => "kb",
        Commands::Ticket(_) => "ticket",
        Commands::User(_) => "user",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Kb(cmd) => cmd.execute(&config).await,
        Commands::Ticket(cmd) => cmd.execute(&config),
        Commands::User(cmd) => cmd.execute(&config),
    };

    match &result {
        Ok(_) => tracing::debug!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
