//! CLI module for Switchyard
//!
//! - `serve`: start the HTTP server
//! - `classify`: show which role a request would be routed to
//! - `providers`: list live and simulated providers for the current environment

use clap::{Parser, Subcommand};
use switchyard_llm::{ImageBackend, Mode, TaskKind};

pub mod classify;
pub mod providers;

/// Switchyard task router CLI
#[derive(Parser, Debug)]
#[command(name = "switchyard")]
#[command(about = "Task-based inference request router")]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Serve,
    /// Classify a request without invoking any provider
    Classify {
        /// Task kind (code, reasoning_long, reasoning_cost_sensitive, chat_general, image_generate)
        #[arg(long)]
        task: TaskKind,
        /// Estimated token count
        #[arg(long)]
        tokens: Option<u64>,
        /// Reasoning mode (think, fast)
        #[arg(long)]
        mode: Option<Mode>,
        /// Image backend (vertex, stability, openai)
        #[arg(long)]
        image_provider: Option<ImageBackend>,
    },
    /// List configured providers
    Providers,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Serve) => crate::server::run().await,
        Some(Commands::Classify {
            task,
            tokens,
            mode,
            image_provider,
        }) => classify::run(task, tokens, mode, image_provider),
        Some(Commands::Providers) => providers::run(),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
