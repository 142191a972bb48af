//! Glance CLI - ask a hosted multimodal model questions about an image.
//!
//! # Usage
//!
//! ```bash
//! # Interactive session
//! glance
//!
//! # One-shot question
//! glance ask photo.jpg --question "What's in this image?"
//!
//! # Use a suggested question (see `glance prompts`)
//! glance ask photo.png --prompt 3 --format json
//!
//! # View configuration
//! glance config show
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;
use std::process::ExitCode;

mod cli;
mod logging;

/// Glance - ask questions about images.
#[derive(Parser, Debug)]
#[command(name = "glance")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask one question about one image
    Ask(cli::ask::AskArgs),

    /// List the suggested questions
    Prompts,

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Local development keeps GOOGLE_API_KEY in .env; a missing file is normal.
    let dotenv = dotenvy::dotenv();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match glance_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `glance config path`."
            );
            glance_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Glance v{}", glance_core::VERSION);
    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    match cli.command {
        Some(Commands::Ask(args)) => cli::ask::execute(&config, args).await,
        Some(Commands::Prompts) => cli::prompts::execute(),
        Some(Commands::Config(args)) => cli::config::execute(args),
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(ExitCode::FAILURE)
        }
    }
}
