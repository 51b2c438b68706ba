//! Huru Dialer - support call dashboard
//!
//! Places outbound calls through the calling backend, tracks their status,
//! and shows recent calls with times in IST.

mod api;
mod config;
mod dashboard;
mod models;
mod session;
mod timezone;
mod tui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::Config;
use tui::log_capture::LogBuffer;

#[derive(Parser)]
#[command(name = "huru-dialer")]
#[command(about = "Terminal dashboard for placing and tracking support calls", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the dashboard (default)
    Tui,

    /// Start a call to a number
    Dial {
        /// Receiver number including country code, e.g. +919876543210
        to_number: String,
    },

    /// Show the status of a call
    Status {
        /// Call ID returned by `dial`
        call_sid: String,
    },

    /// List recent calls
    Calls {
        /// Maximum number of calls to show (defaults to history_limit)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show config file location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    // In TUI mode logs go to the in-app debug pane, never the terminal.
    let log_buffer = matches!(command, Commands::Tui).then(LogBuffer::new);
    match &log_buffer {
        Some(buffer) => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(buffer.clone()),
            )
            .init(),
        None => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }

    match command {
        Commands::Tui => {
            let config = Config::load()?;
            tui::run(config, log_buffer.unwrap_or_default()).await?;
        }
        Commands::Dial { to_number } => {
            tracing::info!("Dialing {}...", to_number);
            api::dial(&to_number).await?;
        }
        Commands::Status { call_sid } => {
            api::show_status(&call_sid).await?;
        }
        Commands::Calls { limit } => {
            tracing::info!("Fetching recent calls...");
            api::list_calls(limit).await?;
        }
        Commands::Config => {
            show_config()?;
        }
    }

    Ok(())
}

fn show_config() -> Result<()> {
    let config = Config::load()?;
    println!("Config file:   {}", Config::config_path()?.display());
    println!("Base URL:      {}", config.base_url);
    println!("Username:      {}", config.username);
    println!("Password:      {}", config.masked_password());
    println!("Company:       {}", config.company);
    println!("History limit: {}", config.history_limit);
    println!("Timeout:       {}s", config.timeout_secs);
    Ok(())
}
