//! API client module for the calling backend

pub mod client;
mod error;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::config::Config;
use crate::dashboard::CallRow;
use crate::models::CallRecord;

pub use client::DialerClient;
pub use error::{ApiError, Operation};

/// The three backend operations the dashboard depends on.
#[async_trait]
pub trait CallApi {
    /// Start an outbound call and return its SID.
    async fn start_call(&self, to_number: &str, company: &str) -> Result<String, ApiError>;

    /// Current status of a call.
    async fn call_status(&self, call_sid: &str) -> Result<String, ApiError>;

    /// Most recent calls, newest first as ordered by the backend, at most `limit`.
    async fn recent_calls(&self, limit: usize) -> Result<Vec<CallRecord>, ApiError>;
}

fn connect() -> Result<(Config, DialerClient)> {
    let config = Config::load()?;
    if let Some(warning) = config.credentials_warning() {
        tracing::warn!("{}", warning);
    }
    let client = DialerClient::new(&config)?;
    Ok((config, client))
}

/// Start a call and print its SID.
pub async fn dial(to_number: &str) -> Result<()> {
    let (config, client) = connect()?;
    let sid = client
        .start_call(to_number, &config.company)
        .await
        .context("Failed to start the call")?;

    println!("Call initiated successfully.");
    println!("  Call ID: {}", sid);
    Ok(())
}

/// Print the status of one call.
pub async fn show_status(call_sid: &str) -> Result<()> {
    let (_, client) = connect()?;
    let status = client
        .call_status(call_sid)
        .await
        .context("Failed to retrieve call status")?;

    println!("Status: {}", status);
    if crate::models::is_terminal_status(&status) {
        println!("Call has ended.");
    }
    Ok(())
}

/// Print the recent calls table.
pub async fn list_calls(limit: Option<usize>) -> Result<()> {
    let (config, client) = connect()?;
    let limit = limit.unwrap_or(config.history_limit);
    let calls = client
        .recent_calls(limit)
        .await
        .context("Failed to retrieve recent calls")?;

    println!("\nRecent Calls:");
    println!("{:-<118}", "");

    if calls.is_empty() {
        println!("  (no calls found)");
        return Ok(());
    }

    println!(
        "{:<16} {:<20} {:<20} {:>12}  {:<12} {}",
        CallRow::HEADERS[0],
        CallRow::HEADERS[1],
        CallRow::HEADERS[2],
        CallRow::HEADERS[3],
        CallRow::HEADERS[4],
        CallRow::HEADERS[5],
    );
    for row in calls.iter().map(CallRow::from_record) {
        println!(
            "{:<16} {:<20} {:<20} {:>12}  {:<12} {}",
            row.receiver, row.start_time, row.end_time, row.duration, row.status, row.call_id
        );
    }

    Ok(())
}
