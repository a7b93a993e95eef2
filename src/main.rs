//! Reminder MCP Server - Main Entry Point
//!
//! The implementation lives in the `reminder_mcp` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use reminder_mcp::{
    DEFAULT_RETENTION_WORKDAYS, DEFAULT_WALK_CEILING, EngineSettings, ReminderServerHandler,
};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "REMINDER_MCP_LOG";

/// Reminder MCP Server - due-date reminders with a holiday calendar via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the reminder data file
    file: String,

    /// Enable git synchronization on save
    #[arg(long)]
    sync_git: bool,

    /// Maximum number of days to search backwards for a workday
    #[arg(long, env = "REMINDER_MCP_WALK_CEILING", default_value_t = DEFAULT_WALK_CEILING)]
    walk_ceiling: u32,

    /// Workdays a completed task is kept before cleanup removes it
    #[arg(long, env = "REMINDER_MCP_RETENTION_WORKDAYS", default_value_t = DEFAULT_RETENTION_WORKDAYS)]
    retention_workdays: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // No arguments: show help and exit with an error code
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();

    // stdout carries the MCP protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| EnvFilter::new("reminder_mcp=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let settings = EngineSettings {
        walk_ceiling: args.walk_ceiling.max(1),
        retention_workdays: args.retention_workdays,
    };
    tracing::info!(file = %args.file, sync_git = args.sync_git, ?settings, "starting reminder MCP server");

    let handler = ReminderServerHandler::new(&args.file, args.sync_git, settings)?;
    serve_stdio(handler).await?;
    Ok(())
}
