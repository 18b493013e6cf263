//! Turno maintenance binary - composition root.
//!
//! Loads configuration from TOML, opens the SQLite session store and runs
//! one operator command: `stats`, `purge` (the retention sweep) or `fact`.
//! The conversational surface itself is embedded by the host application
//! through `turno-chat`; this binary only covers store upkeep.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use turno_core::{format_date, TurnoConfig};
use turno_storage::{Database, FactRepository, MessageRepository, SessionRepository};

mod cli;

use cli::{CliArgs, Command, FactCommand};

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = TurnoConfig::load_or_default(&config_file);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Turno v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    let db_path = data_dir.join("turno.db");
    let db = Arc::new(Database::new(&db_path)?);
    tracing::info!(path = %db_path.display(), "SQLite database opened");

    let sessions = SessionRepository::new(db.clone());
    let messages = MessageRepository::new(db.clone());
    let facts = FactRepository::new(db);

    match args.command.unwrap_or(Command::Stats) {
        Command::Stats => {
            println!("sessions: {}", sessions.count()?);
            println!("messages: {}", messages.count_all()?);
            println!("facts:    {}", facts.count()?);
        }
        Command::Purge { days } => {
            let days = days.unwrap_or(config.chat.retention_days);
            let cutoff = chrono::Utc::now() - chrono::Duration::days(i64::from(days));
            let removed = sessions.purge_older_than(cutoff)?;
            tracing::info!(days, removed, "Retention sweep finished");
            println!(
                "removed {} session(s) idle since {}",
                removed,
                format_date(cutoff.date_naive())
            );
        }
        Command::Fact { command } => match command {
            FactCommand::Add { text } => {
                let fact = facts.add(text.trim())?;
                println!("stored fact #{}", fact.id);
            }
            FactCommand::List => {
                let all = facts.list()?;
                if all.is_empty() {
                    println!("no facts stored");
                }
                for fact in all {
                    println!(
                        "#{} [{}] {}",
                        fact.id,
                        format_date(fact.created_at.date_naive()),
                        fact.fact
                    );
                }
            }
        },
    }

    Ok(())
}
