//! attnlog CLI - attention observation logger
//!
//! # Configuration
//!
//! Configuration is loaded from multiple sources with priority:
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ATTNLOG_*`)
//! 3. Config file (`<config_dir>/attnlog/config.toml`, or `--config`)
//! 4. Default values (lowest priority)
//!
//! Every invocation is a fresh process. The identity and the active session
//! are restored from the store on startup, so `attnlog session select L1`
//! followed by `attnlog log attentive` logs into `L1`.

mod commands;
mod prompt;
mod runtime;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use runtime::Runtime;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// attnlog - log attentive / bored observations per student and session
#[derive(Parser, Debug)]
#[command(name = "attnlog")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file path (must exist when given)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the store document (also: ATTNLOG_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory exports are written to (also: ATTNLOG_EXPORT_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// History cap per log list (also: ATTNLOG_MAX_ENTRIES)
    #[arg(long, global = true, value_name = "N")]
    max_entries: Option<usize>,

    /// Log per student without sessions (also: ATTNLOG_SCOPE=session_less)
    #[arg(long, global = true)]
    session_less: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show identity, active session and log counts
    Status {
        /// Print the full snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the student identity
    Identity {
        #[command(subcommand)]
        action: IdentityAction,
    },
    /// Manage sessions of the current student
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Record an observation now
    Log {
        #[arg(value_enum)]
        kind: LogKind,
    },
    /// Remove the most recent observation across both lists
    Undo,
    /// Export logs to CSV
    Export {
        /// Export a single session
        #[arg(long, conflicts_with = "all")]
        session: Option<String>,

        /// Export every session of the student
        #[arg(long)]
        all: bool,
    },
    /// Delete the student identity with all sessions and logs
    Reset,
}

#[derive(Subcommand, Debug)]
enum IdentityAction {
    /// Set the student ID
    Set { id: String },
}

#[derive(Subcommand, Debug)]
enum SessionAction {
    /// Create a session, or refresh an existing one, and make it active
    Select { id: String },
    /// Activate an existing session without refreshing it
    Open { id: String },
    /// List sessions of the current student
    List,
    /// Delete a session and its logs
    Delete { id: String },
    /// Leave the active session
    Leave,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LogKind {
    /// ΠΡΟΣΕΧΩ
    Attentive,
    /// ΒΑΡΙΕΜΑΙ
    Bored,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Terminal filter: --debug > --verbose > RUST_LOG env > default "warn"
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let mut runtime = Runtime::start(&args).await?;

    match args.command {
        Commands::Status { json } => commands::status::run(&runtime, json)?,
        Commands::Identity { action } => match action {
            IdentityAction::Set { id } => commands::identity::set(&mut runtime, &id).await?,
        },
        Commands::Session { action } => match action {
            SessionAction::Select { id } => commands::session::select(&mut runtime, &id).await?,
            SessionAction::Open { id } => commands::session::open(&mut runtime, &id).await?,
            SessionAction::List => commands::session::list(&runtime)?,
            SessionAction::Delete { id } => commands::session::delete(&mut runtime, &id).await?,
            SessionAction::Leave => commands::session::leave(&mut runtime).await?,
        },
        Commands::Log { kind } => commands::log::record(&mut runtime, kind.into()).await?,
        Commands::Undo => commands::log::undo(&mut runtime).await?,
        Commands::Export { session, all } => {
            commands::export::run(&runtime, session.as_deref(), all).await?
        }
        Commands::Reset => commands::identity::reset(&mut runtime).await?,
    }

    Ok(())
}

impl From<LogKind> for attnlog_core::log::Action {
    fn from(kind: LogKind) -> Self {
        match kind {
            LogKind::Attentive => Self::Attentive,
            LogKind::Bored => Self::Bored,
        }
    }
}
