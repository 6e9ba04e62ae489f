//! proposals - command-line front-end for the proposals API.
//!
//! Lists, shows, creates and deletes proposals and their activities.
//! By default failures print as empty results; `--strict` reports them.

mod commands;
mod repl;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use proposals_core::api::HttpTransport;
use proposals_core::auth::LoginGate;
use proposals_core::{ApiClient, Config, ProposalStore};

use commands::Context;

/// Log file name prefix inside the log directory
const LOG_FILE_PREFIX: &str = "proposals.log";

#[derive(Parser, Debug)]
#[command(name = "proposals")]
#[command(version)]
#[command(about = "Manage proposals and their activities")]
struct Args {
    /// Base URL of the proposals collection (overrides config and PROPOSALS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Report failures instead of printing empty results
    #[arg(long, global = true)]
    strict: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Write logs to a daily file instead of stderr
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List every proposal
    List,

    /// Show one or more proposals (fetched concurrently)
    Show {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Create a proposal
    Add {
        name: String,

        /// Activity id to include (repeatable)
        #[arg(long = "activity")]
        activities: Vec<i64>,
    },

    /// Delete a proposal
    Delete { id: String },

    /// Show one activity of a proposal
    Activity {
        proposal_id: String,
        activity_id: i64,
    },

    /// Add an activity to a proposal
    AddActivity {
        proposal_id: String,
        activity_id: i64,
    },

    /// Check the admin credentials
    Login { username: Option<String> },

    /// Resolve a client route path
    Route { path: String },

    /// Run several commands against one store (the proposal cache is kept between them)
    Repl,
}

/// Initialize the tracing subscriber for logging.
/// Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug).
fn init_tracing(log_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if log_file {
        match Config::log_dir() {
            Ok(dir) => {
                let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
                let (writer, guard) = tracing_appender::non_blocking(appender);
                tracing_subscriber::registry()
                    .with(fmt::layer().with_writer(writer).with_ansi(false))
                    .with(filter)
                    .init();
                return Some(guard);
            }
            Err(e) => eprintln!("Logging to stderr: {}", e),
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
    None
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    let _guard = init_tracing(args.log_file);

    let mut config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });
    if let Some(url) = args.api_url {
        config.api_base_url = url;
    }
    info!(api = %config.api_base_url, "proposals starting");

    let transport = HttpTransport::with_timeout(config.request_timeout())?;
    let client = ApiClient::with_transport(Arc::new(transport), &config.api_base_url);
    let ctx = Context {
        store: ProposalStore::new(client),
        gate: LoginGate::from_config(&config),
        strict: args.strict,
        json: args.json,
    };

    match args.command {
        Command::Repl => repl::run(&ctx).await,
        command => commands::run(&ctx, command).await,
    }
}
