//! wfadmin — approve or reject pending workflow requests from the terminal.
//!
//! Quick start:
//!   wfadmin list                 # pending user sign-ups
//!   wfadmin approve <reference>  # approve one
//!   wfadmin console              # interactive console
//!
//! For more info: wfadmin --help

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use wfadmin::cli::{self, GlobalOptions};
use wfadmin::workflow::types::{Decision, WorkflowKind};

/// wfadmin — approve or reject pending workflow requests.
#[derive(Parser)]
#[command(
    name = "wfadmin",
    version,
    about = "Approve or reject pending API Manager workflow requests",
    long_about = "wfadmin lists the workflow requests waiting for human approval\n\
                  (user sign-ups, subscriptions, API state changes, ...) and lets\n\
                  you approve or reject them.\n\n\
                  Quick start:\n  \
                  wfadmin list                 # pending user sign-ups\n  \
                  wfadmin approve <reference>  # approve one\n  \
                  wfadmin console              # interactive console"
)]
struct Cli {
    /// Admin REST API base URL
    #[arg(long, short = 's', global = true, env = "WFADMIN_SERVER")]
    server: Option<String>,

    /// Access token sent as a bearer token
    #[arg(long, global = true, env = "WFADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "WFADMIN_TIMEOUT")]
    timeout: Option<u64>,

    /// Config file (default: ~/.wfadmin/config.yaml)
    #[arg(long, global = true, env = "WFADMIN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List pending requests
    List {
        /// Workflow type (wire name or alias, see `wfadmin types`)
        #[arg(short = 't', long = "type")]
        kind: Option<WorkflowKind>,

        /// Only show rows containing this text
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Print the raw requests as JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve a pending request
    Approve {
        /// Reference id of the request
        reference: String,

        #[arg(short = 't', long = "type")]
        kind: Option<WorkflowKind>,
    },

    /// Reject a pending request
    Reject {
        /// Reference id of the request
        reference: String,

        #[arg(short = 't', long = "type")]
        kind: Option<WorkflowKind>,
    },

    /// Interactive approval console
    Console {
        #[arg(short = 't', long = "type")]
        kind: Option<WorkflowKind>,
    },

    /// Show the known workflow types
    Types,

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // The console owns the screen; keep log lines off it unless asked for.
    let quiet = matches!(cli.command, Commands::Console { .. });
    init_tracing(quiet);

    let globals = GlobalOptions {
        server: cli.server,
        token: cli.token,
        timeout_secs: cli.timeout,
        config: cli.config,
    };

    let result = match cli.command {
        Commands::List { kind, search, json } => {
            cli::list::run_list(&globals, kind, search.as_deref(), json).await
        }
        Commands::Approve { reference, kind } => {
            cli::decide::run_decide(&globals, kind, &reference, Decision::Approved).await
        }
        Commands::Reject { reference, kind } => {
            cli::decide::run_decide(&globals, kind, &reference, Decision::Rejected).await
        }
        Commands::Console { kind } => cli::console::run_console(&globals, kind).await,
        Commands::Types => {
            cli::types::run_types();
            Ok(())
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::config::run_config_show(&globals),
            ConfigAction::Init { force } => cli::config::run_config_init(&globals, force),
        },
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        eprintln!();
        std::process::exit(1);
    }
}

/// Warnings only by default; `RUST_LOG=wfadmin=debug` shows requests and state changes.
fn init_tracing(quiet: bool) {
    let default = if quiet { "wfadmin=off" } else { "wfadmin=warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
