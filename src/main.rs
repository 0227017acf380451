//! Binary entry point for cardex.
//!
//! Serves the catalog API over HTTP and offers a couple of maintenance
//! commands for inspecting and seeding the snapshot from the shell.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print macros in the main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]

use cardex::{api, CardexConfig, CatalogStore, Error, ListFilter, RecordDraft};
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Cardex - a file-backed catalog service for typed product records.
#[derive(Parser)]
#[command(name = "cardex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true, env = "CARDEX_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the snapshot file (overrides the config file).
    #[arg(short, long, global = true, env = "CARDEX_DATA_FILE")]
    data_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Serve the catalog API over HTTP.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on.
        #[arg(short, long, default_value_t = 5000)]
        port: u16,
    },

    /// List records from the snapshot.
    List {
        /// Filter by category.
        #[arg(long)]
        category: Option<String>,

        /// Filter by status.
        #[arg(long)]
        status: Option<String>,

        /// Filter by title substring (case-insensitive).
        #[arg(short = 'q', long)]
        contains: Option<String>,
    },

    /// Add a record to the snapshot.
    Add {
        /// Record title.
        title: String,

        /// Record category.
        #[arg(long)]
        category: String,

        /// Record status.
        #[arg(long, default_value = "disponivel")]
        status: String,

        /// Record description.
        #[arg(long)]
        description: Option<String>,

        /// Monetary value.
        #[arg(long)]
        value: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        },
    };

    let result = match cli.command {
        Commands::Serve { host, port } => run_serve(&config, &host, port),
        Commands::List {
            category,
            status,
            contains,
        } => run_list(&config, category, status, contains),
        Commands::Add {
            title,
            category,
            status,
            description,
            value,
        } => run_add(&config, title, category, status, description, value),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Initializes tracing output on stderr, honoring `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolves configuration from the config file and CLI overrides.
fn load_config(cli: &Cli) -> cardex::Result<CardexConfig> {
    let mut config = match cli.config {
        Some(ref path) => CardexConfig::load_from_file(path)?,
        None => CardexConfig::default(),
    };

    if let Some(ref data_file) = cli.data_file {
        config.data_file.clone_from(data_file);
    }

    Ok(config)
}

fn run_serve(config: &CardexConfig, host: &str, port: u16) -> cardex::Result<()> {
    // A corrupt snapshot refuses to serve rather than shadowing data.
    let store = Arc::new(CatalogStore::open(config)?);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e: std::net::AddrParseError| Error::Persistence {
            operation: "parse_listen_addr".to_string(),
            cause: e.to_string(),
        })?;

    let rt = tokio::runtime::Runtime::new().map_err(|e| Error::Persistence {
        operation: "create_runtime".to_string(),
        cause: e.to_string(),
    })?;

    rt.block_on(api::serve(store, addr))
}

fn run_list(
    config: &CardexConfig,
    category: Option<String>,
    status: Option<String>,
    contains: Option<String>,
) -> cardex::Result<()> {
    let store = CatalogStore::open(config)?;

    let filter = ListFilter {
        category,
        status,
        title_contains: contains,
    };

    let records = store.list(&filter)?;
    let json = serde_json::to_string_pretty(&records).map_err(|e| Error::Persistence {
        operation: "render_records".to_string(),
        cause: e.to_string(),
    })?;
    println!("{json}");

    Ok(())
}

fn run_add(
    config: &CardexConfig,
    title: String,
    category: String,
    status: String,
    description: Option<String>,
    value: f64,
) -> cardex::Result<()> {
    let store = CatalogStore::open(config)?;

    let mut draft = RecordDraft::new()
        .with_title(title)
        .with_category(category)
        .with_status(status)
        .with_value(value);
    draft.description = description;

    let record = store.create(draft)?;
    println!("created record {} ({})", record.id, record.title);

    Ok(())
}
