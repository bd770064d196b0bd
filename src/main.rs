mod backend;
mod cli_messages;
mod commands;
mod config;
mod consts;
mod controller;
mod environment;
mod events;
mod format;
mod listing;
mod logging;
mod session;
mod ui;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::listing::{ListingId, ListingQuery, ListingStatus, SystemAction};
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Base URL of the listings backend. Overrides the saved configuration.
    #[arg(long, global = true, env = "LISTINGS_BACKEND_URL", value_name = "URL")]
    backend_url: Option<String>,

    /// Command to execute. Defaults to the dashboard.
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Dashboard {
        /// Disable background colors
        #[arg(long, default_value_t = false)]
        no_background_color: bool,
    },
    /// Run the dashboard without a UI, printing activity until Ctrl+C
    Watch,
    /// Print listing statistics
    Stats,
    /// Print one page of listings
    List {
        /// Only listings with this status (English name or backend label)
        #[arg(long, value_name = "STATUS")]
        status: Option<ListingStatus>,

        /// Page size
        #[arg(long)]
        limit: Option<u32>,

        /// Number of listings to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Only show listings containing this text
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// Print every field of one listing
    Show {
        /// Listing ID
        id: ListingId,
    },
    /// Send a listing back for processing
    Reprocess {
        /// Listing ID
        id: ListingId,
    },
    /// Start or stop the backend processor
    System {
        #[arg(value_enum)]
        action: SystemAction,
    },
    /// Print whether the processor is running, stopped or unreachable
    Health,
    /// Save the backend URL to the configuration file
    SetBackend {
        /// Base URL, e.g. http://10.0.0.5:5000, or "local"
        url: String,
    },
    /// Remove the saved configuration and fall back to the local backend
    ResetBackend,
}

/// Reads the config file, falling back to defaults when it is missing or unreadable.
fn load_config(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    match Config::load_from_file(path) {
        Ok(config) => config,
        Err(e) => {
            print_cmd_warn!(
                "Config",
                "Ignoring unreadable config file {}: {}",
                path.display(),
                e
            );
            Config::default()
        }
    }
}

/// Command line first, then the config file, then the local default.
fn resolve_environment(
    backend_url: Option<&str>,
    config: &Config,
) -> Result<Environment, Box<dyn Error>> {
    match backend_url.map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => Ok(url.parse::<Environment>()?),
        None => Ok(config.environment()?),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    log::set_max_level(logging::get_rust_log_level().into());
    let config_path = get_config_path()?;
    let config = load_config(&config_path);

    let command = args.command.unwrap_or(Command::Dashboard {
        no_background_color: false,
    });

    // Commands that only touch the config file
    match &command {
        Command::SetBackend { url } => {
            let environment = url.parse::<Environment>()?;
            let updated = Config {
                backend_url: environment.backend_url(),
                ..config
            };
            updated
                .save(&config_path)
                .map_err(|e| format!("Failed to save config: {}", e))?;
            print_cmd_success!("Backend saved", "{}", environment);
            return Ok(());
        }
        Command::ResetBackend => {
            Config::clear(&config_path)
                .map_err(|e| format!("Failed to remove config: {}", e))?;
            print_cmd_success!("Backend reset", "{}", Environment::Local);
            return Ok(());
        }
        _ => {}
    }

    let environment = resolve_environment(args.backend_url.as_deref(), &config)?;
    let session = setup_session(&config, environment)?;
    let backend = session.backend.clone();
    let backend = backend.as_ref();

    match command {
        Command::Dashboard {
            no_background_color,
        } => run_tui_mode(session, !no_background_color).await,
        Command::Watch => run_headless_mode(session).await,
        Command::Stats => commands::stats(backend).await,
        Command::List {
            status,
            limit,
            offset,
            search,
        } => {
            let query = ListingQuery::new(status, limit.unwrap_or(config.page_size()), offset);
            commands::list(backend, query, search).await
        }
        Command::Show { id } => commands::show(backend, id).await,
        Command::Reprocess { id } => commands::reprocess(backend, id).await,
        Command::System { action } => commands::system(backend, action).await,
        Command::Health => commands::health(backend).await,
        Command::SetBackend { .. } | Command::ResetBackend => Ok(()),
    }
}
