//! Closeby CLI
//!
//! Command-line interface for Closeby - nearby-user proximity alerts.

mod commands;
mod config;
mod display;
mod location;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use closeby_core::registry::{DEFAULT_REGISTRY_URL, REGISTRY_URL_ENV};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "closeby")]
#[command(version, about = "Nearby-user proximity alerts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Peer registry URL
    #[arg(long, global = true, env = REGISTRY_URL_ENV, default_value = DEFAULT_REGISTRY_URL)]
    registry: String,

    /// User id reported to the registry (default: fresh UUID)
    #[arg(long, global = true)]
    user_id: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, default_value_t = 30_000)]
    timeout_ms: u64,

    /// Route registry calls through the local Tor SOCKS proxy
    #[arg(long, global = true)]
    tor: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the proximity engine and print every change
    Watch {
        /// Fixed latitude
        #[arg(long, allow_negative_numbers = true, requires = "lon", conflicts_with = "route")]
        lat: Option<f64>,

        /// Fixed longitude
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Scripted route: "lat,lon;lat,lon;..."
        #[arg(long, allow_hyphen_values = true)]
        route: Option<String>,

        /// Delay between route points in milliseconds
        #[arg(long, default_value_t = 2000)]
        step_ms: u64,

        /// Start in the background state
        #[arg(long)]
        background: bool,

        /// Print JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// List every user known to the registry
    Peers {
        /// Your latitude
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        /// Your longitude
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Ask the registry for the distance to the nearest user
    Nearest {
        /// Your latitude
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Your longitude
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
    },

    /// Great-circle distance between two points (offline)
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                "closeby=info"
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = CliConfig {
        registry_url: cli.registry,
        user_id: cli.user_id,
        timeout: Duration::from_millis(cli.timeout_ms),
        tor: cli.tor,
    };

    match cli.command {
        Commands::Watch {
            lat,
            lon,
            route,
            step_ms,
            background,
            json,
        } => {
            let options = commands::watch::WatchOptions {
                location: lat.zip(lon),
                route,
                step: Duration::from_millis(step_ms),
                background,
                json,
            };
            commands::watch::run(&config, options).await?;
        }
        Commands::Peers { lat, lon, json } => {
            commands::peers::run(&config, lat.zip(lon), json).await?;
        }
        Commands::Nearest { lat, lon } => {
            commands::nearest::run(&config, lat, lon).await?;
        }
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            commands::distance::run(lat1, lon1, lat2, lon2)?;
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "closeby", &mut io::stdout());
        }
    }

    Ok(())
}
