//! footfall CLI - Tourism resource planning from predicted footfall.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use footfall_lib::Footfall;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "footfall")]
#[command(about = "Tourism resource planning from predicted footfall", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output and logs)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Base URL of the ML prediction service
    #[arg(
        long,
        env = "FOOTFALL_ML_URL",
        default_value = "http://localhost:5000",
        global = true
    )]
    ml_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the resource plan for a footfall
    Estimate {
        /// Predicted visitors (e.g., 25000 or 25,000)
        #[arg(allow_hyphen_values = true)]
        footfall: Footfall,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// Ask the ML service for a prediction and plan resources for it
    Predict {
        /// Location name. Prompts from the service's list when omitted.
        #[arg(short, long)]
        location: Option<String>,

        /// Calendar year
        #[arg(short, long)]
        year: i32,

        /// Calendar month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,

        /// Recent average monthly visitors (defaults to 80000)
        #[arg(long)]
        rolling_avg: Option<f64>,

        /// Record the prediction in the local log
        #[arg(long)]
        save: bool,

        /// Prediction log directory. Defaults to the platform data directory.
        #[arg(long, env = "FOOTFALL_STORE")]
        store: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// List locations known to the ML service
    Locations,

    /// List logged predictions, newest first
    History {
        /// Filter by location
        #[arg(short, long)]
        location: Option<String>,

        /// Filter by year
        #[arg(short, long)]
        year: Option<i32>,

        /// Filter by month
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Maximum number of predictions to show
        #[arg(long, default_value = "50")]
        limit: usize,

        /// Prediction log directory. Defaults to the platform data directory.
        #[arg(long, env = "FOOTFALL_STORE")]
        store: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "FOOTFALL_PORT", default_value = "3004")]
        port: u16,

        /// Address to bind
        #[arg(long, env = "FOOTFALL_HOST", default_value = "0.0.0.0")]
        host: IpAddr,

        /// How admin routes authenticate callers
        #[arg(long, value_enum, env = "FOOTFALL_AUTH_MODE", default_value = "token")]
        auth_mode: commands::serve::AuthArg,

        /// Accepted admin bearer token (repeatable)
        #[arg(long = "token", env = "FOOTFALL_ADMIN_TOKENS", value_delimiter = ',')]
        tokens: Vec<String>,

        /// Prediction log directory. Defaults to the platform data directory.
        #[arg(long, env = "FOOTFALL_STORE")]
        store: Option<PathBuf>,
    },
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // The server logs its lifecycle at info level
    let verbose = if matches!(command, Commands::Serve { .. }) {
        cli.verbose.max(1)
    } else {
        cli.verbose
    };
    init_tracing(verbose, cli.quiet);

    match command {
        Commands::Estimate { footfall, format } => commands::estimate::estimate(footfall, format),
        Commands::Predict {
            location,
            year,
            month,
            rolling_avg,
            save,
            store,
            format,
        } => {
            commands::predict::predict(
                &cli.ml_url,
                location,
                year,
                month,
                rolling_avg,
                save.then_some(store),
                format,
                cli.quiet,
            )
            .await
        }
        Commands::Locations => commands::locations::list_locations(&cli.ml_url).await,
        Commands::History {
            location,
            year,
            month,
            limit,
            store,
            format,
        } => commands::history::history(store, location, year, month, limit, format),
        Commands::Serve {
            port,
            host,
            auth_mode,
            tokens,
            store,
        } => commands::serve::serve(host, port, &cli.ml_url, auth_mode, tokens, store).await,
    }
}
