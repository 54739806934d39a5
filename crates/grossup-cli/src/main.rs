mod commands;
mod input;
mod output;
mod prefs_store;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use grossup_core::fees::FeeConfig;

use commands::prefs::PrefsArgs;
use commands::quote::{QuoteArgs, ShareArgs};
use commands::settlement::SettlementDateArgs;

/// Merchant fee gross-up calculator for Tabby / Tamara payments
#[derive(Parser)]
#[command(
    name = "grossup",
    version,
    about = "Merchant fee gross-up calculator for Tabby / Tamara payments",
    long_about = "Computes the amount a customer must be charged so that, after the \
                  provider service fee, VAT on that fee, and the settlement or bank \
                  transfer fee, the merchant keeps exactly the requested net profit."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Preferences file (defaults to $GROSSUP_PREFS or the user config dir)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Gross up a net profit into the amount the customer pays
    Quote(QuoteArgs),
    /// Build the share message and link for a quote
    Share(ShareArgs),
    /// Next weekly settlement date per provider
    SettlementDate(SettlementDateArgs),
    /// Show the fee table in use
    Fees,
    /// Show or change display preferences
    Prefs(PrefsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Fail fast on a fee table that would break the gross-up formula.
    let config = match FeeConfig::standard() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "configuration error".red().bold(), e);
            process::exit(2);
        }
    };

    let store = prefs_store::FilePreferenceStore::new(prefs_store::resolve_path(cli.prefs));
    tracing::debug!(path = %store.path().display(), "preference store");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::quote::run_quote(args, &config, &store),
        Commands::Share(args) => commands::quote::run_share(args, &config, &store),
        Commands::SettlementDate(args) => commands::settlement::run_settlement_date(args),
        Commands::Fees => commands::fees::run_fees(&config),
        Commands::Prefs(args) => commands::prefs::run_prefs(args, &store),
        Commands::Version => {
            println!("grossup {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
