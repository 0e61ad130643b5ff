//! CLI application for resolving depositor names in bank statements.

mod commands;
mod statement;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{backup, batch, config, extract, verify};

/// Bank statement particulars - recover depositor names from narrations
#[derive(Parser)]
#[command(name = "particulars")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract depositor names from narrations
    Extract(extract::ExtractArgs),

    /// Resolve depositors for every row of statement CSV files
    Batch(batch::BatchArgs),

    /// Export or inspect backup documents
    Backup(backup::BackupArgs),

    /// Run the extraction acceptance table
    Verify,

    /// Manage configuration
    Config(config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.config.as_deref()),
        Commands::Batch(args) => batch::run(args, cli.config.as_deref()),
        Commands::Backup(args) => backup::run(args, cli.config.as_deref()),
        Commands::Verify => verify::run(),
        Commands::Config(args) => config::run(args, cli.config.as_deref()),
    }
}
