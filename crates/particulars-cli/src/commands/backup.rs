//! Backup command - export statements as backup documents and inspect them.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use clap::{Args, Subcommand};
use console::style;
use tracing::info;

use particulars_core::{summarize_customers, BackupDocument, BackupSource};

use crate::statement::Statement;

/// Arguments for the backup command.
#[derive(Args)]
pub struct BackupArgs {
    #[command(subcommand)]
    command: BackupCommand,
}

#[derive(Subcommand)]
enum BackupCommand {
    /// Build a backup document from a statement CSV
    Export {
        /// Statement CSV file
        input: PathBuf,

        /// Output file (default: transaction-backup-<date>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Recorded backup source
        #[arg(long, value_enum, default_value = "manual")]
        source: SourceArg,
    },

    /// Validate a backup document and list rows needing review
    Inspect {
        /// Backup JSON file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum SourceArg {
    /// Scheduled automatic backup
    Auto,
    /// User-requested export
    Manual,
}

impl From<SourceArg> for BackupSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Auto => BackupSource::AutoBackup,
            SourceArg::Manual => BackupSource::ManualExport,
        }
    }
}

pub fn run(args: BackupArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        BackupCommand::Export {
            input,
            output,
            source,
        } => export(input, output, source.into(), config_path),
        BackupCommand::Inspect { file } => inspect(file),
    }
}

fn export(
    input: PathBuf,
    output: Option<PathBuf>,
    source: BackupSource,
    config_path: Option<&str>,
) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;

    let statement = Statement::read(&input, &config.input)?;
    let transactions = statement.to_transactions()?;
    let customers = summarize_customers(&transactions);
    let document = BackupDocument::new(transactions, customers, source);

    let output_path = output.unwrap_or_else(|| {
        PathBuf::from(BackupDocument::default_file_name(Local::now().date_naive()))
    });
    fs::write(&output_path, document.to_json_pretty()?)?;

    info!("Backup of {} written to {}", input.display(), output_path.display());
    println!(
        "{} Exported {} transactions and {} customers to {}",
        style("✓").green(),
        document.metadata.total_transactions,
        document.metadata.total_customers,
        output_path.display()
    );

    let review = document.needs_review().count();
    if review > 0 {
        println!(
            "{} {} transactions need a depositor review",
            style("ℹ").blue(),
            review
        );
    }

    Ok(())
}

fn inspect(file: PathBuf) -> anyhow::Result<()> {
    let content = fs::read_to_string(&file)?;
    let document = BackupDocument::from_json(&content)?;

    println!("{} Valid backup: {}", style("✓").green(), file.display());
    println!("   Version:      {}", document.version);
    println!("   Created:      {}", document.timestamp.to_rfc3339());
    println!("   Transactions: {}", document.transactions.len());
    println!("   Customers:    {}", document.customers.len());

    let review: Vec<_> = document.needs_review().collect();
    if !review.is_empty() {
        println!();
        println!(
            "{}",
            style(format!("{} transactions need review:", review.len())).yellow()
        );
        for txn in review {
            println!("  - #{} {} {}", txn.id, txn.date, txn.particulars);
        }
    }

    Ok(())
}
