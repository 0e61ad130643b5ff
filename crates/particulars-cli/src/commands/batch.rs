//! Batch processing command for statement CSV files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPool;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use particulars_core::is_unknown;
use particulars_core::models::config::ParticularsConfig;

use super::extract::OutputFormat;
use crate::statement::{resolve_depositors, thread_pool, Statement};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Statement files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers (default from config)
    #[arg(short = 'j', long)]
    jobs: Option<usize>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Marks outputs written next to their input.
const OUTPUT_SUFFIX: &str = ".depositors";

/// Outcome of one statement file.
struct FileResult {
    path: PathBuf,
    rows: usize,
    unknown: usize,
    error: Option<String>,
}

impl FileResult {
    fn resolved(&self) -> usize {
        self.rows - self.unknown
    }
}

#[derive(Serialize)]
struct RowOutput<'a> {
    row: usize,
    particulars: &'a str,
    depositor: &'a str,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from(config.output.format));
    let jobs = args.jobs.unwrap_or(config.batch.jobs);
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_statement_input(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching CSV files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pool = thread_pool(jobs)?;
    info!("Resolving with {} workers", pool.current_num_threads());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let output_path = output_path_for(&path, args.output_dir.as_deref(), format);

        match process_file(&path, &output_path, format, &config, &pool) {
            Ok((rows, unknown)) => {
                debug!("Wrote {} rows to {}", rows, output_path.display());
                results.push(FileResult {
                    path,
                    rows,
                    unknown,
                    error: None,
                });
            }
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        rows: 0,
                        unknown: 0,
                        error: Some(error_msg),
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    pb.abandon();
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let (failed, succeeded): (Vec<&FileResult>, Vec<&FileResult>) =
        results.iter().partition(|r| r.error.is_some());
    let rows: usize = succeeded.iter().map(|r| r.rows).sum();
    let unknown: usize = succeeded.iter().map(|r| r.unknown).sum();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} rows, {} resolved, {} unknown",
        rows,
        style(rows - unknown).green(),
        style(unknown).yellow()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Resolve one statement and write its output. Returns row and unknown counts.
fn process_file(
    path: &Path,
    output_path: &Path,
    format: OutputFormat,
    config: &ParticularsConfig,
    pool: &ThreadPool,
) -> anyhow::Result<(usize, usize)> {
    let statement = Statement::read(path, &config.input)?;
    let narrations = statement.narrations();
    let depositors = resolve_depositors(pool, &narrations);

    let content = match format {
        OutputFormat::Csv => statement.write_csv(&depositors, &config.output.depositor_column)?,
        OutputFormat::Json => {
            let rows: Vec<RowOutput> = narrations
                .iter()
                .zip(&depositors)
                .enumerate()
                .map(|(i, (particulars, depositor))| RowOutput {
                    row: i + 1,
                    particulars,
                    depositor,
                })
                .collect();
            if config.output.pretty {
                serde_json::to_string_pretty(&rows)?
            } else {
                serde_json::to_string(&rows)?
            }
        }
        OutputFormat::Text => depositors
            .iter()
            .map(|d| format!("{}\n", d))
            .collect(),
    };

    fs::write(output_path, content)?;

    let unknown = depositors.iter().filter(|d| is_unknown(d)).count();
    Ok((statement.len(), unknown))
}

/// CSV files, except outputs an earlier run wrote next to its inputs.
fn is_statement_input(path: &Path) -> bool {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let is_output = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.to_ascii_lowercase().ends_with(OUTPUT_SUFFIX));

    is_csv && !is_output
}

/// `<dir>/<stem>.<ext>` with an output directory, `<stem>.depositors.<ext>`
/// next to the input otherwise.
fn output_path_for(input: &Path, output_dir: Option<&Path>, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("statement");

    match output_dir {
        Some(dir) => dir.join(format!("{}.{}", stem, format.extension())),
        None => input.with_file_name(format!("{}{}.{}", stem, OUTPUT_SUFFIX, format.extension())),
    }
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["file", "status", "rows", "resolved", "unknown", "error"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &result.error {
            None => wtr.write_record([
                filename,
                "success",
                &result.rows.to_string(),
                &result.resolved().to_string(),
                &result.unknown.to_string(),
                "",
            ])?,
            Some(error) => wtr.write_record([filename, "error", "", "", "", error.as_str()])?,
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_inputs_skip_earlier_outputs() {
        assert!(is_statement_input(Path::new("in/august.csv")));
        assert!(is_statement_input(Path::new("in/AUGUST.CSV")));
        assert!(!is_statement_input(Path::new("in/august.depositors.csv")));
        assert!(!is_statement_input(Path::new("in/august.Depositors.CSV")));
        assert!(!is_statement_input(Path::new("in/august.json")));
    }

    #[test]
    fn test_output_path_with_dir() {
        let path = output_path_for(
            Path::new("in/august.csv"),
            Some(Path::new("out")),
            OutputFormat::Json,
        );
        assert_eq!(path, PathBuf::from("out/august.json"));
    }

    #[test]
    fn test_output_path_next_to_input() {
        let path = output_path_for(Path::new("in/august.csv"), None, OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("in/august.depositors.csv"));
    }
}
