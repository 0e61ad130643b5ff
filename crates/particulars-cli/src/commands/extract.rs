//! Extract command - resolve depositor names for individual narrations.

use std::io::{self, BufRead};

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use particulars_core::models::config::OutputKind;
use particulars_core::{is_unknown, DepositorExtractor, FieldExtractor, UNKNOWN_CUSTOMER};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Narrations to resolve (read from stdin, one per line, when omitted)
    narrations: Vec<String>,

    /// Output format (default from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Show which rule produced each name
    #[arg(long)]
    explain: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

impl From<OutputKind> for OutputFormat {
    fn from(kind: OutputKind) -> Self {
        match kind {
            OutputKind::Json => Self::Json,
            OutputKind::Csv => Self::Csv,
            OutputKind::Text => Self::Text,
        }
    }
}

/// One resolved narration.
#[derive(Debug, Serialize)]
struct Resolution {
    particulars: String,
    depositor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confidence: Option<f32>,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::load_config(config_path)?;
    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from(config.output.format));

    let narrations = if args.narrations.is_empty() {
        read_stdin()?
    } else {
        args.narrations
    };

    let extractor = DepositorExtractor::new();
    let results: Vec<Resolution> = narrations
        .into_iter()
        .map(|particulars| resolve(&extractor, particulars, args.explain))
        .collect();

    let unknown = results.iter().filter(|r| is_unknown(&r.depositor)).count();
    info!(
        "Resolved {} narrations, {} unknown",
        results.len(),
        unknown
    );

    let output = match format {
        OutputFormat::Json => {
            if config.output.pretty {
                serde_json::to_string_pretty(&results)?
            } else {
                serde_json::to_string(&results)?
            }
        }
        OutputFormat::Csv => format_csv(&results, &config.output.depositor_column)?,
        OutputFormat::Text => format_text(&results),
    };

    println!("{}", output.trim_end());

    Ok(())
}

fn read_stdin() -> anyhow::Result<Vec<String>> {
    let lines = io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?;
    Ok(lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect())
}

fn resolve(extractor: &DepositorExtractor, particulars: String, explain: bool) -> Resolution {
    match extractor.extract(&particulars) {
        Some(found) => Resolution {
            depositor: found.value,
            rule: explain.then(|| found.rule.as_str()),
            stage: explain.then(|| found.stage.as_str()),
            confidence: explain.then_some(found.confidence),
            particulars,
        },
        None => Resolution {
            depositor: UNKNOWN_CUSTOMER.to_string(),
            rule: None,
            stage: None,
            confidence: None,
            particulars,
        },
    }
}

fn format_csv(results: &[Resolution], depositor_column: &str) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["particulars", depositor_column, "rule"])?;
    for result in results {
        wtr.write_record([
            result.particulars.as_str(),
            result.depositor.as_str(),
            result.rule.unwrap_or(""),
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(results: &[Resolution]) -> String {
    let mut out = String::new();

    for result in results {
        let name = if is_unknown(&result.depositor) {
            style(&result.depositor).yellow().to_string()
        } else {
            style(&result.depositor).green().to_string()
        };
        out.push_str(&name);

        if let (Some(rule), Some(confidence)) = (result.rule, result.confidence) {
            out.push_str(&format!(
                "  [{} {:.0}%]",
                rule,
                confidence * 100.0
            ));
        }
        out.push('\n');
    }

    out
}
