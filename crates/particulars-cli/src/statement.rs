//! Statement CSV reading and writing.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use chrono::{Datelike, NaiveDate};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use rust_decimal::Decimal;
use tracing::debug;

use particulars_core::extract_depositor;
use particulars_core::models::config::InputConfig;
use particulars_core::Transaction;

// Two-digit years first: `%Y` also accepts a one or two digit year.
const DATE_FORMATS: [&str; 5] = ["%d-%m-%y", "%d/%m/%y", "%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"];

/// A statement loaded from CSV.
pub struct Statement {
    headers: Option<StringRecord>,
    rows: Vec<StringRecord>,
    narration: usize,
    delimiter: u8,
}

impl Statement {
    /// Read a statement file.
    pub fn read(path: &Path, input: &InputConfig) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        Self::from_reader(file, input)
    }

    pub fn from_reader<R: Read>(reader: R, input: &InputConfig) -> anyhow::Result<Self> {
        let delimiter = input.delimiter as u8;
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(input.has_headers)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = if input.has_headers {
            Some(rdr.headers()?.clone())
        } else {
            None
        };
        let narration = resolve_column(headers.as_ref(), &input.narration_column)?;
        let rows = rdr.records().collect::<Result<Vec<_>, _>>()?;

        debug!("Read {} statement rows, narration column {}", rows.len(), narration);

        Ok(Self {
            headers,
            rows,
            narration,
            delimiter,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Narration of every row, in order. Short rows yield an empty narration.
    pub fn narrations(&self) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(self.narration).unwrap_or(""))
            .collect()
    }

    /// Write the statement back with a depositor column set on every row.
    ///
    /// An existing column with the same header is overwritten, otherwise one
    /// is appended.
    pub fn write_csv(&self, depositors: &[String], column: &str) -> anyhow::Result<String> {
        if depositors.len() != self.rows.len() {
            bail!(
                "Expected {} depositors, got {}",
                self.rows.len(),
                depositors.len()
            );
        }

        let target = self.headers.as_ref().and_then(|h| find_column(h, column));
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(vec![]);

        if let Some(headers) = &self.headers {
            let mut header: Vec<&str> = headers.iter().collect();
            if target.is_none() {
                header.push(column);
            }
            wtr.write_record(&header)?;
        }

        for (row, depositor) in self.rows.iter().zip(depositors) {
            let mut fields: Vec<&str> = row.iter().collect();
            match target {
                Some(idx) => {
                    if fields.len() <= idx {
                        fields.resize(idx + 1, "");
                    }
                    fields[idx] = depositor.as_str();
                }
                None => fields.push(depositor.as_str()),
            }
            wtr.write_record(&fields)?;
        }

        Ok(String::from_utf8(wtr.into_inner()?)?)
    }

    /// Convert rows to transaction records.
    ///
    /// Requires a header row with a `date` column. Amount columns
    /// (`withdrawals`, `deposits`, `balance`) and `type` are optional. A
    /// non-blank `depositor` column is kept as entered; blank ones are
    /// resolved from the narration.
    pub fn to_transactions(&self) -> anyhow::Result<Vec<Transaction>> {
        let headers = self
            .headers
            .as_ref()
            .ok_or_else(|| anyhow!("Transactions need a header row"))?;
        let date_col = find_column(headers, "date")
            .ok_or_else(|| anyhow!("Statement has no 'date' column"))?;

        let withdrawals = find_column(headers, "withdrawals");
        let deposits = find_column(headers, "deposits");
        let balance = find_column(headers, "balance");
        let kind = find_column(headers, "type");
        let depositor = find_column(headers, "depositor");

        let field = |row: &StringRecord, col: Option<usize>| -> String {
            col.and_then(|c| row.get(c)).unwrap_or("").trim().to_string()
        };

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| -> anyhow::Result<Transaction> {
                let line = i + 2;
                let raw_date = field(row, Some(date_col));
                let date = parse_date(&raw_date)
                    .ok_or_else(|| anyhow!("Line {}: invalid date '{}'", line, raw_date))?;

                let mut txn = Transaction {
                    id: i as u64 + 1,
                    date,
                    particulars: row.get(self.narration).unwrap_or("").to_string(),
                    depositor: field(row, depositor),
                    withdrawals: parse_amount(&field(row, withdrawals))
                        .with_context(|| format!("Line {}: invalid withdrawals", line))?,
                    deposits: parse_amount(&field(row, deposits))
                        .with_context(|| format!("Line {}: invalid deposits", line))?,
                    balance: parse_amount(&field(row, balance))
                        .with_context(|| format!("Line {}: invalid balance", line))?,
                    kind: field(row, kind),
                };
                txn.resolve_depositor();
                Ok(txn)
            })
            .collect()
    }
}

/// Worker pool for depositor resolution. `jobs == 0` uses one worker per CPU.
pub fn thread_pool(jobs: usize) -> anyhow::Result<ThreadPool> {
    Ok(ThreadPoolBuilder::new().num_threads(jobs).build()?)
}

/// Resolve depositors for all narrations on `pool`, keeping input order.
pub fn resolve_depositors(pool: &ThreadPool, narrations: &[&str]) -> Vec<String> {
    pool.install(|| {
        narrations
            .par_iter()
            .map(|narration| extract_depositor(narration))
            .collect()
    })
}

/// Column index from a header name or a zero-based index.
fn resolve_column(headers: Option<&StringRecord>, column: &str) -> anyhow::Result<usize> {
    if let Ok(idx) = column.parse::<usize>() {
        return Ok(idx);
    }

    match headers {
        Some(headers) => find_column(headers, column).ok_or_else(|| {
            anyhow!(
                "Column '{}' not found (available: {})",
                column,
                headers.iter().collect::<Vec<_>>().join(", ")
            )
        }),
        None => bail!(
            "Column '{}' needs a header row; use a column index instead",
            column
        ),
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .find(|date| date.year() >= 1000)
}

fn parse_amount(value: &str) -> anyhow::Result<Decimal> {
    let cleaned: String = value.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Ok(Decimal::from_str(&cleaned)?)
}
