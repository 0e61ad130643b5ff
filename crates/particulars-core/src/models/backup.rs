//! Backup documents holding transactions and customers.
//!
//! Records are written and restored verbatim. Depositor values, including the
//! "Unknown Customer" sentinel, are ordinary strings here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::transaction::{Customer, Transaction};
use crate::error::{BackupError, Result};

/// Backup format version written by this crate.
pub const BACKUP_VERSION: &str = "1.0";

/// Where a backup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackupSource {
    AutoBackup,
    ManualExport,
}

/// Counts stored alongside the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupMetadata {
    pub total_transactions: usize,
    pub total_customers: usize,
    pub backup_source: BackupSource,
}

/// A complete dataset snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupDocument {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub transactions: Vec<Transaction>,
    pub customers: Vec<Customer>,
    pub metadata: BackupMetadata,
}

impl BackupDocument {
    /// Snapshot the given records now.
    pub fn new(
        transactions: Vec<Transaction>,
        customers: Vec<Customer>,
        source: BackupSource,
    ) -> Self {
        Self::at(Utc::now(), transactions, customers, source)
    }

    /// Snapshot the given records with an explicit timestamp.
    pub fn at(
        timestamp: DateTime<Utc>,
        transactions: Vec<Transaction>,
        customers: Vec<Customer>,
        source: BackupSource,
    ) -> Self {
        let metadata = BackupMetadata {
            total_transactions: transactions.len(),
            total_customers: customers.len(),
            backup_source: source,
        };

        Self {
            version: BACKUP_VERSION.to_string(),
            timestamp,
            transactions,
            customers,
            metadata,
        }
    }

    /// Serialize as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and validate a backup document.
    ///
    /// The document must carry a non-blank version and both the
    /// `transactions` and `customers` arrays. Versions other than
    /// [`BACKUP_VERSION`] are restored as is.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| BackupError::InvalidFormat(e.to_string()))?;

        let version = value
            .get("version")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default();
        if version.is_empty() {
            return Err(BackupError::MissingVersion.into());
        }
        if !is_known_version(version) {
            warn!(
                "Backup version {} differs from {}, restoring as is",
                version, BACKUP_VERSION
            );
        }

        for section in ["transactions", "customers"] {
            match value.get(section) {
                Some(Value::Array(_)) => {}
                Some(_) => {
                    return Err(BackupError::InvalidFormat(format!(
                        "{section} must be an array"
                    ))
                    .into());
                }
                None => {
                    return Err(
                        BackupError::InvalidFormat(format!("missing {section}")).into()
                    );
                }
            }
        }

        let document: Self = serde_json::from_value(value)
            .map_err(|e| BackupError::InvalidFormat(e.to_string()))?;

        if document.metadata.total_transactions != document.transactions.len() {
            debug!(
                "Backup metadata lists {} transactions, found {}",
                document.metadata.total_transactions,
                document.transactions.len()
            );
        }

        info!(
            "Loaded backup with {} transactions and {} customers",
            document.transactions.len(),
            document.customers.len()
        );

        Ok(document)
    }

    /// Transactions whose depositor still needs manual review.
    pub fn needs_review(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.needs_review())
    }

    /// File name used for manual exports, e.g. `transaction-backup-2025-08-10.json`.
    pub fn default_file_name(date: NaiveDate) -> String {
        format!("transaction-backup-{}.json", date.format("%Y-%m-%d"))
    }
}

fn is_known_version(version: &str) -> bool {
    version.split('.').next() == BACKUP_VERSION.split('.').next()
}
