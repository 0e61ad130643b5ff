//! Data models shared by the particulars tools.

pub mod backup;
pub mod config;
pub mod transaction;

pub use backup::{BackupDocument, BackupMetadata, BackupSource, BACKUP_VERSION};
pub use config::ParticularsConfig;
pub use transaction::{summarize_customers, Customer, Transaction};
