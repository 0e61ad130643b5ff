//! Core library for bank statement narrations.
//!
//! This crate provides:
//! - Depositor name extraction from free-form narrations ("particulars")
//! - Transaction, customer and backup models that carry the resolved names
//! - A fixed acceptance table for the extraction engine

pub mod acceptance;
pub mod depositor;
pub mod error;
pub mod models;

pub use depositor::{
    extract_depositor, is_unknown, DepositorExtractor, ExtractionMatch, FieldExtractor,
    UNKNOWN_CUSTOMER,
};
pub use error::{BackupError, ParticularsError, Result};
pub use models::backup::{BackupDocument, BackupSource};
pub use models::config::ParticularsConfig;
pub use models::transaction::{summarize_customers, Customer, Transaction};
