//! Statement transaction and customer records.
//!
//! Field names serialize in camelCase so records round-trip with the
//! record keeper's JSON documents.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::depositor::{extract_depositor, is_unknown};

/// One bank statement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Record identifier.
    pub id: u64,

    /// Value date.
    pub date: NaiveDate,

    /// Raw narration as printed on the statement.
    pub particulars: String,

    /// Resolved depositor name (may be the fallback sentinel).
    #[serde(default)]
    pub depositor: String,

    /// Amount debited.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub withdrawals: Decimal,

    /// Amount credited.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub deposits: Decimal,

    /// Running balance after this row.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub balance: Decimal,

    /// Free-form transaction type label (e.g. "UPI", "TRANSFER").
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Transaction {
    /// Build a record whose depositor is resolved from the narration.
    pub fn from_particulars(id: u64, date: NaiveDate, particulars: impl Into<String>) -> Self {
        let particulars = particulars.into();
        let depositor = extract_depositor(&particulars);

        Self {
            id,
            date,
            particulars,
            depositor,
            withdrawals: Decimal::ZERO,
            deposits: Decimal::ZERO,
            balance: Decimal::ZERO,
            kind: String::new(),
        }
    }

    /// Fill the depositor from the narration when it is blank.
    ///
    /// Returns `true` if the depositor was changed. Manually entered names
    /// are never overwritten.
    pub fn resolve_depositor(&mut self) -> bool {
        if !self.depositor.trim().is_empty() {
            return false;
        }
        self.depositor = extract_depositor(&self.particulars);
        true
    }

    /// Whether the depositor still needs manual review.
    pub fn needs_review(&self) -> bool {
        is_unknown(&self.depositor)
    }
}

/// Aggregated view of one depositor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: u64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deposits: Decimal,
    pub transaction_count: usize,
    pub last_transaction: NaiveDate,
    pub is_active: bool,
}

/// Group transactions by depositor into customer records.
///
/// Blank depositors are skipped; every other name, the fallback sentinel
/// included, becomes a customer. Output is sorted by name with ids from 1.
pub fn summarize_customers(transactions: &[Transaction]) -> Vec<Customer> {
    let mut by_name: BTreeMap<&str, (Decimal, usize, NaiveDate)> = BTreeMap::new();

    for txn in transactions {
        let name = txn.depositor.as_str();
        if name.trim().is_empty() {
            continue;
        }

        let entry = by_name
            .entry(name)
            .or_insert((Decimal::ZERO, 0, txn.date));
        entry.0 += txn.deposits;
        entry.1 += 1;
        entry.2 = entry.2.max(txn.date);
    }

    by_name
        .into_iter()
        .enumerate()
        .map(|(i, (name, (total, count, last)))| Customer {
            id: i as u64 + 1,
            name: name.to_string(),
            total_deposits: total,
            transaction_count: count,
            last_transaction: last,
            is_active: true,
        })
        .collect()
}
