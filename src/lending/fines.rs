//! Late-return fine policy and per-borrower ledger.

use serde::Serialize;
use std::collections::HashMap;

use super::record::BorrowerId;
use crate::config::CatalogConfig;

/// Fine assessment policy.
#[derive(Clone, Debug)]
pub struct FinePolicy {
    /// Amount charged per whole overdue day.
    pub fine_per_day: f64,
}

impl FinePolicy {
    /// Create a new FinePolicy from configuration settings.
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            fine_per_day: config.fine_per_day,
        }
    }

    /// Fine owed for a number of whole overdue days.
    pub fn fine_for(&self, overdue_days: i64) -> f64 {
        overdue_days as f64 * self.fine_per_day
    }
}

impl Default for FinePolicy {
    fn default() -> Self {
        Self { fine_per_day: 10.0 }
    }
}

/// Cumulative outstanding fines, keyed by borrower.
///
/// Charges only accumulate; there is no payment operation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct FineLedger {
    balances: HashMap<BorrowerId, f64>,
}

impl FineLedger {
    /// Create a new empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to a borrower's outstanding total, creating the entry
    /// at zero first if absent. Non-positive amounts are ignored.
    pub fn charge(&mut self, borrower_id: BorrowerId, amount: f64) {
        if amount > 0.0 {
            *self.balances.entry(borrower_id).or_insert(0.0) += amount;
        }
    }

    /// Outstanding total for one borrower (zero when unknown).
    pub fn outstanding(&self, borrower_id: BorrowerId) -> f64 {
        self.balances.get(&borrower_id).copied().unwrap_or(0.0)
    }

    /// True when no borrower owes anything.
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    /// Snapshot of every borrower with an outstanding fine.
    pub fn snapshot(&self) -> HashMap<BorrowerId, f64> {
        self.balances.clone()
    }
}
