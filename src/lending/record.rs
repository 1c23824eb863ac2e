//! Loan records and whole-day overdue arithmetic.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::ItemId;

/// Unique identifier of a borrower.
pub type BorrowerId = u64;

/// One loan, active until the item comes back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LendingRecord {
    pub item_id: ItemId,
    pub borrower_id: BorrowerId,
    pub borrow_date: DateTime<Utc>,
    pub expected_return_date: DateTime<Utc>,
    /// `None` while the loan is active.
    pub actual_return_date: Option<DateTime<Utc>>,
}

impl LendingRecord {
    /// Open a new loan running `days` whole days from `borrow_date`.
    pub fn open(
        item_id: ItemId,
        borrower_id: BorrowerId,
        borrow_date: DateTime<Utc>,
        days: i64,
    ) -> Self {
        Self {
            item_id,
            borrower_id,
            borrow_date,
            expected_return_date: borrow_date + Duration::days(days),
            actual_return_date: None,
        }
    }

    /// True while the item has not been returned.
    pub fn is_active(&self) -> bool {
        self.actual_return_date.is_none()
    }

    /// Number of whole days the loan allows.
    pub fn allowed_days(&self) -> i64 {
        (self.expected_return_date - self.borrow_date).num_days()
    }

    /// Whole days elapsed from the borrow date to `at`, truncated.
    /// A span of 2 days and 23 hours counts as 2 days.
    pub fn elapsed_days(&self, at: DateTime<Utc>) -> i64 {
        (at - self.borrow_date).num_days()
    }

    /// Days overdue if the loan were closed at `at`, floored at zero.
    pub fn overdue_days_at(&self, at: DateTime<Utc>) -> i64 {
        (self.elapsed_days(at) - self.allowed_days()).max(0)
    }
}
