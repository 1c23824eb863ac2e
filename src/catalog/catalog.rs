//! The catalog orchestrator: items, active loans, and the fine ledger.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use tracing::{debug, info, warn};

use super::item::{CatalogItem, ItemId, ItemKind, ItemType};
use crate::config::CatalogConfig;
use crate::duration::parse_duration_to_days;
use crate::error::CatalogError;
use crate::lending::{BorrowerId, FineLedger, FinePolicy, LendingRecord};

// =============================================================================
// Operation receipts
// =============================================================================

/// Outcome of a successful borrow, for the caller to log or display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BorrowReceipt {
    pub item_id: ItemId,
    pub borrower_id: BorrowerId,
    pub title: String,
    /// Whole days the loan runs for.
    pub loan_days: i64,
    pub due_date: DateTime<Utc>,
}

/// Outcome of a successful return.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReturnReceipt {
    pub item_id: ItemId,
    pub borrower_id: BorrowerId,
    pub returned_at: DateTime<Utc>,
    /// Whole days past the expected return date, floored at zero.
    pub overdue_days: i64,
    /// Amount added to the borrower's ledger entry; zero for on-time
    /// returns.
    pub fine_charged: f64,
}

// =============================================================================
// Catalog
// =============================================================================

/// Mutable catalog state. Guarded as a whole so a borrow's
/// availability-check-then-insert sequence is atomic.
#[derive(Debug, Default)]
struct CatalogState {
    items: BTreeMap<ItemId, CatalogItem>,
    active_loans: HashMap<ItemId, LendingRecord>,
    returned_loans: Vec<LendingRecord>,
    fines: FineLedger,
}

/// The orchestrating owner of items, active loans, and per-borrower fines.
///
/// All mutations serialize on one write lock; readers observe either the
/// fully-pre- or fully-post-mutation state, never a partial one.
#[derive(Debug)]
pub struct Catalog {
    state: RwLock<CatalogState>,
    policy: FinePolicy,
    loan_history_limit: usize,
}

impl Catalog {
    /// Create a catalog with the given configuration.
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            state: RwLock::new(CatalogState::default()),
            policy: FinePolicy::new(&config),
            loan_history_limit: config.loan_history_limit,
        }
    }

    /// The per-day fine rate this catalog charges.
    pub fn fine_per_day(&self) -> f64 {
        self.policy.fine_per_day
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Register an item. Items always enter the catalog available.
    pub fn add_item(&self, mut item: CatalogItem) -> Result<(), CatalogError> {
        let mut state = self.state.write().unwrap();
        if state.items.contains_key(&item.id) {
            return Err(CatalogError::DuplicateId(item.id));
        }
        item.available = true;
        debug!(item_id = item.id, item_type = %item.item_type(), "item registered");
        state.items.insert(item.id, item);
        Ok(())
    }

    // =========================================================================
    // Lending
    // =========================================================================

    /// Borrow an item for a human-readable duration (`"3"`, `"5d"`,
    /// `"36h"`, `"2w"`).
    pub fn borrow_item(
        &self,
        item_id: ItemId,
        borrower_id: BorrowerId,
        duration_text: &str,
    ) -> Result<BorrowReceipt, CatalogError> {
        self.borrow_item_at(item_id, borrower_id, duration_text, Utc::now())
    }

    /// Borrow an item with an explicit borrow timestamp.
    pub fn borrow_item_at(
        &self,
        item_id: ItemId,
        borrower_id: BorrowerId,
        duration_text: &str,
        now: DateTime<Utc>,
    ) -> Result<BorrowReceipt, CatalogError> {
        let mut state = self.state.write().unwrap();

        let item = state
            .items
            .get_mut(&item_id)
            .ok_or(CatalogError::NotFound(item_id))?;
        if !item.available {
            return Err(CatalogError::AlreadyBorrowed(item_id));
        }

        let days = parse_duration_to_days(duration_text)?;
        let record = LendingRecord::open(item_id, borrower_id, now, days);
        let receipt = BorrowReceipt {
            item_id,
            borrower_id,
            title: item.title.clone(),
            loan_days: days,
            due_date: record.expected_return_date,
        };

        item.available = false;
        state.active_loans.insert(item_id, record);

        info!(item_id, borrower_id, days, "item borrowed");
        Ok(receipt)
    }

    /// Return a borrowed item, assessing a fine for whole overdue days.
    pub fn return_item(&self, item_id: ItemId) -> Result<ReturnReceipt, CatalogError> {
        self.return_item_at(item_id, Utc::now())
    }

    /// Return a borrowed item with an explicit return timestamp.
    pub fn return_item_at(
        &self,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> Result<ReturnReceipt, CatalogError> {
        let mut state = self.state.write().unwrap();

        let mut record = state
            .active_loans
            .remove(&item_id)
            .ok_or(CatalogError::NotReturnable(item_id))?;
        record.actual_return_date = Some(now);

        let overdue_days = record.overdue_days_at(now);
        let fine_charged = self.policy.fine_for(overdue_days);
        if fine_charged > 0.0 {
            state.fines.charge(record.borrower_id, fine_charged);
            warn!(
                item_id,
                borrower_id = record.borrower_id,
                overdue_days,
                fine = fine_charged,
                "item returned late"
            );
        } else {
            info!(item_id, borrower_id = record.borrower_id, "item returned on time");
        }

        // Items are never removed, so the loan's item is still present.
        if let Some(item) = state.items.get_mut(&item_id) {
            item.available = true;
        }

        let receipt = ReturnReceipt {
            item_id,
            borrower_id: record.borrower_id,
            returned_at: now,
            overdue_days,
            fine_charged,
        };

        state.returned_loans.push(record);
        if state.returned_loans.len() > self.loan_history_limit {
            let excess = state.returned_loans.len() - self.loan_history_limit;
            state.returned_loans.drain(..excess);
        }

        Ok(receipt)
    }

    // =========================================================================
    // Periodicals
    // =========================================================================

    /// Mark a periodical's issue as archived. Availability is unaffected.
    pub fn archive_issue(&self, item_id: ItemId) -> Result<(), CatalogError> {
        let mut state = self.state.write().unwrap();
        let item = state
            .items
            .get_mut(&item_id)
            .ok_or(CatalogError::NotFound(item_id))?;
        match &mut item.kind {
            ItemKind::Periodical(periodical) => {
                periodical.archived = true;
                info!(item_id, issue_number = periodical.issue_number, "issue archived");
                Ok(())
            }
            other => Err(CatalogError::WrongKind {
                id: item_id,
                expected: ItemType::Periodical,
                actual: other.item_type(),
            }),
        }
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Find items by type name, case-insensitively. Unknown names match
    /// nothing.
    pub fn search_by_type(&self, type_name: &str) -> Vec<CatalogItem> {
        match ItemType::parse(type_name) {
            Some(item_type) => self.search_by_kind(item_type),
            None => Vec::new(),
        }
    }

    /// Find items of one kind, in id order.
    pub fn search_by_kind(&self, item_type: ItemType) -> Vec<CatalogItem> {
        let state = self.state.read().unwrap();
        state
            .items
            .values()
            .filter(|item| item.item_type() == item_type)
            .cloned()
            .collect()
    }

    /// Find items whose title contains `keyword`, case-insensitively, in
    /// id order.
    pub fn search_by_title(&self, keyword: &str) -> Vec<CatalogItem> {
        let keyword = keyword.to_lowercase();
        let state = self.state.read().unwrap();
        state
            .items
            .values()
            .filter(|item| item.title.to_lowercase().contains(&keyword))
            .cloned()
            .collect()
    }

    // =========================================================================
    // Read accessors
    // =========================================================================

    /// Snapshot of every item, in id order.
    pub fn items(&self) -> Vec<CatalogItem> {
        let state = self.state.read().unwrap();
        state.items.values().cloned().collect()
    }

    /// Look up a single item by id.
    pub fn item(&self, item_id: ItemId) -> Option<CatalogItem> {
        let state = self.state.read().unwrap();
        state.items.get(&item_id).cloned()
    }

    /// The active loan for an item, if any.
    pub fn active_loan(&self, item_id: ItemId) -> Option<LendingRecord> {
        let state = self.state.read().unwrap();
        state.active_loans.get(&item_id).cloned()
    }

    /// Snapshot of every active loan.
    pub fn active_loans(&self) -> Vec<LendingRecord> {
        let state = self.state.read().unwrap();
        state.active_loans.values().cloned().collect()
    }

    /// Closed loans, oldest first, bounded by the configured history limit.
    pub fn loan_history(&self) -> Vec<LendingRecord> {
        let state = self.state.read().unwrap();
        state.returned_loans.clone()
    }

    /// Snapshot of the fine ledger, for display.
    pub fn fines(&self) -> HashMap<BorrowerId, f64> {
        let state = self.state.read().unwrap();
        state.fines.snapshot()
    }

    /// Outstanding fine total for one borrower (zero when unknown).
    pub fn outstanding_fine(&self, borrower_id: BorrowerId) -> f64 {
        let state = self.state.read().unwrap();
        state.fines.outstanding(borrower_id)
    }

    /// Number of registered items.
    pub fn item_count(&self) -> usize {
        let state = self.state.read().unwrap();
        state.items.len()
    }

    /// Number of currently active loans.
    pub fn active_loan_count(&self) -> usize {
        let state = self.state.read().unwrap();
        state.active_loans.len()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 14, 30, 0).unwrap()
    }

    fn catalog_with_book() -> Catalog {
        let catalog = Catalog::default();
        catalog
            .add_item(CatalogItem::book(1, "Dune", "Frank Herbert", 412))
            .unwrap();
        catalog
    }

    #[test]
    fn test_add_item_rejects_duplicate_id() {
        let catalog = catalog_with_book();
        let err = catalog
            .add_item(CatalogItem::book(1, "Dune Messiah", "Frank Herbert", 256))
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(1));
        assert_eq!(catalog.item_count(), 1);
    }

    #[test]
    fn test_add_item_forces_availability() {
        let catalog = Catalog::default();
        let mut item = CatalogItem::book(3, "Hyperion", "Dan Simmons", 482);
        item.available = false;
        catalog.add_item(item).unwrap();
        assert!(catalog.item(3).unwrap().available);
    }

    #[test]
    fn test_borrow_unknown_item() {
        let catalog = Catalog::default();
        let err = catalog.borrow_item(99, 7, "2d").unwrap_err();
        assert_eq!(err, CatalogError::NotFound(99));
    }

    #[test]
    fn test_borrow_flips_availability_and_records_loan() {
        let catalog = catalog_with_book();
        let receipt = catalog.borrow_item_at(1, 7, "2d", now()).unwrap();

        assert_eq!(receipt.loan_days, 2);
        assert_eq!(receipt.due_date, now() + Duration::days(2));
        assert!(!catalog.item(1).unwrap().available);

        let loan = catalog.active_loan(1).unwrap();
        assert_eq!(loan.borrower_id, 7);
        assert!(loan.is_active());
        assert_eq!(catalog.active_loan_count(), 1);
    }

    #[test]
    fn test_borrow_twice_fails() {
        let catalog = catalog_with_book();
        catalog.borrow_item_at(1, 7, "2d", now()).unwrap();
        let err = catalog.borrow_item_at(1, 8, "1d", now()).unwrap_err();
        assert_eq!(err, CatalogError::AlreadyBorrowed(1));
    }

    #[test]
    fn test_failed_duration_parse_applies_no_state() {
        let catalog = catalog_with_book();
        let err = catalog.borrow_item_at(1, 7, "soon", now()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDuration(_)));
        assert!(catalog.item(1).unwrap().available);
        assert!(catalog.active_loan(1).is_none());
    }

    #[test]
    fn test_return_without_loan_fails_and_leaves_ledger_alone() {
        let catalog = catalog_with_book();
        let err = catalog.return_item_at(1, now()).unwrap_err();
        assert_eq!(err, CatalogError::NotReturnable(1));
        assert!(catalog.fines().is_empty());
    }

    #[test]
    fn test_on_time_return_charges_nothing() {
        let catalog = catalog_with_book();
        catalog.borrow_item_at(1, 7, "2d", now()).unwrap();
        let receipt = catalog.return_item_at(1, now() + Duration::days(2)).unwrap();

        assert_eq!(receipt.overdue_days, 0);
        assert_eq!(receipt.fine_charged, 0.0);
        assert!(catalog.item(1).unwrap().available);
        assert_eq!(catalog.outstanding_fine(7), 0.0);
        assert_eq!(catalog.loan_history().len(), 1);
        assert!(!catalog.loan_history()[0].is_active());
    }

    #[test]
    fn test_late_return_charges_fine() {
        let catalog = catalog_with_book();
        catalog.borrow_item_at(1, 9, "1d", now()).unwrap();
        let receipt = catalog.return_item_at(1, now() + Duration::days(3)).unwrap();

        assert_eq!(receipt.overdue_days, 2);
        assert_eq!(receipt.fine_charged, 20.0);
        assert_eq!(catalog.outstanding_fine(9), 20.0);
        assert!(catalog.item(1).unwrap().available);
    }

    #[test]
    fn test_loan_history_is_bounded() {
        let config = CatalogConfig {
            loan_history_limit: 2,
            ..CatalogConfig::default()
        };
        let catalog = Catalog::new(config);
        catalog
            .add_item(CatalogItem::book(1, "Dune", "Frank Herbert", 412))
            .unwrap();

        for i in 0..4 {
            let at = now() + Duration::days(i);
            catalog.borrow_item_at(1, 7, "1d", at).unwrap();
            catalog.return_item_at(1, at).unwrap();
        }

        let history = catalog.loan_history();
        assert_eq!(history.len(), 2);
        // Oldest entries were dropped first.
        assert_eq!(history[0].borrow_date, now() + Duration::days(2));
    }

    #[test]
    fn test_archive_issue() {
        let catalog = Catalog::default();
        catalog
            .add_item(CatalogItem::periodical(5, "Analog", "Various", 7))
            .unwrap();
        catalog.archive_issue(5).unwrap();

        match &catalog.item(5).unwrap().kind {
            ItemKind::Periodical(p) => assert!(p.archived),
            other => panic!("unexpected kind: {:?}", other),
        }
        // Archiving does not touch availability.
        assert!(catalog.item(5).unwrap().available);
    }

    #[test]
    fn test_archive_issue_wrong_kind() {
        let catalog = catalog_with_book();
        let err = catalog.archive_issue(1).unwrap_err();
        assert_eq!(
            err,
            CatalogError::WrongKind {
                id: 1,
                expected: ItemType::Periodical,
                actual: ItemType::Book,
            }
        );
        assert_eq!(catalog.archive_issue(99), Err(CatalogError::NotFound(99)));
    }

    #[test]
    fn test_search_by_type_ignores_case_and_unknown_names() {
        let catalog = catalog_with_book();
        catalog
            .add_item(CatalogItem::audio_item(2, "Dune", "Frank Herbert", 1266))
            .unwrap();

        let lower = catalog.search_by_type("book");
        let upper = catalog.search_by_type("BOOK");
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].id, 1);

        assert!(catalog.search_by_type("vinyl").is_empty());
    }

    #[test]
    fn test_search_by_title_matches_substrings() {
        let catalog = catalog_with_book();
        catalog
            .add_item(CatalogItem::book(2, "Dune Messiah", "Frank Herbert", 256))
            .unwrap();
        catalog
            .add_item(CatalogItem::book(3, "Hyperion", "Dan Simmons", 482))
            .unwrap();

        let hits = catalog.search_by_title("dune");
        assert_eq!(hits.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(catalog.search_by_title("foundation").is_empty());
    }
}
