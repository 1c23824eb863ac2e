mod fines;
mod record;

pub use fines::{FineLedger, FinePolicy};
pub use record::{BorrowerId, LendingRecord};
