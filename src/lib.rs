//! Lending Catalog Core Library
//!
//! Tracks circulating items (books, audio items, periodicals) in a lending
//! catalog: registering items, lending them to borrowers for a parsed
//! duration, accepting returns, and assessing late fines. The presentation
//! layer (HTTP, rendering, persistence) lives outside this crate and
//! consumes the [`Catalog`] API.

pub mod catalog;
pub mod config;
pub mod duration;
pub mod error;
pub mod lending;

// Re-export commonly used types for convenience
pub use catalog::{
    AudioItem, Book, BorrowReceipt, Catalog, CatalogItem, ItemId, ItemKind, ItemType, Periodical,
    Playable, ReturnReceipt,
};
pub use config::CatalogConfig;
pub use duration::{parse_duration_to_days, DurationParseError};
pub use error::CatalogError;
pub use lending::{BorrowerId, FineLedger, FinePolicy, LendingRecord};
