//! Error types for catalog operations.

use thiserror::Error;

use crate::catalog::{ItemId, ItemType};
use crate::duration::DurationParseError;

/// Errors that can occur during catalog operations.
///
/// All variants are caller-recoverable; a failed operation applies no
/// partial state.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("item {0} already exists in the catalog")]
    DuplicateId(ItemId),

    #[error("item {0} not found")]
    NotFound(ItemId),

    #[error("item {0} is already borrowed")]
    AlreadyBorrowed(ItemId),

    #[error("invalid borrow duration: {0}")]
    InvalidDuration(#[from] DurationParseError),

    #[error("item {0} has no active loan to return")]
    NotReturnable(ItemId),

    #[error("item {id} is a {actual}, expected a {expected}")]
    WrongKind {
        id: ItemId,
        expected: ItemType,
        actual: ItemType,
    },
}
