//! Common test infrastructure
//!
//! Shared fixtures for the integration tests. Tests should only import
//! from this module.

use lending_catalog::{Catalog, CatalogItem};

pub const DUNE_ID: u64 = 1;
pub const DUNE_TITLE: &str = "Dune";
pub const DUNE_AUDIO_ID: u64 = 2;
pub const HYPERION_ID: u64 = 3;
pub const ANALOG_ID: u64 = 4;

pub const BORROWER_7: u64 = 7;
pub const BORROWER_9: u64 = 9;

/// A catalog seeded with one item of each kind plus a second book.
pub fn seeded_catalog() -> Catalog {
    let catalog = Catalog::default();
    catalog
        .add_item(CatalogItem::book(DUNE_ID, DUNE_TITLE, "Frank Herbert", 412))
        .unwrap();
    catalog
        .add_item(CatalogItem::audio_item(
            DUNE_AUDIO_ID,
            "Dune (Unabridged)",
            "Frank Herbert",
            1266,
        ))
        .unwrap();
    catalog
        .add_item(CatalogItem::book(HYPERION_ID, "Hyperion", "Dan Simmons", 482))
        .unwrap();
    catalog
        .add_item(CatalogItem::periodical(ANALOG_ID, "Analog", "Various", 7))
        .unwrap();
    catalog
}
