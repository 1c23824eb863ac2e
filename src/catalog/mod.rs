mod catalog;
mod item;

pub use catalog::{BorrowReceipt, Catalog, ReturnReceipt};
pub use item::{AudioItem, Book, CatalogItem, ItemId, ItemKind, ItemType, Periodical, Playable};
