//! Lendable item models.
//!
//! Items come in a closed set of kinds (books, audio items, periodicals),
//! each carrying kind-specific attributes next to the shared id / title /
//! author / availability fields.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a catalog item.
pub type ItemId = u64;

/// Capability of items that carry a playable recording.
pub trait Playable {
    /// Total playback time of the recording, in minutes.
    fn playback_minutes(&self) -> u32;
}

/// Book-specific attributes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub page_count: u32,
}

/// Audio-item-specific attributes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AudioItem {
    pub playback_minutes: u32,
}

impl Playable for AudioItem {
    fn playback_minutes(&self) -> u32 {
        self.playback_minutes
    }
}

/// Periodical-specific attributes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Periodical {
    pub issue_number: u32,
    /// Set by archiving; has no effect on availability.
    #[serde(default)]
    pub archived: bool,
}

/// Kind-specific payload of a catalog item.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    Book(Book),
    AudioItem(AudioItem),
    Periodical(Periodical),
}

impl ItemKind {
    /// The discriminant naming this kind.
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Book(_) => ItemType::Book,
            ItemKind::AudioItem(_) => ItemType::AudioItem,
            ItemKind::Periodical(_) => ItemType::Periodical,
        }
    }
}

/// Discriminant for the closed set of item kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Book,
    AudioItem,
    Periodical,
}

impl ItemType {
    /// Canonical lowercase name, as accepted by type search.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Book => "book",
            ItemType::AudioItem => "audio_item",
            ItemType::Periodical => "periodical",
        }
    }

    /// Parse a type name, case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "book" => Some(ItemType::Book),
            "audio_item" | "audioitem" | "audio" => Some(ItemType::AudioItem),
            "periodical" => Some(ItemType::Periodical),
            _ => None,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lendable item tracked by the catalog.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub title: String,
    pub author: String,
    /// True iff no active loan references this item.
    pub available: bool,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl CatalogItem {
    /// Create a new item. Items enter the catalog available.
    pub fn new(id: ItemId, title: &str, author: &str, kind: ItemKind) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            available: true,
            kind,
        }
    }

    /// Convenience constructor for a book.
    pub fn book(id: ItemId, title: &str, author: &str, page_count: u32) -> Self {
        Self::new(id, title, author, ItemKind::Book(Book { page_count }))
    }

    /// Convenience constructor for an audio item.
    pub fn audio_item(id: ItemId, title: &str, author: &str, playback_minutes: u32) -> Self {
        Self::new(
            id,
            title,
            author,
            ItemKind::AudioItem(AudioItem { playback_minutes }),
        )
    }

    /// Convenience constructor for a periodical. New issues start
    /// unarchived.
    pub fn periodical(id: ItemId, title: &str, author: &str, issue_number: u32) -> Self {
        Self::new(
            id,
            title,
            author,
            ItemKind::Periodical(Periodical {
                issue_number,
                archived: false,
            }),
        )
    }

    /// The discriminant naming this item's kind.
    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    /// Access the playable capability, if this item has one.
    pub fn as_playable(&self) -> Option<&dyn Playable> {
        match &self.kind {
            ItemKind::AudioItem(audio) => Some(audio),
            _ => None,
        }
    }
}
