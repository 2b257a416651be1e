//! # Storage Layer
//!
//! The engine works on a bulk list of cards. Where that list comes from is
//! hidden behind the [`CardStore`] trait, which mirrors what the card backend
//! offers: list everything, fetch one card by primary key, save, delete.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production file-based storage
//!   - All cards in one JSON array (`cards.json` by default), the same shape the
//!     backend's card listing returns
//!   - Unknown card fields survive a load/save cycle
//!
//! - [`memory::InMemoryStore`]: in-memory storage for testing
//!   - No persistence
//!   - Test fixtures behind the `test_utils` feature
//!
//! ## Storage Format
//!
//! ```text
//! .zettel/
//! ├── cards.json     # every card (JSON array)
//! └── config.json    # collection settings
//! ```
//!
//! Stores keep cards in insertion order. That order is the "snapshot order"
//! quick match falls back on, so implementations must not reshuffle it.

use crate::error::Result;
use crate::model::{Card, CardPk};

pub mod fs;
pub mod memory;

pub trait CardStore {
    /// All cards, in storage order
    fn list_cards(&self) -> Result<Vec<Card>>;

    /// Get a card by primary key
    fn get_card(&self, pk: CardPk) -> Result<Card>;

    /// Save a card (create or update, keyed by `card.id`)
    fn save_card(&mut self, card: &Card) -> Result<()>;

    /// Delete a card permanently
    fn delete_card(&mut self, pk: CardPk) -> Result<()>;

    /// Primary key for the next new card.
    fn next_pk(&self) -> Result<CardPk> {
        let max = self.list_cards()?.iter().map(|c| c.id).max().unwrap_or(0);
        Ok(max + 1)
    }
}
