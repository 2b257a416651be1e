use super::CardStore;
use crate::error::{Result, ZettelError};
use crate::model::{Card, CardPk};

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    cards: Vec<Card>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl CardStore for InMemoryStore {
    fn list_cards(&self) -> Result<Vec<Card>> {
        Ok(self.cards.clone())
    }

    fn get_card(&self, pk: CardPk) -> Result<Card> {
        self.cards
            .iter()
            .find(|c| c.id == pk)
            .cloned()
            .ok_or_else(|| ZettelError::CardNotFound(format!("#{}", pk)))
    }

    fn save_card(&mut self, card: &Card) -> Result<()> {
        match self.cards.iter_mut().find(|c| c.id == card.id) {
            Some(existing) => *existing = card.clone(),
            None => self.cards.push(card.clone()),
        }
        Ok(())
    }

    fn delete_card(&mut self, pk: CardPk) -> Result<()> {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != pk);
        if self.cards.len() == before {
            return Err(ZettelError::CardNotFound(format!("#{}", pk)));
        }
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        fn push(mut self, card: Card) -> Self {
            let pk = self.store.next_pk().unwrap();
            let mut card = card;
            card.id = pk;
            self.store.save_card(&card).unwrap();
            self
        }

        pub fn with_card(self, card_id: &str, title: &str) -> Self {
            self.push(Card::new(0, card_id, title))
        }

        pub fn with_linking_card(self, card_id: &str, title: &str, body: &str) -> Self {
            self.push(Card::new(0, card_id, title).with_body(body))
        }

        /// A small Zettelkasten: one branch, a reference card and a loose note.
        pub fn with_sample_collection(self) -> Self {
            self.with_linking_card("SP3", "Spaced practice", "Builds on [REF014].")
                .with_linking_card("SP3/1", "Intervals", "Extends [SP3].")
                .with_card("SP3/1/2", "Expanding intervals")
                .with_card("SP3.2", "Interleaving")
                .with_linking_card("REF014", "Ebbinghaus 1885", "Cited by [SP3/1] and [MISSING].")
                .with_linking_card("", "Loose thought", "Maybe relates to [SP3/1/2]")
        }
    }
}
