//! # Card Index: the in-memory snapshot
//!
//! All engine operations (hierarchy, resolution, quick match) run against a
//! [`CardIndex`]: an immutable snapshot of the cards currently loaded by the host.
//! The host builds it once per view from a bulk card listing and rebuilds it after
//! creates, edits and deletes. Nothing in the engine mutates it.
//!
//! ## Lookups
//!
//! The index keeps the cards in the order they were supplied (that order is
//! observable: quick match preserves it for equally ranked hits) and two lookup
//! tables:
//!
//! - by `card_id`: the *first* card carrying a given identifier wins. Identifiers
//!   are not guaranteed unique; duplicates are reported by
//!   [`CardIndex::duplicate_card_ids`] as a warning, never rejected.
//! - by primary key.
//!
//! An empty index is valid input everywhere and simply yields empty results.
//!
//! ## Selecting cards from user input
//!
//! [`CardSelector`] is what a user types to name a card: either an identifier
//! (`SP3/2`) or a primary key prefixed with `#` (`#42`). Unsorted cards have no
//! identifier, so the key form is the only way to reach them.

use std::collections::HashMap;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::identifier::CardIdentifier;
use crate::model::{Card, CardPk};

#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: Vec<Card>,
    by_card_id: HashMap<String, usize>,
    by_pk: HashMap<CardPk, usize>,
}

impl CardIndex {
    pub fn new(cards: Vec<Card>) -> Self {
        let mut by_card_id = HashMap::with_capacity(cards.len());
        let mut by_pk = HashMap::with_capacity(cards.len());

        for (pos, card) in cards.iter().enumerate() {
            by_pk.entry(card.id).or_insert(pos);
            if !card.card_id.is_empty() {
                by_card_id.entry(card.card_id.clone()).or_insert(pos);
            }
        }

        debug!(cards = cards.len(), "built card index");
        let index = Self {
            cards,
            by_card_id,
            by_pk,
        };
        for dup in index.duplicate_card_ids() {
            warn!(card_id = %dup, "duplicate card identifier");
        }
        index
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Exact, case-sensitive identifier lookup. The empty identifier never matches.
    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.by_card_id.get(card_id).map(|&pos| &self.cards[pos])
    }

    pub fn get_by_pk(&self, pk: CardPk) -> Option<&Card> {
        self.by_pk.get(&pk).map(|&pos| &self.cards[pos])
    }

    pub fn select(&self, selector: &CardSelector) -> Option<&Card> {
        match selector {
            CardSelector::CardId(card_id) => self.get(card_id),
            CardSelector::Pk(pk) => self.get_by_pk(*pk),
        }
    }

    /// Identifiers carried by more than one card, in first-seen order.
    pub fn duplicate_card_ids(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order = Vec::new();
        for card in &self.cards {
            if card.card_id.is_empty() {
                continue;
            }
            let count = counts.entry(card.card_id.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(card.card_id.as_str());
            }
        }
        order
    }

    /// Whether `card_id` is free to use, ignoring the card with key `except`
    /// (the card being edited). The empty identifier is always unique.
    pub fn is_card_id_unique(&self, card_id: &str, except: Option<CardPk>) -> bool {
        if card_id.is_empty() {
            return true;
        }
        !self
            .cards
            .iter()
            .any(|card| card.card_id == card_id && Some(card.id) != except)
    }

    /// The identifier for a new top-level card: the largest purely numeric
    /// identifier plus one, or `"1"` when there is none.
    pub fn next_root_card_id(&self) -> String {
        let highest = self
            .cards
            .iter()
            .map(|card| card.card_id.as_str())
            .filter(|id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
            .max_by(|a, b| {
                crate::ordering::compare_card_ids(a, b, crate::ordering::SortDirection::Ascending)
            });

        match highest {
            Some(id) => increment_digits(id.trim_start_matches('0')),
            None => "1".to_string(),
        }
    }
}

impl From<Vec<Card>> for CardIndex {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

impl<'a> IntoIterator for &'a CardIndex {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

/// Adds one to a decimal digit string of any length.
fn increment_digits(digits: &str) -> String {
    let mut out: Vec<u8> = digits.bytes().collect();
    for b in out.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return String::from_utf8_lossy(&out).into_owned();
        }
    }
    let mut carried = vec![b'1'];
    carried.extend(out);
    String::from_utf8_lossy(&carried).into_owned()
}

/// A user input naming a single card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CardSelector {
    CardId(String),
    Pk(CardPk),
}

impl std::fmt::Display for CardSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardSelector::CardId(id) => write!(f, "[{}]", id),
            CardSelector::Pk(pk) => write!(f, "#{}", pk),
        }
    }
}

impl FromStr for CardSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix('#') {
            return rest
                .parse()
                .map(CardSelector::Pk)
                .map_err(|_| format!("Invalid card key: {}", s));
        }

        // Accept a pasted reference token as well as a bare identifier.
        let inner = s
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(s);
        let identifier = CardIdentifier::parse(inner);
        if identifier.is_unsorted() {
            return Err("Empty card identifier (use #<key> for unsorted cards)".to_string());
        }
        Ok(CardSelector::CardId(identifier.raw().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CardIndex {
        CardIndex::new(vec![
            Card::new(1, "SP3", "Root"),
            Card::new(2, "SP3/1", "Child"),
            Card::new(3, "", "Loose note"),
            Card::new(4, "SP3", "Duplicate"),
            Card::new(5, "", "Another loose note"),
        ])
    }

    #[test]
    fn first_card_wins_identifier_lookup() {
        let index = sample();
        assert_eq!(index.get("SP3").map(|c| c.id), Some(1));
        assert_eq!(index.get("SP3/1").map(|c| c.id), Some(2));
        assert!(index.get("sp3").is_none());
        assert!(index.get("").is_none());
        assert_eq!(index.get_by_pk(3).map(|c| c.title.as_str()), Some("Loose note"));
    }

    #[test]
    fn reports_duplicates_but_not_empty_ids() {
        let index = sample();
        assert_eq!(index.duplicate_card_ids(), vec!["SP3"]);
    }

    #[test]
    fn uniqueness_ignores_the_edited_card() {
        let index = sample();
        assert!(index.is_card_id_unique("SP4", None));
        assert!(!index.is_card_id_unique("SP3/1", None));
        assert!(index.is_card_id_unique("SP3/1", Some(2)));
        assert!(index.is_card_id_unique("", None));
    }

    #[test]
    fn empty_index_is_valid() {
        let index = CardIndex::default();
        assert!(index.is_empty());
        assert!(index.get("A").is_none());
        assert!(index.duplicate_card_ids().is_empty());
        assert_eq!(index.next_root_card_id(), "1");
    }

    #[test]
    fn next_root_id_uses_numeric_ids_only() {
        let index = CardIndex::new(vec![
            Card::new(1, "9", "a"),
            Card::new(2, "10", "b"),
            Card::new(3, "10/1", "c"),
            Card::new(4, "SP200", "d"),
            Card::new(5, "099", "e"),
        ]);
        assert_eq!(index.next_root_card_id(), "100");
    }

    #[test]
    fn next_root_id_carries() {
        assert_eq!(increment_digits("199"), "200");
        assert_eq!(increment_digits("999"), "1000");
        assert_eq!(increment_digits(""), "1");
    }

    #[test]
    fn parses_selectors() {
        assert_eq!("#12".parse(), Ok(CardSelector::Pk(12)));
        assert_eq!("SP3/2".parse(), Ok(CardSelector::CardId("SP3/2".into())));
        assert_eq!("[SP3/2]".parse(), Ok(CardSelector::CardId("SP3/2".into())));
        assert!("#abc".parse::<CardSelector>().is_err());
        assert!("".parse::<CardSelector>().is_err());
        assert!("[]".parse::<CardSelector>().is_err());
    }

    #[test]
    fn selects_by_either_form() {
        let index = sample();
        let by_pk = index.select(&CardSelector::Pk(5)).unwrap();
        assert_eq!(by_pk.title, "Another loose note");
        let by_id = index.select(&CardSelector::CardId("SP3/1".into())).unwrap();
        assert_eq!(by_id.id, 2);
    }
}
