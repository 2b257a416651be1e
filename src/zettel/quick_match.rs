//! # Quick Match: autocomplete while authoring links
//!
//! While a user types an identifier into a "link to…" field, [`quick_match`] is run
//! on every keystroke against the loaded [`CardIndex`]. It never touches the
//! network and never blocks.
//!
//! ## Ranking
//!
//! 1. A card whose `card_id` equals the term exactly (case-sensitive) comes first.
//! 2. Then every card whose `card_id` starts with the term, or whose title contains
//!    it (both case-insensitive), in snapshot order.
//! 3. Duplicates by `card_id` are dropped, keeping the first occurrence, so the
//!    exact hit is not repeated.
//! 4. The list is cut to `limit` entries ([`DEFAULT_LIMIT`] is 5).
//!
//! An empty term matches nothing; there is no "browse everything" mode.
//!
//! ## The link input state machine
//!
//! [`LinkInput`] models one text field with link autocomplete:
//!
//! ```text
//!   Idle ──type──▶ Searching ──Enter on exact id / pick a result──▶ (selected) ──▶ Idle
//!    ▲                 │
//!    └────clear────────┘
//! ```
//!
//! Enter only selects a result whose identifier equals the typed term. Anything
//! else is a no-op, so a half-typed id never silently links the top suggestion.

use crate::index::CardIndex;
use crate::model::Card;
use crate::references::references_target;

pub const DEFAULT_LIMIT: usize = 5;

pub fn quick_match<'a>(term: &str, index: &'a CardIndex, limit: usize) -> Vec<&'a Card> {
    if term.is_empty() {
        return Vec::new();
    }

    let term_lower = term.to_lowercase();
    let exact = index.iter().find(|card| card.card_id == term);
    let partial = index.iter().filter(|card| {
        card.card_id.to_lowercase().starts_with(&term_lower)
            || card.title.to_lowercase().contains(&term_lower)
    });

    let mut results: Vec<&Card> = Vec::with_capacity(limit);
    for card in exact.into_iter().chain(partial) {
        if results.len() == limit {
            break;
        }
        if results.iter().any(|seen| seen.card_id == card.card_id) {
            continue;
        }
        results.push(card);
    }
    results
}

/// The result Enter would select: only an exact identifier match.
pub fn exact_selection<'a>(term: &str, results: &[&'a Card]) -> Option<&'a Card> {
    if term.is_empty() {
        return None;
    }
    results.iter().copied().find(|card| card.card_id == term)
}

/// Text spliced into a body when a card is picked.
pub fn reference_snippet(card: &Card) -> String {
    format!("\n\n[{}] - {}", card.card_id, card.title)
}

/// Appends a reference to `card`, unless `body` already links to it or the card
/// has no identifier to link by.
pub fn append_reference(body: &str, card: &Card) -> Option<String> {
    if card.is_unsorted() || references_target(body, &card.card_id) {
        return None;
    }
    Some(format!("{}{}", body, reference_snippet(card)))
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LinkInputState {
    #[default]
    Idle,
    Searching {
        term: String,
        results: Vec<Card>,
    },
}

#[derive(Debug, Clone)]
pub struct LinkInput {
    limit: usize,
    state: LinkInputState,
}

impl Default for LinkInput {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl LinkInput {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            state: LinkInputState::Idle,
        }
    }

    pub fn state(&self) -> &LinkInputState {
        &self.state
    }

    pub fn term(&self) -> &str {
        match &self.state {
            LinkInputState::Idle => "",
            LinkInputState::Searching { term, .. } => term,
        }
    }

    pub fn results(&self) -> &[Card] {
        match &self.state {
            LinkInputState::Idle => &[],
            LinkInputState::Searching { results, .. } => results,
        }
    }

    /// Replaces the field text and recomputes suggestions synchronously.
    pub fn input(&mut self, text: &str, index: &CardIndex) -> &[Card] {
        self.state = if text.is_empty() {
            LinkInputState::Idle
        } else {
            LinkInputState::Searching {
                term: text.to_string(),
                results: quick_match(text, index, self.limit)
                    .into_iter()
                    .cloned()
                    .collect(),
            }
        };
        self.results()
    }

    /// Enter: selects the result matching the term exactly, if any.
    pub fn enter(&mut self) -> Option<Card> {
        let term = self.term();
        let position = self
            .results()
            .iter()
            .position(|card| !term.is_empty() && card.card_id == term)?;
        self.take(position)
    }

    /// Explicit pick of a listed suggestion (e.g. a click in the dropdown).
    pub fn choose(&mut self, position: usize) -> Option<Card> {
        if position >= self.results().len() {
            return None;
        }
        self.take(position)
    }

    pub fn clear(&mut self) {
        self.state = LinkInputState::Idle;
    }

    fn take(&mut self, position: usize) -> Option<Card> {
        match std::mem::take(&mut self.state) {
            LinkInputState::Searching { mut results, .. } => Some(results.swap_remove(position)),
            LinkInputState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.card_id.clone()).collect()
    }

    fn index() -> CardIndex {
        CardIndex::new(vec![
            Card::new(1, "AB12", "Alpha"),
            Card::new(2, "AB1", "Zeta"),
            Card::new(3, "XY9", "About AB1 things"),
            Card::new(4, "ab100", "lowercase"),
        ])
    }

    #[test]
    fn exact_match_comes_first() {
        let index = index();
        let results = quick_match("AB1", &index, DEFAULT_LIMIT);
        assert_eq!(ids(&results), vec!["AB1", "AB12", "XY9", "ab100"]);
    }

    #[test]
    fn exact_hit_is_not_repeated() {
        let index = CardIndex::new(vec![
            Card::new(1, "AB1", "Zeta AB1"),
            Card::new(2, "AB12", "Alpha"),
        ]);
        let results = quick_match("AB1", &index, DEFAULT_LIMIT);
        assert_eq!(ids(&results), vec!["AB1", "AB12"]);
    }

    #[test]
    fn matches_titles_case_insensitively() {
        let index = index();
        assert_eq!(ids(&quick_match("alp", &index, 5)), vec!["AB12"]);
        assert_eq!(ids(&quick_match("THINGS", &index, 5)), vec!["XY9"]);
    }

    #[test]
    fn empty_term_matches_nothing() {
        let index = index();
        assert!(quick_match("", &index, 5).is_empty());
        assert!(quick_match("AB", &CardIndex::default(), 5).is_empty());
    }

    #[test]
    fn respects_limit() {
        let index = index();
        assert_eq!(quick_match("a", &index, 2).len(), 2);
        assert!(quick_match("a", &index, 0).is_empty());
    }

    #[test]
    fn enter_selects_exact_only() {
        let index = index();
        let results = quick_match("AB", &index, 5);
        assert!(exact_selection("AB", &results).is_none());

        let results = quick_match("AB12", &index, 5);
        assert_eq!(exact_selection("AB12", &results).map(|c| c.id), Some(1));
    }

    #[test]
    fn link_input_walks_through_states() {
        let index = index();
        let mut input = LinkInput::default();
        assert_eq!(input.state(), &LinkInputState::Idle);

        input.input("AB", &index);
        assert!(matches!(input.state(), LinkInputState::Searching { .. }));
        // AB12, AB1, XY9 (by title), ab100
        assert_eq!(input.results().len(), 4);

        // not an exact id: Enter does nothing
        assert!(input.enter().is_none());
        assert_eq!(input.term(), "AB");

        input.input("AB1", &index);
        let picked = input.enter().unwrap();
        assert_eq!(picked.card_id, "AB1");
        assert_eq!(input.state(), &LinkInputState::Idle);
    }

    #[test]
    fn link_input_choose_and_clear() {
        let index = index();
        let mut input = LinkInput::new(5);
        input.input("ab", &index);
        assert!(input.choose(10).is_none());
        let picked = input.choose(1).unwrap();
        assert_eq!(picked.card_id, "AB1");
        assert_eq!(input.state(), &LinkInputState::Idle);

        input.input("ab", &index);
        input.clear();
        assert!(input.results().is_empty());
        input.input("", &index);
        assert_eq!(input.state(), &LinkInputState::Idle);
    }

    #[test]
    fn appends_reference_once() {
        let target = Card::new(9, "SP3/2", "Target");
        let body = append_reference("Intro", &target).unwrap();
        assert_eq!(body, "Intro\n\n[SP3/2] - Target");
        assert!(append_reference(&body, &target).is_none());
        assert!(append_reference("x", &Card::new(1, "", "loose")).is_none());
    }
}
