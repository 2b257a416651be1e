//! # Natural Ordering of Card Identifiers
//!
//! Every list of cards (sidebar, search results, children, references) is ordered
//! with [`compare_identifiers`]. Listing code must go through this module rather than
//! sorting on `card_id` directly, otherwise two views of the same cards disagree.
//!
//! ## Rules
//!
//! Segments (see [`crate::identifier`]) are compared pairwise:
//!
//! - both numeric: by integer value, so `A9 < A10`. Values of any length compare
//!   correctly; nothing is parsed into a fixed-width integer.
//! - otherwise: case-sensitive ordering of the segment text.
//!
//! The first difference decides. When one identifier is a segment-wise prefix of
//! the other, the shorter one sorts first. Identifiers that still tie (only
//! possible with leading zeros, `A01` vs `A1`) fall back to their raw text so the
//! order stays total and deterministic.
//!
//! [`SortDirection::Descending`] negates the final result; it never changes which
//! segments are compared.

use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};

use crate::identifier::{CardIdentifier, Segment};
use crate::model::Card;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(format!("Invalid sort direction: {}", other)),
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

pub fn compare_identifiers(
    a: &CardIdentifier,
    b: &CardIdentifier,
    direction: SortDirection,
) -> Ordering {
    direction.apply(natural_cmp(a, b))
}

/// Convenience for callers holding raw strings.
pub fn compare_card_ids(a: &str, b: &str, direction: SortDirection) -> Ordering {
    compare_identifiers(&CardIdentifier::parse(a), &CardIdentifier::parse(b), direction)
}

fn natural_cmp(a: &CardIdentifier, b: &CardIdentifier) -> Ordering {
    for (sa, sb) in a.segments().iter().zip(b.segments()) {
        let ord = compare_segments(sa, sb);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a.segments()
        .len()
        .cmp(&b.segments().len())
        .then_with(|| a.raw().cmp(b.raw()))
}

fn compare_segments(a: &Segment, b: &Segment) -> Ordering {
    if a.is_numeric() && b.is_numeric() {
        compare_digit_runs(&a.value, &b.value)
    } else {
        a.value.cmp(&b.value)
    }
}

/// Compares two ASCII digit strings by numeric value.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sorts cards in place by identifier. Identifiers are parsed once per card.
pub fn sort_cards(cards: &mut [Card], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => cards.sort_by_cached_key(|card| OrderKey(card.identifier())),
        SortDirection::Descending => {
            cards.sort_by_cached_key(|card| Reverse(OrderKey(card.identifier())))
        }
    }
}

/// Sorts borrowed cards the same way [`sort_cards`] does.
pub fn sort_card_refs(cards: &mut [&Card], direction: SortDirection) {
    match direction {
        SortDirection::Ascending => cards.sort_by_cached_key(|card| OrderKey(card.identifier())),
        SortDirection::Descending => {
            cards.sort_by_cached_key(|card| Reverse(OrderKey(card.identifier())))
        }
    }
}

pub fn sort_card_ids<S: AsRef<str>>(ids: &mut [S], direction: SortDirection) {
    ids.sort_by(|a, b| compare_card_ids(a.as_ref(), b.as_ref(), direction));
}

/// Wraps an identifier so it can be used as a sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderKey(CardIdentifier);

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
