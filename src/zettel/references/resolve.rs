//! Resolution of reference tokens against a card snapshot.

use std::collections::HashSet;

use tracing::debug;

use super::scan::{scan_references, ReferenceToken};
use crate::index::CardIndex;
use crate::model::Card;
use crate::ordering::{sort_card_refs, SortDirection};

/// Outcome of looking a token up. Unresolved is a normal result, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<'a> {
    Resolved(&'a Card),
    Unresolved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedReference<'a> {
    pub token: ReferenceToken,
    pub resolution: Resolution<'a>,
}

impl<'a> ResolvedReference<'a> {
    pub fn card(&self) -> Option<&'a Card> {
        match self.resolution {
            Resolution::Resolved(card) => Some(card),
            Resolution::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }
}

/// Exact identifier lookup. There is deliberately no fuzzy fallback here.
pub fn resolve_reference<'a>(
    token: &ReferenceToken,
    index: &'a CardIndex,
) -> ResolvedReference<'a> {
    let resolution = match index.get(&token.target) {
        Some(card) => Resolution::Resolved(card),
        None => Resolution::Unresolved,
    };
    ResolvedReference {
        token: token.clone(),
        resolution,
    }
}

/// Scans `body` and resolves every token, in order of appearance.
pub fn resolve_all<'a>(body: &str, index: &'a CardIndex) -> Vec<ResolvedReference<'a>> {
    let resolved: Vec<_> = scan_references(body)
        .iter()
        .map(|token| resolve_reference(token, index))
        .collect();
    debug!(
        tokens = resolved.len(),
        unresolved = resolved.iter().filter(|r| !r.is_resolved()).count(),
        "resolved body references"
    );
    resolved
}

/// Cards that `card`'s body links to, first mention first, without repeats.
pub fn direct_links<'a>(card: &Card, index: &'a CardIndex) -> Vec<&'a Card> {
    let mut seen = HashSet::new();
    resolve_all(&card.body, index)
        .into_iter()
        .filter_map(|r| r.card())
        .filter(|target| seen.insert(target.id))
        .collect()
}

/// Every other card whose body holds a token resolving to `card`, ascending.
pub fn backlinks_of<'a>(card: &Card, index: &'a CardIndex) -> Vec<&'a Card> {
    if card.is_unsorted() {
        return Vec::new();
    }

    let mut sources: Vec<&Card> = index
        .iter()
        .filter(|source| source.id != card.id && source.card_id != card.card_id)
        .filter(|source| {
            resolve_all(&source.body, index)
                .iter()
                .any(|r| r.card().is_some_and(|target| target.id == card.id))
        })
        .collect();
    sort_card_refs(&mut sources, SortDirection::Ascending);
    sources
}

/// Direct links and backlinks together, unique by identifier, descending.
///
/// This is the combined "references" list shown next to a card.
pub fn references_of<'a>(card: &Card, index: &'a CardIndex) -> Vec<&'a Card> {
    let mut seen = HashSet::new();
    let mut links: Vec<&Card> = direct_links(card, index)
        .into_iter()
        .chain(backlinks_of(card, index))
        .filter(|linked| seen.insert(linked.card_id.clone()))
        .collect();
    sort_card_refs(&mut links, SortDirection::Descending);
    links
}
