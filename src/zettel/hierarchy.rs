//! # Card Hierarchy
//!
//! There is no stored tree. Parent/child relations are derived from identifiers,
//! the same way a reader of `SP3/1/2` knows it sits under `SP3/1`:
//!
//! - `B` is a child of `A` when `B.card_id` starts with `A.card_id` immediately
//!   followed by a separator (`/` or `.`, interchangeable).
//! - Only the **closest** ancestor counts: with `SP3`, `SP3/1` and `SP3/1/2` loaded,
//!   `SP3/1/2` is a child of `SP3/1`, not of `SP3`.
//! - An explicit `parent_id` on the record takes precedence when it names another
//!   card present in the snapshot. Otherwise the longest matching prefix wins.
//! - Cards with an empty identifier are never parents or children. They form the
//!   unsorted bucket.
//!
//! A card whose identifier has no separator is a *potential* root; it is a true
//! root unless some other card resolves as its parent (possible only through an
//! explicit `parent_id`, or for identifiers like `A.1` whose prefix exists).
//!
//! Every function here is pure over a [`CardIndex`] snapshot and returns cards
//! borrowed from it, pre-sorted with [`crate::ordering`].

use std::collections::{HashMap, HashSet};

use crate::index::CardIndex;
use crate::model::{Card, CardPk};
use crate::ordering::{compare_card_ids, sort_card_refs, SortDirection};

/// The closest ancestor of `card` within `index`.
pub fn parent_of<'a>(card: &Card, index: &'a CardIndex) -> Option<&'a Card> {
    if card.is_unsorted() {
        return None;
    }

    if let Some(parent) = card
        .explicit_parent()
        .and_then(|pk| index.get_by_pk(pk))
        .filter(|parent| parent.id != card.id && !parent.is_unsorted())
    {
        return Some(parent);
    }

    card.identifier()
        .ancestors()
        .find_map(|prefix| index.get(prefix))
        .filter(|parent| parent.id != card.id)
}

/// Direct children of `card`, ascending.
///
/// `card` is matched by primary key, so it must come from the same snapshot.
pub fn children_of<'a>(card: &Card, index: &'a CardIndex) -> Vec<&'a Card> {
    children_of_sorted(card, index, SortDirection::Ascending)
}

pub fn children_of_sorted<'a>(
    card: &Card,
    index: &'a CardIndex,
    direction: SortDirection,
) -> Vec<&'a Card> {
    if card.is_unsorted() {
        return Vec::new();
    }

    let mut children: Vec<&Card> = index
        .iter()
        .filter(|candidate| candidate.id != card.id)
        .filter(|candidate| parent_of(candidate, index).is_some_and(|p| p.id == card.id))
        .collect();
    sort_card_refs(&mut children, direction);
    children
}

/// Cards with an identifier and no parent, ascending.
pub fn roots(index: &CardIndex) -> Vec<&Card> {
    let mut roots: Vec<&Card> = index
        .iter()
        .filter(|card| !card.is_unsorted() && parent_of(card, index).is_none())
        .collect();
    sort_card_refs(&mut roots, SortDirection::Ascending);
    roots
}

/// Cards with an empty identifier, in snapshot order.
pub fn unsorted(index: &CardIndex) -> Vec<&Card> {
    index.iter().filter(|card| card.is_unsorted()).collect()
}

/// All cards below `card`, depth first, each level ascending.
pub fn descendants_of<'a>(card: &Card, index: &'a CardIndex) -> Vec<&'a Card> {
    let forest = build_tree(index);
    let mut out = Vec::new();
    if let Some(node) = forest.find(card.id) {
        node.walk(&mut |n| {
            if n.card.id != card.id {
                if let Some(c) = index.get_by_pk(n.card.id) {
                    out.push(c);
                }
            }
        });
    }
    out
}

/// A card with its sorted children.
#[derive(Debug, Clone, PartialEq)]
pub struct CardNode {
    pub card: Card,
    pub children: Vec<CardNode>,
}

impl CardNode {
    pub fn walk<F: FnMut(&CardNode)>(&self, f: &mut F) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    fn sort(&mut self, direction: SortDirection) {
        sort_nodes(&mut self.children, direction);
    }

    fn find(&self, pk: CardPk) -> Option<&CardNode> {
        if self.card.id == pk {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pk))
    }
}

/// The whole snapshot arranged as a tree, plus the unsorted bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardForest {
    pub roots: Vec<CardNode>,
    pub unsorted: Vec<Card>,
}

impl CardForest {
    pub fn find(&self, pk: CardPk) -> Option<&CardNode> {
        self.roots.iter().find_map(|root| root.find(pk))
    }

    /// Re-sorts every level. [`build_tree`] always produces ascending order.
    pub fn sort(&mut self, direction: SortDirection) {
        sort_nodes(&mut self.roots, direction);
    }

    pub fn len(&self) -> usize {
        let mut count = self.unsorted.len();
        for root in &self.roots {
            root.walk(&mut |_| count += 1);
        }
        count
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty() && self.unsorted.is_empty()
    }
}

fn sort_nodes(nodes: &mut [CardNode], direction: SortDirection) {
    nodes.sort_by(|a, b| compare_card_ids(&a.card.card_id, &b.card.card_id, direction));
    for node in nodes.iter_mut() {
        node.sort(direction);
    }
}

/// Arranges every card of the snapshot into a forest.
///
/// Parents are computed once per card. Explicit `parent_id` values can in
/// principle form a loop that never reaches a root; cards caught in one are
/// attached at the top level instead of being dropped.
pub fn build_tree(index: &CardIndex) -> CardForest {
    let mut by_parent: HashMap<Option<CardPk>, Vec<&Card>> = HashMap::new();
    for card in index.iter().filter(|card| !card.is_unsorted()) {
        let parent = parent_of(card, index).map(|p| p.id);
        by_parent.entry(parent).or_default().push(card);
    }
    for siblings in by_parent.values_mut() {
        sort_card_refs(siblings, SortDirection::Ascending);
    }

    let mut visited = HashSet::new();
    let mut roots: Vec<CardNode> = by_parent
        .get(&None)
        .map(|top| {
            top.iter()
                .filter_map(|card| build_level(card, &by_parent, &mut visited))
                .collect()
        })
        .unwrap_or_default();

    let mut detached: Vec<&Card> = index
        .iter()
        .filter(|card| !card.is_unsorted() && !visited.contains(&card.id))
        .collect();
    sort_card_refs(&mut detached, SortDirection::Ascending);
    for card in detached {
        if let Some(node) = build_level(card, &by_parent, &mut visited) {
            roots.push(node);
        }
    }

    CardForest {
        roots,
        unsorted: unsorted(index).into_iter().cloned().collect(),
    }
}

fn build_level(
    card: &Card,
    by_parent: &HashMap<Option<CardPk>, Vec<&Card>>,
    visited: &mut HashSet<CardPk>,
) -> Option<CardNode> {
    if !visited.insert(card.id) {
        return None;
    }

    let children = by_parent
        .get(&Some(card.id))
        .map(|kids| {
            kids.iter()
                .filter_map(|kid| build_level(kid, by_parent, visited))
                .collect()
        })
        .unwrap_or_default();

    Some(CardNode {
        card: card.clone(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.card_id.clone()).collect()
    }

    fn index_of(ids: &[&str]) -> CardIndex {
        CardIndex::new(
            ids.iter()
                .enumerate()
                .map(|(i, id)| Card::new(i as CardPk + 1, *id, format!("Card {}", id)))
                .collect(),
        )
    }

    #[test]
    fn children_are_closest_descendants_only() {
        let index = index_of(&["SP3/1/2", "SP3", "SP3/1"]);
        let sp3 = index.get("SP3").unwrap();
        assert_eq!(ids(&children_of(sp3, &index)), vec!["SP3/1"]);

        let leaf = index.get("SP3/1/2").unwrap();
        assert_eq!(parent_of(leaf, &index).map(|c| c.card_id.as_str()), Some("SP3/1"));
    }

    #[test]
    fn separators_are_interchangeable() {
        let index = index_of(&["A", "A.1", "A/1", "AB/1"]);
        let a = index.get("A").unwrap();
        assert_eq!(ids(&children_of(a, &index)), vec!["A.1", "A/1"]);
        assert!(parent_of(index.get("AB/1").unwrap(), &index).is_none());
    }

    #[test]
    fn missing_intermediate_falls_back_to_further_ancestor() {
        let index = index_of(&["SP3", "SP3/1/2"]);
        let leaf = index.get("SP3/1/2").unwrap();
        assert_eq!(parent_of(leaf, &index).map(|c| c.card_id.as_str()), Some("SP3"));
    }

    #[test]
    fn children_are_sorted_naturally() {
        let index = index_of(&["B", "B/10", "B/9", "B/1"]);
        let b = index.get("B").unwrap();
        assert_eq!(ids(&children_of(b, &index)), vec!["B/1", "B/9", "B/10"]);
        assert_eq!(
            ids(&children_of_sorted(b, &index, SortDirection::Descending)),
            vec!["B/10", "B/9", "B/1"]
        );
    }

    #[test]
    fn unsorted_cards_stay_out_of_the_hierarchy() {
        let index = CardIndex::new(vec![
            Card::new(1, "", "loose"),
            Card::new(2, "A", "root"),
            Card::new(3, "/x", "odd"),
        ]);
        let loose = index.get_by_pk(1).unwrap();
        assert!(parent_of(loose, &index).is_none());
        assert!(children_of(loose, &index).is_empty());
        assert_eq!(unsorted(&index).len(), 1);
        assert_eq!(ids(&roots(&index)), vec!["/x", "A"]);
    }

    #[test]
    fn explicit_parent_wins_over_prefix() {
        let index = CardIndex::new(vec![
            Card::new(1, "SP3", "a"),
            Card::new(2, "SP3/1", "b"),
            Card::new(3, "SP3/1/2", "c").with_parent(1),
            Card::new(4, "SP3/1/3", "d").with_parent(4),
            Card::new(5, "SP3/1/4", "e").with_parent(999),
        ]);
        let pick = |pk| parent_of(index.get_by_pk(pk).unwrap(), &index).map(|c| c.id);
        assert_eq!(pick(3), Some(1));
        // self-reference and dangling keys fall back to prefix matching
        assert_eq!(pick(4), Some(2));
        assert_eq!(pick(5), Some(2));

        let sp3 = index.get("SP3").unwrap();
        assert_eq!(ids(&children_of(sp3, &index)), vec!["SP3/1", "SP3/1/2"]);
    }

    #[test]
    fn true_roots_depend_on_the_collection() {
        let index = index_of(&["A", "A.1", "B"]);
        assert_eq!(ids(&roots(&index)), vec!["A", "B"]);
    }

    #[test]
    fn builds_sorted_forest() {
        let index = CardIndex::new(vec![
            Card::new(1, "SP10", "a"),
            Card::new(2, "SP9/2", "b"),
            Card::new(3, "SP9", "c"),
            Card::new(4, "", "d"),
            Card::new(5, "SP9/1", "e"),
            Card::new(6, "SP9/1/1", "f"),
        ]);
        let forest = build_tree(&index);

        let top: Vec<_> = forest.roots.iter().map(|n| n.card.card_id.as_str()).collect();
        assert_eq!(top, vec!["SP9", "SP10"]);
        let sp9_kids: Vec<_> = forest.roots[0]
            .children
            .iter()
            .map(|n| n.card.card_id.as_str())
            .collect();
        assert_eq!(sp9_kids, vec!["SP9/1", "SP9/2"]);
        assert_eq!(forest.roots[0].children[0].children[0].card.card_id, "SP9/1/1");
        assert_eq!(forest.unsorted.len(), 1);
        assert_eq!(forest.len(), 6);

        let sp9 = index.get("SP9").unwrap();
        assert_eq!(
            ids(&descendants_of(sp9, &index)),
            vec!["SP9/1", "SP9/1/1", "SP9/2"]
        );
    }

    #[test]
    fn forest_can_be_resorted_descending() {
        let index = index_of(&["A1", "A2", "A1/1", "A1/2"]);
        let mut forest = build_tree(&index);
        forest.sort(SortDirection::Descending);

        let top: Vec<_> = forest.roots.iter().map(|n| n.card.card_id.as_str()).collect();
        assert_eq!(top, vec!["A2", "A1"]);
        let kids: Vec<_> = forest.roots[1]
            .children
            .iter()
            .map(|n| n.card.card_id.as_str())
            .collect();
        assert_eq!(kids, vec!["A1/2", "A1/1"]);
    }

    #[test]
    fn explicit_parent_loops_are_not_dropped() {
        let index = CardIndex::new(vec![
            Card::new(1, "X", "a").with_parent(2),
            Card::new(2, "Y", "b").with_parent(1),
        ]);
        assert!(roots(&index).is_empty());

        let forest = build_tree(&index);
        let mut seen = Vec::new();
        for root in &forest.roots {
            root.walk(&mut |n| seen.push(n.card.id));
        }
        seen.sort();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn empty_index_gives_empty_views() {
        let index = CardIndex::default();
        assert!(roots(&index).is_empty());
        assert_eq!(build_tree(&index), CardForest::default());
    }
}
