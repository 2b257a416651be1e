use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::hierarchy::children_of;
use crate::index::CardSelector;
use crate::references::backlinks_of;
use crate::store::CardStore;
use std::collections::HashSet;

use super::helpers::{cards_by_selectors, load_index};

/// Deletes cards for good. Links pointing at them turn unresolved and children
/// fall back to their next ancestor; both are reported.
pub fn run<S: CardStore>(store: &mut S, selectors: &[CardSelector]) -> Result<CmdResult> {
    let index = load_index(store)?;
    let mut seen = HashSet::new();
    let targets: Vec<_> = cards_by_selectors(&index, selectors)?
        .into_iter()
        .filter(|card| seen.insert(card.id))
        .collect();
    let mut result = CmdResult::default();

    for card in &targets {
        let children = children_of(card, &index).len();
        if children > 0 {
            result.add_message(CmdMessage::warning(format!(
                "[{}] had {} child card(s)",
                card.card_id, children
            )));
        }
        let backlinks = backlinks_of(card, &index).len();
        if backlinks > 0 {
            result.add_message(CmdMessage::warning(format!(
                "{} card(s) link to [{}]; those links are now unresolved",
                backlinks, card.card_id
            )));
        }
    }

    let mut affected = Vec::with_capacity(targets.len());
    for card in targets {
        store.delete_card(card.id)?;
        result.add_message(CmdMessage::success(format!(
            "Deleted card #{}: {}",
            card.id, card.title
        )));
        affected.push(card.clone());
    }

    Ok(result.with_affected_cards(affected))
}
