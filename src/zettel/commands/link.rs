use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::CardSelector;
use crate::quick_match::{append_reference, LinkInput};
use crate::store::CardStore;
use chrono::Utc;

use super::helpers::{load_index, select_card};

/// Adds a reference to a matching card at the end of `source`'s body.
///
/// `term` goes through quick match. Without `pick`, only a card whose
/// identifier equals `term` is linked (the Enter rule). `pick` is a 1-based
/// position in the suggestion list.
pub fn run<S: CardStore>(
    store: &mut S,
    source: &CardSelector,
    term: &str,
    pick: Option<usize>,
    limit: usize,
) -> Result<CmdResult> {
    let index = load_index(store)?;
    let source = select_card(&index, source)?;
    let mut result = CmdResult::default();

    let mut input = LinkInput::new(limit);
    let candidates = input.input(term, &index).to_vec();
    let selected = match pick {
        Some(position) if position > 0 => input.choose(position - 1),
        Some(_) => None,
        None => input.enter(),
    };

    let Some(target) = selected else {
        if candidates.is_empty() {
            result.add_message(CmdMessage::warning(format!("No cards match '{}'", term)));
        } else if let Some(position) = pick {
            result.add_message(CmdMessage::error(format!(
                "No suggestion at position {} (there are {})",
                position,
                candidates.len()
            )));
        } else {
            result.add_message(CmdMessage::warning(format!(
                "No card is identified exactly by '{}'. Choose one with --pick:",
                term
            )));
        }
        return Ok(result.with_listed_cards(candidates));
    };

    if target.id == source.id {
        result.add_message(CmdMessage::warning("A card cannot link to itself"));
        return Ok(result);
    }

    if target.is_unsorted() {
        result.add_message(CmdMessage::warning(format!(
            "Card #{} ({}) has no card id to link by",
            target.id, target.title
        )));
        return Ok(result);
    }

    let Some(body) = append_reference(&source.body, &target) else {
        result.add_message(CmdMessage::info(format!(
            "Card #{} already links to [{}]",
            source.id, target.card_id
        )));
        return Ok(result);
    };

    let mut card = source.clone();
    card.body = body;
    card.updated_at = Some(Utc::now());
    store.save_card(&card)?;

    result.add_message(CmdMessage::success(format!(
        "Linked #{} to [{}] - {}",
        card.id, target.card_id, target.title
    )));
    Ok(result.with_affected_cards(vec![card]))
}
