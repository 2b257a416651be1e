use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::references::resolve_all;
use crate::store::CardStore;
use tracing::debug;

use super::helpers::load_index;

/// Consistency report over the whole collection. Nothing here is fatal:
/// duplicates and dangling links are normal states of a growing Zettelkasten.
pub fn run<S: CardStore>(store: &S) -> Result<CmdResult> {
    let index = load_index(store)?;
    let mut result = CmdResult::default();

    for card_id in index.duplicate_card_ids() {
        let holders: Vec<String> = index
            .iter()
            .filter(|card| card.card_id == card_id)
            .map(|card| format!("#{}", card.id))
            .collect();
        result.add_message(CmdMessage::warning(format!(
            "Duplicate card id [{}] on {}",
            card_id,
            holders.join(", ")
        )));
    }

    let mut unresolved_total = 0;
    for card in &index {
        let mut missing: Vec<String> = Vec::new();
        for reference in resolve_all(&card.body, &index) {
            if !reference.is_resolved() && !missing.contains(&reference.token.target) {
                missing.push(reference.token.target);
            }
        }
        if !missing.is_empty() {
            unresolved_total += missing.len();
            result.add_message(CmdMessage::warning(format!(
                "#{} links to unknown card(s): {}",
                card.id,
                missing
                    .iter()
                    .map(|id| format!("[{}]", id))
                    .collect::<Vec<_>>()
                    .join(" ")
            )));
        }

        if let Some(parent) = card.explicit_parent() {
            if index.get_by_pk(parent).is_none() {
                result.add_message(CmdMessage::warning(format!(
                    "#{} names missing parent #{}",
                    card.id, parent
                )));
            }
        }
    }
    debug!(cards = index.len(), unresolved_total, "checked collection");

    if result.messages.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "{} card(s), no problems found",
            index.len()
        )));
    }
    Ok(result)
}
