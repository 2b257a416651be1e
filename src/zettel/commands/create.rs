use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::identifier::normalize_card_id;
use crate::index::CardSelector;
use crate::model::Card;
use crate::store::CardStore;
use chrono::Utc;
use tracing::debug;

use super::helpers::{duplicate_warning, load_index, select_card};

pub fn run<S: CardStore>(
    store: &mut S,
    card_id: &str,
    title: String,
    body: String,
    parent: Option<&CardSelector>,
) -> Result<CmdResult> {
    let index = load_index(store)?;
    let pk = store.next_pk()?;
    let card_id = normalize_card_id(card_id);

    let mut card = Card::new(pk, card_id, title).with_body(body);
    let now = Utc::now();
    card.created_at = Some(now);
    card.updated_at = Some(now);

    // Only a chosen parent is stored. Without one the card records itself,
    // the root marker, and its place comes from the identifier on every read.
    let parent_pk = match parent {
        Some(selector) => select_card(&index, selector)?.id,
        None => pk,
    };
    card.parent_id = Some(parent_pk);

    let mut result = CmdResult::default();
    if let Some(warning) = duplicate_warning(&index, &card.card_id, None) {
        result.add_message(warning);
    }

    store.save_card(&card)?;
    debug!(pk, card_id = %card.card_id, parent = parent_pk, "created card");

    let label = if card.is_unsorted() {
        format!("#{}", pk)
    } else {
        format!("[{}]", card.card_id)
    };
    result.add_message(CmdMessage::success(format!(
        "Created card {}: {}",
        label, card.title
    )));
    Ok(result.with_affected_cards(vec![card]))
}
