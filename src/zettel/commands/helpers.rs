use crate::commands::CmdMessage;
use crate::error::{Result, ZettelError};
use crate::index::{CardIndex, CardSelector};
use crate::model::{Card, CardPk};
use crate::store::CardStore;

pub fn load_index<S: CardStore>(store: &S) -> Result<CardIndex> {
    Ok(CardIndex::new(store.list_cards()?))
}

pub fn select_card<'a>(index: &'a CardIndex, selector: &CardSelector) -> Result<&'a Card> {
    index
        .select(selector)
        .ok_or_else(|| ZettelError::CardNotFound(selector.to_string()))
}

/// Resolves every selector, failing on the first one that matches nothing.
pub fn cards_by_selectors<'a>(
    index: &'a CardIndex,
    selectors: &[CardSelector],
) -> Result<Vec<&'a Card>> {
    selectors
        .iter()
        .map(|selector| select_card(index, selector))
        .collect()
}

/// Identifiers are advisory-unique: a clash is reported, never refused.
pub fn duplicate_warning(
    index: &CardIndex,
    card_id: &str,
    except: Option<CardPk>,
) -> Option<CmdMessage> {
    if index.is_card_id_unique(card_id, except) {
        return None;
    }
    Some(CmdMessage::warning(format!(
        "Card id [{}] is already used by another card",
        card_id
    )))
}
