use crate::commands::CmdResult;
use crate::error::Result;
use crate::hierarchy::{descendants_of, unsorted};
use crate::index::CardSelector;
use crate::model::Card;
use crate::ordering::{sort_cards, SortDirection};
use crate::store::CardStore;

use super::helpers::{load_index, select_card};

#[derive(Debug, Clone, Default)]
pub enum ListFilter {
    #[default]
    All,
    /// Only cards without an identifier
    Unsorted,
    /// Everything below the given card
    Under(CardSelector),
}

pub fn run<S: CardStore>(
    store: &S,
    direction: SortDirection,
    filter: &ListFilter,
) -> Result<CmdResult> {
    let index = load_index(store)?;
    let mut listed: Vec<Card> = match filter {
        ListFilter::All => index.cards().to_vec(),
        ListFilter::Unsorted => unsorted(&index).into_iter().cloned().collect(),
        ListFilter::Under(selector) => {
            let root = select_card(&index, selector)?;
            descendants_of(root, &index).into_iter().cloned().collect()
        }
    };
    sort_cards(&mut listed, direction);

    Ok(CmdResult::default().with_listed_cards(listed))
}
