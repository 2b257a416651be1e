use crate::commands::{CardView, CmdResult, ViewSegment};
use crate::error::Result;
use crate::hierarchy::{children_of, parent_of};
use crate::index::{CardIndex, CardSelector};
use crate::model::Card;
use crate::references::{backlinks_of, render_segments, resolve_all, BodySegment};
use crate::store::CardStore;

use super::helpers::{cards_by_selectors, load_index};

pub fn run<S: CardStore>(store: &S, selectors: &[CardSelector]) -> Result<CmdResult> {
    let index = load_index(store)?;
    let views = cards_by_selectors(&index, selectors)?
        .into_iter()
        .map(|card| card_view(card, &index))
        .collect();
    Ok(CmdResult::default().with_views(views))
}

pub fn card_view(card: &Card, index: &CardIndex) -> CardView {
    let body = render_segments(&card.body, index)
        .into_iter()
        .map(|segment| match segment {
            BodySegment::Text(text) => ViewSegment::Text(text.to_string()),
            BodySegment::Link { label, card } => ViewSegment::Link {
                label: label.to_string(),
                target: card.id,
            },
        })
        .collect();

    let mut unresolved: Vec<String> = Vec::new();
    for reference in resolve_all(&card.body, index) {
        if !reference.is_resolved() && !unresolved.contains(&reference.token.target) {
            unresolved.push(reference.token.target);
        }
    }

    CardView {
        card: card.clone(),
        parent: parent_of(card, index).cloned(),
        children: children_of(card, index).into_iter().cloned().collect(),
        body,
        unresolved,
        backlinks: backlinks_of(card, index).into_iter().cloned().collect(),
    }
}
