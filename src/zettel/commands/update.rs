use crate::commands::{CardUpdate, CmdMessage, CmdResult};
use crate::error::Result;
use crate::hierarchy::parent_of;
use crate::identifier::normalize_card_id;
use crate::index::{CardIndex, CardSelector};
use crate::model::{Card, CardPk};
use crate::references::backlinks_of;
use crate::store::CardStore;
use chrono::Utc;

use super::helpers::{duplicate_warning, load_index, select_card};

pub fn run<S: CardStore>(
    store: &mut S,
    selector: &CardSelector,
    update: CardUpdate,
) -> Result<CmdResult> {
    let index = load_index(store)?;
    let current = select_card(&index, selector)?;
    let mut result = CmdResult::default();

    if update.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update"));
        return Ok(result);
    }

    let mut card = current.clone();
    if let Some(title) = update.title {
        card.title = title;
    }
    if let Some(body) = update.body {
        card.body = body;
    }

    if let Some(new_id) = update.card_id.as_deref().map(normalize_card_id) {
        if new_id != card.card_id {
            let stale = backlinks_of(current, &index).len();
            if stale > 0 {
                result.add_message(CmdMessage::warning(format!(
                    "{} card(s) still link to [{}]",
                    stale, current.card_id
                )));
            }
            if let Some(warning) = duplicate_warning(&index, &new_id, Some(card.id)) {
                result.add_message(warning);
            }

            card.card_id = new_id;
            card.parent_id = Some(chosen_parent(current, &index).unwrap_or(card.id));
        }
    }

    card.updated_at = Some(Utc::now());
    store.save_card(&card)?;

    result.add_message(CmdMessage::success(format!("Updated card #{}", card.id)));
    Ok(result.with_affected_cards(vec![card]))
}

/// The stored parent, if the user chose it. A stored parent that the old
/// identifier's prefix would give anyway is treated as derived.
fn chosen_parent(card: &Card, index: &CardIndex) -> Option<CardPk> {
    let explicit = card.explicit_parent()?;
    let mut by_prefix = card.clone();
    by_prefix.parent_id = None;
    let derived = parent_of(&by_prefix, index).map(|p| p.id);
    (derived != Some(explicit)).then_some(explicit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn updates_title_and_body() {
        let mut fixture = StoreFixture::new().with_card("A1", "old");
        let update = CardUpdate {
            title: Some("new".into()),
            body: Some("see [A1]".into()),
            ..Default::default()
        };
        run(&mut fixture.store, &CardSelector::Pk(1), update).unwrap();

        let card = fixture.store.get_card(1).unwrap();
        assert_eq!(card.title, "new");
        assert_eq!(card.body, "see [A1]");
        assert_eq!(card.card_id, "A1");
        assert!(card.updated_at.is_some());
    }

    #[test]
    fn renaming_moves_the_card_and_warns_about_links() {
        let mut fixture = StoreFixture::new()
            .with_card("A1", "a")
            .with_card("B1", "b")
            .with_linking_card("C1", "c", "points at [A1]");
        let update = CardUpdate {
            card_id: Some("B1 / 1".into()),
            ..Default::default()
        };
        let result = run(
            &mut fixture.store,
            &CardSelector::CardId("A1".into()),
            update,
        )
        .unwrap();

        let card = &result.affected_cards[0];
        assert_eq!(card.card_id, "B1/1");
        assert_eq!(card.parent_id, Some(1));
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("[A1]"));

        let index = load_index(&fixture.store).unwrap();
        let moved = index.get_by_pk(1).unwrap();
        assert_eq!(parent_of(moved, &index).map(|p| p.id), Some(2));
    }

    #[test]
    fn renaming_a_parent_releases_its_children() {
        let mut fixture = StoreFixture::new();
        create::run(&mut fixture.store, "A1", "a".into(), "".into(), None).unwrap();
        create::run(&mut fixture.store, "A1/1", "b".into(), "".into(), None).unwrap();
        let update = CardUpdate {
            card_id: Some("Z9".into()),
            ..Default::default()
        };
        run(&mut fixture.store, &CardSelector::CardId("A1".into()), update).unwrap();

        let index = load_index(&fixture.store).unwrap();
        let orphan = index.get("A1/1").unwrap();
        assert!(parent_of(orphan, &index).is_none());
        assert_eq!(fixture.store.get_card(1).unwrap().parent_id, Some(1));
    }

    #[test]
    fn renaming_keeps_a_chosen_parent_and_drops_a_derived_one() {
        let mut fixture = StoreFixture::new()
            .with_card("A1", "a")
            .with_card("B1", "b")
            .with_card("A1/1", "chosen")
            .with_card("A1/2", "derived");
        for (pk, parent) in [(3, 2), (4, 1)] {
            let mut card = fixture.store.get_card(pk).unwrap();
            card.parent_id = Some(parent);
            fixture.store.save_card(&card).unwrap();
        }
        for (from, to) in [("A1/1", "C1"), ("A1/2", "C2")] {
            let update = CardUpdate {
                card_id: Some(to.into()),
                ..Default::default()
            };
            run(&mut fixture.store, &CardSelector::CardId(from.into()), update).unwrap();
        }

        assert_eq!(fixture.store.get_card(3).unwrap().parent_id, Some(2));
        assert_eq!(fixture.store.get_card(4).unwrap().parent_id, Some(4));
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut fixture = StoreFixture::new().with_card("A1", "a");
        let result = run(&mut fixture.store, &CardSelector::Pk(1), CardUpdate::default()).unwrap();
        assert!(result.affected_cards.is_empty());
        assert!(fixture.store.get_card(1).unwrap().updated_at.is_none());
    }
}
