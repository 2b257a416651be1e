use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::CardSelector;
use crate::references::references_of;
use crate::store::CardStore;

use super::helpers::{load_index, select_card};

/// Direct links and backlinks of one card, merged and sorted descending.
pub fn run<S: CardStore>(store: &S, selector: &CardSelector) -> Result<CmdResult> {
    let index = load_index(store)?;
    let card = select_card(&index, selector)?;
    let listed: Vec<_> = references_of(card, &index).into_iter().cloned().collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No references to or from {}",
            selector
        )));
    }
    Ok(result.with_listed_cards(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn merges_links_and_backlinks() {
        let fixture = StoreFixture::new().with_sample_collection();
        let result = run(&fixture.store, &CardSelector::CardId("SP3".into())).unwrap();
        let ids: Vec<_> = result.listed_cards.iter().map(|c| c.card_id.as_str()).collect();
        // [REF014] from the body, SP3/1 links back
        assert_eq!(ids, vec!["SP3/1", "REF014"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn isolated_card_reports_nothing() {
        let fixture = StoreFixture::new().with_card("Z9", "alone");
        let result = run(&fixture.store, &CardSelector::CardId("Z9".into())).unwrap();
        assert!(result.listed_cards.is_empty());
        assert_eq!(result.messages.len(), 1);
    }
}
