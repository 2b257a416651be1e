use crate::commands::CmdResult;
use crate::error::Result;
use crate::quick_match::quick_match;
use crate::store::CardStore;

use super::helpers::load_index;

/// Quick match over identifiers and titles, the same lookup used while linking.
pub fn run<S: CardStore>(store: &S, term: &str, limit: usize) -> Result<CmdResult> {
    let index = load_index(store)?;
    let listed = quick_match(term, &index, limit)
        .into_iter()
        .cloned()
        .collect();
    Ok(CmdResult::default().with_listed_cards(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn ranks_exact_identifier_first() {
        let fixture = StoreFixture::new()
            .with_card("AB12", "Alpha")
            .with_card("AB1", "Beta")
            .with_card("Q1", "About AB");

        let result = run(&fixture.store, "AB1", 5).unwrap();
        let ids: Vec<_> = result.listed_cards.iter().map(|c| c.card_id.as_str()).collect();
        assert_eq!(ids, vec!["AB1", "AB12"]);

        let result = run(&fixture.store, "ab", 2).unwrap();
        assert_eq!(result.listed_cards.len(), 2);
    }

    #[test]
    fn empty_term_lists_nothing() {
        let fixture = StoreFixture::new().with_sample_collection();
        assert!(run(&fixture.store, "", 5).unwrap().listed_cards.is_empty());
    }
}
