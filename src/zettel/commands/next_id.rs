use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::CardStore;

use super::helpers::load_index;

/// Suggests the identifier for a new top-level card.
pub fn run<S: CardStore>(store: &S) -> Result<CmdResult> {
    let index = load_index(store)?;
    let next = index.next_root_card_id();
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(next.clone()));
    Ok(result.with_next_id(next))
}
