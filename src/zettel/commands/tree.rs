use crate::commands::CmdResult;
use crate::error::Result;
use crate::hierarchy::build_tree;
use crate::ordering::SortDirection;
use crate::store::CardStore;

use super::helpers::load_index;

pub fn run<S: CardStore>(store: &S, direction: SortDirection) -> Result<CmdResult> {
    let index = load_index(store)?;
    let mut forest = build_tree(&index);
    if direction == SortDirection::Descending {
        forest.sort(direction);
    }
    Ok(CmdResult::default().with_tree(forest))
}
