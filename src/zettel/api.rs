//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single entry
//! point for every zettel operation, whatever UI sits on top.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::*::run`
//! - **Normalizes inputs**: raw strings become [`CardSelector`]s, and the
//!   collection settings (sort direction, quick match limit) are applied
//! - **Returns structured types** (`Result<CmdResult>`), never strings to print
//!
//! Business logic lives in `commands/*.rs`; the engine itself (ordering,
//! hierarchy, references, quick match) is plain functions over a
//! [`crate::index::CardIndex`] and needs no facade at all.
//!
//! `ZettelApi<S: CardStore>` is generic over storage:
//! - Production: `ZettelApi<FileStore>`
//! - Testing: `ZettelApi<InMemoryStore>`

use crate::commands;
use crate::config::ZettelConfig;
use crate::error::{Result, ZettelError};
use crate::index::CardSelector;
use crate::store::CardStore;

pub struct ZettelApi<S: CardStore> {
    store: S,
    paths: commands::ZettelPaths,
    config: ZettelConfig,
}

impl<S: CardStore> ZettelApi<S> {
    pub fn new(store: S, paths: commands::ZettelPaths, config: ZettelConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn list_cards(&self, filter: ListFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, self.config.sort_direction, &filter)
    }

    /// Lists the subtree under `root` (identifier or `#key`).
    pub fn list_under(&self, root: &str) -> Result<commands::CmdResult> {
        self.list_cards(ListFilter::Under(parse_selector(root)?))
    }

    pub fn tree(&self) -> Result<commands::CmdResult> {
        commands::tree::run(&self.store, self.config.sort_direction)
    }

    pub fn view_cards<I: AsRef<str>>(&self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::view::run(&self.store, &selectors)
    }

    pub fn search(&self, term: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, term, self.config.quick_match_limit)
    }

    pub fn references(&self, input: &str) -> Result<commands::CmdResult> {
        commands::refs::run(&self.store, &parse_selector(input)?)
    }

    pub fn create_card(
        &mut self,
        card_id: &str,
        title: String,
        body: String,
        parent: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let parent = parent.map(parse_selector).transpose()?;
        commands::create::run(&mut self.store, card_id, title, body, parent.as_ref())
    }

    pub fn update_card(
        &mut self,
        input: &str,
        update: CardUpdate,
    ) -> Result<commands::CmdResult> {
        let selector = parse_selector(input)?;
        commands::update::run(&mut self.store, &selector, update)
    }

    pub fn delete_cards<I: AsRef<str>>(&mut self, inputs: &[I]) -> Result<commands::CmdResult> {
        let selectors = parse_selectors(inputs)?;
        commands::delete::run(&mut self.store, &selectors)
    }

    pub fn link(
        &mut self,
        source: &str,
        term: &str,
        pick: Option<usize>,
    ) -> Result<commands::CmdResult> {
        let source = parse_selector(source)?;
        commands::link::run(
            &mut self.store,
            &source,
            term,
            pick,
            self.config.quick_match_limit,
        )
    }

    pub fn check(&self) -> Result<commands::CmdResult> {
        commands::check::run(&self.store)
    }

    pub fn next_id(&self) -> Result<commands::CmdResult> {
        commands::next_id::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn init(&self) -> Result<commands::CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn paths(&self) -> &commands::ZettelPaths {
        &self.paths
    }

    pub fn settings(&self) -> &ZettelConfig {
        &self.config
    }
}

fn parse_selector(input: &str) -> Result<CardSelector> {
    input.parse().map_err(ZettelError::Api)
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<CardSelector>> {
    if inputs.is_empty() {
        return Err(ZettelError::Api("No cards given".to_string()));
    }
    inputs.iter().map(|s| parse_selector(s.as_ref())).collect()
}

pub use crate::commands::config::ConfigAction;
pub use commands::list::ListFilter;
pub use commands::{
    CardUpdate, CardView, CmdMessage, CmdResult, MessageLevel, ViewSegment, ZettelPaths,
};
