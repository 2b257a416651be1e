//! # Zettel Architecture
//!
//! Zettel is a **UI-agnostic library** for the part of a Zettelkasten that is all
//! about identifiers: how card ids such as `SP3/1/2` sort, which card sits under
//! which, what `[REF014]` in a body points at, and which cards to suggest while
//! someone types a link. The `zettel` binary is one client of it.
//!
//! ## The Engine
//!
//! Everything at the heart of the crate is a pure function over a
//! [`index::CardIndex`] snapshot:
//!
//! ```text
//!  identifier ──▶ ordering ──▶ hierarchy
//!       │                         │
//!       └──▶ references (scan → resolve → render, backlinks)
//!                                 │
//!                          quick_match (authoring)
//! ```
//!
//! - Identifiers are never rejected; any string parses, and the empty id marks an
//!   *unsorted* card.
//! - The hierarchy is derived from identifiers, never stored.
//! - A reference that matches no card is `Unresolved`, an ordinary value and not
//!   an error.
//!
//! An empty snapshot is valid input everywhere. A snapshot owns its cards, so it
//! can be shared across threads behind an `Arc`.
//!
//! ## The Layers Around It
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (strings → CardSelector, settings)     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Loads a snapshot, runs the engine, returns CmdResult     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract CardStore trait                                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`identifier`]: parsing ids into segments, ancestors, normalization
//! - [`ordering`]: the natural comparator and sorting helpers
//! - [`index`]: the card snapshot and card selectors
//! - [`hierarchy`]: parents, children, roots and the full tree
//! - [`references`]: bracket tokens, resolution, backlinks, rendering
//! - [`quick_match`]: link autocomplete and the link input state machine
//! - [`api`], [`commands`], [`store`], [`config`]: the application layers
//! - [`model`], [`error`]: core types
//! - `cli`: argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod identifier;
pub mod index;
pub mod model;
pub mod ordering;
pub mod quick_match;
pub mod references;
pub mod store;

pub use hierarchy::{children_of, parent_of};
pub use identifier::CardIdentifier;
pub use index::{CardIndex, CardSelector};
pub use model::{Card, CardPk};
pub use ordering::{compare_card_ids, compare_identifiers, SortDirection};
pub use quick_match::quick_match;
pub use references::{resolve_reference, scan_references, Resolution};
