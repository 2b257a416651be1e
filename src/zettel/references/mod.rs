//! # Cross-References
//!
//! Cards link to each other by writing another card's identifier in brackets
//! anywhere in their body:
//!
//! ```text
//! Builds on [SP3/2], contradicts [REF014]. See also [the docs](https://…).
//! ```
//!
//! Handling a body happens in three independent steps:
//!
//! 1. **Scan** ([`scan`]): a purely lexical pass that finds `[identifier]` tokens
//!    and their byte spans. It knows nothing about which cards exist. Bracketed
//!    text directly followed by `(` is markdown link text and is not a token.
//! 2. **Resolve** ([`resolve`]): each token is looked up by exact identifier in a
//!    [`crate::index::CardIndex`] snapshot, giving
//!    [`Resolution::Resolved`] or [`Resolution::Unresolved`]. Unresolved is an
//!    ordinary outcome; there is no fuzzy matching at this stage (fuzzy lookup
//!    belongs to authoring, see [`crate::quick_match`]).
//! 3. **Render** ([`render`]): the body is split into text and link segments, with
//!    unresolved tokens degraded to their literal text.
//!
//! Backlinks are the inverse relation: card `B` is a backlink of `A` when some
//! token in `B`'s body resolves to `A`. They are computed by resolving every other
//! card's tokens ([`backlinks_of`]).

pub mod render;
pub mod resolve;
pub mod scan;

pub use render::{render_segments, to_markdown_links, BodySegment};
pub use resolve::{
    backlinks_of, direct_links, references_of, resolve_all, resolve_reference, Resolution,
    ResolvedReference,
};
pub use scan::{referenced_ids, references_target, scan_references, ReferenceToken};
