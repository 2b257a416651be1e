//! Turning a body into linkable pieces.
//!
//! Renderers get a flat list of [`BodySegment`]s: plain text, and links for
//! tokens that resolve. An unresolved token is returned as plain text with its
//! brackets, so it reads as written and is never a broken link.

use super::resolve::resolve_all;
use crate::index::CardIndex;
use crate::model::Card;

#[derive(Debug, Clone, PartialEq)]
pub enum BodySegment<'a> {
    Text(&'a str),
    Link { label: &'a str, card: &'a Card },
}

pub fn render_segments<'a>(body: &'a str, index: &'a CardIndex) -> Vec<BodySegment<'a>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for reference in resolve_all(body, index) {
        let Some(card) = reference.card() else {
            continue;
        };
        let span = reference.token.span.clone();
        if span.start > cursor {
            segments.push(BodySegment::Text(&body[cursor..span.start]));
        }
        // label without the surrounding brackets
        segments.push(BodySegment::Link {
            label: &body[span.start + 1..span.end - 1],
            card,
        });
        cursor = span.end;
    }

    if cursor < body.len() {
        segments.push(BodySegment::Text(&body[cursor..]));
    }
    segments
}

/// Rewrites resolved tokens as markdown links `[<card_id>](<href>)`.
///
/// Unresolved tokens and existing markdown links are left untouched.
pub fn to_markdown_links<F>(body: &str, index: &CardIndex, href: F) -> String
where
    F: Fn(&Card) -> String,
{
    let mut out = String::with_capacity(body.len());
    for segment in render_segments(body, index) {
        match segment {
            BodySegment::Text(text) => out.push_str(text),
            BodySegment::Link { label, card } => {
                out.push('[');
                out.push_str(label);
                out.push_str("](");
                out.push_str(&href(card));
                out.push(')');
            }
        }
    }
    out
}
