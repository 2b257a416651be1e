//! Lexical scanning of card bodies for reference tokens.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

/// A bracketed identifier run: letters, digits, `_ . - /`, no nesting.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([A-Za-z0-9_./-]+)\]").expect("reference token pattern is valid")
});

/// A reference found in a body. Positions are byte offsets into that body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceToken {
    /// The bracketed text as written, e.g. `[SP3/2]`.
    pub literal: String,
    /// The identifier inside the brackets, e.g. `SP3/2`.
    pub target: String,
    pub span: Range<usize>,
}

impl ReferenceToken {
    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }
}

/// Finds every reference token in `body`, in order of appearance.
///
/// A bracketed run immediately followed by `(` is markdown link text and is
/// skipped. Line breaks carry no meaning here. The scan does not check that a
/// target exists.
pub fn scan_references(body: &str) -> Vec<ReferenceToken> {
    TOKEN_RE
        .captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            if body[whole.end()..].starts_with('(') {
                return None;
            }
            Some(ReferenceToken {
                literal: whole.as_str().to_string(),
                target: inner.as_str().to_string(),
                span: whole.range(),
            })
        })
        .collect()
}

/// Distinct targets of `body`, first occurrence first.
pub fn referenced_ids(body: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for token in scan_references(body) {
        if !seen.contains(&token.target) {
            seen.push(token.target);
        }
    }
    seen
}

/// Whether `body` already holds a token for `card_id`.
pub fn references_target(body: &str, card_id: &str) -> bool {
    !card_id.is_empty()
        && scan_references(body)
            .iter()
            .any(|token| token.target == card_id)
}
