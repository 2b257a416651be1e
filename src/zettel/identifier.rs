//! # Card Identifiers
//!
//! Every card carries a user-authored identifier (`card_id`) such as `SP3/2`,
//! `REF014`, `SM2024-01-01` or `1/A.3/B`. Identifiers are not opaque keys: they
//! encode both a sort position and a place in the card hierarchy, and the rest of
//! the crate reads that structure from here.
//!
//! ## Segments
//!
//! An identifier is split in a single pass into maximal runs of ASCII digits
//! ([`SegmentKind::Numeric`]) and maximal runs of everything else
//! ([`SegmentKind::Alpha`]). Separators are ordinary non-digits and end up inside
//! alpha runs:
//!
//! ```text
//! "SP3/12"    -> Alpha("SP") Numeric("3") Alpha("/") Numeric("12")
//! "1/A.3/B"   -> Numeric("1") Alpha("/A.") Numeric("3") Alpha("/B")
//! ""          -> (no segments: the unsorted identifier)
//! ```
//!
//! Segments drive natural ordering (see [`crate::ordering`]).
//!
//! ## Separators
//!
//! `/` and `.` are the structural separators and are interchangeable. Hierarchy
//! queries ([`CardIdentifier::parent_id`], [`CardIdentifier::ancestors`],
//! [`CardIdentifier::depth`]) only look at separator positions; they never look at
//! segment kinds. [`SEPARATORS`] is the only place the separator set is defined.
//!
//! Parsing is total. The empty string is a valid identifier (the "unsorted" bucket),
//! and any unicode input parses into some segment sequence.

use std::fmt;

/// The structural separator set. Both characters mark a parent/child boundary.
pub const SEPARATORS: [char; 2] = ['/', '.'];

pub fn is_separator(c: char) -> bool {
    SEPARATORS.contains(&c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Numeric,
    Alpha,
}

/// A maximal run of digits or non-digits within an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub kind: SegmentKind,
    pub value: String,
}

impl Segment {
    pub fn is_numeric(&self) -> bool {
        self.kind == SegmentKind::Numeric
    }
}

/// A parsed card identifier. Derived from a card's `card_id` on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardIdentifier {
    raw: String,
    segments: Vec<Segment>,
    separator_positions: Vec<usize>,
}

impl CardIdentifier {
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<Segment> = Vec::new();
        let mut separator_positions = Vec::new();

        for (pos, c) in raw.char_indices() {
            if is_separator(c) {
                separator_positions.push(pos);
            }
            let kind = if c.is_ascii_digit() {
                SegmentKind::Numeric
            } else {
                SegmentKind::Alpha
            };
            match segments.last_mut() {
                Some(last) if last.kind == kind => last.value.push(c),
                _ => segments.push(Segment {
                    kind,
                    value: c.to_string(),
                }),
            }
        }

        Self {
            raw: raw.to_string(),
            segments,
            separator_positions,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Byte offsets of every `/` or `.` in the raw identifier.
    pub fn separator_positions(&self) -> &[usize] {
        &self.separator_positions
    }

    /// The empty identifier marks an unsorted card.
    pub fn is_unsorted(&self) -> bool {
        self.raw.is_empty()
    }

    /// A non-empty identifier without separators. Whether such a card is a true
    /// root depends on the rest of the collection (see [`crate::hierarchy`]).
    pub fn is_root(&self) -> bool {
        !self.is_unsorted() && self.separator_positions.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.separator_positions.len()
    }

    /// The identifier text before the last separator, if any.
    ///
    /// `"SP3/1/2"` -> `"SP3/1"`, `"A.1"` -> `"A"`, `"SP3"` -> `None`.
    /// A trailing or leading separator yields an empty or odd prefix; those are
    /// returned as-is and simply never match a real card.
    pub fn parent_id(&self) -> Option<&str> {
        self.separator_positions.last().map(|&pos| &self.raw[..pos])
    }

    /// Every prefix that ends right before a separator, longest first.
    ///
    /// These are the candidate ancestor identifiers, checked in closest-first order
    /// by the hierarchy resolver.
    pub fn ancestors(&self) -> impl Iterator<Item = &str> + '_ {
        self.separator_positions
            .iter()
            .rev()
            .map(move |&pos| &self.raw[..pos])
            .filter(|prefix| !prefix.is_empty())
    }

    /// True if `self` sits below `ancestor` in the identifier hierarchy, i.e. its raw
    /// text starts with `ancestor` immediately followed by a separator.
    pub fn is_descendant_of(&self, ancestor: &str) -> bool {
        if ancestor.is_empty() {
            return false;
        }
        self.raw
            .strip_prefix(ancestor)
            .and_then(|rest| rest.chars().next())
            .is_some_and(is_separator)
    }
}

impl fmt::Display for CardIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for CardIdentifier {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Strips all whitespace from a user-entered identifier.
pub fn normalize_card_id(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}
