//! # Domain Model
//!
//! [`Card`] is the record the engine reads. It is owned by the card source (the
//! store or a remote API); the engine never mutates a card it was handed and only
//! returns derived views.
//!
//! The serialized shape matches the bulk card listing of the backend:
//!
//! ```json
//! { "id": 12, "card_id": "SP3/2", "title": "...", "body": "...", "parent_id": 7 }
//! ```
//!
//! Fields the engine does not care about (files, tags, entities...) are kept in
//! [`Card::extra`] so that a load/save cycle passes them through untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::identifier::CardIdentifier;

/// Primary key assigned by the storage layer.
pub type CardPk = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardPk,
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Parent as recorded by the backend. Roots point at themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CardPk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Card {
    pub fn new(id: CardPk, card_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id,
            card_id: card_id.into(),
            title: title.into(),
            body: String::new(),
            parent_id: None,
            created_at: None,
            updated_at: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_parent(mut self, parent: CardPk) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Parses the card's identifier. Not cached: edits to `card_id` are always seen.
    pub fn identifier(&self) -> CardIdentifier {
        CardIdentifier::parse(&self.card_id)
    }

    pub fn is_unsorted(&self) -> bool {
        self.card_id.is_empty()
    }

    /// The explicit parent key, ignoring the backend's self-reference for roots.
    pub fn explicit_parent(&self) -> Option<CardPk> {
        self.parent_id.filter(|&pid| pid != self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_parent_means_no_explicit_parent() {
        let root = Card::new(3, "SP3", "Root").with_parent(3);
        assert_eq!(root.explicit_parent(), None);

        let child = Card::new(4, "SP3/1", "Child").with_parent(3);
        assert_eq!(child.explicit_parent(), Some(3));
    }

    #[test]
    fn unknown_fields_pass_through() {
        let json = r#"{"id":1,"card_id":"A1","title":"T","body":"B","files":[{"id":9}],"is_deleted":false}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.card_id, "A1");
        assert!(card.extra.contains_key("files"));

        let out = serde_json::to_value(&card).unwrap();
        assert_eq!(out["files"][0]["id"], 9);
        assert_eq!(out["is_deleted"], false);
    }

    #[test]
    fn missing_text_fields_default_to_empty() {
        let card: Card = serde_json::from_str(r#"{"id":5}"#).unwrap();
        assert!(card.is_unsorted());
        assert!(card.body.is_empty());
        assert_eq!(card.parent_id, None);
    }
}
