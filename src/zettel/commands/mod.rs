use crate::config::ZettelConfig;
use crate::hierarchy::CardForest;
use crate::model::{Card, CardPk};
use std::path::PathBuf;

pub mod check;
pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod link;
pub mod list;
pub mod next_id;
pub mod refs;
pub mod search;
pub mod tree;
pub mod update;
pub mod view;

/// Where a collection lives on disk.
#[derive(Debug, Clone)]
pub struct ZettelPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A piece of a card body prepared for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewSegment {
    Text(String),
    Link { label: String, target: CardPk },
}

/// Everything shown for a single card: its place in the hierarchy and its links.
#[derive(Debug, Clone)]
pub struct CardView {
    pub card: Card,
    pub parent: Option<Card>,
    pub children: Vec<Card>,
    pub body: Vec<ViewSegment>,
    /// Bracketed identifiers in the body that match no card
    pub unresolved: Vec<String>,
    pub backlinks: Vec<Card>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_cards: Vec<Card>,
    pub listed_cards: Vec<Card>,
    pub tree: Option<CardForest>,
    pub views: Vec<CardView>,
    pub config: Option<ZettelConfig>,
    pub next_id: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_cards(mut self, cards: Vec<Card>) -> Self {
        self.affected_cards = cards;
        self
    }

    pub fn with_listed_cards(mut self, cards: Vec<Card>) -> Self {
        self.listed_cards = cards;
        self
    }

    pub fn with_tree(mut self, tree: CardForest) -> Self {
        self.tree = Some(tree);
        self
    }

    pub fn with_views(mut self, views: Vec<CardView>) -> Self {
        self.views = views;
        self
    }

    pub fn with_config(mut self, config: ZettelConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_next_id(mut self, next_id: String) -> Self {
        self.next_id = Some(next_id);
        self
    }
}

/// Field changes for `update`. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct CardUpdate {
    pub card_id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.card_id.is_none() && self.title.is_none() && self.body.is_none()
    }
}
