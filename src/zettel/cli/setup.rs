use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "zettel", bin_name = "zettel", version)]
#[command(about = "Card identifiers, hierarchy and cross-references for a Zettelkasten", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $ZETTEL_HOME, ./.zettel or the user data dir)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List cards in natural identifier order
    #[command(alias = "ls")]
    List {
        /// Only cards without an identifier
        #[arg(long, conflicts_with = "under")]
        unsorted: bool,

        /// Only cards below this card (identifier or #key)
        #[arg(long, value_name = "CARD")]
        under: Option<String>,
    },

    /// Show the card hierarchy
    Tree,

    /// Show cards with parent, children, links and backlinks
    #[command(alias = "v")]
    View {
        /// Card identifiers or #keys (e.g. SP3/1 #12)
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },

    /// Cards linked from or linking to a card
    Refs {
        /// Card identifier or #key
        card: String,
    },

    /// Quick match on identifiers and titles
    #[command(alias = "m")]
    Search { term: String },

    /// Create a card
    #[command(alias = "new")]
    Add {
        /// Identifier (whitespace is removed; "" for an unsorted card)
        card_id: String,

        /// Title words
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Body text
        #[arg(short, long, default_value = "")]
        body: String,

        /// Explicit parent card (identifier or #key)
        #[arg(short, long, value_name = "CARD")]
        parent: Option<String>,
    },

    /// Change a card's identifier, title or body
    #[command(alias = "e")]
    Edit {
        /// Card identifier or #key
        card: String,

        /// New identifier
        #[arg(long = "id", value_name = "CARD_ID")]
        card_id: Option<String>,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        body: Option<String>,
    },

    /// Append a reference to another card, found by quick match
    Link {
        /// Card to add the reference to
        card: String,

        /// Identifier (exact) or search term
        term: String,

        /// Take the Nth suggestion instead of requiring an exact identifier
        #[arg(long, value_name = "N")]
        pick: Option<usize>,
    },

    /// Delete one or more cards
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        cards: Vec<String>,
    },

    /// Report duplicate identifiers and unresolved references
    Check,

    /// Print the next free top-level identifier
    NextId,

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., sort_direction)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the store
    Init,
}
