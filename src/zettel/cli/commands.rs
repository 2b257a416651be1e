//! # CLI Layer
//!
//! This module is **one possible UI client** for zettel, not the application itself.
//! It is the only place that parses arguments, knows about stdout/stderr and
//! formats output for people. Everything it shows comes from a `CmdResult`.
//!
//! - `run()`: main dispatch (called by `main.rs`)
//! - `init_context()`: resolves the data directory, loads config, builds the API
//! - `handle_*()`: per-command handlers calling the API and printing the result

use super::print::{print_cards, print_config, print_messages, print_tree, print_views};
use super::setup::{Cli, Commands};
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use zettel::api::{CardUpdate, ConfigAction, ListFilter, ZettelApi, ZettelPaths};
use zettel::config::ZettelConfig;
use zettel::error::{Result, ZettelError};
use zettel::store::fs::FileStore;

const HOME_ENV: &str = "ZETTEL_HOME";
const LOCAL_DIR: &str = ".zettel";

struct AppContext {
    api: ZettelApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { unsorted, under }) => handle_list(&ctx, unsorted, under),
        Some(Commands::Tree) | None => handle_tree(&ctx),
        Some(Commands::View { cards }) => handle_view(&ctx, cards),
        Some(Commands::Refs { card }) => handle_refs(&ctx, card),
        Some(Commands::Search { term }) => handle_search(&ctx, term),
        Some(Commands::Add {
            card_id,
            title,
            body,
            parent,
        }) => handle_add(&mut ctx, card_id, title.join(" "), body, parent),
        Some(Commands::Edit {
            card,
            card_id,
            title,
            body,
        }) => handle_edit(
            &mut ctx,
            card,
            CardUpdate {
                card_id,
                title,
                body,
            },
        ),
        Some(Commands::Link { card, term, pick }) => handle_link(&mut ctx, card, term, pick),
        Some(Commands::Delete { cards }) => handle_delete(&mut ctx, cards),
        Some(Commands::Check) => handle_check(&ctx),
        Some(Commands::NextId) => handle_next_id(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let default_level = "warn";
    let filter = if verbose {
        EnvFilter::new("zettel=debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_level))
            .unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.dir.clone())?;
    let config = ZettelConfig::load(&data_dir)?;
    debug!(dir = %data_dir.display(), cards_file = %config.cards_file, "using data directory");

    let store = FileStore::new(data_dir.clone()).with_cards_file(&config.cards_file);
    let api = ZettelApi::new(store, ZettelPaths { data_dir }, config);
    Ok(AppContext { api })
}

/// `--dir`, then `$ZETTEL_HOME`, then `./.zettel` when present, then the
/// platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let local = cwd.join(LOCAL_DIR);
    if local.is_dir() {
        return Ok(local);
    }

    ProjectDirs::from("com", "zettel", "zettel")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ZettelError::Store("Could not determine data directory".to_string()))
}

fn handle_list(ctx: &AppContext, unsorted: bool, under: Option<String>) -> Result<()> {
    let result = match under {
        Some(root) => ctx.api.list_under(&root)?,
        None if unsorted => ctx.api.list_cards(ListFilter::Unsorted)?,
        None => ctx.api.list_cards(ListFilter::All)?,
    };
    print_cards(&result.listed_cards);
    print_messages(&result.messages);
    Ok(())
}

fn handle_tree(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.tree()?;
    if let Some(tree) = &result.tree {
        print_tree(tree);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, cards: Vec<String>) -> Result<()> {
    let result = ctx.api.view_cards(&cards)?;
    print_views(&result.views);
    print_messages(&result.messages);
    Ok(())
}

fn handle_refs(ctx: &AppContext, card: String) -> Result<()> {
    let result = ctx.api.references(&card)?;
    if !result.listed_cards.is_empty() {
        print_cards(&result.listed_cards);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, term: String) -> Result<()> {
    let result = ctx.api.search(&term)?;
    print_cards(&result.listed_cards);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(
    ctx: &mut AppContext,
    card_id: String,
    title: String,
    body: String,
    parent: Option<String>,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ZettelError::Api("Title cannot be empty".into()));
    }
    let result = ctx
        .api
        .create_card(&card_id, title, body, parent.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, card: String, update: CardUpdate) -> Result<()> {
    let result = ctx.api.update_card(&card, update)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_link(
    ctx: &mut AppContext,
    card: String,
    term: String,
    pick: Option<usize>,
) -> Result<()> {
    let result = ctx.api.link(&card, &term, pick)?;
    print_messages(&result.messages);
    if !result.listed_cards.is_empty() {
        for (i, candidate) in result.listed_cards.iter().enumerate() {
            println!("{:>3}. {} {}", i + 1, candidate.card_id, candidate.title);
        }
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, cards: Vec<String>) -> Result<()> {
    let result = ctx.api.delete_cards(&cards)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_check(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.check()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_next_id(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.next_id()?;
    if let Some(next) = result.next_id {
        println!("{}", next);
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_flag_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/cards"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/cards"));
    }
}
