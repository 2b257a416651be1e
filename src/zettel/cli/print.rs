use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use zettel::api::{CardView, CmdMessage, MessageLevel, ViewSegment};
use zettel::config::ZettelConfig;
use zettel::hierarchy::{CardForest, CardNode};
use zettel::model::Card;

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 14;
const UNSORTED_LABEL: &str = "(unsorted)";

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("No cards found.");
        return;
    }
    for card in cards {
        println!("{}", card_line(card, ""));
    }
}

pub(super) fn print_tree(forest: &CardForest) {
    if forest.is_empty() {
        println!("No cards found.");
        return;
    }
    for root in &forest.roots {
        print_node(root, 0);
    }
    if !forest.unsorted.is_empty() {
        println!();
        println!("{}", UNSORTED_LABEL.dimmed());
        for card in &forest.unsorted {
            println!("{}", card_line(card, "  "));
        }
    }
}

fn print_node(node: &CardNode, depth: usize) {
    println!("{}", card_line(&node.card, &"  ".repeat(depth)));
    for child in &node.children {
        print_node(child, depth + 1);
    }
}

pub(super) fn print_views(views: &[CardView]) {
    for (i, view) in views.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{} {}", label(&view.card).yellow(), view.card.title.bold());
        if let Some(parent) = &view.parent {
            println!("{} {}", "parent:".dimmed(), label(parent));
        }
        println!("--------------------------------");
        println!("{}", render_body(&view.body));

        print_section("children", &view.children);
        print_section("backlinks", &view.backlinks);
        if !view.unresolved.is_empty() {
            let missing: Vec<String> = view.unresolved.iter().map(|id| format!("[{}]", id)).collect();
            println!("\n{} {}", "unresolved:".red(), missing.join(" "));
        }
    }
}

fn print_section(heading: &str, cards: &[Card]) {
    if cards.is_empty() {
        return;
    }
    println!("\n{}", format!("{}:", heading).dimmed());
    for card in cards {
        println!("{}", card_line(card, "  "));
    }
}

fn render_body(segments: &[ViewSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            ViewSegment::Text(text) => out.push_str(text),
            ViewSegment::Link { label, .. } => {
                out.push_str(&format!("[{}]", label).cyan().underline().to_string())
            }
        }
    }
    out
}

pub(super) fn print_config(config: &ZettelConfig) {
    for key in ZettelConfig::keys() {
        if let Ok(value) = config.get(key) {
            println!("{} = {}", key.bold(), value);
        }
    }
}

fn label(card: &Card) -> String {
    if card.is_unsorted() {
        format!("#{}", card.id)
    } else {
        card.card_id.clone()
    }
}

fn card_line(card: &Card, indent: &str) -> String {
    let id = label(card);
    let id_col = format!("{}{:<width$} ", indent, id, width = ID_WIDTH);
    let available = LINE_WIDTH.saturating_sub(id_col.width());
    let title = truncate_to_width(&card.title, available);

    let id_colored = if card.is_unsorted() {
        id_col.dimmed()
    } else {
        id_col.yellow()
    };
    format!("{}{}", id_colored, title)
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
