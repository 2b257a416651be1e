use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn zettel(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("zettel").unwrap();
    cmd.current_dir(home)
        .env("ZETTEL_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn add(home: &Path, card_id: &str, title: &str, body: &str) {
    zettel(home)
        .args(["add", card_id, title, "--body", body])
        .assert()
        .success();
}

#[test]
fn add_list_and_tree() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    zettel(home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized zettel store"));

    add(home, "A10", "Ten", "");
    add(home, "A9", "Nine", "");
    add(home, "A9/1", "Nine one", "");

    zettel(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)A9 .*A9/1 .*A10 ").unwrap());

    zettel(home)
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("  A9/1"));

    assert!(home.join("cards.json").exists());
}

#[test]
fn view_shows_links_and_backlinks() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    add(home, "SP3", "Spaced practice", "Builds on [REF014] and [GONE].");
    add(home, "REF014", "Ebbinghaus", "");

    zettel(home)
        .args(["view", "REF014"])
        .assert()
        .success()
        .stdout(predicate::str::contains("backlinks:"))
        .stdout(predicate::str::contains("SP3"));

    zettel(home)
        .args(["view", "SP3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unresolved: [GONE]"));

    zettel(home)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("[GONE]"));
}

#[test]
fn link_requires_exact_id_or_pick() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    add(home, "NOTE", "A note", "Body");
    add(home, "AB12", "Alpha", "");
    add(home, "AB1", "Beta", "");

    zettel(home)
        .args(["link", "NOTE", "AB"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--pick"))
        .stdout(predicate::str::contains("1. AB12 Alpha"));

    zettel(home)
        .args(["link", "NOTE", "AB1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked #1 to [AB1] - Beta"));

    let cards = std::fs::read_to_string(home.join("cards.json")).unwrap();
    assert!(cards.contains("Body\\n\\n[AB1] - Beta"));
}

#[test]
fn next_id_and_search() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    zettel(home)
        .arg("next-id")
        .assert()
        .success()
        .stdout("1\n");

    add(home, "7", "Seven", "");
    add(home, "7/1", "Seven one", "");

    zettel(home)
        .arg("next-id")
        .assert()
        .success()
        .stdout("8\n");

    zettel(home)
        .args(["search", "seven ONE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("7/1"));
}

#[test]
fn unknown_card_fails_with_message() {
    let temp_dir = tempfile::tempdir().unwrap();
    zettel(temp_dir.path())
        .args(["view", "NOPE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Card not found: [NOPE]"));
}

#[test]
fn config_round_trip() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();

    zettel(home)
        .args(["config", "sort_direction", "desc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sort_direction set to descending"));

    add(home, "B2", "two", "");
    add(home, "B10", "ten", "");

    zettel(home)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)B10 .*B2 ").unwrap());
}
