#![allow(deprecated)]

use assert_cmd::cargo::CommandCargoExt;
use std::fs;
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("link_deck").unwrap();
    c.env("LINK_DECK_FILE", temp.path().join("bookmarks.json"))
        .env("NO_COLOR", "1")
        .env("LINK_DECK_NO_FZF", "1"); // disable fzf dependency for tests
    c
}

fn state_output(temp: &TempDir, args: &[&str]) -> String {
    let out = cmd(temp).args(args).assert().success().get_output().stdout.clone();
    String::from_utf8_lossy(&out).trim().to_string()
}

#[test]
fn decode_ignores_unknown_keys_and_dedups_tags() {
    let temp = TempDir::new().unwrap();
    let out = state_output(
        &temp,
        &["state", "--query", "bogus=1&q=rust&tags=cli,cli,%23web&page=3"],
    );
    assert_eq!(out, "q=rust&tags=cli%2Cweb");
}

#[test]
fn decode_drops_section_without_category() {
    let temp = TempDir::new().unwrap();
    let out = state_output(&temp, &["state", "--query", "section=Docs&q=x"]);
    assert_eq!(out, "q=x");

    let out = state_output(
        &temp,
        &["state", "--query", "category=Development&section=Docs"],
    );
    assert_eq!(out, "category=Development&section=Docs");
}

#[test]
fn decode_accepts_a_pasted_url() {
    let temp = TempDir::new().unwrap();
    let out = state_output(
        &temp,
        &["state", "--query", "https://deck.example/view?q=news&category=News"],
    );
    assert_eq!(out, "q=news&category=News");
}

#[test]
fn ids_are_stable_across_runs() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("bookmarks.json"),
        r#"[
            {"title":"Prefix A","url":"https://a.example/"},
            {"title":"Prefix B","url":"https://b.example/"}
        ]"#,
    )
    .unwrap();

    let first = state_ids(&temp);
    let second = state_ids(&temp);
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
}

fn state_ids(temp: &TempDir) -> Vec<String> {
    let out = cmd(temp).args(["list"]).assert().success().get_output().stdout.clone();
    String::from_utf8_lossy(&out)
        .lines()
        .filter_map(|l| l.split_whitespace().next().map(|s| s.to_string()))
        .collect()
}
