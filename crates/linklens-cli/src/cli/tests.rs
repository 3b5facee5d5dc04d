//! CLI parse tests.

use super::Cli;
use clap::Parser;
use std::path::PathBuf;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn url_only() {
    let cli = parse(&["linklens", "https://twitter.com/someuser"]);
    assert_eq!(cli.input, "https://twitter.com/someuser");
    assert!(!cli.mastodon);
    assert!(cli.key.is_none());
    assert!(cli.data_dir.is_none());
}

#[test]
fn mastodon_flag() {
    let cli = parse(&["linklens", "https://mastodon.example/@alice", "--mastodon"]);
    assert!(cli.mastodon);
}

#[test]
fn key_and_value() {
    let cli = parse(&["linklens", "spez", "--key", "Reddit_username"]);
    assert_eq!(cli.key.as_deref(), Some("Reddit_username"));
    assert_eq!(cli.input, "spez");
}

#[test]
fn data_dir_override() {
    let cli = parse(&["linklens", "https://x.com/u", "--data-dir", "/srv/filters"]);
    assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/filters")));
}

#[test]
fn missing_input_is_an_error() {
    assert!(Cli::try_parse_from(["linklens"]).is_err());
}

#[test]
fn unknown_flag_is_an_error() {
    assert!(Cli::try_parse_from(["linklens", "https://x.com/u", "--batch"]).is_err());
}
