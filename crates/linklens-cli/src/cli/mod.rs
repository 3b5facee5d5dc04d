//! CLI for the linklens URL reputation checker.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use linklens_core::filter::{self, Label};
use linklens_core::url_model::{self, Identifier};
use linklens_core::{config, mapping};

/// Top-level CLI for linklens.
#[derive(Debug, Parser)]
#[command(name = "linklens")]
#[command(
    about = "linklens: map a social-media URL to its canonical identity and reputation label",
    long_about = None
)]
pub struct Cli {
    /// Profile or content URL (or a template value when --key is given).
    pub input: String,

    /// Build the URL from a known account template instead of parsing INPUT
    /// as a URL (e.g. --key Reddit_username spez).
    #[arg(long, value_name = "KEY")]
    pub key: Option<String>,

    /// Skip classification when only an instance host, not an account, could
    /// be resolved (Mastodon-style instances).
    #[arg(long)]
    pub mastodon: bool,

    /// Directory containing transphobic.dat and t-friendly.dat (overrides config).
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

pub fn run_from_args() -> Result<()> {
    run(Cli::parse())
}

/// Three-line output protocol: echoed URL, identifier, label.
fn report(input_url: &str, id: Option<&Identifier>, label: Label) {
    println!("URL: {input_url}");
    match id {
        Some(id) => println!("Identifier: {id}"),
        None => println!("Identifier: (no identifier)"),
    }
    println!("Label: {label}");
}

pub fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    let (input_url, mastodon) = match &cli.key {
        Some(key) => {
            let built = mapping::build_url(key, &cli.input)?;
            tracing::debug!("built URL {} from key {}", built.url, key);
            (built.url, cli.mastodon || built.mastodon)
        }
        None => (cli.input.clone(), cli.mastodon),
    };

    let url = url_model::try_parse_url(&input_url)
        .ok_or_else(|| anyhow!("invalid URL (http/https only): {input_url}"))?;

    let Some(id) = url_model::canonicalize(&url) else {
        report(&input_url, None, Label::None);
        return Ok(());
    };

    if mastodon && url_model::is_bare_host(&id, &url) {
        tracing::debug!("bare-host identifier {} suppressed in mastodon mode", id);
        report(&input_url, Some(&id), Label::None);
        return Ok(());
    }

    let data_dir = match cli.data_dir.or(cfg.data_dir) {
        Some(dir) => dir,
        None => config::default_data_dir()?,
    };
    let classifier = filter::load_classifier(&data_dir, &cfg.layout)
        .with_context(|| format!("loading filters from {}", data_dir.display()))?;

    let label = classifier.classify(&id);
    report(&input_url, Some(&id), label);
    Ok(())
}

#[cfg(test)]
mod tests;
