// ABOUTME: pagefeed binary entry point.
// ABOUTME: Parses arguments, initializes logging, loads configuration, runs the extraction.

mod config;
mod run;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pagefeed_extract::Client;

/// Turns configured web pages into RSS feeds.
#[derive(Parser, Debug)]
#[command(name = "pagefeed", version, about)]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "pagefeed.yaml")]
    config: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let settings = config::load(&args.config)?;
    let client = Client::default();
    run::run(&settings, &client)
}
