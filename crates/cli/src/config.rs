// ABOUTME: YAML configuration for the pagefeed binary.
// ABOUTME: Channel metadata, output mode, and the per-section source table with validation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use pagefeed_extract::Variant;
use pagefeed_feed::Channel;

/// Top-level configuration file shape.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub general: General,
    /// Keyed by section name; BTreeMap keeps processing order deterministic.
    pub sources: BTreeMap<String, SourceEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct General {
    #[serde(rename = "feed-title")]
    pub feed_title: String,
    #[serde(rename = "feed-url")]
    pub feed_url: String,
    #[serde(rename = "feed-description")]
    pub feed_description: String,
    #[serde(rename = "feed-location")]
    pub feed_location: String,
    #[serde(rename = "feed-mode")]
    pub feed_mode: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceEntry {
    pub parser: String,
    #[serde(rename = "source-url")]
    pub source_url: String,
}

/// How extracted records are grouped into output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedMode {
    /// Everything into one `feed.xml`.
    OneFeedForAll,
    /// One `feed-<parser>.xml` per extractor variant.
    OneFeedPerParser,
    /// One `feed-<section>.xml` per configured source.
    OneFeedPerUrl,
}

impl FeedMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "one-feed-for-all" => Some(FeedMode::OneFeedForAll),
            "one-feed-per-parser" => Some(FeedMode::OneFeedPerParser),
            "one-feed-per-url" => Some(FeedMode::OneFeedPerUrl),
            _ => None,
        }
    }
}

/// A source section with its parser name resolved to a variant.
#[derive(Debug, Clone)]
pub struct ResolvedSource {
    pub section: String,
    pub variant: Variant,
    pub source_url: String,
}

/// The validated configuration the run loop consumes.
#[derive(Debug)]
pub struct Settings {
    pub channel: Channel,
    pub feed_location: String,
    pub mode: FeedMode,
    pub sources: Vec<ResolvedSource>,
}

pub fn load(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("could not read configuration file {}", path.display()))?;
    let config: Config = serde_yaml::from_str(&raw)
        .with_context(|| format!("could not parse configuration file {}", path.display()))?;
    validate(config)
}

/// Checks mode and parser names up front so a typo aborts the run before any
/// network traffic.
pub fn validate(config: Config) -> Result<Settings> {
    let Some(mode) = FeedMode::from_name(&config.general.feed_mode) else {
        bail!(
            "unknown feed-mode {:?} (expected one-feed-for-all, one-feed-per-parser, or one-feed-per-url)",
            config.general.feed_mode
        );
    };

    let mut sources = Vec::with_capacity(config.sources.len());
    for (section, entry) in config.sources {
        let Some(variant) = Variant::from_name(&entry.parser) else {
            bail!("unknown parser {:?} in section {:?}", entry.parser, section);
        };
        sources.push(ResolvedSource {
            section,
            variant,
            source_url: entry.source_url,
        });
    }

    Ok(Settings {
        channel: Channel {
            title: config.general.feed_title,
            link: config.general.feed_url,
            description: config.general.feed_description,
        },
        feed_location: config.general.feed_location,
        mode,
        sources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
general:
  feed-title: "Mein Feed"
  feed-url: "https://example.org/feed.xml"
  feed-description: "Gesammeltes"
  feed-location: "out/"
  feed-mode: one-feed-for-all
sources:
  wirtschaft:
    parser: szparser
    source-url: "https://www.sueddeutsche.de/wirtschaft"
  cartoons:
    parser: idparser
    source-url: "https://ruthe.de/archiv/"
"#;

    fn parse(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).expect("valid yaml")
    }

    #[test]
    fn valid_config_resolves() {
        let settings = validate(parse(CONFIG)).unwrap();
        assert_eq!(settings.channel.title, "Mein Feed");
        assert_eq!(settings.mode, FeedMode::OneFeedForAll);
        assert_eq!(settings.sources.len(), 2);
        // BTreeMap order: sections alphabetically.
        assert_eq!(settings.sources[0].section, "cartoons");
        assert_eq!(settings.sources[0].variant, Variant::Id);
        assert_eq!(settings.sources[1].variant, Variant::Sz);
    }

    #[test]
    fn unknown_mode_names_the_value() {
        let config = parse(&CONFIG.replace("one-feed-for-all", "one-feed-per-moon"));
        let err = validate(config).unwrap_err();
        assert!(err.to_string().contains("one-feed-per-moon"), "got {err}");
    }

    #[test]
    fn unknown_parser_names_value_and_section() {
        let config = parse(&CONFIG.replace("idparser", "atomparser"));
        let err = validate(config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("atomparser"), "got {msg}");
        assert!(msg.contains("cartoons"), "got {msg}");
    }

    #[test]
    fn mode_names_round_trip() {
        assert_eq!(FeedMode::from_name("one-feed-for-all"), Some(FeedMode::OneFeedForAll));
        assert_eq!(FeedMode::from_name("one-feed-per-parser"), Some(FeedMode::OneFeedPerParser));
        assert_eq!(FeedMode::from_name("one-feed-per-url"), Some(FeedMode::OneFeedPerUrl));
        assert_eq!(FeedMode::from_name("all"), None);
    }
}
