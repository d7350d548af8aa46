// ABOUTME: The extraction run: fetch every source, group records per mode, write feed files.
// ABOUTME: Grouping is a pure function over extraction results so it tests without network or disk.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use pagefeed_extract::{run_extractor, Client, Record};
use pagefeed_feed::{Channel, Feed};

use crate::config::{FeedMode, ResolvedSource, Settings};

/// Extraction output of one configured source.
pub struct SourceResult {
    pub source: ResolvedSource,
    pub records: Vec<Record>,
}

/// Runs every configured source in order and writes the resulting feeds.
pub fn run(settings: &Settings, client: &Client) -> Result<()> {
    let mut results = Vec::with_capacity(settings.sources.len());
    for source in &settings.sources {
        info!(
            section = %source.section,
            parser = source.variant.name(),
            url = %source.source_url,
            "extracting"
        );
        let records = run_extractor(client, source.variant, &source.source_url);
        info!(section = %source.section, count = records.len(), "extracted");
        results.push(SourceResult {
            source: source.clone(),
            records,
        });
    }

    let location = Path::new(&settings.feed_location);
    for (path, mut feed) in output_plan(settings.mode, &settings.channel, results) {
        feed.sort_by_date();
        let path = location.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        fs::write(&path, feed.render())
            .with_context(|| format!("could not write {}", path.display()))?;
        info!(path = %path.display(), items = feed.items().len(), "wrote feed");
    }
    Ok(())
}

/// Groups extraction results into output files according to the mode.
///
/// Filenames are relative to the feed location. Grouped modes create one
/// entry per group that produced at least one source, even if it yielded
/// zero records, so an empty feed file still signals the source ran.
pub fn output_plan(
    mode: FeedMode,
    channel: &Channel,
    results: Vec<SourceResult>,
) -> Vec<(PathBuf, Feed)> {
    let mut plan: Vec<(PathBuf, Feed)> = Vec::new();

    let mut feed_for = |plan: &mut Vec<(PathBuf, Feed)>, name: PathBuf| -> usize {
        match plan.iter().position(|(p, _)| *p == name) {
            Some(i) => i,
            None => {
                plan.push((name, Feed::new(channel.clone())));
                plan.len() - 1
            }
        }
    };

    for result in results {
        let name = match mode {
            FeedMode::OneFeedForAll => PathBuf::from("feed.xml"),
            FeedMode::OneFeedPerParser => {
                PathBuf::from(format!("feed-{}.xml", result.source.variant.name()))
            }
            FeedMode::OneFeedPerUrl => {
                PathBuf::from(format!("feed-{}.xml", result.source.section))
            }
        };
        let i = feed_for(&mut plan, name);
        for record in result.records {
            plan[i].1.add_item(record);
        }
    }

    plan
}
