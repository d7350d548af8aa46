// ABOUTME: Extractor variant registry and the per-source extraction runner.
// ABOUTME: Maps configured parser names to state machines and logs per-record failures.

use tracing::warn;

use crate::detail;
use crate::error::ExtractError;
use crate::fetch::Client;
use crate::models::Record;
use crate::sites::{funk, ruthe, soundcloud, sz, twitter};

/// The extractor variants selectable by name in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Soundcloud,
    Twitter,
    Sz,
    Id,
    Funk,
}

impl Variant {
    /// Looks a variant up by its configured name. Unknown names return
    /// `None`; the caller turns that into a startup error.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "soundcloud" => Some(Variant::Soundcloud),
            "twitter" => Some(Variant::Twitter),
            "szparser" => Some(Variant::Sz),
            "idparser" => Some(Variant::Id),
            "funk" => Some(Variant::Funk),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Soundcloud => "soundcloud",
            Variant::Twitter => "twitter",
            Variant::Sz => "szparser",
            Variant::Id => "idparser",
            Variant::Funk => "funk",
        }
    }
}

/// Runs one extractor against one source and returns its records.
///
/// Failures never cross source boundaries: a fetch or decode failure for the
/// whole source logs a warning and yields zero records, a per-record failure
/// logs a warning and drops only that record.
pub fn run_extractor(client: &Client, variant: Variant, source: &str) -> Vec<Record> {
    let (records, errors) = match variant {
        Variant::Soundcloud => run_soundcloud(client, source),
        Variant::Twitter => run_twitter(client, source),
        Variant::Sz => run_sz(client, source),
        Variant::Id => run_id(client, source),
        Variant::Funk => run_funk(client, source),
    };
    for err in &errors {
        warn!(source, "{err}");
    }
    records
}

fn run_soundcloud(client: &Client, source: &str) -> (Vec<Record>, Vec<ExtractError>) {
    let url = soundcloud::tracks_url(source);
    let html = match client.fetch_text(&url) {
        Ok(html) => html,
        Err(err) => return (Vec::new(), vec![err]),
    };
    let mut extractor = soundcloud::SoundcloudExtractor::new(source);
    extractor.feed(&html);
    extractor.finish()
}

fn run_twitter(client: &Client, source: &str) -> (Vec<Record>, Vec<ExtractError>) {
    let html = match client.fetch_text(source) {
        Ok(html) => html,
        Err(err) => return (Vec::new(), vec![err]),
    };
    let mut extractor = twitter::TwitterExtractor::new(source);
    extractor.feed(&html);
    extractor.finish()
}

fn run_sz(client: &Client, source: &str) -> (Vec<Record>, Vec<ExtractError>) {
    let html = match client.fetch_text(source) {
        Ok(html) => html,
        Err(err) => return (Vec::new(), vec![err]),
    };
    let mut extractor = sz::SzExtractor::new(source);
    extractor.feed(&html);
    let (mut records, mut errors) = extractor.finish();
    errors.extend(detail::enrich_descriptions(client, &mut records));
    (records, errors)
}

fn run_id(client: &Client, source: &str) -> (Vec<Record>, Vec<ExtractError>) {
    let html = match client.fetch_text(source) {
        Ok(html) => html,
        Err(err) => return (Vec::new(), vec![err]),
    };
    let mut extractor = ruthe::IdExtractor::new(source);
    extractor.feed(&html);
    extractor.finish()
}

fn run_funk(client: &Client, source: &str) -> (Vec<Record>, Vec<ExtractError>) {
    let url = funk::api_url(source);
    let payload = match client.fetch_text(&url) {
        Ok(payload) => payload,
        Err(err) => return (Vec::new(), vec![err]),
    };
    match funk::extract(&payload, &url) {
        Ok(parts) => parts,
        Err(err) => (Vec::new(), vec![err]),
    }
}
