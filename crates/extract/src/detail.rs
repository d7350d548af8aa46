// ABOUTME: Auxiliary detail-page fetcher for record enrichment.
// ABOUTME: Pulls the first article container off a linked page to replace a summary description.

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::ExtractError;
use crate::fetch::Client;
use crate::models::Record;
use crate::text::strip_script_blocks;

/// Returns the inner HTML of the first `<article>` element, with script
/// blocks stripped. `None` when the page has no article container.
pub fn extract_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("article").ok()?;
    let article = document.select(&selector).next()?;
    Some(strip_script_blocks(&article.inner_html()))
}

/// Fetches `url` and extracts the article body from it.
pub fn fetch_description(client: &Client, url: &str) -> Result<String, ExtractError> {
    let html = client.fetch_text(url)?;
    extract_description(&html).ok_or_else(|| ExtractError::MissingContent {
        url: url.to_string(),
    })
}

/// Replaces each record's summary description with its detail-page body.
///
/// Enrichment is best-effort per record: a failed fetch or a page without an
/// article container leaves that record's summary in place and is returned
/// for the caller to log.
pub fn enrich_descriptions(client: &Client, records: &mut [Record]) -> Vec<ExtractError> {
    let mut errors = Vec::new();
    for record in records.iter_mut() {
        match fetch_description(client, &record.link) {
            Ok(description) => {
                debug!(link = %record.link, "replaced summary with detail-page body");
                record.description = description;
            }
            Err(err) => errors.push(err),
        }
    }
    errors
}
