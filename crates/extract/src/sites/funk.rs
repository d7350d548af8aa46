// ABOUTME: JSON extractor for the funk.net channel video listing.
// ABOUTME: Decodes the video list payload and maps each element to one record.

use serde::Deserialize;

use crate::error::ExtractError;
use crate::models::Record;
use crate::time_parse::parse_publication_date;

/// Builds the channel video listing URL for a numeric channel id.
pub fn api_url(channel_id: &str) -> String {
    format!("https://www.funk.net/api/v4.0/channels/{channel_id}/videos")
}

#[derive(Debug, Deserialize)]
struct VideoPage {
    #[serde(default)]
    list: Vec<VideoEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    alias: String,
    #[serde(default)]
    channel_alias: String,
    #[serde(default)]
    publication_date: String,
}

impl VideoEntry {
    fn link(&self) -> String {
        format!(
            "https://www.funk.net/channel/{}/{}",
            self.channel_alias, self.alias
        )
    }
}

/// Decodes a video listing payload into records.
///
/// A malformed payload is an error for the whole source. A bad
/// `publicationDate` drops only that element; the rest of the list still
/// converts.
pub fn extract(
    payload: &str,
    source_url: &str,
) -> Result<(Vec<Record>, Vec<ExtractError>), ExtractError> {
    let page: VideoPage =
        serde_json::from_str(payload).map_err(|e| ExtractError::decode(source_url, e))?;

    let mut records = Vec::with_capacity(page.list.len());
    let mut errors = Vec::new();
    for entry in page.list {
        let published = match parse_publication_date(&entry.publication_date) {
            Ok(dt) => dt,
            Err(err) => {
                errors.push(err);
                continue;
            }
        };
        records.push(Record {
            link: entry.link(),
            title: entry.title,
            description: entry.short_description,
            published: Some(published),
            source_url: source_url.to_string(),
        });
    }
    Ok((records, errors))
}
