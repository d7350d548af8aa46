// ABOUTME: Record model for extracted feed entries.
// ABOUTME: RecordDraft accumulates fields and converts to an immutable Record on emission.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::text::collapse_whitespace;

/// One extracted item of syndicated content.
///
/// A `Record` only exists with a link; drafts that never discover one are
/// discarded rather than emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub link: String,
    pub description: String,
    /// Publication time with offset, when the source furnishes one.
    pub published: Option<DateTime<FixedOffset>>,
    /// The page the record was extracted from (provenance, not rendered).
    pub source_url: String,
}

/// The in-progress record an extractor mutates as matching events arrive.
///
/// Text fields accumulate by concatenation across text events. [`finish`]
/// copies the draft into an owned [`Record`] and resets the draft, so later
/// mutation never touches already-emitted records.
///
/// [`finish`]: RecordDraft::finish
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    pub title: String,
    pub link: Option<String>,
    pub description: String,
    pub published: Option<DateTime<FixedOffset>>,
}

impl RecordDraft {
    /// Completes the draft: normalizes accumulated whitespace, takes a
    /// snapshot, and resets the draft to its template state.
    ///
    /// Returns `None` (still resetting) when no link was ever discovered;
    /// such drafts represent truncated or malformed entries.
    pub fn finish(&mut self, source_url: &str) -> Option<Record> {
        let draft = std::mem::take(self);
        let link = draft.link?;
        Some(Record {
            title: collapse_whitespace(&draft.title),
            link,
            description: collapse_whitespace(&draft.description),
            published: draft.published,
            source_url: source_url.to_string(),
        })
    }
}
