// ABOUTME: Per-site record extractors and their shared event-dispatch plumbing.
// ABOUTME: Each module is one page's state machine, testable offline against fixture markup.

pub mod funk;
pub mod ruthe;
pub mod soundcloud;
pub mod sz;
pub mod twitter;

use url::Url;

use crate::error::ExtractError;
use crate::models::{Record, RecordDraft};
use crate::tokenizer::{tokenize, Attributes, TagEvent};

/// Capability set every markup extractor implements: consume one event at a
/// time, keeping all state private to the instance.
pub trait TagSink {
    fn on_start_tag(&mut self, name: &str, attrs: &Attributes);
    fn on_text(&mut self, text: &str);
    fn on_end_tag(&mut self, name: &str);
}

/// Feeds the event stream for `html` into a sink, start to finish.
pub fn drive<S: TagSink>(html: &str, sink: &mut S) {
    for event in tokenize(html) {
        match event {
            TagEvent::Start { name, attrs } => sink.on_start_tag(&name, &attrs),
            TagEvent::Text(data) => sink.on_text(&data),
            TagEvent::End { name } => sink.on_end_tag(&name),
        }
    }
}

/// Shared accumulate/emit/reset cycle behind every extractor.
///
/// Holds the in-progress draft, the emitted records, and the per-record
/// errors collected along the way. Emission snapshots the draft into the
/// output list; drafts without a link are dropped silently (truncation
/// handling, not a fault).
#[derive(Debug)]
pub(crate) struct Accumulator {
    source_url: String,
    pub(crate) draft: RecordDraft,
    records: Vec<Record>,
    errors: Vec<ExtractError>,
}

impl Accumulator {
    pub(crate) fn new(source_url: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            draft: RecordDraft::default(),
            records: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn source_url(&self) -> &str {
        &self.source_url
    }

    pub(crate) fn emit(&mut self) {
        if let Some(record) = self.draft.finish(&self.source_url) {
            self.records.push(record);
        }
    }

    pub(crate) fn discard(&mut self) {
        self.draft = RecordDraft::default();
    }

    /// Records a per-record failure and abandons the draft; extraction of
    /// subsequent entries continues.
    pub(crate) fn fail(&mut self, err: ExtractError) {
        self.errors.push(err);
        self.discard();
    }

    /// Consumes the accumulator. A still-open draft is dropped: a partial
    /// trailing entry is truncation, not a record.
    pub(crate) fn into_parts(self) -> (Vec<Record>, Vec<ExtractError>) {
        (self.records, self.errors)
    }
}

/// Resolves `href` against the page it appeared on. Returns `None` for
/// unresolvable references, leaving the draft without a link.
pub(crate) fn resolve_link(source_url: &str, href: &str) -> Option<String> {
    Url::parse(source_url).ok()?.join(href).ok().map(Into::into)
}

/// Substring match on the `class` attribute, mirroring how the upstream
/// pages mix modifier classes into one attribute value.
pub(crate) fn class_contains(attrs: &Attributes, needle: &str) -> bool {
    attrs.get("class").is_some_and(|c| c.contains(needle))
}
