// ABOUTME: Cartoon-archive extractor keyed on element ids.
// ABOUTME: Anchors with an id starting in "cartoon" become records; scrape time stands in for chronology.

use chrono::Utc;

use crate::error::ExtractError;
use crate::models::Record;
use crate::sites::{drive, resolve_link, Accumulator, TagSink};
use crate::tokenizer::Attributes;

/// State machine over an archive page whose entries carry `cartoon…` ids.
///
/// The site publishes no textual titles and no timestamps, so `title` stays
/// empty and the publication time is the wall clock at emission; within one
/// run, document order is preserved by the stable feed sort.
pub struct IdExtractor {
    acc: Accumulator,
    in_entry: bool,
}

impl IdExtractor {
    pub fn new(source_url: &str) -> Self {
        Self {
            acc: Accumulator::new(source_url),
            in_entry: false,
        }
    }

    pub fn feed(&mut self, html: &str) {
        drive(html, self);
    }

    pub fn finish(self) -> (Vec<Record>, Vec<ExtractError>) {
        self.acc.into_parts()
    }
}

impl TagSink for IdExtractor {
    fn on_start_tag(&mut self, name: &str, attrs: &Attributes) {
        match name {
            "a" => {
                let is_entry = attrs.get("id").is_some_and(|id| id.starts_with("cartoon"));
                if is_entry {
                    self.in_entry = true;
                    self.acc.draft.link = attrs
                        .get("href")
                        .and_then(|href| resolve_link(self.acc.source_url(), href));
                }
            }
            "img" if self.in_entry => {
                if let Some(alt) = attrs.get("alt") {
                    self.acc.draft.description = alt.to_string();
                }
            }
            _ => {}
        }
    }

    fn on_text(&mut self, _text: &str) {}

    fn on_end_tag(&mut self, name: &str) {
        if name == "a" && self.in_entry {
            self.in_entry = false;
            self.acc.draft.published = Some(Utc::now().fixed_offset());
            self.acc.emit();
        }
    }
}
