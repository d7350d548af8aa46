// ABOUTME: Sueddeutsche Zeitung teaser-list extractor.
// ABOUTME: One record per sz-teaser anchor; title, summary, and time come from nested elements.

use crate::error::ExtractError;
use crate::models::Record;
use crate::sites::{class_contains, drive, resolve_link, Accumulator, TagSink};
use crate::time_parse::parse_with_formats;
use crate::tokenizer::Attributes;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%z", "%Y-%m-%d %H:%M:%S"];

/// State machine over an SZ department page.
///
/// The teaser anchor is the entry boundary; nested anchors are tracked by
/// depth so only the boundary's own end tag completes the record. Text
/// collection for title and summary stops at the end tag of the element
/// that started it.
pub struct SzExtractor {
    acc: Accumulator,
    // Depth of open <a> elements inside the current teaser; 0 = outside.
    anchor_depth: usize,
    collecting: Option<Field>,
    // Element name whose end tag stops the current collection.
    collecting_until: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Title,
    Summary,
}

impl SzExtractor {
    pub fn new(source_url: &str) -> Self {
        Self {
            acc: Accumulator::new(source_url),
            anchor_depth: 0,
            collecting: None,
            collecting_until: String::new(),
        }
    }

    pub fn feed(&mut self, html: &str) {
        drive(html, self);
    }

    pub fn finish(self) -> (Vec<Record>, Vec<ExtractError>) {
        self.acc.into_parts()
    }

    fn in_entry(&self) -> bool {
        self.anchor_depth > 0
    }
}

impl TagSink for SzExtractor {
    fn on_start_tag(&mut self, name: &str, attrs: &Attributes) {
        if name == "a" {
            if self.in_entry() {
                self.anchor_depth += 1;
            } else if class_contains(attrs, "sz-teaser") {
                self.anchor_depth = 1;
                self.acc.draft.link = attrs
                    .get("href")
                    .and_then(|href| resolve_link(self.acc.source_url(), href));
            }
            return;
        }

        if !self.in_entry() {
            return;
        }

        if class_contains(attrs, "sz-teaser__title") {
            self.collecting = Some(Field::Title);
            self.collecting_until = name.to_string();
        } else if class_contains(attrs, "sz-teaser__summary") {
            self.collecting = Some(Field::Summary);
            self.collecting_until = name.to_string();
        } else if name == "time" {
            if let Some(datetime) = attrs.get("datetime") {
                match parse_with_formats(datetime, &DATETIME_FORMATS) {
                    Ok(published) => self.acc.draft.published = Some(published),
                    Err(err) => {
                        self.acc.fail(err);
                        // The boundary anchor is still open; skip the rest
                        // of this entry.
                        self.anchor_depth = 0;
                        self.collecting = None;
                    }
                }
            }
        }
    }

    fn on_text(&mut self, text: &str) {
        match self.collecting {
            Some(Field::Title) => self.acc.draft.title.push_str(text),
            Some(Field::Summary) => self.acc.draft.description.push_str(text),
            None => {}
        }
    }

    fn on_end_tag(&mut self, name: &str) {
        if self.collecting.is_some() && name == self.collecting_until {
            self.collecting = None;
        }

        if name == "a" && self.in_entry() {
            self.anchor_depth -= 1;
            if self.anchor_depth == 0 {
                self.acc.emit();
            }
        }
    }
}
