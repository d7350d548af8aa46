// ABOUTME: Soundcloud tracks-page extractor.
// ABOUTME: Collects link/description from meta tags, title from anchors in headings, time from pretty-date abbrs.

use crate::error::ExtractError;
use crate::models::Record;
use crate::sites::{class_contains, drive, Accumulator, TagSink};
use crate::time_parse::parse_pretty_date;
use crate::tokenizer::Attributes;

/// Builds the tracks listing URL for a profile page.
pub fn tracks_url(source_url: &str) -> String {
    format!("{}/tracks", source_url.trim_end_matches('/'))
}

/// State machine over a Soundcloud `/tracks` page.
///
/// A track entry is complete once title, link, and publication time are all
/// present; completeness is checked after every start tag, so the emitting
/// event is whichever tag supplies the last missing field.
pub struct SoundcloudExtractor {
    acc: Accumulator,
    in_heading: bool,
    collecting_title: bool,
}

impl SoundcloudExtractor {
    pub fn new(source_url: &str) -> Self {
        Self {
            acc: Accumulator::new(source_url),
            in_heading: false,
            collecting_title: false,
        }
    }

    /// Consumes one page of markup. Callable repeatedly for pagination;
    /// state carries across calls.
    pub fn feed(&mut self, html: &str) {
        drive(html, self);
    }

    pub fn finish(self) -> (Vec<Record>, Vec<ExtractError>) {
        self.acc.into_parts()
    }

    fn complete(&self) -> bool {
        let draft = &self.acc.draft;
        !draft.title.is_empty() && draft.link.is_some() && draft.published.is_some()
    }
}

impl TagSink for SoundcloudExtractor {
    fn on_start_tag(&mut self, name: &str, attrs: &Attributes) {
        match name {
            "meta" => match attrs.get("itemprop") {
                Some("url") => {
                    if let Some(content) = attrs.get("content") {
                        self.acc.draft.link = Some(content.to_string());
                    }
                }
                Some("description") => {
                    if let Some(content) = attrs.get("content") {
                        self.acc.draft.description = content.to_string();
                    }
                }
                _ => {}
            },
            "h3" => self.in_heading = true,
            "a" if self.in_heading => {
                if let Some(href) = attrs.get("href") {
                    self.collecting_title = true;
                    // Anchor fallback when the meta tags are absent.
                    self.acc.draft.link = Some(format!("https://soundcloud.com{href}"));
                }
            }
            "abbr" if class_contains(attrs, "pretty-date") => {
                if let Some(title) = attrs.get("title") {
                    match parse_pretty_date(title) {
                        Ok(published) => self.acc.draft.published = Some(published),
                        Err(err) => self.acc.fail(err),
                    }
                }
            }
            _ => {}
        }

        if self.complete() {
            self.acc.emit();
        }
    }

    fn on_text(&mut self, text: &str) {
        if self.collecting_title {
            self.acc.draft.title.push_str(text);
        }
    }

    fn on_end_tag(&mut self, name: &str) {
        match name {
            "a" => self.collecting_title = false,
            "h3" => {
                self.in_heading = false;
                self.collecting_title = false;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "https://soundcloud.com/some-artist";

    fn track(title: &str, href: &str, date: &str) -> String {
        format!(
            r#"<article>
                 <meta itemprop="url" content="https://soundcloud.com{href}">
                 <meta itemprop="description" content="A track.">
                 <h3><a href="{href}">{title}</a></h3>
                 <abbr class="pretty-date" title="{date}">1 day ago</abbr>
               </article>"#
        )
    }

    #[test]
    fn tracks_url_appends_segment() {
        assert_eq!(
            tracks_url("https://soundcloud.com/artist/"),
            "https://soundcloud.com/artist/tracks"
        );
    }

    #[test]
    fn extracts_a_complete_track() {
        let mut ex = SoundcloudExtractor::new(SOURCE);
        ex.feed(&track("First Song", "/some-artist/first-song", "December, 04 2014 09:30:00 +0000"));
        let (records, errors) = ex.finish();

        assert!(errors.is_empty());
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.title, "First Song");
        assert_eq!(record.link, "https://soundcloud.com/some-artist/first-song");
        assert_eq!(record.description, "A track.");
        let published = record.published.expect("published");
        assert_eq!((published.year(), published.month(), published.day()), (2014, 12, 4));
        assert_eq!(published.hour(), 9);
        assert_eq!(record.source_url, SOURCE);
    }

    #[test]
    fn title_spanning_markup_concatenates_text_events() {
        let html = r#"
            <meta itemprop="url" content="https://soundcloud.com/a/t">
            <h3><a href="/a/t">Track <em>One</em></a></h3>
            <abbr class="pretty-date" title="May, 01 2015 12:00:00 +0000">x</abbr>"#;
        let mut ex = SoundcloudExtractor::new(SOURCE);
        ex.feed(html);
        let (records, _) = ex.finish();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Track One");
    }

    #[test]
    fn two_tracks_do_not_bleed_into_each_other() {
        let html = format!(
            "{}{}",
            track("One", "/a/one", "December, 04 2014 09:30:00 +0000"),
            track("Two", "/a/two", "December, 05 2014 10:00:00 +0000"),
        );
        let mut ex = SoundcloudExtractor::new(SOURCE);
        ex.feed(&html);
        let (records, errors) = ex.finish();

        assert!(errors.is_empty());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "One");
        assert_eq!(records[1].title, "Two");
        assert_eq!(records[1].link, "https://soundcloud.com/a/two");
    }

    #[test]
    fn bad_pretty_date_fails_that_record_only() {
        let html = format!(
            "{}{}",
            track("Broken", "/a/broken", "not a date at all"),
            track("Fine", "/a/fine", "December, 05 2014 10:00:00 +0000"),
        );
        let mut ex = SoundcloudExtractor::new(SOURCE);
        ex.feed(&html);
        let (records, errors) = ex.finish();

        assert_eq!(errors.len(), 1);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Fine");
    }

    #[test]
    fn truncated_page_emits_nothing() {
        let mut ex = SoundcloudExtractor::new(SOURCE);
        ex.feed(r#"<h3><a href="/a/t">Dangling"#);
        let (records, errors) = ex.finish();
        assert!(records.is_empty());
        assert!(errors.is_empty());
    }
}
