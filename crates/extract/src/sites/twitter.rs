// ABOUTME: Twitter profile-page extractor.
// ABOUTME: Reads the profile username once, then one record per tweet with a synthetic title.

use crate::error::ExtractError;
use crate::models::Record;
use crate::sites::{class_contains, drive, Accumulator, TagSink};
use crate::text::collapse_whitespace;
use crate::time_parse::{parse_tweet_timestamp, MonthNames, GERMAN_MONTHS};
use crate::tokenizer::Attributes;

/// State machine over a Twitter profile page.
///
/// The username is collected from the profile header and reused for every
/// tweet on the page. Each tweet contributes its permalink and timestamp via
/// the timestamp anchor and its body via the tweet text paragraph; the
/// paragraph's end tag completes the record.
pub struct TwitterExtractor {
    acc: Accumulator,
    months: &'static MonthNames,
    username: String,
    collecting_username: bool,
    collecting_description: bool,
}

impl TwitterExtractor {
    pub fn new(source_url: &str) -> Self {
        Self {
            acc: Accumulator::new(source_url),
            months: &GERMAN_MONTHS,
            username: String::new(),
            collecting_username: false,
            collecting_description: false,
        }
    }

    pub fn feed(&mut self, html: &str) {
        drive(html, self);
    }

    pub fn finish(self) -> (Vec<Record>, Vec<ExtractError>) {
        self.acc.into_parts()
    }
}

impl TagSink for TwitterExtractor {
    fn on_start_tag(&mut self, name: &str, attrs: &Attributes) {
        match name {
            "a" if class_contains(attrs, "ProfileHeaderCard-nameLink") => {
                self.collecting_username = true;
            }
            "a" if class_contains(attrs, "ProfileTweet-timestamp") => {
                let (Some(title), Some(href)) = (attrs.get("title"), attrs.get("href")) else {
                    return;
                };
                self.acc.draft.link = Some(format!("https://twitter.com{href}"));
                match parse_tweet_timestamp(title, self.months) {
                    Ok(published) => self.acc.draft.published = Some(published),
                    Err(err) => self.acc.fail(err),
                }
            }
            "p" if class_contains(attrs, "ProfileTweet-text") => {
                self.collecting_description = true;
            }
            _ => {}
        }
    }

    fn on_text(&mut self, text: &str) {
        if self.collecting_username {
            self.username.push_str(text);
        }
        if self.collecting_description {
            self.acc.draft.description.push_str(text);
        }
    }

    fn on_end_tag(&mut self, name: &str) {
        match name {
            "a" => self.collecting_username = false,
            "p" if self.collecting_description => {
                self.collecting_description = false;
                // Title is composed at emission so it reflects the final
                // username and timestamp, not collection order.
                if let Some(published) = self.acc.draft.published {
                    self.acc.draft.title = format!(
                        "[{}] Tweet {}",
                        collapse_whitespace(&self.username),
                        published.format("%Y-%m-%d %H:%M:%S"),
                    );
                }
                self.acc.emit();
            }
            _ => {}
        }
    }
}
