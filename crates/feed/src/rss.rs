// ABOUTME: RSS 2.0 channel model and renderer.
// ABOUTME: Stable descending date sort, numeric entity escaping, RFC 2822 dates.

use chrono::Local;
use serde::{Deserialize, Serialize};

use pagefeed_extract::Record;

/// Channel-level metadata for one output feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// A feed under assembly: channel metadata plus the records collected so far.
#[derive(Debug, Clone)]
pub struct Feed {
    channel: Channel,
    items: Vec<Record>,
}

impl Feed {
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self, record: Record) {
        self.items.push(record);
    }

    pub fn items(&self) -> &[Record] {
        &self.items
    }

    /// Sorts items newest-first. The sort is stable and items without a
    /// publication time go last, so insertion order is preserved within
    /// equal dates and among undated items.
    pub fn sort_by_date(&mut self) {
        self.items.sort_by(|a, b| b.published.cmp(&a.published));
    }

    /// Renders the feed as an RSS 2.0 document.
    ///
    /// The channel `pubDate` is the render time, so rendering the same feed
    /// twice yields documents differing only in that field. Item `pubDate`
    /// elements appear only for dated records.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(1024 + self.items.len() * 256);
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n");
        out.push_str("<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n");
        out.push_str("    <channel>\n");
        push_element(&mut out, 8, "title", &self.channel.title);
        push_element(&mut out, 8, "link", &self.channel.link);
        push_element(&mut out, 8, "description", &self.channel.description);
        push_element(&mut out, 8, "pubDate", &Local::now().to_rfc2822());
        out.push_str(&format!(
            "        <atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\"/>\n",
            escape_entities(&self.channel.link)
        ));

        for item in &self.items {
            out.push_str("        <item>\n");
            push_element(&mut out, 12, "title", &item.title);
            push_element(&mut out, 12, "link", &item.link);
            push_element(&mut out, 12, "description", &item.description);
            if let Some(published) = item.published {
                push_element(&mut out, 12, "pubDate", &published.to_rfc2822());
            }
            out.push_str("        </item>\n");
        }

        out.push_str("    </channel>\n");
        out.push_str("</rss>\n");
        out
    }
}

fn push_element(out: &mut String, indent: usize, name: &str, value: &str) {
    out.push_str(&" ".repeat(indent));
    out.push('<');
    out.push_str(name);
    out.push('>');
    out.push_str(&escape_entities(value));
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

/// Escapes exactly `&`, `<`, and `>` as numeric character references.
fn escape_entities(s: &str) -> String {
    s.replace('&', "&#38;")
        .replace('<', "&#60;")
        .replace('>', "&#62;")
}
