// ABOUTME: Lenient tag event source for real-world HTML.
// ABOUTME: Produces StartTag/Text/EndTag events, skipping malformed fragments instead of failing.

use crate::text::decode_entities;

/// A single markup event. Tag and attribute names are lowercased; text and
/// attribute values have character references decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum TagEvent {
    Start { name: String, attrs: Attributes },
    Text(String),
    End { name: String },
}

/// Ordered attribute list with missing-key-safe lookup.
/// Duplicate keys keep document order; lookup returns the last occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn push(&mut self, name: String, value: String) {
        self.pairs.push((name, value));
    }
}

/// Returns a lazy, finite, non-restartable event sequence over `html`.
pub fn tokenize(html: &str) -> Tokenizer<'_> {
    Tokenizer {
        rest: html,
        rawtext: None,
    }
}

/// Iterator over [`TagEvent`]s. A bad tag never aborts the stream; the
/// unparseable fragment is skipped and scanning continues.
pub struct Tokenizer<'a> {
    rest: &'a str,
    // Element whose raw content (no entity decoding, no nested tags) is pending.
    rawtext: Option<&'static str>,
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = TagEvent;

    fn next(&mut self) -> Option<TagEvent> {
        loop {
            if let Some(element) = self.rawtext.take() {
                if let Some(event) = self.read_rawtext(element) {
                    return Some(event);
                }
                continue;
            }

            if self.rest.is_empty() {
                return None;
            }

            if let Some(after_lt) = self.rest.strip_prefix('<') {
                match after_lt.chars().next() {
                    Some('/') => {
                        if let Some(event) = self.read_end_tag() {
                            return Some(event);
                        }
                    }
                    Some('!') | Some('?') => self.skip_declaration(),
                    Some(c) if c.is_ascii_alphabetic() => {
                        if let Some(event) = self.read_start_tag() {
                            return Some(event);
                        }
                    }
                    // A '<' that opens nothing is ordinary text.
                    _ => return Some(self.read_text_from(1)),
                }
            } else {
                return Some(self.read_text_from(0));
            }
        }
    }
}

impl<'a> Tokenizer<'a> {
    /// Text up to the next '<', starting the scan at `skip` bytes in.
    fn read_text_from(&mut self, skip: usize) -> TagEvent {
        let end = self.rest[skip..]
            .find('<')
            .map(|i| i + skip)
            .unwrap_or(self.rest.len());
        let (data, rest) = self.rest.split_at(end);
        self.rest = rest;
        TagEvent::Text(decode_entities(data))
    }

    /// Raw content of a script/style element, up to its close tag.
    fn read_rawtext(&mut self, element: &str) -> Option<TagEvent> {
        let close = format!("</{element}");
        let lower = self.rest.to_ascii_lowercase();
        let end = lower.find(&close).unwrap_or(self.rest.len());
        let (data, rest) = self.rest.split_at(end);
        self.rest = rest;
        if data.is_empty() {
            None
        } else {
            Some(TagEvent::Text(data.to_string()))
        }
    }

    fn skip_declaration(&mut self) {
        if self.rest.starts_with("<!--") {
            match self.rest.find("-->") {
                Some(i) => self.rest = &self.rest[i + 3..],
                None => self.rest = "",
            }
        } else {
            match self.rest.find('>') {
                Some(i) => self.rest = &self.rest[i + 1..],
                None => self.rest = "",
            }
        }
    }

    fn read_end_tag(&mut self) -> Option<TagEvent> {
        let Some(close) = self.rest.find('>') else {
            // Truncated close tag at end of input.
            self.rest = "";
            return None;
        };
        let inner = self.rest[2..close].trim();
        self.rest = &self.rest[close + 1..];

        let name = inner.split_whitespace().next().unwrap_or("");
        if name.is_empty() || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(TagEvent::End {
            name: name.to_ascii_lowercase(),
        })
    }

    fn read_start_tag(&mut self) -> Option<TagEvent> {
        // Find the closing '>' while honoring quoted attribute values.
        let bytes = self.rest.as_bytes();
        let mut i = 1;
        let mut quote: Option<u8> = None;
        while i < bytes.len() {
            let b = bytes[i];
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                    }
                }
                None => match b {
                    b'"' | b'\'' => quote = Some(b),
                    b'>' => break,
                    _ => {}
                },
            }
            i += 1;
        }
        if i >= bytes.len() {
            // Unterminated tag at end of input.
            self.rest = "";
            return None;
        }

        let inner = &self.rest[1..i];
        self.rest = &self.rest[i + 1..];

        let self_closing = inner.ends_with('/');
        let inner = inner.strip_suffix('/').unwrap_or(inner);
        let (name, attr_src) = match inner.find(|c: char| c.is_whitespace()) {
            Some(pos) => (&inner[..pos], &inner[pos..]),
            None => (inner, ""),
        };
        let name = name.to_ascii_lowercase();
        let attrs = parse_attributes(attr_src);

        if !self_closing && (name == "script" || name == "style") {
            self.rawtext = Some(if name == "script" { "script" } else { "style" });
        }

        Some(TagEvent::Start { name, attrs })
    }
}

fn parse_attributes(src: &str) -> Attributes {
    let mut attrs = Attributes::default();
    let mut rest = src.trim_start();

    while !rest.is_empty() {
        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let name = rest[..name_end].trim_matches('/').to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = if let Some(tail) = rest.strip_prefix('=') {
            let tail = tail.trim_start();
            match tail.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let inner = &tail[1..];
                    match inner.find(q) {
                        Some(end) => {
                            rest = inner[end + 1..].trim_start();
                            inner[..end].to_string()
                        }
                        None => {
                            rest = "";
                            inner.to_string()
                        }
                    }
                }
                _ => {
                    let end = tail
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(tail.len());
                    let value = tail[..end].to_string();
                    rest = tail[end..].trim_start();
                    value
                }
            }
        } else {
            String::new()
        };

        if !name.is_empty() {
            attrs.push(name, decode_entities(&value));
        }
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        let mut a = Attributes::default();
        for (k, v) in pairs {
            a.push(k.to_string(), v.to_string());
        }
        a
    }

    #[test]
    fn basic_events() {
        let events: Vec<_> = tokenize("<p>a &amp; b</p>").collect();
        assert_eq!(
            events,
            vec![
                TagEvent::Start {
                    name: "p".into(),
                    attrs: Attributes::default()
                },
                TagEvent::Text("a & b".into()),
                TagEvent::End { name: "p".into() },
            ]
        );
    }

    #[test]
    fn attributes_are_lowercased_and_decoded() {
        let events: Vec<_> = tokenize(r#"<A HREF="/x?a=1&amp;b=2" Class=link>"#).collect();
        assert_eq!(
            events,
            vec![TagEvent::Start {
                name: "a".into(),
                attrs: attrs(&[("href", "/x?a=1&b=2"), ("class", "link")]),
            }]
        );
    }

    #[test]
    fn duplicate_attribute_lookup_is_last_wins() {
        let events: Vec<_> = tokenize(r#"<div id="first" id="second">"#).collect();
        let TagEvent::Start { attrs, .. } = &events[0] else {
            panic!("expected start tag");
        };
        assert_eq!(attrs.get("id"), Some("second"));
        assert_eq!(attrs.len(), 2);
    }

    #[test]
    fn quoted_value_may_contain_gt() {
        let events: Vec<_> = tokenize(r#"<img alt="a > b" src=x.png>"#).collect();
        let TagEvent::Start { name, attrs } = &events[0] else {
            panic!("expected start tag");
        };
        assert_eq!(name, "img");
        assert_eq!(attrs.get("alt"), Some("a > b"));
        assert_eq!(attrs.get("src"), Some("x.png"));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn comments_and_doctype_are_skipped() {
        let events: Vec<_> =
            tokenize("<!DOCTYPE html><!-- note --><b>x</b><!-- trailing").collect();
        assert_eq!(
            events,
            vec![
                TagEvent::Start {
                    name: "b".into(),
                    attrs: Attributes::default()
                },
                TagEvent::Text("x".into()),
                TagEvent::End { name: "b".into() },
            ]
        );
    }

    #[test]
    fn stray_lt_is_text() {
        let text: String = tokenize("a < b")
            .map(|e| match e {
                TagEvent::Text(t) => t,
                _ => panic!("expected only text events"),
            })
            .collect();
        assert_eq!(text, "a < b");
    }

    #[test]
    fn truncated_tag_does_not_hang() {
        let events: Vec<_> = tokenize("ok<a href=").collect();
        assert_eq!(events, vec![TagEvent::Text("ok".into())]);
    }

    #[test]
    fn script_content_is_one_raw_text_event() {
        let events: Vec<_> =
            tokenize("<script>if (a < b) { x(\"&amp;\"); }</script><p>t</p>").collect();
        assert_eq!(
            events[0],
            TagEvent::Start {
                name: "script".into(),
                attrs: Attributes::default()
            }
        );
        // Raw content: no entity decoding, '<' kept verbatim.
        assert_eq!(
            events[1],
            TagEvent::Text("if (a < b) { x(\"&amp;\"); }".into())
        );
        assert_eq!(events[2], TagEvent::End { name: "script".into() });
        assert_eq!(
            events[3],
            TagEvent::Start {
                name: "p".into(),
                attrs: Attributes::default()
            }
        );
    }

    #[test]
    fn self_closing_tag_emits_start_only() {
        let events: Vec<_> = tokenize(r#"<meta itemprop="url" content="x"/>"#).collect();
        assert_eq!(
            events,
            vec![TagEvent::Start {
                name: "meta".into(),
                attrs: attrs(&[("itemprop", "url"), ("content", "x")]),
            }]
        );
    }
}
