// ABOUTME: Rendering and ordering tests for the RSS assembler.
// ABOUTME: Checks escaping, optional pubDate, sort stability, and XML well-formedness.

use chrono::{DateTime, FixedOffset};
use pretty_assertions::assert_eq;

use pagefeed_extract::Record;
use pagefeed_feed::{Channel, Feed};

fn channel() -> Channel {
    Channel {
        title: "Testfeed".into(),
        link: "https://example.org/feed.xml".into(),
        description: "Ein Feed.".into(),
    }
}

fn record(title: &str, published: Option<&str>) -> Record {
    Record {
        title: title.into(),
        link: format!("https://example.org/{title}"),
        description: format!("Beschreibung {title}"),
        published: published.map(|p| DateTime::parse_from_rfc3339(p).unwrap()),
        source_url: "https://example.org".into(),
    }
}

#[test]
fn text_fields_use_numeric_references() {
    let mut feed = Feed::new(Channel {
        title: "News & <Updates>".into(),
        ..channel()
    });
    feed.add_item(record("a", None));
    let xml = feed.render();

    assert!(xml.contains("<title>News &#38; &#60;Updates&#62;</title>"));
    assert!(!xml.contains("News & <Updates>"));
}

#[test]
fn undated_items_omit_pub_date() {
    let mut feed = Feed::new(channel());
    feed.add_item(record("undatiert", None));
    let xml = feed.render();

    let item = &xml[xml.find("<item>").unwrap()..];
    assert!(!item.contains("<pubDate>"));
    assert!(item.contains("<title>undatiert</title>"));
    // The channel still carries a render-time pubDate.
    assert!(xml[..xml.find("<item>").unwrap()].contains("<pubDate>"));
}

#[test]
fn sort_is_descending_and_stable() {
    let t = "2022-10-20T12:00:00+00:00";
    let earlier = "2022-10-20T11:00:00+00:00";
    let mut feed = Feed::new(channel());
    feed.add_item(record("first-at-t", Some(t)));
    feed.add_item(record("second-at-t", Some(t)));
    feed.add_item(record("earlier", Some(earlier)));
    feed.add_item(record("undated", None));
    feed.sort_by_date();

    let titles: Vec<&str> = feed.items().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["first-at-t", "second-at-t", "earlier", "undated"]);
}

#[test]
fn rendering_twice_differs_only_in_channel_pub_date() {
    let mut feed = Feed::new(channel());
    feed.add_item(record("a", Some("2022-10-20T12:00:00+00:00")));

    let strip_channel_date = |xml: &str| -> String {
        xml.lines()
            .filter(|l| !l.trim_start().starts_with("<pubDate>") || l.starts_with("            "))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip_channel_date(&feed.render()), strip_channel_date(&feed.render()));
}

#[test]
fn rendered_document_is_well_formed_xml() {
    let mut feed = Feed::new(Channel {
        title: "A & B".into(),
        ..channel()
    });
    feed.add_item(record("mit <markup> & so", Some("2022-10-20T12:00:00+00:00")));
    feed.add_item(record("ohne datum", None));
    let xml = feed.render();

    let mut reader = quick_xml::Reader::from_str(&xml);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("rendered feed is not well-formed: {e}"),
        }
        buf.clear();
    }
}
