// ABOUTME: Feed assembly for pagefeed.
// ABOUTME: Collects extracted records into channels and renders RSS 2.0 documents.

pub mod rss;

pub use rss::{Channel, Feed};
