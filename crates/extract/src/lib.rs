// ABOUTME: Record extraction engine for pagefeed.
// ABOUTME: Turns web pages and JSON payloads into feed records via per-site state machines.

pub mod detail;
pub mod error;
pub mod fetch;
pub mod models;
pub mod registry;
pub mod sites;
pub mod text;
pub mod time_parse;
pub mod tokenizer;

pub use error::ExtractError;
pub use fetch::{Client, Options};
pub use models::{Record, RecordDraft};
pub use registry::{run_extractor, Variant};
pub use tokenizer::{tokenize, Attributes, TagEvent};
