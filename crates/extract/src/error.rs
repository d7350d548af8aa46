// ABOUTME: Error types for record extraction.
// ABOUTME: Provides ExtractError with fetch, decode, timestamp, and URL variants.

use thiserror::Error;

/// Errors that can occur while extracting records from a source.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The HTTP request failed (transport error or non-2xx status).
    #[error("fetch failed for {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The payload could not be decoded (malformed JSON, undecodable bytes).
    #[error("could not decode payload from {url}: {reason}")]
    Decode { url: String, reason: String },

    /// A timestamp string matched none of the formats the variant accepts.
    #[error("unparseable timestamp {value:?} (tried {formats})")]
    Timestamp { value: String, formats: String },

    /// The expected content container was not found on a detail page.
    #[error("no content container found at {url}")]
    MissingContent { url: String },

    /// The URL was syntactically invalid or used an unsupported scheme.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ExtractError {
    /// Creates a Decode error with a custom reason.
    pub fn decode(url: impl Into<String>, reason: impl ToString) -> Self {
        ExtractError::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Timestamp error naming the formats that were attempted.
    pub fn timestamp(value: impl Into<String>, formats: impl Into<String>) -> Self {
        ExtractError::Timestamp {
            value: value.into(),
            formats: formats.into(),
        }
    }
}
