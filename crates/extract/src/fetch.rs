// ABOUTME: Blocking HTTP fetch layer shared by all extractors.
// ABOUTME: Wraps reqwest with User-Agent/Accept-Language defaults and typed fetch errors.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE};
use url::Url;

use crate::error::ExtractError;

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0 (compatible; pagefeed/0.1)".to_string(),
            accept_language: "de,en;q=0.7".to_string(),
        }
    }
}

/// Blocking HTTP client used by extractors and the detail fetcher.
///
/// One fetch per call, no retries: a failed request surfaces as
/// [`ExtractError::Fetch`] and the caller decides whether the source is
/// skipped.
pub struct Client {
    http: reqwest::blocking::Client,
}

impl Client {
    pub fn new(opts: Options) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&opts.accept_language)
                .expect("invalid Accept-Language header value"),
        );

        let http = reqwest::blocking::Client::builder()
            .user_agent(&opts.user_agent)
            .default_headers(headers)
            .timeout(opts.timeout)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .expect("failed to build HTTP client");

        Self { http }
    }

    /// Fetches `url` and returns the response body as text.
    /// Non-2xx statuses and transport errors both map to fetch failures.
    pub fn fetch_text(&self, url: &str) -> Result<String, ExtractError> {
        let parsed = Url::parse(url).map_err(|e| ExtractError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let scheme = parsed.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ExtractError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {scheme:?}"),
            });
        }

        let response = self
            .http
            .get(parsed)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|source| ExtractError::Fetch {
                url: url.to_string(),
                source,
            })?;

        response.text().map_err(|source| ExtractError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn fetch_text_returns_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/page")
                .header("user-agent", "Mozilla/5.0 (compatible; pagefeed/0.1)")
                .header("accept-language", "de,en;q=0.7");
            then.status(200).body("<html>hi</html>");
        });

        let client = Client::default();
        let body = client.fetch_text(&server.url("/page")).unwrap();
        mock.assert();
        assert_eq!(body, "<html>hi</html>");
    }

    #[test]
    fn non_2xx_is_a_fetch_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let client = Client::default();
        let err = client.fetch_text(&server.url("/missing")).unwrap_err();
        assert!(matches!(err, ExtractError::Fetch { .. }), "got {err}");
    }

    #[test]
    fn bad_urls_are_rejected_up_front() {
        let client = Client::default();
        assert!(matches!(
            client.fetch_text("not a url"),
            Err(ExtractError::InvalidUrl { .. })
        ));
        assert!(matches!(
            client.fetch_text("ftp://example.org/x"),
            Err(ExtractError::InvalidUrl { .. })
        ));
    }
}
