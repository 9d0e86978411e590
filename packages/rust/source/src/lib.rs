//! Fetching the published CSV export of the job sheet.
//!
//! One GET per ingestion run. The request carries a cache-defeating `_`
//! query parameter so spreadsheet CDNs never hand back a stale export, and
//! it is bounded by an explicit timeout. Anything other than a successful,
//! plausibly sized body is reported as an error so the caller can fall back.

use std::time::Duration;

use chrono::Utc;
use jobcarousel_shared::{AppConfig, JobCarouselError, Result};
use reqwest::Client;
use tracing::{debug, info, instrument};
use url::Url;

/// Maximum number of redirects to follow (published sheets redirect once).
const MAX_REDIRECTS: usize = 5;

/// Maximum response size we consider valid (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Name of the cache-busting query parameter.
const CACHE_BUST_PARAM: &str = "_";

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("JobCarousel/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Configuration for fetching the CSV export.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// CSV export URL, without the cache-busting parameter.
    pub url: String,
    /// Timeout for the whole request in seconds.
    pub timeout_secs: u64,
    /// Bodies shorter than this many bytes are rejected.
    pub min_body_bytes: usize,
}

impl From<&AppConfig> for FetchOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            url: config.source.csv_url.clone(),
            timeout_secs: config.source.timeout_secs,
            min_body_bytes: config.source.min_body_bytes,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// A successfully fetched CSV document.
#[derive(Debug, Clone)]
pub struct FetchedCsv {
    /// The exact URL requested, cache buster included.
    pub url: Url,
    /// Raw response body.
    pub body: String,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Fetch the CSV export described by `opts`.
///
/// Fails with [`JobCarouselError::Network`] on transport errors and non-2xx
/// statuses, and with [`JobCarouselError::Validation`] when the body is too
/// short or too large to be a real export.
#[instrument(skip_all, fields(url = %opts.url))]
pub async fn fetch_csv(opts: &FetchOptions) -> Result<FetchedCsv> {
    let base = Url::parse(&opts.url).map_err(|e| {
        JobCarouselError::config(format!("invalid CSV URL '{}': {e}", opts.url))
    })?;
    let url = cache_busted_url(&base, Utc::now().timestamp_millis());

    info!("fetching CSV export");

    let client = build_client(opts)?;
    let body = fetch_and_validate(&client, &url, opts.min_body_bytes).await?;

    info!(bytes = body.len(), "CSV export received");

    Ok(FetchedCsv { url, body })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Append the cache-busting `_=<stamp>` parameter to `base`.
pub fn cache_busted_url(base: &Url, stamp: i64) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair(CACHE_BUST_PARAM, &stamp.to_string());
    url
}

/// Build a reqwest client with appropriate settings.
fn build_client(opts: &FetchOptions) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(opts.timeout_secs))
        .build()
        .map_err(|e| JobCarouselError::Network(format!("failed to build HTTP client: {e}")))
}

/// Fetch a URL and check the response looks like a usable export.
async fn fetch_and_validate(client: &Client, url: &Url, min_body_bytes: usize) -> Result<String> {
    let mut response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| JobCarouselError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(JobCarouselError::Network(format!("{url}: HTTP {status}")));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(JobCarouselError::validation(format!(
                "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
            )));
        }
    }

    // Content-Length is absent on chunked responses, so the cap is also
    // enforced while reading.
    let mut bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| JobCarouselError::Network(format!("{url}: failed to read body: {e}")))?
    {
        push_capped(&mut bytes, &chunk, MAX_RESPONSE_SIZE).map_err(|read| {
            JobCarouselError::validation(format!(
                "{url}: response too large (over {read} bytes, max {MAX_RESPONSE_SIZE})"
            ))
        })?;
    }
    let body = String::from_utf8_lossy(&bytes).into_owned();

    debug!(bytes = body.len(), min_body_bytes, "checking body length");

    if body.len() < min_body_bytes {
        return Err(JobCarouselError::validation(format!(
            "{url}: CSV data too short ({} bytes, need at least {min_body_bytes})",
            body.len()
        )));
    }

    Ok(body)
}

/// Append `chunk` to `buf` unless that would take it past `max` bytes.
///
/// On overflow `buf` is left untouched and the would-be length is returned.
fn push_capped(buf: &mut Vec<u8>, chunk: &[u8], max: u64) -> std::result::Result<(), u64> {
    let len = (buf.len() + chunk.len()) as u64;
    if len > max {
        return Err(len);
    }
    buf.extend_from_slice(chunk);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Job Title,Company Name,Location,Posted Date\n\
                       Property Inspector,Guardian Inspection Services,\"Tampa, FL\",1 day ago\n\
                       Claims Adjuster,Reliable Claims Solutions,Remote,2 days ago\n";

    fn opts_for(server: &wiremock::MockServer) -> FetchOptions {
        FetchOptions {
            url: format!("{}/pub?output=csv", server.uri()),
            timeout_secs: 5,
            min_body_bytes: 100,
        }
    }

    #[test]
    fn cache_buster_is_appended_to_existing_query() {
        let base = Url::parse("https://docs.example.com/pub?output=csv").unwrap();
        let url = cache_busted_url(&base, 1_700_000_000_000);
        assert_eq!(
            url.as_str(),
            "https://docs.example.com/pub?output=csv&_=1700000000000"
        );
    }

    #[test]
    fn default_options_follow_app_config() {
        let opts = FetchOptions::default();
        assert_eq!(opts.timeout_secs, 15);
        assert_eq!(opts.min_body_bytes, 100);
        assert!(opts.url.contains("output=csv"));
    }

    #[test]
    fn body_budget_stops_oversized_reads() {
        let mut buf = Vec::new();
        assert_eq!(push_capped(&mut buf, b"Job Title,", 16), Ok(()));
        assert_eq!(push_capped(&mut buf, b"Company Name\n", 16), Err(23));
        assert_eq!(buf, b"Job Title,");
        assert_eq!(push_capped(&mut buf, b"Source", 16), Ok(()));
        assert_eq!(buf.len(), 16);
    }

    #[tokio::test]
    async fn fetches_csv_with_cache_buster() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/pub"))
            .and(wiremock::matchers::query_param("output", "csv"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(CSV))
            .mount(&server)
            .await;

        let fetched = fetch_csv(&opts_for(&server)).await.unwrap();
        assert_eq!(fetched.body, CSV);
        assert!(fetched.url.query_pairs().any(|(k, _)| k == "_"));

        let requests = server.received_requests().await.expect("recording enabled");
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.query_pairs().any(|(k, _)| k == "_"));
    }

    #[tokio::test]
    async fn non_success_status_is_network_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = fetch_csv(&opts_for(&server)).await.unwrap_err();
        assert!(matches!(err, JobCarouselError::Network(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn short_body_is_rejected() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("Job Title\n"))
            .mount(&server)
            .await;

        let err = fetch_csv(&opts_for(&server)).await.unwrap_err();
        assert!(matches!(err, JobCarouselError::Validation { .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string(CSV)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut opts = opts_for(&server);
        opts.timeout_secs = 1;
        let err = fetch_csv(&opts).await.unwrap_err();
        assert!(matches!(err, JobCarouselError::Network(_)));
    }

    #[tokio::test]
    async fn invalid_url_is_config_error() {
        let opts = FetchOptions {
            url: "not a url".into(),
            ..FetchOptions::default()
        };
        let err = fetch_csv(&opts).await.unwrap_err();
        assert!(matches!(err, JobCarouselError::Config { .. }));
    }
}
