//! Taxonomy download over HTTP.
//!
//! Issues a single GET against the taxonomy endpoint and returns the raw
//! text body with fetch metadata. There is no retry and no streaming; the
//! source file is small enough to hold in memory, and a failed fetch simply
//! aborts the run.

use chrono::{DateTime, Utc};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};
use url::Url;

use taxsubset_shared::{Result, TaxsubsetError};

/// Maximum number of redirects to follow when fetching the taxonomy.
const MAX_REDIRECTS: usize = 3;

/// Default timeout in seconds for the fetch.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum response size we consider valid (10 MB).
const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// User-Agent string for fetch requests.
const USER_AGENT: &str = concat!("taxsubset/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Fetch options
// ---------------------------------------------------------------------------

/// Configuration for the taxonomy fetch.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Timeout for the HTTP request in seconds.
    pub timeout_secs: u64,
    /// Disable TLS certificate verification for this one request.
    ///
    /// Only intended for the case where the endpoint's certificate chain is
    /// known broken. The default path validates certificates and surfaces a
    /// fetch failure instead.
    pub insecure: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            insecure: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FetchedTaxonomy
// ---------------------------------------------------------------------------

/// The raw taxonomy text plus fetch metadata.
///
/// Only `body` feeds the curation pipeline; the rest is kept for logging and
/// the run summary.
#[derive(Debug, Clone)]
pub struct FetchedTaxonomy {
    /// The URL the taxonomy was fetched from.
    pub url: String,
    /// Full response body as text.
    pub body: String,
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Body length in bytes.
    pub content_len: usize,
    /// SHA-256 hash of the body.
    pub content_hash: String,
    /// When the fetch completed.
    pub fetched_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Fetch the taxonomy file from `url`.
///
/// Fails with [`TaxsubsetError::Network`] on any transport or HTTP error and
/// with [`TaxsubsetError::Validation`] when the response is oversized or the
/// body is empty.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_taxonomy(url: &Url, opts: &FetchOptions) -> Result<FetchedTaxonomy> {
    info!(%url, "fetching taxonomy");

    let client = build_client(opts)?;

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| TaxsubsetError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(TaxsubsetError::Network(format!("{url}: HTTP {status}")));
    }

    // Check content-length if available
    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(TaxsubsetError::validation(format!(
                "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
            )));
        }
    }

    let body = response
        .text()
        .await
        .map_err(|e| TaxsubsetError::Network(format!("{url}: failed to read body: {e}")))?;

    if body.trim().is_empty() {
        return Err(TaxsubsetError::validation(format!(
            "{url}: response body is empty"
        )));
    }

    let content_hash = compute_hash(&body);

    info!(
        status = status.as_u16(),
        bytes = body.len(),
        hash = %&content_hash[..12],
        "taxonomy fetched"
    );

    Ok(FetchedTaxonomy {
        url: url.to_string(),
        content_len: body.len(),
        content_hash,
        status_code: status.as_u16(),
        fetched_at: Utc::now(),
        body,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client with appropriate settings.
fn build_client(opts: &FetchOptions) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(std::time::Duration::from_secs(opts.timeout_secs));

    if opts.insecure {
        warn!("TLS certificate verification disabled for this fetch");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| TaxsubsetError::Network(format!("failed to build HTTP client: {e}")))
}

/// Compute SHA-256 hash of content.
fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_hash() {
        let hash = compute_hash("hello world");
        assert_eq!(hash.len(), 64); // SHA-256 = 64 hex chars
        assert_eq!(
            hash,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_build_client_insecure() {
        let opts = FetchOptions {
            timeout_secs: 5,
            insecure: true,
        };
        assert!(build_client(&opts).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_with_mock_server() {
        let server = wiremock::MockServer::start().await;

        let taxonomy = "# Google_Product_Taxonomy_Version: 2021-09-21\n\
                        Electronics\n\
                        Electronics > Audio\n";

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/taxonomy.txt"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(taxonomy))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/taxonomy.txt", server.uri())).unwrap();
        let fetched = fetch_taxonomy(&url, &FetchOptions::default()).await.unwrap();

        assert_eq!(fetched.status_code, 200);
        assert_eq!(fetched.body, taxonomy);
        assert_eq!(fetched.content_len, taxonomy.len());
        assert_eq!(fetched.content_hash, compute_hash(taxonomy));
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/taxonomy.txt"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/taxonomy.txt", server.uri())).unwrap();
        let err = fetch_taxonomy(&url, &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TaxsubsetError::Network(_)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_empty_body_rejected() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/taxonomy.txt"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("  \n\n"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/taxonomy.txt", server.uri())).unwrap();
        let err = fetch_taxonomy(&url, &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TaxsubsetError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Port 1 is essentially never listening.
        let url = Url::parse("http://127.0.0.1:1/taxonomy.txt").unwrap();
        let err = fetch_taxonomy(&url, &FetchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, TaxsubsetError::Network(_)));
    }
}
