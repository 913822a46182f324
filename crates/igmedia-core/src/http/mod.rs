//! Network capability consumed by the engine.
//!
//! The engine never talks to the network directly: srcset probes and metadata
//! tiers go through a [`Fetcher`]. Calls are blocking; async callers run them on
//! `spawn_blocking`. [`CurlFetcher`] is the libcurl-backed default.

mod client;
#[cfg(test)]
pub(crate) mod mock;

pub use client::CurlFetcher;

use std::collections::HashMap;
use std::fmt;

/// Response of a completed GET: status and full body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure of a single request.
///
/// A non-2xx status is not a transport failure: `Fetcher::get` returns the
/// response and callers decide, converting to `Status` where only 2xx is usable.
#[derive(Debug)]
pub enum FetchError {
    /// libcurl reported an error (DNS, connect, reset, timeout, bad URL).
    Curl(curl::Error),
    /// Response status was not 2xx where a 2xx was required.
    Status { url: String, status: u32 },
    /// Body was not valid JSON where a JSON payload was required.
    Json { url: String, source: serde_json::Error },
    /// Request could not be built (invalid URL or header).
    Request(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Status { url, status } => write!(f, "GET {} returned HTTP {}", url, status),
            FetchError::Json { url, source } => write!(f, "invalid JSON from {}: {}", url, source),
            FetchError::Request(msg) => write!(f, "bad request: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Json { source, .. } => Some(source),
            FetchError::Status { .. } | FetchError::Request(_) => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}

/// Blocking HTTP GET capability.
pub trait Fetcher: Send + Sync {
    /// Performs a GET and returns the status and body. Only transport failures are errors.
    fn get(&self, url: &str, headers: &HashMap<String, String>) -> Result<HttpResponse, FetchError>;

    /// Number of body bytes served for `url`, whatever the status.
    ///
    /// The default buffers the whole body; implementations may count instead.
    fn content_size(&self, url: &str) -> Result<u64, FetchError> {
        self.get(url, &HashMap::new()).map(|r| r.body.len() as u64)
    }
}

/// GETs `url` and parses the body as JSON. Non-2xx and unparsable bodies are errors.
pub fn get_json(
    fetcher: &dyn Fetcher,
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<serde_json::Value, FetchError> {
    let response = fetcher.get(url, headers)?;
    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    serde_json::from_slice(&response.body).map_err(|source| FetchError::Json {
        url: url.to_string(),
        source,
    })
}
