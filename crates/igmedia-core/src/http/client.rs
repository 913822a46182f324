//! libcurl-backed [`Fetcher`].
//!
//! One `Easy` handle per request, redirects followed. Timeouts are only set
//! when configured; by default a stalled transfer stalls its caller.

use super::{FetchError, Fetcher, HttpResponse};
use crate::config::HttpConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Blocking GET client over libcurl.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: HttpConfig,
}

impl CurlFetcher {
    pub fn new(options: HttpConfig) -> Self {
        Self { options }
    }

    fn handle(&self, url: &str, headers: &HashMap<String, String>) -> Result<curl::easy::Easy, FetchError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)
            .map_err(|e| FetchError::Request(format!("invalid URL {}: {}", url, e)))?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirections)?;
        if let Some(secs) = self.options.connect_timeout_secs {
            easy.connect_timeout(Duration::from_secs(secs))?;
        }
        if let Some(secs) = self.options.timeout_secs {
            easy.timeout(Duration::from_secs(secs))?;
        }
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua)?;
        }

        // Build curl list for custom headers (e.g. "x-ig-app-id: ...").
        if !headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(easy)
    }
}

impl Fetcher for CurlFetcher {
    fn get(&self, url: &str, headers: &HashMap<String, String>) -> Result<HttpResponse, FetchError> {
        let mut easy = self.handle(url, headers)?;
        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        let status = easy.response_code()?;
        tracing::trace!(url, status, bytes = body.len(), "GET complete");
        Ok(HttpResponse { status, body })
    }

    /// Counts body bytes without keeping them; srcset probes may hit full-size videos.
    fn content_size(&self, url: &str) -> Result<u64, FetchError> {
        let mut easy = self.handle(url, &HashMap::new())?;
        let mut received = 0u64;
        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                received += data.len() as u64;
                Ok(data.len())
            })?;
            transfer.perform()?;
        }
        tracing::trace!(url, bytes = received, "size probe complete");
        Ok(received)
    }
}
