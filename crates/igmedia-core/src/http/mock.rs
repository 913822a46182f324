//! Recording in-memory fetcher for unit tests.

use super::{FetchError, Fetcher, HttpResponse};
use std::collections::HashMap;
use std::sync::Mutex;

/// libcurl "couldn't connect" code, used for simulated transport failures.
const CURLE_COULDNT_CONNECT: u32 = 7;

#[derive(Clone)]
enum Route {
    Respond(HttpResponse),
    Fail,
}

/// Serves canned responses by exact URL and records every request.
/// Unknown URLs fail like an unreachable host.
#[derive(Default)]
pub(crate) struct MockFetcher {
    routes: HashMap<String, Route>,
    calls: Mutex<Vec<(String, HashMap<String, String>)>>,
}

impl MockFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_status(mut self, url: &str, status: u32, body: &[u8]) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond(HttpResponse {
                status,
                body: body.to_vec(),
            }),
        );
        self
    }

    pub(crate) fn with_json(self, url: &str, json: &str) -> Self {
        self.with_status(url, 200, json.as_bytes())
    }

    pub(crate) fn with_failure(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Fail);
        self
    }

    /// URLs requested so far, in request order.
    pub(crate) fn requested(&self) -> Vec<String> {
        self.lock_calls().iter().map(|(u, _)| u.clone()).collect()
    }

    /// Headers sent with the first request to `url`.
    pub(crate) fn headers_for(&self, url: &str) -> Option<HashMap<String, String>> {
        self.lock_calls()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, h)| h.clone())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(String, HashMap<String, String>)>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Fetcher for MockFetcher {
    fn get(&self, url: &str, headers: &HashMap<String, String>) -> Result<HttpResponse, FetchError> {
        self.lock_calls().push((url.to_string(), headers.clone()));
        match self.routes.get(url) {
            Some(Route::Respond(r)) => Ok(r.clone()),
            Some(Route::Fail) | None => Err(FetchError::Curl(curl::Error::new(
                CURLE_COULDNT_CONNECT,
            ))),
        }
    }
}
