//! Payloads embedded in page globals and inline scripts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{ProbeHit, ProbeStep};
use crate::error::ResolveError;
use crate::extract::is_truthy;
use crate::page::{PageGlobals, ScriptTag};

const LOADER_MARKER: &str = "window.__additionalDataLoaded";

static LOADER_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"window\.__additionalDataLoaded\([^,]+,\s*(\{.+\})\);").expect("loader regex")
});

/// `__additionalData` when set; else `_sharedData` when it carries a stories page.
pub(super) fn from_globals(globals: &PageGlobals) -> Result<ProbeHit, ResolveError> {
    if let Some(data) = globals.additional_data.as_ref().filter(|v| is_truthy(v)) {
        return Ok(ProbeHit::Payload {
            step: ProbeStep::AdditionalData,
            payload: data.clone(),
        });
    }
    if let Some(shared) = &globals.shared_data {
        let stories = shared
            .get("entry_data")
            .and_then(|e| e.get("StoriesPage"));
        if stories.map_or(false, is_truthy) {
            return Ok(ProbeHit::Payload {
                step: ProbeStep::SharedData,
                payload: shared.clone(),
            });
        }
    }
    Err(ResolveError::miss("no usable page globals"))
}

/// First `application/json` script whose content parses to a truthy value.
pub(super) fn first_json_script(scripts: &[ScriptTag]) -> Result<Value, ResolveError> {
    scripts
        .iter()
        .filter(|s| s.is_json())
        .find_map(|s| match serde_json::from_str::<Value>(&s.text) {
            Ok(v) if is_truthy(&v) => Some(v),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("json script did not parse: {}", e);
                None
            }
        })
        .ok_or_else(|| ResolveError::miss("no JSON script with content"))
}

/// Object literal passed to the first `__additionalDataLoaded(...)` call.
pub(super) fn loader_payload(scripts: &[ScriptTag]) -> Result<Value, ResolveError> {
    let script = scripts
        .iter()
        .find(|s| s.text.contains(LOADER_MARKER))
        .ok_or_else(|| ResolveError::miss("no loader script"))?;
    let raw = LOADER_CALL
        .captures(&script.text)
        .and_then(|c| c.get(1))
        .ok_or_else(|| ResolveError::miss("loader script has no object argument"))?;
    serde_json::from_str(raw.as_str())
        .map_err(|e| ResolveError::miss(format!("loader payload is not JSON: {}", e)))
}
