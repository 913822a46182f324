//! Resolution failures and their classification.
//!
//! Every stage reports a typed [`ResolveError`]; [`ResolveError::kind`] maps it
//! into the small taxonomy the fallback chains act on. Soft kinds move the
//! chain to its next strategy, hard kinds stop it.

use crate::http::FetchError;

/// Failure category used by fallback chains and by callers inspecting results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A request failed (transport error, non-2xx, unparsable payload).
    NetworkFailure,
    /// No pattern or scavenge produced a URL.
    ExtractionMiss,
    /// A page capability (resource timing, globals, elements) is absent.
    ProbeUnavailable,
    /// Every strategy of a chain missed.
    Exhausted,
    /// Engine fault (task panicked or was cancelled). Never downgraded.
    Internal,
}

impl ErrorKind {
    pub fn is_soft(self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("network failure: {0}")]
    Network(#[from] FetchError),

    #[error("no media URL found: {0}")]
    ExtractionMiss(String),

    #[error("{0} is not available on this page")]
    ProbeUnavailable(&'static str),

    #[error("{label}: all {} strategies failed", .attempts.len())]
    Exhausted {
        label: &'static str,
        attempts: Vec<(&'static str, ResolveError)>,
    },

    #[error("internal: {0}")]
    Internal(String),
}

impl ResolveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::Network(_) => ErrorKind::NetworkFailure,
            ResolveError::ExtractionMiss(_) => ErrorKind::ExtractionMiss,
            ResolveError::ProbeUnavailable(_) => ErrorKind::ProbeUnavailable,
            ResolveError::Exhausted { .. } => ErrorKind::Exhausted,
            ResolveError::Internal(_) => ErrorKind::Internal,
        }
    }

    pub fn is_soft(&self) -> bool {
        self.kind().is_soft()
    }

    pub(crate) fn miss(msg: impl Into<String>) -> Self {
        ResolveError::ExtractionMiss(msg.into())
    }
}

impl From<tokio::task::JoinError> for ResolveError {
    fn from(e: tokio::task::JoinError) -> Self {
        ResolveError::Internal(format!("blocking task: {}", e))
    }
}
