//! "First success wins" over an ordered list of strategies.
//!
//! Fallback chains (probe steps, network tiers, extraction passes) are data: a
//! list of named closures run in order. Soft failures are logged and recorded;
//! the first hard failure stops the chain and is returned as-is.

use crate::error::ResolveError;

/// One named step of a fallback chain.
pub struct Strategy<'a, T> {
    pub name: &'static str,
    run: Box<dyn FnOnce() -> Result<T, ResolveError> + 'a>,
}

impl<'a, T> Strategy<'a, T> {
    pub fn new(name: &'static str, run: impl FnOnce() -> Result<T, ResolveError> + 'a) -> Self {
        Self {
            name,
            run: Box::new(run),
        }
    }
}

/// Runs `strategies` in order until one succeeds.
///
/// Returns the winning strategy's name with its value. When every strategy
/// fails softly, returns `ResolveError::Exhausted` listing each failure.
pub fn first_success<T>(
    label: &'static str,
    strategies: Vec<Strategy<'_, T>>,
) -> Result<(&'static str, T), ResolveError> {
    let mut attempts = Vec::with_capacity(strategies.len());
    for strategy in strategies {
        match (strategy.run)() {
            Ok(value) => {
                tracing::debug!(chain = label, strategy = strategy.name, "strategy succeeded");
                return Ok((strategy.name, value));
            }
            Err(e) if e.is_soft() => {
                tracing::debug!(chain = label, strategy = strategy.name, kind = ?e.kind(), "strategy missed: {}", e);
                attempts.push((strategy.name, e));
            }
            Err(e) => {
                tracing::warn!(chain = label, strategy = strategy.name, "strategy failed hard: {}", e);
                return Err(e);
            }
        }
    }
    Err(ResolveError::Exhausted { label, attempts })
}
