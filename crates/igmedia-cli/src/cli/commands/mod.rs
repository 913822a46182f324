//! CLI command handlers, one per file.

mod classify;
mod config_path;
mod extract;
mod resolve;

pub use classify::run_classify;
pub use config_path::run_config_path;
pub use extract::run_extract;
pub use resolve::run_resolve;
#[cfg(test)]
pub use resolve::build_element;
