pub mod config;
pub mod logging;

pub mod content;
pub mod error;
pub mod extract;
pub mod http;
pub mod media;
pub mod page;
pub mod probe;
pub mod remote;
pub mod resolver;
pub mod srcset;
pub mod strategy;

pub use config::ResolverConfig;
pub use error::{ErrorKind, ResolveError};
pub use media::{MediaElement, MediaKind, SrcsetCandidate};
pub use page::PageContext;
pub use resolver::{MediaResolver, Resolved, Source};
