//! Multi-source comparison: registry, concurrent fan-out, aggregation and
//! health probes.

pub mod aggregate;
pub mod compare;
pub mod registry;

use compareason_scraper::ScraperError;
use thiserror::Error;

pub use aggregate::aggregate;
pub use compare::{
    truncate_message, Comparator, DEFAULT_SEARCH_SOURCE, ERROR_MESSAGE_LIMIT, PROBE_MESSAGE_LIMIT,
    PROBE_QUERY,
};
pub use registry::SourceRegistry;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("unknown source \"{0}\"")]
    UnknownSource(String),

    #[error("duplicate source id \"{0}\"")]
    DuplicateSource(String),

    #[error("duplicate source display name \"{0}\"")]
    DuplicateDisplayName(String),

    #[error(transparent)]
    Scraper(#[from] ScraperError),
}
