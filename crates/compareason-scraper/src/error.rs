use thiserror::Error;

/// Adapter-level failures. Missing fields on a card are never errors; they
/// surface as absent values and the card is skipped.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{stage} timed out after {timeout_ms}ms for {url}")]
    Timeout {
        stage: &'static str,
        url: String,
        timeout_ms: u64,
    },

    #[error("rate limited by {domain} (retry after {retry_after_secs}s)")]
    RateLimited {
        domain: String,
        retry_after_secs: u64,
    },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("no page loaded in session; navigate first")]
    NoPage,

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("page session error: {0}")]
    Session(String),

    #[error("invalid source profile: {0}")]
    Profile(String),
}
