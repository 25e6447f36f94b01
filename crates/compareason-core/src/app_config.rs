use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// YAML file replacing the built-in source profiles when set.
    pub sources_path: Option<PathBuf>,
    /// Upper bound for page navigation and for the post-navigation quiescence wait.
    pub navigation_timeout_ms: u64,
    pub user_agent: String,
    /// Additional navigation attempts after a transient failure.
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Default `max_results` for single-source search.
    pub default_max_results: usize,
    /// Default `max_results_per_source` for comparisons.
    pub default_max_results_per_source: usize,
    /// Hard cap applied to any caller-supplied result limit.
    pub max_results_cap: usize,
}
