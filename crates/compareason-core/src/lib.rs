//! Domain records and configuration shared by every Compareason crate.

mod app_config;
pub mod comparison;
mod config;
pub mod ordered_map;
pub mod products;

use thiserror::Error;

pub use app_config::AppConfig;
pub use comparison::{
    BestDeals, ComparisonResult, PriceStatistics, SiteStatus, SourceResult, Statistics,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use ordered_map::OrderedMap;
pub use products::{Price, Product};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
