//! Response records for one comparison query and for source health probes.

use serde::Serialize;

use crate::ordered_map::OrderedMap;
use crate::products::Product;

/// Outcome of invoking one source for a comparison.
///
/// Serialized with a `status` discriminator: `{"status": "success", "count",
/// "products"}` or `{"status": "error", "error"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceResult {
    Success { count: usize, products: Vec<Product> },
    Error { error: String },
}

impl SourceResult {
    #[must_use]
    pub fn success(products: Vec<Product>) -> Self {
        SourceResult::Success {
            count: products.len(),
            products,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        SourceResult::Error {
            error: message.into(),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, SourceResult::Success { .. })
    }

    /// Products of a successful invocation; empty for errors.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        match self {
            SourceResult::Success { products, .. } => products,
            SourceResult::Error { .. } => &[],
        }
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SourceResult::Success { .. } => None,
            SourceResult::Error { error } => Some(error),
        }
    }
}

/// Min, max and mean over every numerically priced product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceStatistics {
    pub min: u64,
    pub max: u64,
    pub avg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_products: usize,
    pub price_range: Option<PriceStatistics>,
}

/// Rankings over the numerically priced products of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestDeals {
    pub cheapest_overall: Product,
    pub most_expensive: Product,
    /// Cheapest product per source, keyed by the product's `source`.
    pub best_per_source: OrderedMap<Product>,
    pub top_5_cheapest: Vec<Product>,
}

/// The full answer to one comparison query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub query: String,
    /// Keyed by source identifier, in the order the sources were requested.
    pub per_source: OrderedMap<SourceResult>,
    pub all_products: Vec<Product>,
    pub statistics: Statistics,
    /// Present exactly when `statistics.price_range` is present.
    pub best_deals: Option<BestDeals>,
}

/// Health classification of one source after a canary search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SiteStatus {
    Online,
    Error { message: String },
}

impl SiteStatus {
    #[must_use]
    pub fn is_online(&self) -> bool {
        matches!(self, SiteStatus::Online)
    }
}
