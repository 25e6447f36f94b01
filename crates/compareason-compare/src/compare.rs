//! Concurrent fan-out over sources, comparison assembly and health probes.

use std::collections::HashSet;
use std::sync::Arc;

use compareason_core::{ComparisonResult, OrderedMap, Product, SiteStatus, SourceResult, Statistics};
use compareason_scraper::ProductSource;
use futures::future::join_all;

use crate::aggregate::aggregate;
use crate::registry::SourceRegistry;
use crate::CompareError;

/// Longest error message kept in a [`SourceResult::Error`].
pub const ERROR_MESSAGE_LIMIT: usize = 200;

/// Longest error message kept in a [`SiteStatus::Error`].
pub const PROBE_MESSAGE_LIMIT: usize = 50;

/// Source used by single-source search when the caller names none.
pub const DEFAULT_SEARCH_SOURCE: &str = "flipkart";

/// Search term used to check that a source is reachable.
pub const PROBE_QUERY: &str = "test";

/// Truncates `message` to `limit` characters, appending `…` when cut.
#[must_use]
pub fn truncate_message(message: &str, limit: usize) -> String {
    match message.char_indices().nth(limit) {
        None => message.to_owned(),
        Some((cut, _)) => format!("{}…", &message[..cut]),
    }
}

type Outcome = Result<Vec<Product>, String>;

/// Runs one spawned task per source and returns each outcome paired with its
/// source id, in the order of `sources`. Panicked or cancelled tasks become
/// error outcomes.
async fn fan_out(
    sources: &[Arc<dyn ProductSource>],
    query: &str,
    max_results: usize,
) -> Vec<(String, Outcome)> {
    let handles: Vec<_> = sources
        .iter()
        .map(|source| {
            let source = Arc::clone(source);
            let query = query.to_owned();
            tokio::spawn(async move { source.fetch(&query, max_results).await })
        })
        .collect();

    let joined = join_all(handles).await;

    sources
        .iter()
        .zip(joined)
        .map(|(source, result)| {
            let outcome = match result {
                Ok(Ok(products)) => Ok(products),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("source task failed: {e}")),
            };
            (source.id().to_owned(), outcome)
        })
        .collect()
}

/// Entry point for comparisons, single-source searches and health probes.
#[derive(Debug, Clone)]
pub struct Comparator {
    registry: Arc<SourceRegistry>,
}

impl Comparator {
    #[must_use]
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Sources to invoke, in request order. `None` selects every registered
    /// source; unknown ids are skipped and repeated ids collapse onto the
    /// first occurrence.
    fn select(&self, requested: Option<&[String]>) -> Vec<Arc<dyn ProductSource>> {
        let Some(requested) = requested else {
            return self.registry.iter().cloned().collect();
        };

        let mut seen = HashSet::new();
        requested
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| {
                let source = self.registry.get(id);
                if source.is_none() {
                    tracing::warn!(source = %id, "unknown source requested; skipping");
                }
                source.cloned()
            })
            .collect()
    }

    /// Searches every selected source concurrently and assembles the
    /// comparison.
    ///
    /// Never fails: a source that errors (or whose task panics) is recorded
    /// as [`SourceResult::Error`] and the others are unaffected. All sources
    /// finish before the result is assembled.
    pub async fn compare(
        &self,
        query: &str,
        max_results_per_source: usize,
        sources: Option<&[String]>,
    ) -> ComparisonResult {
        let selected = self.select(sources);
        tracing::info!(
            query,
            sources = selected.len(),
            max_results_per_source,
            "starting comparison"
        );

        let outcomes = fan_out(&selected, query, max_results_per_source).await;

        let mut per_source = OrderedMap::new();
        let mut all_products = Vec::new();
        for (id, outcome) in outcomes {
            let result = match outcome {
                Ok(products) => {
                    tracing::debug!(source = %id, count = products.len(), "source succeeded");
                    all_products.extend(products.iter().cloned());
                    SourceResult::success(products)
                }
                Err(message) => {
                    tracing::warn!(source = %id, error = %message, "source failed");
                    SourceResult::error(truncate_message(&message, ERROR_MESSAGE_LIMIT))
                }
            };
            per_source.insert(id, result);
        }

        let (price_range, best_deals) = match aggregate(&all_products) {
            Some((stats, deals)) => (Some(stats), Some(deals)),
            None => (None, None),
        };

        tracing::info!(query, total_products = all_products.len(), "comparison complete");

        ComparisonResult {
            query: query.to_owned(),
            per_source,
            statistics: Statistics {
                total_products: all_products.len(),
                price_range,
            },
            all_products,
            best_deals,
        }
    }

    /// Searches a single source.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::UnknownSource`] if `source` is not registered,
    /// or [`CompareError::Scraper`] with the adapter's failure.
    pub async fn search(
        &self,
        source: &str,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<Product>, CompareError> {
        let adapter = self
            .registry
            .get(source)
            .ok_or_else(|| CompareError::UnknownSource(source.to_owned()))?;
        tracing::info!(source, query, max_results, "single-source search");
        Ok(adapter.fetch(query, max_results).await?)
    }

    /// Runs the canary search against every registered source concurrently.
    ///
    /// A source that returns, even with no products, is online. Any failure
    /// is reported with its message truncated to [`PROBE_MESSAGE_LIMIT`].
    pub async fn probe(&self) -> OrderedMap<SiteStatus> {
        let sources: Vec<_> = self.registry.iter().cloned().collect();
        fan_out(&sources, PROBE_QUERY, 1)
            .await
            .into_iter()
            .map(|(id, outcome)| {
                let status = match outcome {
                    Ok(_) => SiteStatus::Online,
                    Err(message) => {
                        tracing::warn!(source = %id, error = %message, "health probe failed");
                        SiteStatus::Error {
                            message: truncate_message(&message, PROBE_MESSAGE_LIMIT),
                        }
                    }
                };
                (id, status)
            })
            .collect()
    }
}
