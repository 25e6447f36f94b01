//! Command handlers for the CLI.
//!
//! Each handler returns the pretty-printed JSON document that `main` writes
//! to stdout. Logs go to stderr so the output stays machine-readable.

use anyhow::Context;
use compareason_compare::Comparator;

/// `requested` (or `default`) clamped to `1..=cap`.
pub(crate) fn clamp_limit(requested: Option<usize>, default: usize, cap: usize) -> usize {
    requested.unwrap_or(default).clamp(1, cap.max(1))
}

/// Trimmed query text; blank queries are rejected before any source is hit.
pub(crate) fn require_query(query: &str) -> anyhow::Result<&str> {
    let query = query.trim();
    anyhow::ensure!(!query.is_empty(), "query must not be blank");
    Ok(query)
}

pub(crate) async fn run_search(
    comparator: &Comparator,
    source: &str,
    query: &str,
    max_results: usize,
) -> anyhow::Result<String> {
    let query = require_query(query)?;
    let products = comparator
        .search(source, query, max_results)
        .await
        .with_context(|| format!("search on {source} failed"))?;
    tracing::info!(source, query, count = products.len(), "search finished");

    let document = serde_json::json!({
        "products": products,
        "total_found": products.len(),
        "query": query,
        "source": source,
    });
    Ok(serde_json::to_string_pretty(&document)?)
}

pub(crate) async fn run_compare(
    comparator: &Comparator,
    query: &str,
    max_results_per_source: usize,
    sources: Option<&[String]>,
) -> anyhow::Result<String> {
    let query = require_query(query)?;
    let result = comparator
        .compare(query, max_results_per_source, sources)
        .await;
    tracing::info!(
        query,
        sources = result.per_source.len(),
        count = result.all_products.len(),
        "comparison finished"
    );
    Ok(serde_json::to_string_pretty(&result)?)
}

pub(crate) async fn run_status(comparator: &Comparator) -> anyhow::Result<String> {
    let sites = comparator.probe().await;
    Ok(serde_json::to_string_pretty(&sites)?)
}
