//! Statistics and rankings over the products of one comparison.

use compareason_core::{BestDeals, OrderedMap, PriceStatistics, Product};

/// Number of products in [`BestDeals::top_5_cheapest`].
pub const TOP_CHEAPEST: usize = 5;

/// Computes price statistics and best deals over the numerically priced
/// subset of `products`.
///
/// Returns `None` when no product has a numeric price. Products with raw
/// price text are ignored. Ties on price keep encounter order everywhere:
/// the sort is stable and a source's best deal is only replaced by a
/// strictly cheaper one.
#[must_use]
pub fn aggregate(products: &[Product]) -> Option<(PriceStatistics, BestDeals)> {
    let priced: Vec<(u64, &Product)> = products
        .iter()
        .filter_map(|p| p.amount().map(|amount| (amount, p)))
        .collect();
    if priced.is_empty() {
        return None;
    }

    let mut best_per_source: OrderedMap<Product> = OrderedMap::new();
    for &(amount, product) in &priced {
        let cheaper = best_per_source
            .get(&product.source)
            .and_then(Product::amount)
            .is_none_or(|best| amount < best);
        if cheaper {
            best_per_source.insert(product.source.clone(), product.clone());
        }
    }

    let total: u128 = priced.iter().map(|&(amount, _)| u128::from(amount)).sum();
    #[allow(clippy::cast_precision_loss)]
    let avg = total as f64 / priced.len() as f64;

    let mut sorted = priced;
    sorted.sort_by_key(|&(amount, _)| amount);

    let (min, cheapest) = sorted[0];
    let (max, most_expensive) = sorted[sorted.len() - 1];

    let stats = PriceStatistics { min, max, avg };
    let deals = BestDeals {
        cheapest_overall: cheapest.clone(),
        most_expensive: most_expensive.clone(),
        best_per_source,
        top_5_cheapest: sorted
            .iter()
            .take(TOP_CHEAPEST)
            .map(|&(_, p)| p.clone())
            .collect(),
    };
    Some((stats, deals))
}
