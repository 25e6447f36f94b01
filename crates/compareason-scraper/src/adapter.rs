//! Turning one source's search page into products.

use std::sync::Arc;
use std::time::Duration;

use compareason_core::Product;
use futures::future::BoxFuture;

use crate::error::ScraperError;
use crate::extract::extract_field;
use crate::normalize::normalize_price;
use crate::page::{PageDriver, PageElement, PageSession};
use crate::profile::SourceProfile;

/// A searchable product source, object-safe so heterogeneous sources can
/// share one registry.
pub trait ProductSource: Send + Sync {
    /// Stable identifier, e.g. `flipkart`.
    fn id(&self) -> &str;

    /// Name stamped on the products this source returns.
    fn display_name(&self) -> &str;

    /// Searches for `query`, returning at most `max_results` products.
    fn fetch<'a>(
        &'a self,
        query: &'a str,
        max_results: usize,
    ) -> BoxFuture<'a, Result<Vec<Product>, ScraperError>>;
}

/// Profile-driven adapter over any [`PageDriver`].
#[derive(Debug)]
pub struct SiteAdapter<D: PageDriver> {
    driver: Arc<D>,
    profile: SourceProfile,
    navigation_timeout: Duration,
}

impl<D: PageDriver> SiteAdapter<D> {
    #[must_use]
    pub fn new(driver: Arc<D>, profile: SourceProfile, navigation_timeout: Duration) -> Self {
        Self {
            driver,
            profile,
            navigation_timeout,
        }
    }

    /// Loads the search page for `query` and extracts up to `max_results`
    /// products from it.
    ///
    /// Cards missing a title, price or link are skipped. A page where no
    /// container locator matches yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Timeout`] if navigation or the quiescence wait
    /// exceeds the navigation timeout, and propagates any session error from
    /// the driver. The session is closed on every path.
    pub async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<Product>, ScraperError> {
        let url = self.profile.search_url(query);
        let mut session = self.driver.open_session().await?;
        let outcome = self.scrape(&mut session, &url, max_results).await;
        session.close().await;
        outcome
    }

    async fn scrape(
        &self,
        session: &mut D::Session,
        url: &str,
        max_results: usize,
    ) -> Result<Vec<Product>, ScraperError> {
        let timeout = self.navigation_timeout;
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let expired = |stage: &'static str| ScraperError::Timeout {
            stage,
            url: url.to_owned(),
            timeout_ms,
        };

        tokio::time::timeout(timeout, session.navigate(url, timeout))
            .await
            .map_err(|_| expired("navigation"))??;
        tokio::time::timeout(timeout, session.wait_for_quiescence(timeout))
            .await
            .map_err(|_| expired("quiescence"))??;

        let Some((locator, cards)) = self.find_cards(session).await? else {
            tracing::debug!(source = %self.profile.id, url, "no container locator matched");
            return Ok(Vec::new());
        };
        tracing::debug!(
            source = %self.profile.id,
            locator,
            cards = cards.len(),
            "container locator matched"
        );

        let products: Vec<Product> = cards
            .iter()
            .take(max_results)
            .enumerate()
            .filter_map(|(index, card)| self.card_to_product(index, card))
            .collect();

        tracing::info!(source = %self.profile.id, url, count = products.len(), "extracted products");
        Ok(products)
    }

    /// First container locator yielding at least one element, with its cards.
    async fn find_cards<'p>(
        &'p self,
        session: &D::Session,
    ) -> Result<Option<(&'p str, Vec<<D::Session as PageSession>::Element>)>, ScraperError> {
        for locator in &self.profile.containers {
            let cards = session.query_all(locator).await?;
            if !cards.is_empty() {
                return Ok(Some((locator.as_str(), cards)));
            }
        }
        Ok(None)
    }

    fn card_to_product<E: PageElement>(&self, index: usize, card: &E) -> Option<Product> {
        let profile = &self.profile;
        let title = extract_field(card, &profile.title);
        let price = extract_field(card, &profile.price);
        let href = extract_field(card, &profile.link);

        let (Some(title), Some(price), Some(href)) = (title, price, href) else {
            tracing::debug!(source = %profile.id, index, "card skipped: missing title, price or link");
            return None;
        };
        let url = match profile.resolve_url(&href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(source = %profile.id, index, error = %e, "card skipped: unresolvable link");
                return None;
            }
        };

        Some(Product {
            title,
            price: normalize_price(&price),
            url,
            rating: extract_field(card, &profile.rating),
            source: profile.display_name.clone(),
        })
    }
}

impl<D: PageDriver> ProductSource for SiteAdapter<D> {
    fn id(&self) -> &str {
        &self.profile.id
    }

    fn display_name(&self) -> &str {
        &self.profile.display_name
    }

    fn fetch<'a>(
        &'a self,
        query: &'a str,
        max_results: usize,
    ) -> BoxFuture<'a, Result<Vec<Product>, ScraperError>> {
        Box::pin(SiteAdapter::fetch(self, query, max_results))
    }
}

#[cfg(test)]
#[path = "adapter_test.rs"]
mod tests;
