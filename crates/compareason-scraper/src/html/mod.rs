//! Static-HTML page driver over `reqwest` and `scraper`.
//!
//! Pages are fetched once and never execute scripts, so quiescence is
//! immediate. Suited to sources whose search results are server-rendered.

mod element;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use scraper::Html;

use crate::error::ScraperError;
use crate::page::{PageDriver, PageSession};
use crate::rate_limit::retry_with_backoff;

pub use element::HtmlElement;

/// Drives pages over plain HTTP with retry on transient failures.
///
/// Transient errors (429, network failures) are retried with exponential
/// backoff up to `max_retries` additional attempts.
#[derive(Debug, Clone)]
pub struct HtmlDriver {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HtmlDriver {
    /// Creates a driver with the given request timeout, `User-Agent`, and
    /// retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout: Duration,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }
}

impl PageDriver for HtmlDriver {
    type Session = HtmlSession;

    async fn open_session(&self) -> Result<HtmlSession, ScraperError> {
        Ok(HtmlSession {
            client: self.client.clone(),
            max_retries: self.max_retries,
            backoff_base_ms: self.backoff_base_ms,
            page: None,
        })
    }
}

/// One fetched page.
#[derive(Debug)]
pub struct HtmlSession {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
    page: Option<LoadedPage>,
}

#[derive(Debug)]
struct LoadedPage {
    url: String,
    body: String,
}

impl HtmlSession {
    async fn fetch_body(&self, url: &str) -> Result<String, ScraperError> {
        let domain = Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
            .unwrap_or_else(|| url.to_owned());

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.to_owned();
            let domain = domain.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-IN,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(ScraperError::RateLimited {
                        domain,
                        retry_after_secs,
                    });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}

fn select_all(body: &str, locator: &str) -> Vec<HtmlElement> {
    let Some(selector) = element::parse_selector(locator) else {
        return Vec::new();
    };
    let document = Html::parse_document(body);
    document.select(&selector).map(HtmlElement::from_ref).collect()
}

impl PageSession for HtmlSession {
    type Element = HtmlElement;

    /// Each request is bounded by the driver's client timeout; the caller
    /// bounds the navigation as a whole, retries included.
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), ScraperError> {
        let body = self.fetch_body(url).await?;
        tracing::debug!(url, bytes = body.len(), "page loaded");
        self.page = Some(LoadedPage {
            url: url.to_owned(),
            body,
        });
        Ok(())
    }

    async fn wait_for_quiescence(&mut self, _timeout: Duration) -> Result<(), ScraperError> {
        match self.page {
            Some(_) => Ok(()),
            None => Err(ScraperError::NoPage),
        }
    }

    async fn query_all(&self, locator: &str) -> Result<Vec<HtmlElement>, ScraperError> {
        let page = self.page.as_ref().ok_or(ScraperError::NoPage)?;
        Ok(select_all(&page.body, locator))
    }

    async fn close(self) {
        if let Some(page) = self.page {
            tracing::trace!(url = %page.url, "page session closed");
        }
    }
}
