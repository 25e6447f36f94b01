//! In-memory page driver for unit tests.
//!
//! Locators are matched literally against the keys a page or element was
//! built with; there is no selector engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::ScraperError;
use crate::page::{PageDriver, PageElement, PageSession};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    text: String,
    attrs: Vec<(String, String)>,
    children: Vec<(String, FakeElement)>,
}

impl FakeElement {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_owned(),
            ..Self::default()
        }
    }

    pub(crate) fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_owned(), value.to_owned()));
        self
    }

    pub(crate) fn child(mut self, locator: &str, element: FakeElement) -> Self {
        self.children.push((locator.to_owned(), element));
        self
    }
}

impl PageElement for FakeElement {
    fn query(&self, locator: &str) -> Option<Self> {
        self.children
            .iter()
            .find(|(key, _)| key == locator)
            .map(|(_, element)| element.clone())
    }

    fn query_all(&self, locator: &str) -> Vec<Self> {
        self.children
            .iter()
            .filter(|(key, _)| key == locator)
            .map(|(_, element)| element.clone())
            .collect()
    }

    fn inner_text(&self) -> String {
        std::iter::once(self.text.clone())
            .chain(self.children.iter().map(|(_, c)| c.inner_text()))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FakePage {
    groups: Vec<(String, Vec<FakeElement>)>,
    navigate_delay: Option<Duration>,
    quiescence_delay: Option<Duration>,
}

impl FakePage {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn cards(mut self, locator: &str, cards: Vec<FakeElement>) -> Self {
        self.groups.push((locator.to_owned(), cards));
        self
    }

    pub(crate) fn slow_navigation(mut self, delay: Duration) -> Self {
        self.navigate_delay = Some(delay);
        self
    }

    pub(crate) fn slow_quiescence(mut self, delay: Duration) -> Self {
        self.quiescence_delay = Some(delay);
        self
    }
}

/// Serves pages by exact URL; any other URL navigates to a 404.
#[derive(Debug, Default)]
pub(crate) struct FakeDriver {
    pages: Arc<HashMap<String, FakePage>>,
    closed: Arc<AtomicUsize>,
}

impl FakeDriver {
    pub(crate) fn with_pages(pages: impl IntoIterator<Item = (String, FakePage)>) -> Self {
        Self {
            pages: Arc::new(pages.into_iter().collect()),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn closed_sessions(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeSession {
    pages: Arc<HashMap<String, FakePage>>,
    closed: Arc<AtomicUsize>,
    current: Option<FakePage>,
}

impl PageDriver for FakeDriver {
    type Session = FakeSession;

    async fn open_session(&self) -> Result<FakeSession, ScraperError> {
        Ok(FakeSession {
            pages: Arc::clone(&self.pages),
            closed: Arc::clone(&self.closed),
            current: None,
        })
    }
}

impl PageSession for FakeSession {
    type Element = FakeElement;

    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), ScraperError> {
        let page = self
            .pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScraperError::NotFound {
                url: url.to_owned(),
            })?;
        if let Some(delay) = page.navigate_delay {
            tokio::time::sleep(delay).await;
        }
        self.current = Some(page);
        Ok(())
    }

    async fn wait_for_quiescence(&mut self, _timeout: Duration) -> Result<(), ScraperError> {
        if let Some(delay) = self.current.as_ref().and_then(|p| p.quiescence_delay) {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    async fn query_all(&self, locator: &str) -> Result<Vec<FakeElement>, ScraperError> {
        let page = self.current.as_ref().ok_or(ScraperError::NoPage)?;
        Ok(page
            .groups
            .iter()
            .filter(|(key, _)| key == locator)
            .flat_map(|(_, cards)| cards.iter().cloned())
            .collect())
    }

    async fn close(self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
