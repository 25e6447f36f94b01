//! The page-automation seam.
//!
//! Adapters only need to open a session, load a URL, wait for the page to
//! settle, and query elements by an opaque locator string. A headless browser
//! and the bundled static-HTML [`crate::HtmlDriver`] both fit behind these
//! traits.
//!
//! Element handles are snapshots: querying them is synchronous and never
//! fails. A locator that matches nothing (or that the driver cannot
//! interpret) yields no elements.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Opens page sessions. Shared read-only across concurrent adapters.
pub trait PageDriver: Send + Sync + 'static {
    type Session: PageSession;

    /// Opens a session owned exclusively by the caller.
    fn open_session(&self) -> impl Future<Output = Result<Self::Session, ScraperError>> + Send;
}

/// One page, owned by a single adapter invocation.
///
/// Callers must call [`PageSession::close`] on every exit path once the
/// session is open.
pub trait PageSession: Send + Sync {
    type Element: PageElement;

    /// Loads `url`, giving up after `timeout`.
    fn navigate(
        &mut self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), ScraperError>> + Send;

    /// Waits until the page stops loading resources, giving up after `timeout`.
    fn wait_for_quiescence(
        &mut self,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), ScraperError>> + Send;

    /// All elements on the page matched by `locator`, in document order.
    fn query_all(
        &self,
        locator: &str,
    ) -> impl Future<Output = Result<Vec<Self::Element>, ScraperError>> + Send;

    /// Releases the session.
    fn close(self) -> impl Future<Output = ()> + Send;
}

/// A snapshot of one element, queryable for descendants, text and attributes.
pub trait PageElement: Send + Sync + Sized {
    /// First descendant matched by `locator`.
    fn query(&self, locator: &str) -> Option<Self>;

    /// All descendants matched by `locator`, in document order.
    fn query_all(&self, locator: &str) -> Vec<Self>;

    /// Rendered text of the element and its descendants.
    fn inner_text(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;
}
