use scraper::{ElementRef, Html, Selector};

use crate::page::PageElement;

/// A detached snapshot of one element, stored as its outer HTML.
///
/// `scraper::Html` is not `Send`, so handles keep markup and re-parse it as
/// a fragment per query. Selectors are therefore evaluated relative to the
/// element: ancestors outside it are not visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    html: String,
    tag: String,
}

/// Wrapper markup that lets a table part survive fragment parsing, and the
/// number of element levels from the fragment root down to the element.
fn table_context(tag: &str) -> (&'static str, &'static str, usize) {
    match tag {
        "tr" => ("<table><tbody>", "</tbody></table>", 3),
        "td" | "th" => ("<table><tbody><tr>", "</tr></tbody></table>", 4),
        "col" => ("<table><colgroup>", "</colgroup></table>", 3),
        "tbody" | "thead" | "tfoot" | "caption" | "colgroup" => ("<table>", "</table>", 2),
        _ => ("", "", 1),
    }
}

impl HtmlElement {
    pub(crate) fn from_ref(element: ElementRef<'_>) -> Self {
        Self {
            html: element.html(),
            tag: element.value().name().to_owned(),
        }
    }

    fn with_root<T>(&self, f: impl FnOnce(ElementRef<'_>) -> T) -> Option<T> {
        let (open, close, depth) = table_context(&self.tag);
        let fragment = if depth == 1 {
            Html::parse_fragment(&self.html)
        } else {
            Html::parse_fragment(&format!("{open}{}{close}", self.html))
        };
        let mut root = fragment.root_element();
        for _ in 0..depth {
            root = root.child_elements().next()?;
        }
        Some(f(root))
    }
}

pub(crate) fn parse_selector(locator: &str) -> Option<Selector> {
    match Selector::parse(locator) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::debug!(locator, error = %e, "locator is not a valid CSS selector");
            None
        }
    }
}

/// Visible text of `element`: text nodes joined by a space, whitespace runs
/// collapsed.
pub(crate) fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl PageElement for HtmlElement {
    fn query(&self, locator: &str) -> Option<Self> {
        let selector = parse_selector(locator)?;
        self.with_root(|root| root.select(&selector).next().map(Self::from_ref))
            .flatten()
    }

    fn query_all(&self, locator: &str) -> Vec<Self> {
        let Some(selector) = parse_selector(locator) else {
            return Vec::new();
        };
        self.with_root(|root| root.select(&selector).map(Self::from_ref).collect())
            .unwrap_or_default()
    }

    fn inner_text(&self) -> String {
        self.with_root(collapsed_text).unwrap_or_default()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.with_root(|root| root.value().attr(name).map(str::to_owned))
            .flatten()
    }
}
