use serde::{Deserialize, Serialize};

/// A product listing extracted from one card on a source's search-results
/// page, normalized so listings from different sources can be compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub price: Price,
    /// Absolute URL of the product page, resolved against the source origin.
    pub url: String,
    /// Rating as shown by the source, e.g. `"4.3"`.
    pub rating: Option<String>,
    /// Display name of the source that produced this listing, e.g. `"Amazon"`.
    pub source: String,
}

impl Product {
    /// Returns the numeric price, or `None` when the price text could not be parsed.
    #[must_use]
    pub fn amount(&self) -> Option<u64> {
        self.price.amount()
    }
}

/// A listing price: the parsed amount when the price text contained digits,
/// otherwise the untouched text as it appeared on the page.
///
/// Serialized untagged, so the wire carries either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(u64),
    Raw(String),
}

impl Price {
    #[must_use]
    pub fn amount(&self) -> Option<u64> {
        match self {
            Price::Amount(value) => Some(*value),
            Price::Raw(_) => None,
        }
    }
}
