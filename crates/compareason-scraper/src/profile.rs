//! Per-source locator data.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Url;
use serde::Deserialize;

use crate::error::ScraperError;
use crate::extract::FieldSpec;

/// Placeholder in [`SourceProfile::search_url_template`] replaced by the
/// encoded query.
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// How spaces in the search term are written into the search URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceEncoding {
    /// `iphone 15` becomes `iphone+15`.
    #[default]
    Plus,
    /// `iphone 15` becomes `iphone%2015`.
    Percent,
}

/// Everything that distinguishes one source from another.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceProfile {
    /// Stable identifier used in requests, e.g. `flipkart`.
    pub id: String,
    /// Name stamped on every product from this source, e.g. `Flipkart`.
    pub display_name: String,
    /// Base URL relative product links are resolved against.
    pub origin: String,
    pub search_url_template: String,
    #[serde(default)]
    pub space_encoding: SpaceEncoding,
    /// Card locators, tried in order until one matches at least one element.
    pub containers: Vec<String>,
    pub title: FieldSpec,
    pub price: FieldSpec,
    pub rating: FieldSpec,
    pub link: FieldSpec,
}

impl SourceProfile {
    /// Builds the search-results URL for `query`.
    #[must_use]
    pub fn search_url(&self, query: &str) -> String {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        let encoded = match self.space_encoding {
            SpaceEncoding::Plus => encoded.replace("%20", "+"),
            SpaceEncoding::Percent => encoded,
        };
        self.search_url_template.replace(QUERY_PLACEHOLDER, &encoded)
    }

    /// Resolves a scraped link against [`SourceProfile::origin`]. Absolute
    /// links pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the origin is not a valid base
    /// URL or the joined result cannot be parsed.
    pub fn resolve_url(&self, href: &str) -> Result<String, ScraperError> {
        let base = Url::parse(&self.origin).map_err(|e| ScraperError::InvalidUrl {
            url: self.origin.clone(),
            reason: e.to_string(),
        })?;
        base.join(href.trim())
            .map(String::from)
            .map_err(|e| ScraperError::InvalidUrl {
                url: href.to_owned(),
                reason: e.to_string(),
            })
    }

    /// Checks the invariants loaded profiles must satisfy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Profile`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ScraperError> {
        let fail = |reason: &str| Err(ScraperError::Profile(format!("{}: {reason}", self.id)));

        if self.id.trim().is_empty() {
            return Err(ScraperError::Profile("profile id must not be blank".to_owned()));
        }
        if self.display_name.trim().is_empty() {
            return fail("display_name must not be blank");
        }
        if Url::parse(&self.origin).is_err() {
            return fail("origin must be an absolute URL");
        }
        if !self.search_url_template.contains(QUERY_PLACEHOLDER) {
            return fail("search_url_template must contain {query}");
        }
        if self.containers.is_empty() {
            return fail("at least one container locator is required");
        }
        for (field, spec) in [
            ("title", &self.title),
            ("price", &self.price),
            ("link", &self.link),
        ] {
            if spec.candidates.is_empty() && spec.fallbacks.is_empty() {
                return fail(&format!("{field} needs at least one candidate or fallback"));
            }
        }
        Ok(())
    }
}
