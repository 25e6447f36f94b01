//! Product extraction from source search-results pages.
//!
//! A [`SiteAdapter`] drives a [`PageDriver`] to a source's search page, picks
//! the product cards with a cascading container-locator list, and turns each
//! card into a [`compareason_core::Product`] with the per-field cascades in
//! [`extract`]. Locator lists are data ([`SourceProfile`]); the built-in
//! profiles live in [`sites`].

pub mod adapter;
pub mod error;
pub mod extract;
pub mod html;
pub mod normalize;
pub mod page;
pub mod profile;
pub mod sites;

mod rate_limit;

#[cfg(test)]
mod fake;

pub use adapter::{ProductSource, SiteAdapter};
pub use error::ScraperError;
pub use extract::{extract_field, Candidate, Fallback, FieldSpec, Read, Transform, Validator};
pub use html::{HtmlDriver, HtmlElement, HtmlSession};
pub use normalize::normalize_price;
pub use page::{PageDriver, PageElement, PageSession};
pub use profile::{SourceProfile, SpaceEncoding};
pub use sites::{builtin_profiles, load_profiles, parse_profiles};
