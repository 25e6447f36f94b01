//! Built-in source profiles and loading profiles from YAML.
//!
//! A profile file replaces the built-ins entirely:
//!
//! ```yaml
//! sources:
//!   - id: shop
//!     display_name: Shop
//!     origin: https://shop.example.in
//!     search_url_template: https://shop.example.in/search?q={query}
//!     space_encoding: percent
//!     containers: [".card"]
//!     title: { candidates: [{ locator: h2 }] }
//!     price: { candidates: [{ locator: .price }], validator: !contains_glyph '₹' }
//!     rating: { candidates: [] }
//!     link: { candidates: [{ locator: a, read: !attr href }] }
//! ```

mod amazon;
mod flipkart;
mod reliance;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ScraperError;
use crate::extract::Candidate;
use crate::profile::SourceProfile;

fn texts(locators: &[&str]) -> Vec<Candidate> {
    locators.iter().map(|locator| Candidate::text(locator)).collect()
}

/// Flipkart, Amazon and Reliance Digital, in that order.
#[must_use]
pub fn builtin_profiles() -> Vec<SourceProfile> {
    vec![flipkart::profile(), amazon::profile(), reliance::profile()]
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    sources: Vec<SourceProfile>,
}

/// Parses and validates a YAML profile document.
///
/// # Errors
///
/// Returns [`ScraperError::Profile`] if the document does not parse, lists
/// no sources, repeats an id or display name, or contains an invalid
/// profile.
pub fn parse_profiles(yaml: &str) -> Result<Vec<SourceProfile>, ScraperError> {
    let file: ProfileFile =
        serde_yaml::from_str(yaml).map_err(|e| ScraperError::Profile(e.to_string()))?;

    if file.sources.is_empty() {
        return Err(ScraperError::Profile(
            "profile file lists no sources".to_owned(),
        ));
    }

    let mut ids = HashSet::new();
    let mut display_names = HashSet::new();
    for profile in &file.sources {
        profile.validate()?;
        if !ids.insert(profile.id.as_str()) {
            return Err(ScraperError::Profile(format!(
                "duplicate source id \"{}\"",
                profile.id
            )));
        }
        // Products are attributed by display name.
        if !display_names.insert(profile.display_name.as_str()) {
            return Err(ScraperError::Profile(format!(
                "duplicate display name \"{}\"",
                profile.display_name
            )));
        }
    }
    Ok(file.sources)
}

/// Reads profiles from a YAML file at `path`.
///
/// # Errors
///
/// Returns [`ScraperError::Profile`] if the file cannot be read or fails
/// [`parse_profiles`].
pub fn load_profiles(path: &Path) -> Result<Vec<SourceProfile>, ScraperError> {
    let yaml = std::fs::read_to_string(path).map_err(|e| {
        ScraperError::Profile(format!("cannot read {}: {e}", path.display()))
    })?;
    let profiles = parse_profiles(&yaml)?;
    tracing::info!(path = %path.display(), count = profiles.len(), "loaded source profiles");
    Ok(profiles)
}
