use crate::extract::{Candidate, Fallback, FieldSpec, Transform, Validator};
use crate::normalize::RUPEE;
use crate::profile::{SourceProfile, SpaceEncoding};

use super::texts;

const CONTAINERS: &[&str] = &[
    "[data-component-type='s-search-result']",
    ".s-result-item",
    "[data-cy='title-recipe-label']",
    ".a-section.a-spacing-medium",
    "[data-asin]",
];

const TITLE: &[&str] = &[
    "h2 a span",
    "h2 span",
    ".a-size-medium",
    ".a-size-base-plus",
    "[data-cy='title-recipe-label']",
    ".s-size-mini",
];

const PRICE: &[&str] = &[
    ".a-price-whole",
    ".a-price .a-offscreen",
    ".a-price-range",
    ".a-price",
    ".a-offscreen",
];

const RATING: &[&str] = &[".a-icon-alt", ".a-star-medium", "[aria-label*='star']"];

/// Ratings are read from the `aria-label` ("4.2 out of 5 stars") when present.
pub(super) fn profile() -> SourceProfile {
    SourceProfile {
        id: "amazon".to_owned(),
        display_name: "Amazon".to_owned(),
        origin: "https://www.amazon.in".to_owned(),
        search_url_template: "https://www.amazon.in/s?k={query}".to_owned(),
        space_encoding: SpaceEncoding::Plus,
        containers: CONTAINERS.iter().map(|&s| s.to_owned()).collect(),
        title: FieldSpec::new(texts(TITLE)),
        price: FieldSpec::new(texts(PRICE))
            .validator(Validator::ContainsGlyph(RUPEE))
            .fallback(Fallback::CurrencyPattern { glyph: RUPEE }),
        rating: FieldSpec::new(
            RATING
                .iter()
                .map(|locator| Candidate::attr_or_text(locator, "aria-label"))
                .collect(),
        )
        .validator(Validator::ContainsWord("star".to_owned()))
        .transform(Transform::FirstNumber),
        link: FieldSpec::new(vec![
            Candidate::attr("h2 a", "href"),
            Candidate::attr("a", "href"),
        ]),
    }
}
