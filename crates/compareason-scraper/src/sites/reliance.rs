use crate::extract::{Candidate, Fallback, FieldSpec, Transform, Validator};
use crate::normalize::RUPEE;
use crate::profile::{SourceProfile, SpaceEncoding};

use super::texts;

const CONTAINERS: &[&str] = &[
    ".sp__product",
    ".product-item",
    ".product-card",
    "[data-testid='product-card']",
    ".search-product-item",
];

const TITLE: &[&str] = &[
    ".sp__name",
    ".product-title",
    ".product-name",
    "h3",
    "h2",
    ".title",
    "a[title]",
];

const PRICE: &[&str] = &[
    ".sp__price",
    ".price",
    ".current-price",
    ".offer-price",
    ".sp__offer-price",
    "[data-testid='price']",
];

const RATING: &[&str] = &[".sp__rating", ".rating", ".star-rating", "[data-testid='rating']"];

pub(super) fn profile() -> SourceProfile {
    let mut title = texts(TITLE);
    title.push(Candidate::attr("a", "title"));

    SourceProfile {
        id: "reliance".to_owned(),
        display_name: "Reliance Digital".to_owned(),
        origin: "https://www.reliancedigital.in".to_owned(),
        search_url_template: "https://www.reliancedigital.in/search?q={query}".to_owned(),
        space_encoding: SpaceEncoding::Percent,
        containers: CONTAINERS.iter().map(|&s| s.to_owned()).collect(),
        title: FieldSpec::new(title),
        price: FieldSpec::new(texts(PRICE))
            .validator(Validator::ContainsGlyph(RUPEE))
            .fallback(Fallback::CurrencyPattern { glyph: RUPEE }),
        rating: FieldSpec::new(texts(RATING)).transform(Transform::FirstNumber),
        link: FieldSpec::new(vec![Candidate::attr("a", "href")]),
    }
}
