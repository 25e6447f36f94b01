use crate::extract::{Candidate, Fallback, FieldSpec, Validator};
use crate::normalize::RUPEE;
use crate::profile::{SourceProfile, SpaceEncoding};

use super::texts;

const CONTAINERS: &[&str] = &[
    "._1AtVbE",
    "[data-id]",
    "._13oc-S",
    "._4rR01T",
    "[class*='product']",
    "div[data-id]",
    "._2kHMtA",
    "._1fQZEK",
    "._3pLy-c",
    "div[class*='_1AtVbE']",
];

const TITLE: &[&str] = &["._4rR01T", "a[title]", "._2WkVRV", "[class*='title']", "h2", "h3"];

const PRICE: &[&str] = &[
    "._30jeq3",
    "._1_WHN1",
    "[class*='price']",
    "._3I9_wc",
    "._25b18c",
    "span[class*='price']",
    "div[class*='price']",
    "._1vC4OE",
    "._2c7tJZ",
    "._4b5DiR",
    "._13fcjj",
    "._1fQZEK",
    "._3tbKJL",
    "._2rQ-NK",
    "._3auQ3N",
    "._1sfVt7",
    "._2Tpdn3",
    "._3HiVg0",
    "._2nE8_R",
];

const RATING: &[&str] = &["._3LWZlK", "._1lRcqv", "[class*='rating']", "._3Ay6Sb", "._1i0wk8"];

/// Flipkart product links embed the product name as the first path segment,
/// which is cleaner than most on-card title text, so it is tried first.
pub(super) fn profile() -> SourceProfile {
    let mut title = vec![Candidate::path_slug("a", "href")];
    title.extend(texts(TITLE));
    title.push(Candidate::attr("a", "title"));

    SourceProfile {
        id: "flipkart".to_owned(),
        display_name: "Flipkart".to_owned(),
        origin: "https://www.flipkart.com".to_owned(),
        search_url_template: "https://www.flipkart.com/search?q={query}".to_owned(),
        space_encoding: SpaceEncoding::Plus,
        containers: CONTAINERS.iter().map(|&s| s.to_owned()).collect(),
        title: FieldSpec::new(title).fallback(Fallback::TextLength {
            locator: "span, div, a".to_owned(),
            min: 20,
            max: 100,
            contains: None,
        }),
        price: FieldSpec::new(texts(PRICE))
            .validator(Validator::ContainsGlyph(RUPEE))
            .fallback(Fallback::CurrencyPattern { glyph: RUPEE })
            .fallback(Fallback::TextLength {
                locator: "*".to_owned(),
                min: 0,
                max: 20,
                contains: Some(RUPEE),
            }),
        rating: FieldSpec::new(texts(RATING)),
        link: FieldSpec::new(vec![Candidate::attr("a", "href")]),
    }
}
