//! Cascading field extraction.
//!
//! Each product field is described by a [`FieldSpec`]: an ordered list of
//! locator candidates, a validator that a candidate value must satisfy, an
//! optional transform, and last-resort fallbacks that scan the card with
//! lower precision. [`extract_field`] walks the list in order and returns the
//! first accepted value. Absence is `None`, never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::page::PageElement;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("valid number regex"));

/// An amount directly after a currency glyph: optional spaces, then digits
/// and `,` separators.
static AMOUNT_AFTER_GLYPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d[\d,]*").expect("valid amount regex"));

/// How a value is read from the element a locator matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Read {
    /// The element's rendered text.
    #[default]
    Text,
    /// The value of the named attribute.
    Attr(String),
    /// The named attribute when present and non-blank, otherwise the text.
    AttrOrText(String),
    /// A title built from the first path segment of a link attribute:
    /// `/apple-iphone-15/p/itm1` reads as `"Apple Iphone 15"`.
    PathSlug(String),
}

/// One locator in a field's priority list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    pub locator: String,
    #[serde(default)]
    pub read: Read,
}

impl Candidate {
    #[must_use]
    pub fn text(locator: &str) -> Self {
        Self {
            locator: locator.to_owned(),
            read: Read::Text,
        }
    }

    #[must_use]
    pub fn attr(locator: &str, name: &str) -> Self {
        Self {
            locator: locator.to_owned(),
            read: Read::Attr(name.to_owned()),
        }
    }

    #[must_use]
    pub fn attr_or_text(locator: &str, name: &str) -> Self {
        Self {
            locator: locator.to_owned(),
            read: Read::AttrOrText(name.to_owned()),
        }
    }

    #[must_use]
    pub fn path_slug(locator: &str, name: &str) -> Self {
        Self {
            locator: locator.to_owned(),
            read: Read::PathSlug(name.to_owned()),
        }
    }
}

/// Acceptance rule applied to a trimmed candidate value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    #[default]
    NonBlank,
    /// Non-blank and contains the given character, e.g. a currency glyph.
    ContainsGlyph(char),
    /// Non-blank and contains the given word, ignoring ASCII case.
    ContainsWord(String),
}

impl Validator {
    fn accepts(&self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        match self {
            Validator::NonBlank => true,
            Validator::ContainsGlyph(glyph) => value.contains(*glyph),
            Validator::ContainsWord(word) => value
                .to_ascii_lowercase()
                .contains(&word.to_ascii_lowercase()),
        }
    }
}

/// Post-processing applied to an accepted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    /// Keep only the first number (`"4.3 out of 5 stars"` becomes `"4.3"`).
    /// A value without a number is rejected.
    FirstNumber,
}

impl Transform {
    fn apply(self, value: &str) -> Option<String> {
        match self {
            Transform::FirstNumber => FIRST_NUMBER.find(value).map(|m| m.as_str().to_owned()),
        }
    }
}

/// Low-precision recovery tried after every candidate has failed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// First `<glyph>1,234`-style match anywhere in the card's text.
    CurrencyPattern { glyph: char },
    /// First element matched by `locator` whose trimmed text length lies
    /// strictly between `min` and `max` characters and, when `contains` is
    /// set, includes that character.
    TextLength {
        locator: String,
        min: usize,
        max: usize,
        #[serde(default)]
        contains: Option<char>,
    },
}

/// Extraction recipe for one product field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldSpec {
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub validator: Validator,
    #[serde(default)]
    pub transform: Option<Transform>,
    #[serde(default)]
    pub fallbacks: Vec<Fallback>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            candidates,
            validator: Validator::NonBlank,
            transform: None,
            fallbacks: Vec::new(),
        }
    }

    #[must_use]
    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = validator;
        self
    }

    #[must_use]
    pub fn transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    #[must_use]
    pub fn fallback(mut self, fallback: Fallback) -> Self {
        self.fallbacks.push(fallback);
        self
    }

    fn accept(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        if !self.validator.accepts(value) {
            return None;
        }
        match self.transform {
            Some(transform) => transform.apply(value),
            None => Some(value.to_owned()),
        }
    }
}

/// Returns the first value for `spec` found in `card`, or `None`.
///
/// Candidates are tried in order; for each, only the first element its
/// locator matches is read. Fallbacks run only when no candidate produced an
/// accepted value. The result is deterministic for a fixed card and spec.
pub fn extract_field<E: PageElement>(card: &E, spec: &FieldSpec) -> Option<String> {
    spec.candidates
        .iter()
        .filter_map(|candidate| read_candidate(card, candidate))
        .find_map(|raw| spec.accept(&raw))
        .or_else(|| {
            spec.fallbacks
                .iter()
                .filter_map(|fallback| recover(card, fallback))
                .find_map(|raw| spec.accept(&raw))
        })
}

fn read_candidate<E: PageElement>(card: &E, candidate: &Candidate) -> Option<String> {
    let element = card.query(&candidate.locator)?;
    match &candidate.read {
        Read::Text => Some(element.inner_text()),
        Read::Attr(name) => element.attribute(name),
        Read::AttrOrText(name) => element
            .attribute(name)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| Some(element.inner_text())),
        Read::PathSlug(name) => element.attribute(name).and_then(|href| slug_title(&href)),
    }
}

/// Leftmost `glyph` followed by an amount, returned with the glyph.
fn currency_amount(text: &str, glyph: char) -> Option<String> {
    text.match_indices(glyph).find_map(|(start, _)| {
        let after = start + glyph.len_utf8();
        AMOUNT_AFTER_GLYPH
            .find(&text[after..])
            .map(|m| text[start..after + m.end()].to_owned())
    })
}

fn recover<E: PageElement>(card: &E, fallback: &Fallback) -> Option<String> {
    match fallback {
        Fallback::CurrencyPattern { glyph } => currency_amount(&card.inner_text(), *glyph),
        Fallback::TextLength {
            locator,
            min,
            max,
            contains,
        } => card.query_all(locator).into_iter().find_map(|element| {
            let text = element.inner_text();
            let trimmed = text.trim();
            let len = trimmed.chars().count();
            let in_window = len > *min && len < *max;
            let has_glyph = contains.is_none_or(|c| trimmed.contains(c));
            (in_window && has_glyph).then(|| trimmed.to_owned())
        }),
    }
}

/// Builds a display title from the first path segment of a product link.
fn slug_title(href: &str) -> Option<String> {
    let path = match reqwest::Url::parse(href) {
        Ok(url) => url.path().to_owned(),
        Err(_) => href.split(['?', '#']).next().unwrap_or_default().to_owned(),
    };
    let slug = path.split('/').find(|segment| !segment.is_empty())?;

    let title = slug
        .split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");
    (!title.is_empty()).then_some(title)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
