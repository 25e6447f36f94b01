use super::*;
use crate::fake::FakeElement;

fn price_spec() -> FieldSpec {
    FieldSpec::new(vec![
        Candidate::text("._30jeq3"),
        Candidate::text("[class*='price']"),
    ])
    .validator(Validator::ContainsGlyph('₹'))
    .fallback(Fallback::CurrencyPattern { glyph: '₹' })
}

#[test]
fn first_matching_candidate_wins() {
    let card = FakeElement::default()
        .child("._30jeq3", FakeElement::new("₹1,499"))
        .child("[class*='price']", FakeElement::new("₹2,000"));
    assert_eq!(extract_field(&card, &price_spec()).as_deref(), Some("₹1,499"));
}

#[test]
fn value_failing_validator_falls_through_to_next_candidate() {
    let card = FakeElement::default()
        .child("._30jeq3", FakeElement::new("Special offer"))
        .child("[class*='price']", FakeElement::new("₹2,000"));
    assert_eq!(extract_field(&card, &price_spec()).as_deref(), Some("₹2,000"));
}

#[test]
fn only_first_element_per_locator_is_read() {
    let card = FakeElement::default()
        .child("._30jeq3", FakeElement::new("no glyph here"))
        .child("._30jeq3", FakeElement::new("₹10"));
    // The second `._30jeq3` is not consulted; the fallback scans card text.
    assert_eq!(extract_field(&card, &price_spec()).as_deref(), Some("₹10"));
}

#[test]
fn currency_fallback_scans_card_text() {
    let card = FakeElement::new("Boat Airdopes 141  ₹1,299 ₹4,490 71% off");
    assert_eq!(extract_field(&card, &price_spec()).as_deref(), Some("₹1,299"));
}

#[test]
fn fallbacks_do_not_run_when_a_candidate_succeeds() {
    let card = FakeElement::new("₹9")
        .child("._30jeq3", FakeElement::new("₹1,000"));
    assert_eq!(extract_field(&card, &price_spec()).as_deref(), Some("₹1,000"));
}

#[test]
fn absent_everywhere_is_none() {
    let card = FakeElement::new("Out of stock").child("h2", FakeElement::new("Title"));
    assert_eq!(extract_field(&card, &price_spec()), None);
}

#[test]
fn values_are_trimmed_and_blank_is_rejected() {
    let spec = FieldSpec::new(vec![Candidate::text("h2"), Candidate::text("h3")]);
    let card = FakeElement::default()
        .child("h2", FakeElement::new("   "))
        .child("h3", FakeElement::new("  Redmi Note 13 5G \n"));
    assert_eq!(extract_field(&card, &spec).as_deref(), Some("Redmi Note 13 5G"));
}

#[test]
fn attribute_read_and_missing_attribute() {
    let spec = FieldSpec::new(vec![
        Candidate::attr("a", "title"),
        Candidate::attr("a.alt", "href"),
    ]);
    let card = FakeElement::default()
        .child("a", FakeElement::new("ignored"))
        .child("a.alt", FakeElement::new("").attr("href", "/p/itm1"));
    assert_eq!(extract_field(&card, &spec).as_deref(), Some("/p/itm1"));
}

#[test]
fn attr_or_text_prefers_attribute() {
    let spec = FieldSpec::new(vec![Candidate::attr_or_text(".a-icon-alt", "aria-label")])
        .validator(Validator::ContainsWord("star".to_owned()))
        .transform(Transform::FirstNumber);

    let labelled = FakeElement::default().child(
        ".a-icon-alt",
        FakeElement::new("").attr("aria-label", "4.3 out of 5 stars"),
    );
    assert_eq!(extract_field(&labelled, &spec).as_deref(), Some("4.3"));

    let text_only = FakeElement::default().child(".a-icon-alt", FakeElement::new("4 Stars"));
    assert_eq!(extract_field(&text_only, &spec).as_deref(), Some("4"));
}

#[test]
fn contains_word_rejects_unrelated_text() {
    let spec = FieldSpec::new(vec![Candidate::text(".a-icon-alt")])
        .validator(Validator::ContainsWord("star".to_owned()));
    let card = FakeElement::default().child(".a-icon-alt", FakeElement::new("Prime"));
    assert_eq!(extract_field(&card, &spec), None);
}

#[test]
fn first_number_without_digits_rejects_value() {
    let spec = FieldSpec::new(vec![Candidate::text(".rating"), Candidate::text(".stars")])
        .transform(Transform::FirstNumber);
    let card = FakeElement::default()
        .child(".rating", FakeElement::new("New"))
        .child(".stars", FakeElement::new("4.1 (2,345)"));
    assert_eq!(extract_field(&card, &spec).as_deref(), Some("4.1"));
}

#[test]
fn path_slug_builds_title_from_link() {
    let spec = FieldSpec::new(vec![Candidate::path_slug("a", "href")]);

    let relative = FakeElement::default().child(
        "a",
        FakeElement::new("").attr("href", "/apple-iphone-15-black-128-gb/p/itm6ac6485515ae4?pid=1"),
    );
    assert_eq!(
        extract_field(&relative, &spec).as_deref(),
        Some("Apple Iphone 15 Black 128 Gb")
    );

    let absolute = FakeElement::default().child(
        "a",
        FakeElement::new("").attr("href", "https://www.flipkart.com/boat-rockerz/p/itm1"),
    );
    assert_eq!(extract_field(&absolute, &spec).as_deref(), Some("Boat Rockerz"));
}

#[test]
fn path_slug_without_segments_is_absent() {
    let spec = FieldSpec::new(vec![Candidate::path_slug("a", "href")]);
    let card = FakeElement::default().child("a", FakeElement::new("").attr("href", "/?q=tv"));
    assert_eq!(extract_field(&card, &spec), None);
}

#[test]
fn text_length_fallback_uses_strict_bounds() {
    let spec = FieldSpec::new(vec![Candidate::text("._4rR01T")]).fallback(Fallback::TextLength {
        locator: "span".to_owned(),
        min: 5,
        max: 12,
        contains: None,
    });
    let card = FakeElement::default()
        .child("span", FakeElement::new("short"))
        .child("span", FakeElement::new("exactly12chr"))
        .child("span", FakeElement::new(" Pixel 8a "));
    assert_eq!(extract_field(&card, &spec).as_deref(), Some("Pixel 8a"));
}

#[test]
fn text_length_fallback_requires_glyph_when_set() {
    let spec = FieldSpec::new(vec![]).fallback(Fallback::TextLength {
        locator: "*".to_owned(),
        min: 0,
        max: 20,
        contains: Some('₹'),
    });
    let card = FakeElement::default()
        .child("*", FakeElement::new("4.5 rating"))
        .child("*", FakeElement::new("₹799"));
    assert_eq!(extract_field(&card, &spec).as_deref(), Some("₹799"));
}

#[test]
fn fallback_values_still_pass_validator() {
    let spec = FieldSpec::new(vec![])
        .validator(Validator::ContainsGlyph('₹'))
        .fallback(Fallback::TextLength {
            locator: "span".to_owned(),
            min: 0,
            max: 50,
            contains: None,
        })
        .fallback(Fallback::CurrencyPattern { glyph: '₹' });
    let card = FakeElement::new("₹450").child("span", FakeElement::new("Bestseller"));
    assert_eq!(extract_field(&card, &spec).as_deref(), Some("₹450"));
}

#[test]
fn extraction_is_deterministic() {
    let card = FakeElement::new("₹1 ₹2").child("[class*='price']", FakeElement::new("₹3"));
    let spec = price_spec();
    let first = extract_field(&card, &spec);
    for _ in 0..5 {
        assert_eq!(extract_field(&card, &spec), first);
    }
}

#[test]
fn field_spec_deserializes_from_yaml() {
    let yaml = r"
candidates:
  - locator: ._3LWZlK
  - locator: a
    read: !attr title
validator: !contains_glyph '₹'
transform: first_number
fallbacks:
  - !currency_pattern
    glyph: '₹'
  - !text_length
    locator: span
    min: 20
    max: 100
";
    let spec: FieldSpec = serde_yaml::from_str(yaml).expect("valid field spec");
    assert_eq!(spec.candidates[0], Candidate::text("._3LWZlK"));
    assert_eq!(spec.candidates[1], Candidate::attr("a", "title"));
    assert_eq!(spec.validator, Validator::ContainsGlyph('₹'));
    assert_eq!(spec.transform, Some(Transform::FirstNumber));
    assert_eq!(spec.fallbacks.len(), 2);
    assert!(matches!(
        &spec.fallbacks[1],
        Fallback::TextLength { min: 20, max: 100, contains: None, .. }
    ));
}

#[test]
fn currency_amount_takes_leftmost_glyph_with_digits() {
    assert_eq!(
        currency_amount("MRP ₹ ₹1,299 (20% off) ₹999", '₹').as_deref(),
        Some("₹1,299")
    );
    assert_eq!(currency_amount("now $ 45.50", '$').as_deref(), Some("$ 45"));
    assert_eq!(currency_amount("Price on request", '₹'), None);
    assert_eq!(currency_amount("₹", '₹'), None);
}
