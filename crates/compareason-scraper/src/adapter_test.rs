use super::*;
use crate::extract::{Candidate, Fallback, FieldSpec, Validator};
use crate::fake::{FakeDriver, FakeElement, FakePage};
use crate::profile::SpaceEncoding;
use compareason_core::Price;

const SEARCH_URL: &str = "https://shop.example.in/search?q=wireless+earbuds";

fn profile() -> SourceProfile {
    SourceProfile {
        id: "shop".to_owned(),
        display_name: "Shop".to_owned(),
        origin: "https://shop.example.in".to_owned(),
        search_url_template: "https://shop.example.in/search?q={query}".to_owned(),
        space_encoding: SpaceEncoding::Plus,
        containers: vec![".result".to_owned(), ".card".to_owned()],
        title: FieldSpec::new(vec![Candidate::text("h2")]),
        price: FieldSpec::new(vec![Candidate::text(".price")])
            .validator(Validator::ContainsGlyph('₹'))
            .fallback(Fallback::CurrencyPattern { glyph: '₹' }),
        rating: FieldSpec::new(vec![Candidate::text(".rating")]),
        link: FieldSpec::new(vec![Candidate::attr("a", "href")]),
    }
}

fn card(title: &str, price: &str, href: &str) -> FakeElement {
    FakeElement::default()
        .child("h2", FakeElement::new(title))
        .child(".price", FakeElement::new(price))
        .child("a", FakeElement::new("").attr("href", href))
}

fn adapter(page: FakePage, timeout_ms: u64) -> (Arc<FakeDriver>, SiteAdapter<FakeDriver>) {
    let driver = Arc::new(FakeDriver::with_pages([(SEARCH_URL.to_owned(), page)]));
    let adapter = SiteAdapter::new(
        Arc::clone(&driver),
        profile(),
        Duration::from_millis(timeout_ms),
    );
    (driver, adapter)
}

#[tokio::test]
async fn extracts_products_from_first_matching_container() {
    let page = FakePage::new().cards(
        ".card",
        vec![
            card("boAt Airdopes 141", "₹1,299", "/boat-airdopes/p/itm1"),
            card("Noise Buds VS104", "₹999", "https://shop.example.in/noise/p/itm2")
                .child(".rating", FakeElement::new("4.1")),
        ],
    );
    let (driver, adapter) = adapter(page, 1_000);

    let products = adapter.fetch("wireless earbuds", 10).await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].title, "boAt Airdopes 141");
    assert_eq!(products[0].price, Price::Amount(1_299));
    assert_eq!(products[0].url, "https://shop.example.in/boat-airdopes/p/itm1");
    assert_eq!(products[0].rating, None);
    assert_eq!(products[0].source, "Shop");
    assert_eq!(products[1].rating.as_deref(), Some("4.1"));
    assert_eq!(driver.closed_sessions(), 1);
}

#[tokio::test]
async fn earlier_container_locator_takes_precedence() {
    let page = FakePage::new()
        .cards(".card", vec![card("Second", "₹2", "/b")])
        .cards(".result", vec![card("First", "₹1", "/a")]);
    let (_, adapter) = adapter(page, 1_000);

    let products = adapter.fetch("wireless earbuds", 10).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "First");
}

#[tokio::test]
async fn no_matching_container_yields_empty_list() {
    let page = FakePage::new().cards(".unrelated", vec![card("x", "₹1", "/x")]);
    let (driver, adapter) = adapter(page, 1_000);

    let products = adapter.fetch("wireless earbuds", 10).await.unwrap();
    assert!(products.is_empty());
    assert_eq!(driver.closed_sessions(), 1);
}

#[tokio::test]
async fn incomplete_cards_are_skipped() {
    let no_price = FakeElement::default()
        .child("h2", FakeElement::new("Missing price"))
        .child("a", FakeElement::new("").attr("href", "/np"));
    let no_link = FakeElement::default()
        .child("h2", FakeElement::new("Missing link"))
        .child(".price", FakeElement::new("₹10"));
    let page = FakePage::new().cards(
        ".result",
        vec![no_price, card("Complete", "₹499", "/ok"), no_link],
    );
    let (_, adapter) = adapter(page, 1_000);

    let products = adapter.fetch("wireless earbuds", 10).await.unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Complete");
}

#[tokio::test]
async fn at_most_max_results_cards_are_examined() {
    let cards = (1..=5)
        .map(|i| card(&format!("Item {i}"), &format!("₹{i}00"), &format!("/p/{i}")))
        .collect();
    let page = FakePage::new().cards(".result", cards);
    let (_, adapter) = adapter(page, 1_000);

    let products = adapter.fetch("wireless earbuds", 3).await.unwrap();
    let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Item 1", "Item 2", "Item 3"]);
}

#[tokio::test]
async fn unparseable_price_is_kept_as_raw_text() {
    let page = FakePage::new().cards(".result", vec![card("Teaser", "₹ TBA", "/t")]);
    let (_, adapter) = adapter(page, 1_000);

    let products = adapter.fetch("wireless earbuds", 10).await.unwrap();
    assert_eq!(products[0].price, Price::Raw("₹ TBA".to_owned()));
}

#[tokio::test]
async fn slow_navigation_times_out_and_closes_session() {
    let page = FakePage::new()
        .cards(".result", vec![card("x", "₹1", "/x")])
        .slow_navigation(Duration::from_millis(500));
    let (driver, adapter) = adapter(page, 20);

    let err = adapter.fetch("wireless earbuds", 10).await.unwrap_err();
    assert!(
        matches!(err, ScraperError::Timeout { stage: "navigation", timeout_ms: 20, .. }),
        "got: {err}"
    );
    assert_eq!(driver.closed_sessions(), 1);
}

#[tokio::test]
async fn slow_quiescence_times_out() {
    let page = FakePage::new().slow_quiescence(Duration::from_millis(500));
    let (_, adapter) = adapter(page, 20);

    let err = adapter.fetch("wireless earbuds", 10).await.unwrap_err();
    assert!(matches!(err, ScraperError::Timeout { stage: "quiescence", .. }));
}

#[tokio::test]
async fn navigation_error_propagates() {
    let (driver, adapter) = adapter(FakePage::new(), 1_000);

    let err = adapter.fetch("something else", 10).await.unwrap_err();
    assert!(matches!(err, ScraperError::NotFound { .. }));
    assert_eq!(driver.closed_sessions(), 1);
}

#[tokio::test]
async fn usable_as_trait_object() {
    let page = FakePage::new().cards(".result", vec![card("Only", "₹5", "/o")]);
    let (_, adapter) = adapter(page, 1_000);
    let source: Arc<dyn ProductSource> = Arc::new(adapter);

    assert_eq!(source.id(), "shop");
    assert_eq!(source.display_name(), "Shop");
    let products = source.fetch("wireless earbuds", 1).await.unwrap();
    assert_eq!(products.len(), 1);
}
