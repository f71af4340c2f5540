//! Cross-module flows as they happen across storefront pages.

use std::time::Duration;

use futures::executor::block_on;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tim_commerce::newsletter::NewsletterSettings;
use tim_commerce::prelude::*;
use tim_commerce::timer::RecordingSleeper;

#[test]
fn test_cart_survives_page_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    let catalog = new_arrivals();

    // Home page adds two items.
    {
        let cart = CartStore::new(Cache::open_file(&path));
        cart.add(LineItem::from_product(&catalog[0], 1)).unwrap();
        cart.add(LineItem::from_product(&catalog[3], 2)).unwrap();
    }

    // Products page opens a fresh store over the same storage.
    let cart = CartStore::new(Cache::open_file(&path));
    assert_eq!(cart.total_quantity(), 3);
    let lines = cart.add(LineItem::from_product(&catalog[0], 1)).unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].qty, 2);

    // 2 x K1,200 + 2 x K4,200
    assert_eq!(cart.subtotal().unwrap().display(), "K10,800.00");
}

#[test]
fn test_stored_cart_wire_format() {
    let cache = Cache::open_memory();
    let cart = CartStore::new(cache.clone());
    cart.add(LineItem::from_product(&new_arrivals()[11], 3)).unwrap();

    let raw = cache.get_raw(CART_STORAGE_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "id": 12, "name": "Safari Leather Belt", "price": 950, "qty": 3 }])
    );
}

#[test]
fn test_corrupt_storage_reads_as_empty() {
    let cache = Cache::open_memory();
    cache.set_raw(CART_STORAGE_KEY, "{not json").unwrap();
    let cart = CartStore::new(cache);
    assert!(cart.get().is_empty());
    assert_eq!(cart.total_quantity(), 0);
}

#[test]
fn test_browse_filter_and_add_from_card() {
    let mut generator = CatalogGenerator::seeded(2024);
    let catalog = generator.generate(30);
    let mut view = CatalogView::new(catalog, FilterState::from_query("?category=women&sort=price-low"));

    assert!(view.filtered().iter().all(|p| p.category == Category::Women));
    let prices: Vec<i64> = view.filtered().iter().map(|p| p.price.amount_cents).collect();
    let mut sorted = prices.clone();
    sorted.sort();
    assert_eq!(prices, sorted);

    let cart = CartStore::new(Cache::open_memory());
    let first = view.displayed()[0].clone();
    let mut card = ProductCard::new(first.clone());
    let outcome = card.handle(CardAction::AddToCart, &cart, Timestamp::from_millis(90_000)).unwrap();
    assert!(matches!(outcome, CardOutcome::CartUpdated { total_quantity: 1, .. }));

    view.dispatch(FilterAction::SetSearch("zzzz-no-such-thing".into()));
    assert_eq!(view.status(), ViewStatus::NoResults);
    assert_eq!(view.state().location(), "products.html?category=women&search=zzzz-no-such-thing&sort=price-low");

    view.dispatch(FilterAction::ClearAll);
    assert_eq!(view.results_info(), (12, 30));
    assert!(view.has_more());
}

#[test]
fn test_detail_page_resolves_published_product() {
    let registry = ProductRegistry::new();
    let publisher = registry.clone();
    publisher.publish(new_arrivals());

    let policy = LookupPolicy::default();
    let sleeper = RecordingSleeper::new();
    let product = block_on(resolve_product(&registry, "?id=2", &policy, &sleeper)).unwrap();
    let view = QuickView::from_product(&product);
    assert_eq!(view.sku, "TC002");

    let err = block_on(resolve_product(&registry, "?id=404", &policy, &sleeper)).unwrap_err();
    assert!(matches!(err, LookupError::NotFound { attempts: 11, .. }));
}

#[test]
fn test_newsletter_resubmit_after_failure() {
    let mut form = NewsletterForm::new(NewsletterSettings {
        delay: Duration::from_millis(10),
        success_rate: 0.0,
    });
    form.set_email("tim@clothing.co.zm");
    let sleeper = RecordingSleeper::new();
    let mut rng = StdRng::seed_from_u64(3);

    let attempt = form.submit().unwrap();
    let outcome = block_on(attempt.resolve(&sleeper, &mut rng));
    form.finish(outcome, Timestamp::from_millis(90_000));
    assert!(matches!(form.status(), NewsletterStatus::Failed(_)));

    // No automatic retry happened; the user resubmits.
    assert_eq!(sleeper.waits().len(), 1);
    assert!(form.submit().is_ok());
}

#[test]
fn test_faq_search_then_escape() {
    let mut faq = FaqState::new(tim_commerce::faq::default_entries());
    faq.apply(FaqAction::SetSearch("refund".into()));
    let first = faq.visible_indices()[0];
    assert_eq!(faq.apply(FaqAction::Toggle(first)), FaqTransition::Opened(first));
    assert_eq!(faq.apply(FaqAction::Escape), FaqTransition::AllClosed);
    assert_eq!(faq.open_index(), None);
}
