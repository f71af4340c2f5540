//! Rendering whole page flows against shared state.

use std::rc::Rc;

use tim_cache::Cache;
use tim_commerce::prelude::*;
use tim_storefront::{render_product_card, render_products_page, render_quick_view, HeaderBadge};

#[test]
fn test_products_page_from_url() {
    let catalog = new_arrivals();
    let view = CatalogView::new(catalog, FilterState::from_query("?category=accessories&sort=rating"));
    let html = render_products_page(&view);

    assert!(html.contains(r#"<button class="filter-btn active" data-filter="accessories">"#));
    assert!(html.contains(r#"<option value="rating" selected>"#));
    assert_eq!(html.matches(r#"class="product-card""#).count(), 4);
    // Highest rated accessory first.
    let watch = html.find(r#"data-product-id="3""#).unwrap();
    let belt = html.find(r#"data-product-id="12""#).unwrap();
    assert!(watch < belt);
    assert!(html.contains(r#"data-type="category" data-value="accessories""#));
}

#[test]
fn test_add_from_quick_view_updates_header() {
    let badge = Rc::new(HeaderBadge::new());
    let cart = CartStore::new(Cache::open_memory()).with_badge(badge.clone());
    let product = new_arrivals()[4].clone();

    let mut card = ProductCard::new(product);
    let view = match card.handle(CardAction::QuickView, &cart, Timestamp::from_millis(60_000)).unwrap() {
        CardOutcome::QuickView(view) => view,
        other => panic!("unexpected outcome {:?}", other),
    };
    assert!(render_quick_view(&view).contains("TC005"));

    view.add_to_cart(&cart, 2).unwrap();
    card.handle(CardAction::AddToCart, &cart, Timestamp::from_millis(60_000)).unwrap();
    assert_eq!(badge.render(), r#"<span class="cart-count">3</span>"#);
    assert!(render_product_card(&card, Timestamp::from_millis(60_000)).contains("Added"));
}
