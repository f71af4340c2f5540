//! Product card.

use tim_commerce::card::ProductCard;
use tim_commerce::catalog::Product;
use tim_commerce::timer::Timestamp;

use crate::html::{html_escape, render_stars};

/// Render a card in its current state at `now`.
pub fn render_product_card(card: &ProductCard, now: Timestamp) -> String {
    let product = card.product();
    let wishlist_class = if card.is_wishlisted() {
        "action-btn wishlist added"
    } else {
        "action-btn wishlist"
    };
    let add_class = if card.is_confirming(now) {
        "add-to-cart-btn added"
    } else {
        "add-to-cart-btn"
    };

    format!(
        r#"<div class="product-card" data-category="{category}" data-product-id="{id}" data-href="{href}">
    <div class="product-image">
        <img src="{image}" alt="{name}" class="product-img" loading="lazy">
        {badge}
        <div class="product-actions">
            <button class="{wishlist_class}" data-product-id="{id}" aria-label="Add to wishlist">♡</button>
            <button class="action-btn compare" data-product-id="{id}" aria-label="Compare product">⇄</button>
        </div>
        <button class="quick-view-btn" data-product-id="{id}">Quick View</button>
        <button class="{add_class}" data-product-id="{id}">{add_label}</button>
    </div>
    <div class="product-content">
        <span class="product-category">{category_label}</span>
        <h3 class="product-title">{name}</h3>
        {price}
        <div class="product-rating">
            <div class="stars">{stars}</div>
            <span class="rating-count">({reviews})</span>
        </div>
    </div>
</div>"#,
        category = product.category.slug(),
        id = product.id,
        href = html_escape(&product.detail_url()),
        image = html_escape(&product.image),
        name = html_escape(&product.name),
        badge = render_badge(product),
        wishlist_class = wishlist_class,
        add_class = add_class,
        add_label = card.add_to_cart_label(now),
        category_label = html_escape(product.category.label()),
        price = render_price(product, "product-price"),
        stars = render_stars(product.rating),
        reviews = product.review_count,
    )
}

pub(crate) fn render_badge(product: &Product) -> String {
    match product.badge {
        Some(badge) => format!(
            r#"<span class="product-badge {}">{}</span>"#,
            badge.as_str(),
            badge.label()
        ),
        None => String::new(),
    }
}

/// Current price, struck-through original and `-N%` when on sale.
pub(crate) fn render_price(product: &Product, class: &str) -> String {
    let original = product
        .original_price
        .map(|p| format!(r#"<span class="original-price">{}</span>"#, p.display()))
        .unwrap_or_default();
    let discount = product
        .discount_percent()
        .map(|d| format!(r#"<span class="discount">-{}%</span>"#, d))
        .unwrap_or_default();

    format!(
        r#"<div class="{}">
            <span class="current-price">{}</span>
            {}
            {}
        </div>"#,
        class,
        product.price.display(),
        original,
        discount
    )
}
