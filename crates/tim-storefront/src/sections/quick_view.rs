//! Quick view modal body.

use tim_commerce::card::QuickView;

use crate::html::{html_escape, render_stars};

/// Render the modal content for `view`.
pub fn render_quick_view(view: &QuickView) -> String {
    let original = view
        .original_price
        .map(|p| format!(r#"<span class="original-price">{}</span>"#, p.display()))
        .unwrap_or_default();
    let discount = view
        .discount_percent
        .map(|d| format!(r#"<span class="discount">-{}%</span>"#, d))
        .unwrap_or_default();

    format!(
        r#"<div class="quick-view-content" data-product-id="{id}">
    <div class="quick-view-image">
        <img src="{image}" alt="{name}">
    </div>
    <div class="quick-view-details">
        <h2>{name}</h2>
        <div class="quick-view-price">
            <span class="current-price">{price}</span>
            {original}
            {discount}
        </div>
        <div class="quick-view-rating">
            <div class="stars">{stars}</div>
            <span class="rating-count">{reviews} reviews</span>
        </div>
        <p class="quick-view-description">{description}</p>
        <div class="quick-view-actions">
            <button class="add-to-cart-btn" data-product-id="{id}">Add to Cart</button>
            <button class="wishlist-btn" data-product-id="{id}">♡ Wishlist</button>
        </div>
        <div class="quick-view-meta">
            <div class="meta-item"><strong>Category:</strong> {category}</div>
            <div class="meta-item"><strong>SKU:</strong> {sku}</div>
        </div>
    </div>
</div>"#,
        id = view.id,
        image = html_escape(&view.image),
        name = html_escape(&view.name),
        price = view.price.display(),
        original = original,
        discount = discount,
        stars = render_stars(view.rating),
        reviews = view.review_count,
        description = html_escape(&view.description),
        category = html_escape(&view.category_label),
        sku = view.sku,
    )
}
