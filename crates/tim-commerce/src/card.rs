//! Product card state and the quick view model.

use std::time::Duration;

use tim_observability::StructuredLogger;

use crate::cart::{CartStore, LineItem};
use crate::catalog::{Badge, Product};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use crate::timer::Timestamp;

/// How long the "Added ✓" confirmation stays on the button.
pub const ADDED_CONFIRMATION: Duration = Duration::from_millis(1200);

/// Resting label of the add-to-cart button.
pub const ADD_TO_CART_LABEL: &str = "Add to Cart";

/// Label shown while the add is being confirmed.
pub const ADDED_LABEL: &str = "Added \u{2713}";

/// Interactions on a product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Heart button.
    ToggleWishlist,
    /// Compare button.
    Compare,
    /// "Quick View" button.
    QuickView,
    /// "Add to Cart" button.
    AddToCart,
    /// Click anywhere on the card outside a button.
    OpenDetail,
}

/// Result of a card interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum CardOutcome {
    /// The wishlist flag flipped.
    WishlistToggled { wishlisted: bool },
    /// The product was queued for comparison.
    Compared(ProductId),
    /// Open the quick view modal.
    QuickView(QuickView),
    /// The cart changed; `total_quantity` is what the badge now shows.
    CartUpdated {
        lines: Vec<LineItem>,
        total_quantity: u32,
    },
    /// Navigate to a detail page URL.
    Navigate(String),
}

/// One rendered product card.
#[derive(Debug, Clone)]
pub struct ProductCard {
    product: Product,
    wishlisted: bool,
    added_until: Option<Timestamp>,
    logger: StructuredLogger,
}

impl ProductCard {
    /// Create a card for `product`.
    pub fn new(product: Product) -> Self {
        Self {
            product,
            wishlisted: false,
            added_until: None,
            logger: StructuredLogger::disabled(),
        }
    }

    /// Attach a logger.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.child("product-card");
        self
    }

    /// The product shown.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Whether the heart is filled. Not persisted.
    pub fn is_wishlisted(&self) -> bool {
        self.wishlisted
    }

    /// Handle an interaction at time `now`.
    pub fn handle(
        &mut self,
        action: CardAction,
        cart: &CartStore,
        now: Timestamp,
    ) -> Result<CardOutcome, CommerceError> {
        match action {
            CardAction::ToggleWishlist => {
                self.wishlisted = !self.wishlisted;
                Ok(CardOutcome::WishlistToggled {
                    wishlisted: self.wishlisted,
                })
            }
            CardAction::Compare => {
                self.logger
                    .info_builder("added to compare")
                    .field_i64("product_id", i64::from(self.product.id.get()))
                    .emit();
                Ok(CardOutcome::Compared(self.product.id))
            }
            CardAction::QuickView => Ok(CardOutcome::QuickView(QuickView::from_product(&self.product))),
            CardAction::AddToCart => {
                let lines = cart.add(LineItem::from_product(&self.product, 1))?;
                self.added_until = Some(now + ADDED_CONFIRMATION);
                let total_quantity = lines.iter().fold(0u32, |acc, l| acc.saturating_add(l.qty));
                Ok(CardOutcome::CartUpdated {
                    lines,
                    total_quantity,
                })
            }
            CardAction::OpenDetail => Ok(CardOutcome::Navigate(self.product.detail_url())),
        }
    }

    /// Whether the add confirmation is still showing at `now`.
    pub fn is_confirming(&self, now: Timestamp) -> bool {
        self.added_until.is_some_and(|until| now < until)
    }

    /// Label of the add-to-cart button at `now`.
    pub fn add_to_cart_label(&self, now: Timestamp) -> &'static str {
        if self.is_confirming(now) {
            ADDED_LABEL
        } else {
            ADD_TO_CART_LABEL
        }
    }
}

/// Everything the quick view modal shows.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: Money,
    pub original_price: Option<Money>,
    /// Shown as `-N%` only when positive.
    pub discount_percent: Option<u32>,
    pub rating: f64,
    pub review_count: u32,
    pub badge: Option<Badge>,
    /// `Men's`, `Women's` or `Accessories`.
    pub category_label: String,
    /// `TC` followed by the zero-padded id.
    pub sku: String,
}

impl QuickView {
    /// Build the modal model for `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            price: product.price,
            original_price: product.original_price,
            discount_percent: product.discount_percent(),
            rating: product.rating,
            review_count: product.review_count,
            badge: product.badge,
            category_label: product.category.label().to_string(),
            sku: product.id.sku(),
        }
    }

    /// The modal's own add-to-cart button. The quantity field never goes
    /// below 1, so a zero quantity adds one.
    pub fn add_to_cart(&self, cart: &CartStore, qty: u32) -> Result<Vec<LineItem>, CommerceError> {
        cart.add(LineItem::new(self.id, self.name.clone(), self.price, qty.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::new_arrivals;
    use tim_cache::Cache;

    fn card(index: usize) -> ProductCard {
        ProductCard::new(new_arrivals()[index].clone())
    }

    #[test]
    fn test_wishlist_toggles() {
        let cart = CartStore::new(Cache::open_memory());
        let mut card = card(0);
        let now = Timestamp::from_millis(50_000);

        let first = card.handle(CardAction::ToggleWishlist, &cart, now).unwrap();
        assert_eq!(first, CardOutcome::WishlistToggled { wishlisted: true });
        card.handle(CardAction::ToggleWishlist, &cart, now).unwrap();
        assert!(!card.is_wishlisted());
    }

    #[test]
    fn test_add_to_cart_confirmation_reverts() {
        let cart = CartStore::new(Cache::open_memory());
        let mut card = card(2);
        let now = Timestamp::from_millis(50_000);

        let outcome = card.handle(CardAction::AddToCart, &cart, now).unwrap();
        match outcome {
            CardOutcome::CartUpdated { lines, total_quantity } => {
                assert_eq!(lines.len(), 1);
                assert_eq!(total_quantity, 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        assert_eq!(card.add_to_cart_label(now + Duration::from_millis(1199)), ADDED_LABEL);
        assert_eq!(card.add_to_cart_label(now + ADDED_CONFIRMATION), ADD_TO_CART_LABEL);
    }

    #[test]
    fn test_open_detail_navigates() {
        let cart = CartStore::new(Cache::open_memory());
        let mut card = card(6);
        let outcome = card
            .handle(CardAction::OpenDetail, &cart, Timestamp::from_millis(50_000))
            .unwrap();
        assert_eq!(outcome, CardOutcome::Navigate("product-detail.html?id=7".to_string()));
        assert!(cart.get().is_empty());
    }

    #[test]
    fn test_quick_view_model() {
        let view = QuickView::from_product(&new_arrivals()[1]);
        assert_eq!(view.sku, "TC002");
        assert_eq!(view.category_label, "Women's");
        assert_eq!(view.discount_percent, Some(22));

        let watch = QuickView::from_product(&new_arrivals()[2]);
        assert_eq!(watch.discount_percent, None);
    }

    #[test]
    fn test_quick_view_add_to_cart() {
        let cart = CartStore::new(Cache::open_memory());
        let view = QuickView::from_product(&new_arrivals()[0]);
        view.add_to_cart(&cart, 2).unwrap();
        let lines = view.add_to_cart(&cart, 1).unwrap();
        assert_eq!(lines[0].qty, 3);
    }

    #[test]
    fn test_quick_view_zero_quantity_adds_one() {
        let cart = CartStore::new(Cache::open_memory());
        let view = QuickView::from_product(&new_arrivals()[0]);
        let lines = view.add_to_cart(&cart, 0).unwrap();
        assert_eq!(lines[0].qty, 1);
    }
}
