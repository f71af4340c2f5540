//! The product record shown on cards, quick views and the detail page.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::ids::ProductId;
use crate::money::{self, Money};

/// Merchandising badge shown over the product image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    New,
    Sale,
}

impl Badge {
    /// CSS modifier class (`new`, `sale`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Badge::New => "new",
            Badge::Sale => "sale",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Badge::New => "New",
            Badge::Sale => "Sale",
        }
    }
}

/// A catalog product.
///
/// Serialized with the camelCase field names and plain-number prices used by
/// the published product list, e.g. `{"id":1,"price":1200,"originalPrice":1500}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Department.
    pub category: Category,
    /// Current selling price.
    #[serde(with = "money::as_major")]
    pub price: Money,
    /// Price before the discount; present only when on sale.
    #[serde(with = "money::as_major::option", default)]
    pub original_price: Option<Money>,
    /// Image URL.
    pub image: String,
    /// Average rating in `[0, 5]`.
    pub rating: f64,
    /// Number of reviews.
    pub review_count: u32,
    /// Optional badge.
    #[serde(default)]
    pub badge: Option<Badge>,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Whether the product can be ordered.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create a product with no discount, rating or badge.
    pub fn new(id: ProductId, name: impl Into<String>, category: Category, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            price,
            original_price: None,
            image: String::new(),
            rating: 0.0,
            review_count: 0,
            badge: None,
            description: String::new(),
            in_stock: true,
        }
    }

    /// Set the pre-discount price.
    pub fn with_original_price(mut self, original: Money) -> Self {
        self.original_price = Some(original);
        self
    }

    /// Set rating (clamped to `[0, 5]`) and review count.
    pub fn with_rating(mut self, rating: f64, review_count: u32) -> Self {
        self.rating = clamp_rating(rating);
        self.review_count = review_count;
        self
    }

    /// Set the badge.
    pub fn with_badge(mut self, badge: Badge) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Check if the product is discounted.
    pub fn is_on_sale(&self) -> bool {
        self.discount_percent().is_some()
    }

    /// Whole-number discount, `round((original - price) / original * 100)`.
    ///
    /// Returns `None` when there is no original price or the rounded
    /// discount is not positive.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original.currency != self.price.currency || original.amount_cents <= 0 {
            return None;
        }
        let savings = original.amount_cents.saturating_sub(self.price.amount_cents) as f64;
        let percent = (savings / original.amount_cents as f64 * 100.0).round();
        if percent > 0.0 {
            Some(percent as u32)
        } else {
            None
        }
    }

    /// Case-insensitive substring match on name, description or category
    /// slug. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self.category.slug().contains(&term)
    }

    /// Link to the detail page.
    pub fn detail_url(&self) -> String {
        format!("product-detail.html?id={}", self.id)
    }
}

/// Clamp to `[0, 5]`, mapping NaN to zero.
pub(crate) fn clamp_rating(rating: f64) -> f64 {
    if rating.is_nan() {
        0.0
    } else {
        rating.clamp(0.0, 5.0)
    }
}
