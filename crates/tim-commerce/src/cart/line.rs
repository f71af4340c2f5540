//! Cart line items.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::{self, Money};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// One cart line, keyed by product id.
///
/// Name and price are snapshots taken when the product was first added.
/// Persisted as `{"id":7,"name":"X","price":100,"qty":1}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product this line refers to.
    pub id: ProductId,
    /// Product name at the time of adding.
    pub name: String,
    /// Unit price at the time of adding.
    #[serde(with = "money::as_major")]
    pub price: Money,
    /// Quantity, always positive in a stored cart.
    pub qty: u32,
}

impl LineItem {
    /// Create a line item.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, qty: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            qty,
        }
    }

    /// Snapshot a catalog product.
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self::new(product.id, product.name.clone(), product.price, qty)
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.qty)
    }
}
