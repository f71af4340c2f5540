//! Shared slot where the active page publishes its product list.

use std::sync::{Arc, RwLock};

use crate::catalog::Product;
use crate::ids::ProductId;

/// The published product list, readable from other components.
///
/// The listing page calls [`publish`](Self::publish) once its catalog is
/// ready; the detail page resolves products with [`find`](Self::find) and
/// must tolerate the list not being there yet. Cloning shares the slot.
#[derive(Debug, Clone, Default)]
pub struct ProductRegistry {
    slot: Arc<RwLock<Option<Arc<[Product]>>>>,
}

impl ProductRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published list.
    pub fn publish(&self, products: Vec<Product>) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = Some(products.into());
        }
    }

    /// Drop the published list.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.write() {
            *slot = None;
        }
    }

    /// Whether any list has been published.
    pub fn is_published(&self) -> bool {
        self.slot.read().map(|s| s.is_some()).unwrap_or(false)
    }

    /// The published list, if any.
    pub fn products(&self) -> Option<Arc<[Product]>> {
        self.slot.read().ok().and_then(|s| s.clone())
    }

    /// Look up a product by id.
    pub fn find(&self, id: ProductId) -> Option<Product> {
        self.products()?.iter().find(|p| p.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::new_arrivals;

    #[test]
    fn test_find_before_publish() {
        let registry = ProductRegistry::new();
        assert!(!registry.is_published());
        assert!(registry.find(ProductId::new(1)).is_none());
    }

    #[test]
    fn test_publish_shared_between_clones() {
        let registry = ProductRegistry::new();
        let reader = registry.clone();
        registry.publish(new_arrivals());

        let found = reader.find(ProductId::new(7)).unwrap();
        assert_eq!(found.name, "Kabwe Tailored Blazer");
        assert!(reader.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_clear() {
        let registry = ProductRegistry::new();
        registry.publish(new_arrivals());
        registry.clear();
        assert!(registry.products().is_none());
    }
}
