//! The persisted cart store.

use std::cell::RefCell;
use std::rc::Rc;

use tim_cache::Cache;
use tim_observability::StructuredLogger;

use crate::cart::{LineItem, MAX_QUANTITY_PER_ITEM};
use crate::error::CommerceError;
use crate::money::{Currency, Money};

/// Storage key shared by every page.
pub const CART_STORAGE_KEY: &str = "tim_cart_v1";

/// Something that displays the total number of items in the cart, such as
/// the header counter.
pub trait CartBadge {
    /// Show `count` as the cart total.
    fn set_count(&self, count: u32);
}

/// Cart store shared by every page, persisted under [`CART_STORAGE_KEY`].
///
/// The stored list is read lazily on first access and written back after
/// every mutation. Unreadable stored data counts as an empty cart and a
/// failed write leaves the in-memory list authoritative; both are logged,
/// never returned to the caller.
pub struct CartStore {
    cache: Cache,
    logger: StructuredLogger,
    badge: Option<Rc<dyn CartBadge>>,
    lines: RefCell<Option<Vec<LineItem>>>,
}

impl CartStore {
    /// Create a store over `cache`. Nothing is read until first access.
    pub fn new(cache: Cache) -> Self {
        Self {
            cache,
            logger: StructuredLogger::disabled(),
            badge: None,
            lines: RefCell::new(None),
        }
    }

    /// Attach a logger.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.child("cart");
        self
    }

    /// Attach the badge updated after every add.
    pub fn with_badge(mut self, badge: Rc<dyn CartBadge>) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Snapshot of the cart in first-added order.
    pub fn get(&self) -> Vec<LineItem> {
        self.with_lines(|lines| lines.clone())
    }

    /// Add `item`, merging into an existing line with the same id.
    ///
    /// Returns the updated cart. Quantities saturate at
    /// [`MAX_QUANTITY_PER_ITEM`]; a zero quantity is rejected.
    pub fn add(&self, item: LineItem) -> Result<Vec<LineItem>, CommerceError> {
        if item.qty == 0 {
            return Err(CommerceError::InvalidQuantity(0));
        }

        let id = item.id;
        let added = item.qty;
        let snapshot = self.with_lines(|lines| {
            match lines.iter_mut().find(|line| line.id == item.id) {
                Some(existing) => {
                    existing.qty = existing.qty.saturating_add(item.qty).min(MAX_QUANTITY_PER_ITEM);
                }
                None => {
                    let mut item = item;
                    item.qty = item.qty.min(MAX_QUANTITY_PER_ITEM);
                    lines.push(item);
                }
            }
            lines.clone()
        });

        self.persist(&snapshot);

        let total = total_quantity(&snapshot);
        if let Some(badge) = &self.badge {
            badge.set_count(total);
        }

        self.logger
            .debug_builder("added to cart")
            .field_i64("product_id", i64::from(id.get()))
            .field_i64("qty", i64::from(added))
            .field_i64("cart_total", i64::from(total))
            .emit();

        Ok(snapshot)
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u32 {
        self.with_lines(|lines| total_quantity(lines))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.with_lines(|lines| lines.len())
    }

    /// Sum of all line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let totals: Vec<Money> = self.with_lines(|lines| lines.iter().map(LineItem::line_total).collect());
        Money::sum(&totals, Currency::ZMW)
    }

    /// Push the current total to the badge, as a page does on load.
    pub fn sync_badge(&self) {
        let total = self.total_quantity();
        if let Some(badge) = &self.badge {
            badge.set_count(total);
        }
    }

    /// Forget the in-memory copy; the next access re-reads storage.
    pub fn reload(&self) {
        self.lines.replace(None);
    }

    fn with_lines<R>(&self, f: impl FnOnce(&mut Vec<LineItem>) -> R) -> R {
        let mut slot = self.lines.borrow_mut();
        let lines = slot.get_or_insert_with(|| self.load());
        f(lines)
    }

    fn load(&self) -> Vec<LineItem> {
        match self.cache.get::<Vec<LineItem>>(CART_STORAGE_KEY) {
            Ok(Some(mut lines)) => {
                let before = lines.len();
                lines.retain(|line| line.qty > 0);
                if lines.len() != before {
                    self.logger
                        .warn_builder("dropped empty cart lines")
                        .field_i64("dropped", (before - lines.len()) as i64)
                        .emit();
                }
                lines
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                self.logger
                    .warn_builder("stored cart unreadable, starting empty")
                    .field("key", CART_STORAGE_KEY)
                    .field("error", e.to_string())
                    .emit();
                Vec::new()
            }
        }
    }

    fn persist(&self, lines: &[LineItem]) {
        if let Err(e) = self.cache.set(CART_STORAGE_KEY, &lines) {
            self.logger
                .warn_builder("failed to persist cart")
                .field("key", CART_STORAGE_KEY)
                .field("error", e.to_string())
                .emit();
        }
    }
}

fn total_quantity(lines: &[LineItem]) -> u32 {
    lines.iter().fold(0u32, |acc, line| acc.saturating_add(line.qty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use std::cell::Cell;
    use std::sync::Arc;
    use tim_cache::{CacheError, KeyValueStore};
    use tim_observability::{LogCapture, LogFormat, LogLevel};

    fn item(id: u32, qty: u32) -> LineItem {
        LineItem::new(ProductId::new(id), format!("Item {}", id), Money::kwacha(100), qty)
    }

    fn captured() -> (StructuredLogger, LogCapture) {
        StructuredLogger::new("test")
            .with_format(LogFormat::Silent)
            .with_min_level(LogLevel::Debug)
            .with_capture()
    }

    #[derive(Default)]
    struct CountBadge(Cell<u32>);

    impl CartBadge for CountBadge {
        fn set_count(&self, count: u32) {
            self.0.set(count);
        }
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Ok(None)
        }
        fn set(&self, key: &str, _value: &str) -> Result<(), CacheError> {
            Err(CacheError::WriteRejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
        fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Ok(())
        }
        fn keys(&self) -> Result<Vec<String>, CacheError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_empty_cart_add() {
        let cart = CartStore::new(Cache::open_memory());
        assert!(cart.get().is_empty());

        let added = LineItem::new(ProductId::new(7), "X", Money::kwacha(100), 1);
        let lines = cart.add(added.clone()).unwrap();
        assert_eq!(lines, vec![added.clone()]);
        assert_eq!(cart.get(), vec![added]);
    }

    #[test]
    fn test_repeat_add_merges_line() {
        let cart = CartStore::new(Cache::open_memory());
        cart.add(item(1, 2)).unwrap();
        let lines = cart.add(item(1, 3)).unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].qty, 5);
    }

    #[test]
    fn test_insertion_order() {
        let cart = CartStore::new(Cache::open_memory());
        cart.add(item(3, 1)).unwrap();
        cart.add(item(1, 1)).unwrap();
        cart.add(item(3, 1)).unwrap();

        let ids: Vec<u32> = cart.get().iter().map(|l| l.id.get()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let cart = CartStore::new(Cache::open_memory());
        assert!(matches!(
            cart.add(item(1, 0)),
            Err(CommerceError::InvalidQuantity(0))
        ));
        assert!(cart.get().is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let cart = CartStore::new(Cache::open_memory());
        cart.add(item(1, MAX_QUANTITY_PER_ITEM)).unwrap();
        let lines = cart.add(item(1, 5)).unwrap();
        assert_eq!(lines[0].qty, MAX_QUANTITY_PER_ITEM);
    }

    #[test]
    fn test_persists_across_stores() {
        let cache = Cache::open_memory();
        CartStore::new(cache.clone()).add(item(2, 4)).unwrap();

        let other_page = CartStore::new(cache);
        assert_eq!(other_page.total_quantity(), 4);
    }

    #[test]
    fn test_malformed_storage_is_empty() {
        let cache = Cache::open_memory();
        cache.set_raw(CART_STORAGE_KEY, "{not json").unwrap();
        let (logger, capture) = captured();

        let cart = CartStore::new(cache).with_logger(logger);
        assert!(cart.get().is_empty());
        assert!(capture.contains("stored cart unreadable, starting empty"));

        cart.add(item(1, 1)).unwrap();
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_zero_qty_lines_dropped_on_load() {
        let cache = Cache::open_memory();
        cache
            .set_raw(
                CART_STORAGE_KEY,
                r#"[{"id":1,"name":"A","price":10,"qty":0},{"id":2,"name":"B","price":10,"qty":2}]"#,
            )
            .unwrap();

        let cart = CartStore::new(cache);
        assert_eq!(cart.get().len(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let (logger, capture) = captured();
        let cart = CartStore::new(Cache::from_store(Arc::new(ReadOnlyStore))).with_logger(logger);

        let lines = cart.add(item(1, 2)).unwrap();
        assert_eq!(lines[0].qty, 2);
        assert_eq!(cart.total_quantity(), 2);
        assert!(capture.contains("failed to persist cart"));
    }

    #[test]
    fn test_badge_updated_after_add() {
        let badge = Rc::new(CountBadge::default());
        let cart = CartStore::new(Cache::open_memory()).with_badge(badge.clone());

        cart.add(item(1, 2)).unwrap();
        cart.add(item(2, 3)).unwrap();
        assert_eq!(badge.0.get(), 5);
    }

    #[test]
    fn test_reload_rereads_storage() {
        let cache = Cache::open_memory();
        let cart = CartStore::new(cache.clone());
        cart.add(item(1, 1)).unwrap();

        CartStore::new(cache).add(item(1, 1)).unwrap();
        assert_eq!(cart.total_quantity(), 1);

        cart.reload();
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_subtotal() {
        let cart = CartStore::new(Cache::open_memory());
        cart.add(item(1, 2)).unwrap();
        cart.add(LineItem::new(ProductId::new(2), "B", Money::new(1999, Currency::ZMW), 1))
            .unwrap();
        assert_eq!(cart.subtotal().unwrap().display(), "K219.99");
    }
}
