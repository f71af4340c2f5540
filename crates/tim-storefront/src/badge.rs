//! Header cart badge.

use std::cell::Cell;

use tim_commerce::cart::CartBadge;

/// The header cart counter.
#[derive(Debug, Default)]
pub struct HeaderBadge {
    count: Cell<u32>,
}

impl HeaderBadge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u32 {
        self.count.get()
    }

    pub fn render(&self) -> String {
        format!(r#"<span class="cart-count">{}</span>"#, self.count.get())
    }
}

impl CartBadge for HeaderBadge {
    fn set_count(&self, count: u32) {
        self.count.set(count);
    }
}
