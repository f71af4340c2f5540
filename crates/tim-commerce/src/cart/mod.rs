//! Shopping cart module.
//!
//! Contains the persisted cart store, its line items and the header badge
//! hook.

mod line;
mod store;

pub use line::{LineItem, MAX_QUANTITY_PER_ITEM};
pub use store::{CartBadge, CartStore, CART_STORAGE_KEY};
