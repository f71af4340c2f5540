//! Storefront domain types and state machines for Tim Clothing Co.
//!
//! Every interactive piece of the storefront is modelled as plain state plus
//! explicit transitions, so it can be driven by a browser shell, the `tim`
//! CLI, or a test:
//!
//! - **Money**: Kwacha amounts and the currency formatter
//! - **Catalog**: Products, the new-arrivals list, a seedable generator and
//!   the registry pages publish their product list to
//! - **Cart**: The persisted cart store and header badge hook
//! - **Search**: Filter state, the catalog view and the search debouncer
//! - **Card**: Product card actions and the quick view model
//! - **FAQ**: Accordion with category and search filtering
//! - **Contact**: Business hours and the open/closed status
//! - **Newsletter**: Signup form with simulated subscription
//! - **Lookup**: Product detail resolution with bounded retry
//!
//! # Example
//!
//! ```rust,ignore
//! use tim_commerce::prelude::*;
//!
//! let cart = CartStore::new(Cache::open_memory());
//! let product = &new_arrivals()[0];
//! cart.add(LineItem::from_product(product, 2))?;
//! println!("Subtotal: {}", cart.subtotal().display());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod card;
pub mod cart;
pub mod catalog;
pub mod contact;
pub mod faq;
pub mod lookup;
pub mod newsletter;
pub mod search;
pub mod timer;

pub use error::{CommerceError, LookupError, NewsletterError};
pub use ids::ProductId;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CommerceError, LookupError, NewsletterError};
    pub use crate::ids::ProductId;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        new_arrivals, Badge, CatalogGenerator, Category, Product, ProductRegistry,
    };

    // Cart
    pub use crate::cart::{CartBadge, CartStore, LineItem, CART_STORAGE_KEY};

    // Search
    pub use crate::search::{
        product_id_from_query, ActiveFilter, CatalogView, CategoryFilter, Debouncer,
        FilterAction, FilterState, SortKey, ViewStatus,
    };

    // Card
    pub use crate::card::{CardAction, CardOutcome, ProductCard, QuickView};

    // FAQ
    pub use crate::faq::{FaqAction, FaqEntry, FaqItem, FaqKey, FaqState, FaqTransition};

    // Contact, newsletter, lookup
    pub use crate::contact::{BusinessHours, HoursWindow, NextOpening, StoreStatus};
    pub use crate::lookup::{resolve_product, Backoff, LookupPolicy};
    pub use crate::newsletter::{NewsletterForm, NewsletterStatus, Subscription, SubscriptionOutcome};
    pub use crate::timer::{Sleeper, Timestamp};

    pub use tim_cache::Cache;
}
