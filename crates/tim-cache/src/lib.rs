//! Type-safe key-value persistence for the Tim Clothing storefront.
//!
//! Wraps a string key-value store (browser `localStorage`, a JSON file, or
//! memory) with automatic JSON serialization.
//!
//! # Example
//!
//! ```rust,ignore
//! use tim_cache::Cache;
//!
//! let cache = Cache::open_memory();
//! cache.set("tim_cart_v1", &lines)?;
//! let lines: Option<Vec<Line>> = cache.get("tim_cart_v1")?;
//! ```

mod error;
mod kv;
mod store;

#[cfg(target_arch = "wasm32")]
mod browser;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
