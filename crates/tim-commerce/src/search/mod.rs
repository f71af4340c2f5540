//! Search module.
//!
//! Contains the products-page filter state, the catalog view derived from
//! it, and the search input debouncer.

mod debounce;
mod query;
mod view;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use query::{
    product_id_from_query, CategoryFilter, FilterAction, FilterState, SortKey, DEFAULT_PAGE_SIZE,
    PRODUCTS_PAGE,
};
pub use view::{
    filter_and_sort, ActiveFilter, ActiveFilterKind, CatalogView, Pagination, ViewStatus,
    ViewUpdate,
};
